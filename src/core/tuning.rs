use serde::{Deserialize, Serialize};

/// Highest fret the trainer will ever ask for.
pub const MAX_FRET: i32 = 24;

/// One open string of the instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringDefinition {
    pub label: String,
    /// Pitch number of the open string (MIDI numbering, 60 = C4).
    pub base_pitch: i32,
    /// 1 is the thinnest string, 6 the thickest.
    pub string_index: u8,
}

impl StringDefinition {
    pub fn new(label: impl Into<String>, base_pitch: i32, string_index: u8) -> Self {
        Self {
            label: label.into(),
            base_pitch,
            string_index,
        }
    }
}

/// Standard guitar tuning, high E first.
pub fn standard_tuning() -> Vec<StringDefinition> {
    vec![
        StringDefinition::new("E4", 64, 1),
        StringDefinition::new("B3", 59, 2),
        StringDefinition::new("G3", 55, 3),
        StringDefinition::new("D3", 50, 4),
        StringDefinition::new("A2", 45, 5),
        StringDefinition::new("E2", 40, 6),
    ]
}

/// Highest fret included in the random draw, always within `0..=MAX_FRET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct FretRange {
    ceiling: i32,
}

impl FretRange {
    /// Build a range from user input, clamping into `0..=MAX_FRET`.
    pub fn clamped(ceiling: i32) -> Self {
        Self {
            ceiling: ceiling.clamp(0, MAX_FRET),
        }
    }

    pub fn ceiling(&self) -> i32 {
        self.ceiling
    }
}

impl Default for FretRange {
    fn default() -> Self {
        Self { ceiling: 12 }
    }
}

impl From<i32> for FretRange {
    fn from(value: i32) -> Self {
        Self::clamped(value)
    }
}

impl From<FretRange> for i32 {
    fn from(range: FretRange) -> Self {
        range.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tuning_layout() {
        let tuning = standard_tuning();
        assert_eq!(tuning.len(), 6);
        let pitches: Vec<i32> = tuning.iter().map(|s| s.base_pitch).collect();
        assert_eq!(pitches, vec![64, 59, 55, 50, 45, 40]);
        for (i, string) in tuning.iter().enumerate() {
            assert_eq!(string.string_index as usize, i + 1);
        }
    }

    #[test]
    fn test_fret_range_clamps_input() {
        assert_eq!(FretRange::clamped(-3).ceiling(), 0);
        assert_eq!(FretRange::clamped(7).ceiling(), 7);
        assert_eq!(FretRange::clamped(99).ceiling(), MAX_FRET);
    }

    #[test]
    fn test_fret_range_deserializes_clamped() {
        let range: FretRange = serde_json::from_str("40").unwrap();
        assert_eq!(range.ceiling(), 24);
        assert_eq!(serde_json::to_string(&FretRange::clamped(5)).unwrap(), "5");
    }
}
