use serde::{Deserialize, Serialize};
use crate::error::{Result, TrainerError};

const OCTAVES: std::ops::RangeInclusive<i32> = -1..=9;
const PITCHES: std::ops::RangeInclusive<i32> = 0..=127;

const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A note picked for the current exercise round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedNote {
    pub pitch_number: i32,
    pub display_name: String,
    pub string_label: String,
    pub string_index: u8,
    pub fret_number: i32,
}

/// Name a pitch number with its octave, e.g. 64 -> "E4".
pub fn pitch_name(pitch: i32) -> String {
    let class = pitch.rem_euclid(12) as usize;
    let octave = pitch.div_euclid(12) - 1;
    format!("{}{}", PITCH_CLASS_NAMES[class], octave)
}

/// Parse a note name such as "A#5", "Bb3" or "C-1" back into a pitch number.
pub fn pitch_from_name(name: &str) -> Result<i32> {
    let invalid = || TrainerError::InvalidArgument(format!("'{}' is not a note name", name));

    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    let letter = chars.next().ok_or_else(invalid)?;
    let semitone = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(invalid()),
    };

    let rest = chars.as_str();
    let (alter, octave_text) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest),
    };

    let octave: i32 = octave_text.parse().map_err(|_| invalid())?;
    if !OCTAVES.contains(&octave) {
        return Err(invalid());
    }

    let pitch = (octave + 1) * 12 + semitone + alter;
    if !PITCHES.contains(&pitch) {
        return Err(invalid());
    }
    Ok(pitch)
}

/// Convert a pitch number to its frequency in Hz (A4 = 69 = 440 Hz)
pub fn pitch_to_frequency(pitch: i32) -> f32 {
    440.0 * 2.0f32.powf((pitch as f32 - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_name_reference_points() {
        assert_eq!(pitch_name(64), "E4");
        assert_eq!(pitch_name(65), "F4");
        assert_eq!(pitch_name(60), "C4");
        assert_eq!(pitch_name(40), "E2");
        assert_eq!(pitch_name(82), "A#5");
        assert_eq!(pitch_name(0), "C-1");
    }

    #[test]
    fn test_pitch_from_name() {
        assert_eq!(pitch_from_name("E4").unwrap(), 64);
        assert_eq!(pitch_from_name("A#5").unwrap(), 82);
        assert_eq!(pitch_from_name("Bb3").unwrap(), 58);
        assert_eq!(pitch_from_name(" c-1 ").unwrap(), 0);
        assert_eq!(pitch_from_name("G9").unwrap(), 127);
    }

    #[test]
    fn test_pitch_from_name_rejects_garbage() {
        for text in ["", "H4", "E", "E#x", "4E", "C10", "Cb-1", "G#9", "C2147483647", "C-999999999"] {
            assert!(
                matches!(pitch_from_name(text), Err(TrainerError::InvalidArgument(_))),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_names_survive_every_fretboard_pitch() {
        for pitch in 40..=88 {
            assert_eq!(pitch_from_name(&pitch_name(pitch)).unwrap(), pitch);
        }
    }

    #[test]
    fn test_pitch_to_frequency() {
        assert!((pitch_to_frequency(69) - 440.0).abs() < 1e-3);
        assert!((pitch_to_frequency(81) - 880.0).abs() < 1e-2);
        assert!((pitch_to_frequency(64) - 329.63).abs() < 0.01);
    }
}
