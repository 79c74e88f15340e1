//! Random note selection over a tuning table.
//!
//! `generate` is the pure draw; `NoteGenerator` bundles a tuning, a fret ceiling and a
//! random source so the scheduler can ask for "the next note" without knowing either.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::core::note::{pitch_name, GeneratedNote};
use crate::core::tuning::{standard_tuning, FretRange, StringDefinition};
use crate::error::{Result, TrainerError};

/// Draw a random string and a random fret in `0..=ceiling`.
///
/// Both draws are uniform. The returned pitch is always `string.base_pitch + fret`.
pub fn generate<R: Rng + ?Sized>(
    tuning: &[StringDefinition],
    ceiling: i32,
    rng: &mut R,
) -> Result<GeneratedNote> {
    if tuning.is_empty() {
        return Err(TrainerError::InvalidArgument(
            "tuning must contain at least one string".to_string(),
        ));
    }
    if ceiling < 0 {
        return Err(TrainerError::InvalidArgument(format!(
            "fret ceiling must not be negative (got {})",
            ceiling
        )));
    }

    let string = &tuning[rng.random_range(0..tuning.len())];
    let fret = rng.random_range(0..=ceiling);
    let pitch = string.base_pitch + fret;

    Ok(GeneratedNote {
        pitch_number: pitch,
        display_name: pitch_name(pitch),
        string_label: string.label.clone(),
        string_index: string.string_index,
        fret_number: fret,
    })
}

/// Owns everything needed to produce the next exercise note.
pub struct NoteGenerator<R = StdRng> {
    tuning: Vec<StringDefinition>,
    range: FretRange,
    rng: R,
}

impl NoteGenerator<StdRng> {
    /// Standard tuning seeded from the operating system.
    pub fn standard(range: FretRange) -> Self {
        Self {
            tuning: standard_tuning(),
            range,
            rng: StdRng::from_os_rng(),
        }
    }
}

impl<R: Rng> NoteGenerator<R> {
    pub fn new(tuning: Vec<StringDefinition>, range: FretRange, rng: R) -> Result<Self> {
        if tuning.is_empty() {
            return Err(TrainerError::InvalidArgument(
                "tuning must contain at least one string".to_string(),
            ));
        }
        Ok(Self { tuning, range, rng })
    }

    pub fn next_note(&mut self) -> Result<GeneratedNote> {
        generate(&self.tuning, self.range.ceiling(), &mut self.rng)
    }

    pub fn set_range(&mut self, range: FretRange) {
        self.range = range;
    }

    pub fn range(&self) -> FretRange {
        self.range
    }

    pub fn tuning(&self) -> &[StringDefinition] {
        &self.tuning
    }
}
