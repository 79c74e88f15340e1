//! Where generated notes go: something that makes them audible and something that shows them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use crate::core::note::GeneratedNote;
use crate::error::{Result, TrainerError};

/// Length of a played note, written the way sequencers write it ("8n" is an eighth note).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteDuration {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteDuration {
    pub const ALL: [NoteDuration; 5] = [
        NoteDuration::Whole,
        NoteDuration::Half,
        NoteDuration::Quarter,
        NoteDuration::Eighth,
        NoteDuration::Sixteenth,
    ];

    /// Length in seconds, with a quarter note lasting one beat.
    pub fn seconds(&self, tempo_bpm: f32) -> f32 {
        let beat = 60.0 / tempo_bpm;
        match self {
            NoteDuration::Whole => beat * 4.0,
            NoteDuration::Half => beat * 2.0,
            NoteDuration::Quarter => beat,
            NoteDuration::Eighth => beat / 2.0,
            NoteDuration::Sixteenth => beat / 4.0,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            NoteDuration::Whole => "1n",
            NoteDuration::Half => "2n",
            NoteDuration::Quarter => "4n",
            NoteDuration::Eighth => "8n",
            NoteDuration::Sixteenth => "16n",
        }
    }
}

impl Default for NoteDuration {
    fn default() -> Self {
        NoteDuration::Eighth
    }
}

impl fmt::Display for NoteDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for NoteDuration {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self> {
        NoteDuration::ALL
            .iter()
            .copied()
            .find(|d| d.token() == s.trim())
            .ok_or_else(|| TrainerError::InvalidArgument(format!("unknown duration '{}'", s)))
    }
}

/// Makes a pitch audible. Implementations own their audio resources.
pub trait PlaybackSink: Send + Sync {
    fn play(&self, pitch: i32, duration: NoteDuration) -> Result<()>;
}

/// Shows the current note to the user.
pub trait DisplaySink: Send + Sync {
    fn show(&self, note: &GeneratedNote);
}

/// Display sink that keeps the most recent note until the next one replaces it.
#[derive(Clone, Default)]
pub struct NoteBoard {
    current: Arc<RwLock<Option<GeneratedNote>>>,
    rounds: Arc<AtomicU64>,
}

impl NoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<GeneratedNote> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        }
    }

    /// Number of notes shown so far; changes even when the same note repeats.
    pub fn round(&self) -> u64 {
        self.rounds.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.current.write() {
            *guard = None;
        }
    }
}

impl DisplaySink for NoteBoard {
    fn show(&self, note: &GeneratedNote) {
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(note.clone());
        }
        self.rounds.fetch_add(1, Ordering::AcqRel);
    }
}

/// Display sink that writes each note to the log.
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn show(&self, note: &GeneratedNote) {
        log::info!(
            "Note {} (string {} {}, fret {})",
            note.display_name,
            note.string_index,
            note.string_label,
            note.fret_number
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pitch: i32) -> GeneratedNote {
        GeneratedNote {
            pitch_number: pitch,
            display_name: crate::core::note::pitch_name(pitch),
            string_label: "E4".to_string(),
            string_index: 1,
            fret_number: pitch - 64,
        }
    }

    #[test]
    fn test_duration_seconds_at_default_tempo() {
        assert_eq!(NoteDuration::Eighth.seconds(120.0), 0.25);
        assert_eq!(NoteDuration::Quarter.seconds(120.0), 0.5);
        assert_eq!(NoteDuration::Whole.seconds(60.0), 4.0);
    }

    #[test]
    fn test_duration_tokens() {
        for duration in NoteDuration::ALL {
            assert_eq!(duration.token().parse::<NoteDuration>().unwrap(), duration);
        }
        assert_eq!(NoteDuration::default().to_string(), "8n");
        assert!("3n".parse::<NoteDuration>().is_err());
    }

    #[test]
    fn test_note_board_keeps_last_note() {
        let board = NoteBoard::new();
        assert!(board.current().is_none());

        board.show(&note(64));
        board.show(&note(66));
        board.show(&note(66));
        assert_eq!(board.round(), 3);
        assert_eq!(board.current().unwrap().display_name, "F#4");

        let shared = board.clone();
        assert_eq!(shared.current().unwrap().pitch_number, 66);

        board.clear();
        assert!(shared.current().is_none());
    }
}
