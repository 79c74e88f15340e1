mod audio;
mod note_display;
mod practice;

pub use audio::{AudioAction, AudioPanel};
pub use note_display::NoteDisplay;
pub use practice::{PracticeAction, PracticePanel};
