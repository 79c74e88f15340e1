pub mod audio;
pub mod generator;
pub mod note;
pub mod scheduler;
pub mod sink;
pub mod tuning;

pub use generator::{generate, NoteGenerator};
pub use note::GeneratedNote;
pub use scheduler::PracticeScheduler;
