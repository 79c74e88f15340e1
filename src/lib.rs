//! Guitar fretboard ear trainer.
//!
//! Every few seconds a random note is drawn from the fretboard (a string from standard
//! tuning plus a fret up to a configurable ceiling), played as a sine tone,
//! and shown with its name, string and fret.

pub mod app;
pub mod core;
pub mod error;
pub mod settings;
pub mod ui;
pub mod utils;

pub use crate::core::note::{pitch_name, GeneratedNote};
pub use crate::core::scheduler::PracticeScheduler;
pub use error::TrainerError;
