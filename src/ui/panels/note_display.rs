use egui::{RichText, Ui};
use crate::core::note::GeneratedNote;
use crate::utils::helpers::format_pitch_frequency;

pub struct NoteDisplay;

impl NoteDisplay {
    /// Draw the current note. Returns true when the user asked to hear it again.
    pub fn show(ui: &mut Ui, note: Option<&GeneratedNote>, reveal: bool, answer_shown: &mut bool) -> bool {
        let mut replay = false;

        ui.vertical_centered(|ui| {
            let Some(note) = note else {
                ui.label(RichText::new("Press Start").size(48.0).weak());
                ui.label("A note will appear after one interval.");
                return;
            };

            let name = if reveal || *answer_shown { note.display_name.as_str() } else { "?" };
            ui.label(RichText::new(name).size(72.0).strong());
            ui.label(
                RichText::new(format!(
                    "String {} ({})  ·  Fret {}",
                    note.string_index, note.string_label, note.fret_number
                ))
                .size(20.0),
            );

            ui.horizontal(|ui| {
                if ui.button("🔁 Replay").clicked() {
                    replay = true;
                }
                if !reveal && !*answer_shown && ui.button("Show answer").clicked() {
                    *answer_shown = true;
                }
            });

            if reveal || *answer_shown {
                ui.label(RichText::new(format_pitch_frequency(note.pitch_number)).weak());
            }
        });

        replay
    }
}
