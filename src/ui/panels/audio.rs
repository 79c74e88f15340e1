use egui::Ui;
use crate::core::sink::NoteDuration;
use crate::settings::AppSettings;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioAction {
    VolumeChanged(f32),
    DurationChanged(NoteDuration),
}

/// Volume and note length controls.
pub struct AudioPanel;

impl AudioPanel {
    pub fn show(ui: &mut Ui, settings: &AppSettings, device_name: Option<&str>) -> Vec<AudioAction> {
        let mut actions = Vec::new();

        ui.collapsing("Sound", |ui| {
            match device_name {
                Some(name) => ui.label(format!("Output: {}", name)),
                None => ui.colored_label(egui::Color32::LIGHT_RED, "No audio output device"),
            };

            let mut volume = settings.volume;
            if ui.add(egui::Slider::new(&mut volume, 0.0..=1.0).text("Volume")).changed() {
                actions.push(AudioAction::VolumeChanged(volume));
            }

            let mut duration = settings.note_duration;
            egui::ComboBox::from_label("Note length")
                .selected_text(duration.token())
                .show_ui(ui, |ui| {
                    for option in NoteDuration::ALL {
                        if ui.selectable_value(&mut duration, option, option.token()).changed() {
                            actions.push(AudioAction::DurationChanged(option));
                        }
                    }
                });
        });

        actions
    }
}
