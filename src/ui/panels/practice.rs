use egui::Ui;
use crate::core::scheduler::{MAX_INTERVAL_MS, MIN_INTERVAL_MS};
use crate::core::tuning::MAX_FRET;
use crate::settings::AppSettings;
use crate::utils::helpers::format_interval;

/// Something the user asked the practice loop to do this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PracticeAction {
    Toggle,
    IntervalChanged(u64),
    FretCeilingChanged(i32),
    RevealChanged(bool),
    PlayNamed(String),
}

/// Start/stop toggle, interval and fret ceiling controls, and a "play note by name" row.
pub struct PracticePanel;

impl PracticePanel {
    pub fn show(ui: &mut Ui, running: bool, settings: &AppSettings, note_name: &mut String) -> Vec<PracticeAction> {
        let mut actions = Vec::new();

        ui.heading("Practice");

        let label = if running { "⏸ Stop" } else { "▶ Start" };
        if ui.add_sized([120.0, 32.0], egui::Button::new(label)).clicked() {
            actions.push(PracticeAction::Toggle);
        }

        ui.horizontal(|ui| {
            ui.label("Interval:");
            let mut interval = settings.interval_ms;
            let response = ui.add(
                egui::DragValue::new(&mut interval)
                    .range(MIN_INTERVAL_MS..=MAX_INTERVAL_MS)
                    .speed(10.0)
                    .suffix(" ms"),
            );
            if response.changed() {
                actions.push(PracticeAction::IntervalChanged(interval));
            }
            ui.label(format!("(one note every {})", format_interval(interval)));
        });

        let mut ceiling = settings.fret_range.ceiling();
        if ui.add(egui::Slider::new(&mut ceiling, 0..=MAX_FRET).text("Highest fret")).changed() {
            actions.push(PracticeAction::FretCeilingChanged(ceiling));
        }

        let mut reveal = settings.reveal_answer;
        if ui.checkbox(&mut reveal, "Show note names immediately").changed() {
            actions.push(PracticeAction::RevealChanged(reveal));
        }

        ui.horizontal(|ui| {
            ui.label("Play note:");
            let response = ui.add(egui::TextEdit::singleline(note_name).desired_width(60.0).hint_text("A#5"));
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Play").clicked() || submitted {
                actions.push(PracticeAction::PlayNamed(note_name.clone()));
            }
        });

        actions
    }
}
