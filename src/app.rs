use eframe::egui;
use std::sync::{Arc, RwLock};
use crate::core::audio::{AudioOutput, NoAudio};
use crate::core::generator::NoteGenerator;
use crate::core::note::{pitch_from_name, GeneratedNote};
use crate::core::scheduler::{clamp_interval_ms, PracticeScheduler};
use crate::core::sink::{DisplaySink, LogDisplay, NoteBoard, NoteDuration, PlaybackSink};
use crate::core::tuning::FretRange;
use crate::settings::AppSettings;
use crate::ui::panels::{AudioAction, AudioPanel, NoteDisplay, PracticeAction, PracticePanel};

// Main app state
pub struct TrainerApp {
    scheduler: PracticeScheduler,
    board: NoteBoard,
    playback: Arc<dyn PlaybackSink>,
    volume: Arc<RwLock<f32>>,
    _audio: Option<AudioOutput>,
    device_name: Option<String>,
    note_duration: Arc<RwLock<NoteDuration>>,
    settings: AppSettings,
    egui_ctx: egui::Context,
    note_name: String,
    seen_round: u64,
    answer_shown: bool,
    status: Option<String>,
}

impl eframe::App for TrainerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let round = self.board.round();
        if round != self.seen_round {
            self.seen_round = round;
            self.answer_shown = false;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Guitar Note Trainer");
            ui.separator();

            let current = self.board.current();
            if NoteDisplay::show(ui, current.as_ref(), self.settings.reveal_answer, &mut self.answer_shown) {
                self.replay(current.as_ref());
            }

            ui.add_space(12.0);
            ui.separator();

            let actions = PracticePanel::show(ui, self.scheduler.is_running(), &self.settings, &mut self.note_name);
            for action in actions {
                self.apply_practice_action(action);
            }

            ui.separator();

            let actions = AudioPanel::show(ui, &self.settings, self.device_name.as_deref());
            for action in actions {
                self.apply_audio_action(action);
            }

            if let Some(status) = &self.status {
                ui.add_space(8.0);
                ui.colored_label(egui::Color32::LIGHT_RED, status);
            }
        });
    }
}

impl TrainerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load_or_default();
        log::info!("Loaded settings: {:?}", settings);

        let volume = Arc::new(RwLock::new(settings.volume));

        let (audio, playback): (Option<AudioOutput>, Arc<dyn PlaybackSink>) = match AudioOutput::open() {
            Ok(output) => {
                let playback = output.playback(settings.tempo_bpm, Arc::clone(&volume));
                (Some(output), Arc::new(playback))
            },
            Err(e) => {
                log::error!("Audio unavailable, notes will be shown silently: {:#}", e);
                (None, Arc::new(NoAudio))
            },
        };

        let mut scheduler = PracticeScheduler::new(NoteGenerator::standard(settings.fret_range));
        if let Err(e) = scheduler.set_interval(settings.interval_ms) {
            log::warn!("Ignoring stored interval: {}", e);
        }

        TrainerApp {
            scheduler,
            board: NoteBoard::new(),
            playback,
            volume,
            device_name: audio.as_ref().map(|a| a.device_name.clone()),
            _audio: audio,
            note_duration: Arc::new(RwLock::new(settings.note_duration)),
            settings,
            egui_ctx: cc.egui_ctx.clone(),
            note_name: String::new(),
            seen_round: 0,
            answer_shown: false,
            status: None,
        }
    }

    /// The per-tick callback: sound the note, then show it everywhere.
    fn note_callback(&self) -> impl Fn(GeneratedNote) + Send + Sync + 'static {
        let playback = Arc::clone(&self.playback);
        let displays: Vec<Arc<dyn DisplaySink>> = vec![Arc::new(self.board.clone()), Arc::new(LogDisplay)];
        let note_duration = Arc::clone(&self.note_duration);
        let ctx = self.egui_ctx.clone();

        move |note: GeneratedNote| {
            let duration = note_duration.read().map(|d| *d).unwrap_or_default();
            if let Err(e) = playback.play(note.pitch_number, duration) {
                log::warn!("Playback failed for {}: {}", note.display_name, e);
            }
            for display in &displays {
                display.show(&note);
            }
            ctx.request_repaint();
        }
    }

    fn apply_practice_action(&mut self, action: PracticeAction) {
        match action {
            PracticeAction::Toggle => {
                if self.scheduler.is_running() {
                    self.scheduler.stop();
                } else {
                    let callback = self.note_callback();
                    let result = self.scheduler.start(self.settings.interval_ms, callback);
                    self.report(result);
                }
            },
            PracticeAction::IntervalChanged(interval) => {
                let interval = clamp_interval_ms(interval.min(i64::MAX as u64) as i64);
                self.settings.interval_ms = interval;
                let result = self.scheduler.set_interval(interval);
                self.report(result);
                self.save_settings();
            },
            PracticeAction::FretCeilingChanged(ceiling) => {
                let range = FretRange::clamped(ceiling);
                self.settings.fret_range = range;
                self.scheduler.set_fret_range(range);
                self.save_settings();
            },
            PracticeAction::RevealChanged(reveal) => {
                self.settings.reveal_answer = reveal;
                self.save_settings();
            },
            PracticeAction::PlayNamed(name) => {
                let result = pitch_from_name(&name).and_then(|pitch| self.playback.play(pitch, self.current_duration()));
                self.report(result);
            },
        }
    }

    fn apply_audio_action(&mut self, action: AudioAction) {
        match action {
            AudioAction::VolumeChanged(volume) => {
                self.settings.volume = volume.clamp(0.0, 1.0);
                if let Ok(mut current) = self.volume.write() {
                    *current = self.settings.volume;
                }
            },
            AudioAction::DurationChanged(duration) => {
                self.settings.note_duration = duration;
                if let Ok(mut current) = self.note_duration.write() {
                    *current = duration;
                }
            },
        }
        self.save_settings();
    }

    fn replay(&mut self, note: Option<&GeneratedNote>) {
        if let Some(note) = note {
            let result = self.playback.play(note.pitch_number, self.current_duration());
            self.report(result);
        }
    }

    fn current_duration(&self) -> NoteDuration {
        self.note_duration.read().map(|d| *d).unwrap_or_default()
    }

    fn report(&mut self, result: crate::error::Result<()>) {
        match result {
            Ok(()) => self.status = None,
            Err(e) => {
                log::warn!("{}", e);
                self.status = Some(e.to_string());
            },
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save() {
            log::warn!("Failed to save settings: {:#}", e);
        }
    }
}
