use fret_trainer::core::generator::NoteGenerator;
use fret_trainer::core::scheduler::{PracticeScheduler, SchedulerState};
use fret_trainer::core::tuning::{standard_tuning, FretRange};
use fret_trainer::{GeneratedNote, TrainerError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::sleep;
use std::time::{Duration, Instant};

fn scheduler(ceiling: i32) -> PracticeScheduler {
    let generator = NoteGenerator::new(
        standard_tuning(),
        FretRange::clamped(ceiling),
        StdRng::seed_from_u64(2024),
    )
    .unwrap();
    PracticeScheduler::new(generator)
}

fn recorder() -> (Arc<Mutex<Vec<(Instant, GeneratedNote)>>>, impl Fn(GeneratedNote) + Send + Sync + 'static) {
    let notes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notes);
    (notes, move |note| sink.lock().unwrap().push((Instant::now(), note)))
}

fn count(notes: &Arc<Mutex<Vec<(Instant, GeneratedNote)>>>) -> usize {
    notes.lock().unwrap().len()
}

#[test]
fn test_first_note_arrives_after_one_interval() {
    let mut scheduler = scheduler(12);
    let (notes, on_note) = recorder();

    let started = Instant::now();
    scheduler.start(500, on_note).unwrap();
    assert_eq!(scheduler.state(), SchedulerState { is_active: true, interval_ms: 500 });

    sleep(Duration::from_millis(300));
    assert_eq!(count(&notes), 0);

    sleep(Duration::from_millis(950));
    scheduler.stop();

    let notes = notes.lock().unwrap();
    assert_eq!(notes.len(), 2);
    assert!(notes[0].0.duration_since(started) >= Duration::from_millis(500));
    assert!(notes[1].0.duration_since(started) >= Duration::from_millis(1000));
}

#[test]
fn test_no_notes_after_stop() {
    let mut scheduler = scheduler(12);
    let (notes, on_note) = recorder();

    scheduler.start(500, on_note).unwrap();
    sleep(Duration::from_millis(700));
    scheduler.stop();
    let seen = count(&notes);
    assert_eq!(seen, 1);

    sleep(Duration::from_millis(900));
    assert_eq!(count(&notes), seen);

    scheduler.stop();
    assert!(!scheduler.is_running());
}

#[test]
fn test_stop_waits_for_note_in_flight() {
    let mut scheduler = scheduler(12);
    let finished = Arc::new(AtomicBool::new(false));
    let calls = Arc::new(Mutex::new(0));

    let flag = Arc::clone(&finished);
    let counter = Arc::clone(&calls);
    scheduler
        .start(500, move |_| {
            *counter.lock().unwrap() += 1;
            sleep(Duration::from_millis(300));
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();

    sleep(Duration::from_millis(650));
    scheduler.stop();
    assert!(finished.load(Ordering::SeqCst));

    sleep(Duration::from_millis(600));
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn test_set_interval_rearms_without_double_firing() {
    let mut scheduler = scheduler(12);
    let (notes, on_note) = recorder();

    scheduler.start(1_000, on_note).unwrap();
    sleep(Duration::from_millis(300));
    scheduler.set_interval(500).unwrap();
    assert!(scheduler.is_running());
    assert_eq!(scheduler.interval_ms(), 500);

    // Re-armed at ~300 ms, so ticks land near 800 and 1300, never at the old 1000.
    sleep(Duration::from_millis(350));
    assert_eq!(count(&notes), 0);
    sleep(Duration::from_millis(500));
    assert_eq!(count(&notes), 1);
    scheduler.stop();
}

#[test]
fn test_restart_replaces_running_timer() {
    let mut scheduler = scheduler(12);
    let (notes, on_note) = recorder();
    let (other_notes, other_on_note) = recorder();

    scheduler.start(500, on_note).unwrap();
    scheduler.start(500, other_on_note).unwrap();
    sleep(Duration::from_millis(1_250));
    scheduler.stop();

    assert_eq!(count(&notes), 0);
    assert_eq!(count(&other_notes), 2);
}

#[test]
fn test_invalid_interval_leaves_running_timer_alone() {
    let mut scheduler = scheduler(12);
    let (notes, on_note) = recorder();

    scheduler.start(500, on_note).unwrap();
    assert!(matches!(scheduler.start(50, |_| {}), Err(TrainerError::InvalidArgument(_))));
    assert!(matches!(scheduler.set_interval(60_000), Err(TrainerError::InvalidArgument(_))));
    assert!(scheduler.is_running());
    assert_eq!(scheduler.interval_ms(), 500);

    sleep(Duration::from_millis(700));
    scheduler.stop();
    assert_eq!(count(&notes), 1);
}

#[test]
fn test_fret_range_change_applies_to_next_tick() {
    let mut scheduler = scheduler(24);
    let (notes, on_note) = recorder();

    scheduler.set_fret_range(FretRange::clamped(0));
    scheduler.start(500, on_note).unwrap();
    sleep(Duration::from_millis(1_250));
    scheduler.stop();

    let notes = notes.lock().unwrap();
    assert!(!notes.is_empty());
    for (_, note) in notes.iter() {
        assert_eq!(note.fret_number, 0);
        assert!([40, 45, 50, 55, 59, 64].contains(&note.pitch_number));
    }
}

#[test]
fn test_dropping_scheduler_cancels_timer() {
    let (notes, on_note) = recorder();
    {
        let mut scheduler = scheduler(12);
        scheduler.start(500, on_note).unwrap();
    }
    sleep(Duration::from_millis(800));
    assert_eq!(count(&notes), 0);
}
