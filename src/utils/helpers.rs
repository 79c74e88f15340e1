use crate::core::note::pitch_to_frequency;

/// Frequency of a pitch as shown under the note name, e.g. 64 -> "329.6 Hz"
pub fn format_pitch_frequency(pitch: i32) -> String {
    let freq = pitch_to_frequency(pitch);
    if freq >= 1000.0 {
        format!("{:.2} kHz", freq / 1000.0)
    } else {
        format!("{:.1} Hz", freq)
    }
}

/// Format a practice interval, switching to seconds from one second up
pub fn format_interval(interval_ms: u64) -> String {
    if interval_ms >= 1000 {
        format!("{:.2} s", interval_ms as f64 / 1000.0)
    } else {
        format!("{} ms", interval_ms)
    }
}
