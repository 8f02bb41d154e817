//! Progress reporting.
//!
//! The pipeline reports `(percent, message)` pairs at fixed checkpoints:
//!
//! | percent | message |
//! |---------|---------|
//! | 5 | `Generating binaural beat background...` |
//! | 30 | `Binaural beat generated, adding affirmations...` |
//! | 30-89 | `Processing affirmation {i}/{total}` |
//! | 95 | `Exporting to {format}...` |
//! | 100 | `Complete` |

/// Receives progress updates.
///
/// Implemented for `()` (discard) and for any `FnMut(u8, &str)`.
pub trait ProgressSink {
    /// Called with a percentage in `0..=100` and a human-readable message.
    fn report(&mut self, percent: u8, message: &str);
}

impl ProgressSink for () {
    fn report(&mut self, _percent: u8, _message: &str) {}
}

impl<F: FnMut(u8, &str)> ProgressSink for F {
    fn report(&mut self, percent: u8, message: &str) {
        self(percent, message)
    }
}

/// Wraps a sink so reported values never go backwards or exceed 100.
#[derive(Debug)]
pub struct Progress<P> {
    sink: P,
    last: u8,
}

impl<P: ProgressSink> Progress<P> {
    pub fn new(sink: P) -> Self {
        Self { sink, last: 0 }
    }

    /// Forwards an update, clamped to `[last, 100]`.
    pub fn report(&mut self, percent: u8, message: &str) {
        let percent = percent.min(100).max(self.last);
        self.last = percent;
        log::debug!("progress {percent}%: {message}");
        self.sink.report(percent, message);
    }

    /// Last value forwarded.
    pub fn last(&self) -> u8 {
        self.last
    }
}

/// Percentage reported before speaking placement `index` of `total`.
///
/// Spans 30 to 89.
pub fn affirmation_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 30;
    }
    (30 + index.min(total) * 60 / total).min(90) as u8
}
