/// One recorded keypress event.
///
/// Samples are stored in recording order, which is the chronological order the
/// client captured them in. The raw file is NOT guaranteed to be sorted by
/// beat number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Beat the client attributed the keypress to. Only the repair passes
    /// mutate this, and only upward.
    pub beat: u32,
    /// Client's on-the-beat judgement flag (0 or 1). Passed through unchanged.
    pub on_beat: i32,
    /// Signed offset in seconds from the nearest beat boundary.
    /// Positive: the press landed `delta` seconds after the current beat
    /// began. Negative: it landed `|delta|` seconds before the next beat.
    pub delta: f64,
    /// Input control identifier. May be negative (the client's unknown-key
    /// sentinel). Passed through unchanged.
    pub key: i32,
}

impl Sample {
    pub fn new(beat: u32, on_beat: i32, delta: f64, key: i32) -> Self {
        Self {
            beat,
            on_beat,
            delta,
            key,
        }
    }
}
