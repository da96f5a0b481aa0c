use crate::model::Sample;

/// Widest bar in the rendered histogram, in characters.
const BAR_WIDTH: usize = 40;

/// Fixed-width histogram of signed deltas over a symmetric range.
///
/// The range is ±`limit` seconds — half a beat interval at the configured
/// tempo, the widest delta the client can emit. Deltas outside the range
/// (possible on mis-recorded data) clamp into the edge buckets rather than
/// being dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaHistogram {
    limit: f64,
    counts: Vec<usize>,
}

impl DeltaHistogram {
    pub fn build(samples: &[Sample], limit: f64, buckets: usize) -> Self {
        let buckets = buckets.max(1);
        let mut counts = vec![0usize; buckets];
        for sample in samples {
            counts[bucket_index(sample.delta, limit, buckets)] += 1;
        }
        Self { limit, counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn bucket_width(&self) -> f64 {
        self.limit * 2.0 / self.counts.len() as f64
    }

    /// Render as one text row per bucket: range, bar, count.
    pub fn render(&self) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0);
        let width = self.bucket_width();

        let mut out = String::new();
        for (i, &count) in self.counts.iter().enumerate() {
            let lo = (-self.limit + i as f64 * width) * 1000.0;
            let hi = lo + width * 1000.0;
            let bar_len = if peak == 0 { 0 } else { count * BAR_WIDTH / peak };
            out.push_str(&format!(
                "{lo:>7.1} ..{hi:>7.1} ms  {count:>5}  {}\n",
                "#".repeat(bar_len)
            ));
        }
        out
    }
}

fn bucket_index(delta: f64, limit: f64, buckets: usize) -> usize {
    let position = (delta + limit) / (limit * 2.0);
    let index = (position * buckets as f64).floor() as isize;
    index.clamp(0, buckets as isize - 1) as usize
}
