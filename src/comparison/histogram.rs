//! Compact glyph histograms
//!
//! A sample is bucketed into equal-width bins over a fixed range and each
//! bin is drawn as one block glyph whose height is proportional to its
//! count. Two samples rendered over the same [`HistogramRange`] line up
//! column for column, which is what makes the A/B report readable.

use crate::comparison::sample::Sample;

/// Glyphs from empty to full, nine levels
pub const GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Closed interval `[low, high]` partitioned into buckets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramRange {
    pub low: f64,
    pub high: f64,
}

impl HistogramRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Range shared by two samples so both histograms use identical bins
    ///
    /// The combined `[min, max]` is padded by half a bucket on each side,
    /// `pad = 0.5 * (max - min) / (buckets - 1)`, which centres the extreme
    /// values inside the edge buckets. When every value is identical the
    /// span falls back to `max(|value|, 1)` so the bins keep a width.
    pub fn shared(a: &Sample, b: &Sample, buckets: usize) -> Self {
        let min = a.min().min(b.min());
        let max = a.max().max(b.max());

        let mut span = max - min;
        if span <= 0.0 {
            span = max.abs().max(1.0);
        }
        let pad = 0.5 * span / (buckets.max(2) - 1) as f64;

        Self {
            low: min - pad,
            high: max + pad,
        }
    }

    pub fn contains_strictly(&self, value: f64) -> bool {
        self.low < value && value < self.high
    }
}

/// Bucket counts of one sample over a range
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub counts: Vec<usize>,
    pub low: f64,
    pub bin_width: f64,
    /// Values that fell outside the range and were clipped into an edge bucket
    pub out_of_range: usize,
}

impl Histogram {
    /// Count `sample` into `buckets` equal-width bins over `range`
    pub fn build(sample: &Sample, range: HistogramRange, buckets: usize) -> Self {
        let buckets = buckets.max(1);
        let bin_width = (range.high - range.low) / buckets as f64;
        let mut counts = vec![0usize; buckets];
        let mut out_of_range = 0;

        for &value in sample.values() {
            if value < range.low || value > range.high {
                out_of_range += 1;
            }

            let index = if bin_width > 0.0 {
                ((value - range.low) / bin_width).floor()
            } else {
                0.0
            };
            let index = index.clamp(0.0, (buckets - 1) as f64) as usize;
            counts[index] += 1;
        }

        Self {
            counts,
            low: range.low,
            bin_width,
            out_of_range,
        }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Right edge as displayed: `low + bin_width * (buckets + 1)`
    ///
    /// This is one bin past the true upper bound. The extra bin is kept so
    /// reports stay comparable with previously recorded output.
    pub fn right_edge(&self) -> f64 {
        self.low + self.bin_width * (self.counts.len() + 1) as f64
    }

    /// One glyph per bucket
    pub fn glyphs(&self) -> String {
        let max = self.max_count();
        self.counts
            .iter()
            .map(|&count| bucket_glyph(count, max))
            .collect()
    }

    /// `<low><unit> : <glyphs> : <right edge><unit>`
    pub fn render(&self, unit: &str) -> String {
        format!(
            "{:7.2}{} : {} : {:7.2}{}",
            self.low,
            unit,
            self.glyphs(),
            self.right_edge(),
            unit
        )
    }
}

/// Glyph for a bucket holding `count` out of a maximum of `max_count`
///
/// Any non-empty bucket gets at least the lowest bar so single outliers
/// stay visible.
pub fn bucket_glyph(count: usize, max_count: usize) -> char {
    if count == 0 || max_count == 0 {
        return GLYPHS[0];
    }
    let top = GLYPHS.len() - 1;
    let level = (count * top / max_count).clamp(1, top);
    GLYPHS[level]
}

/// Render `sample` as a histogram line over `[low, high]`
pub fn render(sample: &Sample, low: f64, high: f64, buckets: usize, unit: &str) -> String {
    Histogram::build(sample, HistogramRange::new(low, high), buckets).render(unit)
}
