//! Fixed-width text histograms.
//!
//! ```text
//! Waiting time (min)
//!    0..5     | ######################## 48
//!    5..10    | ############ 24
//!   10..15    | ### 6
//! ```

use std::collections::BTreeMap;
use std::fmt::Write;

/// Counts of integer samples in bins of equal width.
///
/// Bin `k` covers `[k·width, (k+1)·width)`; negative samples land in
/// negative bins.
#[derive(Clone, Debug)]
pub struct Histogram {
    width: u64,
    bins:  BTreeMap<i64, usize>,
    total: usize,
}

impl Histogram {
    /// An empty histogram.  A `bin_width` of 0 is treated as 1.
    pub fn new(bin_width: u64) -> Self {
        Self { width: bin_width.max(1), bins: BTreeMap::new(), total: 0 }
    }

    pub fn from_samples<I>(bin_width: u64, samples: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        let mut h = Self::new(bin_width);
        for s in samples {
            h.add(s.into());
        }
        h
    }

    pub fn add(&mut self, sample: i64) {
        let bin = sample.div_euclid(self.width as i64);
        *self.bins.entry(bin).or_default() += 1;
        self.total += 1;
    }

    /// Samples recorded so far.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `(bin_start, count)` for every bin from the lowest to the highest
    /// occupied one, empty bins included.
    pub fn bins(&self) -> Vec<(i64, usize)> {
        let (Some((&lo, _)), Some((&hi, _))) = (self.bins.first_key_value(), self.bins.last_key_value())
        else {
            return Vec::new();
        };
        let w = self.width as i64;
        (lo..=hi)
            .map(|k| (k * w, self.bins.get(&k).copied().unwrap_or(0)))
            .collect()
    }

    /// Render as one line per bin, with bars scaled so the fullest bin is
    /// `bar_width` characters long.
    pub fn render(&self, title: &str, bar_width: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{title}");
        if self.is_empty() {
            let _ = writeln!(out, "  (no samples)");
            return out;
        }
        let bins = self.bins();
        let max = bins.iter().map(|&(_, n)| n).max().unwrap_or(0);
        let w = self.width as i64;
        for (start, count) in bins {
            let label = format!("{start}..{}", start + w);
            let _ = writeln!(out, "  {label:>10} | {} {count}", bar(count as f64, max as f64, bar_width));
        }
        out
    }
}

/// A row of `#` proportional to `value / max`, at least one character for
/// any positive value.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if value <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let n = ((value / max) * width as f64).round() as usize;
    "#".repeat(n.clamp(1, width.max(1)))
}
