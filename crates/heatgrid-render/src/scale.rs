//! Ports of the three d3-scale kinds the heat map needs.

use crate::ticks;
use std::collections::HashMap;
use std::hash::Hash;

/// Ordinal domain to equal-width bands (`d3.scaleBand().padding(p)`, align 0.5, no rounding).
#[derive(Debug, Clone)]
pub struct BandScale<T> {
    domain: Vec<T>,
    index: HashMap<T, usize>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<T: Clone + Eq + Hash> BandScale<T> {
    /// Duplicate domain values keep their first position.
    pub fn new(domain: Vec<T>, range: (f64, f64), padding: f64) -> Self {
        let mut unique = Vec::with_capacity(domain.len());
        let mut index = HashMap::with_capacity(domain.len());
        for v in domain {
            if !index.contains_key(&v) {
                index.insert(v.clone(), unique.len());
                unique.push(v);
            }
        }

        let mut scale = Self {
            domain: unique,
            index,
            range,
            padding_inner: padding.min(1.0),
            padding_outer: padding,
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        scale
    }

    fn rescale(&mut self) {
        const ALIGN: f64 = 0.5;

        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.start = start + (stop - start - step * (n - self.padding_inner)) * ALIGN;
        self.step = step;
        self.bandwidth = step * (1.0 - self.padding_inner);
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Start offset of the band for `value`, or `None` outside the domain.
    pub fn position(&self, value: &T) -> Option<f64> {
        let i = *self.index.get(value)?;
        let (r0, r1) = self.range;
        let i = if r1 < r0 { self.domain.len() - 1 - i } else { i };
        Some(self.start + self.step * i as f64)
    }
}

/// Continuous domain to a discrete range via equal-width buckets (`d3.scaleQuantize`).
#[derive(Debug, Clone)]
pub struct QuantizeScale<R> {
    domain: (f64, f64),
    thresholds: Vec<f64>,
    range: Vec<R>,
}

impl<R> QuantizeScale<R> {
    pub fn new(domain: (f64, f64), range: Vec<R>) -> Self {
        let (x0, x1) = domain;
        let n = range.len().saturating_sub(1);
        let thresholds = (0..n)
            .map(|i| {
                let i = i as f64;
                let n = n as f64;
                ((i + 1.0) * x1 - (i - n) * x0) / (n + 1.0)
            })
            .collect();
        Self {
            domain,
            thresholds,
            range,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> &[R] {
        &self.range
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Bucket index for `value` (values past either end clamp to the first/last bucket).
    pub fn bucket(&self, value: f64) -> Option<usize> {
        if value.is_nan() || self.range.is_empty() {
            return None;
        }
        Some(self.thresholds.partition_point(|t| *t <= value))
    }

    pub fn apply(&self, value: f64) -> Option<&R> {
        self.range.get(self.bucket(value)?)
    }

    /// The `[low, high)` domain extent mapped to bucket `index`.
    pub fn invert_extent(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.range.len() {
            return None;
        }
        let (x0, x1) = self.domain;
        let n = self.thresholds.len();
        if n == 0 {
            return Some((x0, x1));
        }
        Some(if index == 0 {
            (x0, self.thresholds[0])
        } else if index >= n {
            (self.thresholds[n - 1], x1)
        } else {
            (self.thresholds[index - 1], self.thresholds[index])
        })
    }
}

/// Continuous linear mapping (`d3.scaleLinear`, unclamped).
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        // A collapsed domain maps everything to the middle of the range.
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 + t * (r1 - r0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks::ticks(self.domain.0, self.domain.1, count)
    }

    /// The default tick formatter for `ticks(count)`.
    pub fn tick_format(&self, count: usize) -> impl Fn(f64) -> String {
        let step = ticks::tick_step(self.domain.0, self.domain.1, count);
        let precision = ticks::precision_fixed(step);
        move |v| ticks::format_fixed_grouped(v, precision)
    }
}
