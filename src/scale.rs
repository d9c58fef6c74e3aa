//! Scale mappers: continuous (linear) and discrete (band, ordinal) domains to pixels.
//!
//! Scales are immutable once built; every chart builds its own.

use crate::error::{ChartError, Result};
use std::collections::HashMap;

/// Capability shared by the pixel scales: map a domain value to a pixel coordinate.
pub trait Scale {
    type Domain: ?Sized;

    fn map(&self, value: &Self::Domain) -> Result<f64>;

    /// Output interval `(start, end)`. Linear scales keep the configured order
    /// (reversed for y axes); band scales always report the low end first.
    fn range(&self) -> (f64, f64);
}

/// Linear map `[d0, d1] -> [r0, r1]`. The range may be reversed (y axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        let (d0, d1) = domain;
        if d0 == d1 || !d0.is_finite() || !d1.is_finite() {
            return Err(ChartError::DegenerateDomain { min: d0, max: d1 });
        }
        let (r0, r1) = range;
        if !r0.is_finite() || !r1.is_finite() {
            return Err(ChartError::InvalidConfig(format!(
                "non-finite pixel range [{r0}, {r1}]"
            )));
        }
        Ok(Self { d0, d1, r0, r1 })
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.d0, self.d1)
    }

    /// `r0 + (v − d0)/(d1 − d0)·(r1 − r0)`; values outside the domain extrapolate.
    #[inline]
    pub fn apply(&self, v: f64) -> f64 {
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }

    /// Inverse of [`apply`](Self::apply). Fails on a zero-width pixel range.
    pub fn invert(&self, px: f64) -> Result<f64> {
        if self.r0 == self.r1 {
            return Err(ChartError::DegenerateDomain {
                min: self.r0,
                max: self.r1,
            });
        }
        Ok(self.d0 + (px - self.r0) / (self.r1 - self.r0) * (self.d1 - self.d0))
    }

    /// Step between [`ticks`](Self::ticks) for roughly `count` ticks.
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (lo, hi) = ordered(self.d0, self.d1);
        tick_layout(lo, hi, count as f64).map(|s| s.step())
    }

    /// Roughly `count` round tick values inside the domain, in domain order.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.d0, self.d1);
        let Some(layout) = tick_layout(lo, hi, count as f64) else {
            return Vec::new();
        };
        if layout.last < layout.first {
            return Vec::new();
        }
        let mut out: Vec<f64> = (layout.first..=layout.last).map(|i| layout.value(i)).collect();
        if self.d1 < self.d0 {
            out.reverse();
        }
        out
    }
}

impl Scale for LinearScale {
    type Domain = f64;

    fn map(&self, value: &f64) -> Result<f64> {
        Ok(self.apply(*value))
    }

    fn range(&self) -> (f64, f64) {
        (self.r0, self.r1)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Ticks are `first..=last` multiples of a 1/2/5·10^k step. Sub-unit steps keep
/// their reciprocal so that values like 0.1 are produced by division (exact
/// decimal output) rather than by multiplication.
#[derive(Debug, Clone, Copy)]
struct TickLayout {
    first: i64,
    last: i64,
    multiplier: f64,
    divide: bool,
}

impl TickLayout {
    fn value(&self, i: i64) -> f64 {
        if self.divide {
            i as f64 / self.multiplier
        } else {
            i as f64 * self.multiplier
        }
    }

    fn step(&self) -> f64 {
        if self.divide {
            1.0 / self.multiplier
        } else {
            self.multiplier
        }
    }
}

fn tick_layout(lo: f64, hi: f64, count: f64) -> Option<TickLayout> {
    if !(count > 0.0) || !lo.is_finite() || !hi.is_finite() || lo == hi {
        return None;
    }
    let raw = (hi - lo) / count;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let layout = if power < 0.0 {
        let multiplier = 10f64.powf(-power) / factor;
        let mut first = (lo * multiplier).round() as i64;
        let mut last = (hi * multiplier).round() as i64;
        if (first as f64) / multiplier < lo {
            first += 1;
        }
        if (last as f64) / multiplier > hi {
            last -= 1;
        }
        TickLayout { first, last, multiplier, divide: true }
    } else {
        let multiplier = 10f64.powf(power) * factor;
        let mut first = (lo / multiplier).round() as i64;
        let mut last = (hi / multiplier).round() as i64;
        if (first as f64) * multiplier < lo {
            first += 1;
        }
        if (last as f64) * multiplier > hi {
            last -= 1;
        }
        TickLayout { first, last, multiplier, divide: false }
    };

    if layout.last < layout.first && (0.5..2.0).contains(&count) {
        return tick_layout(lo, hi, count * 2.0);
    }
    (layout.multiplier.is_finite() && layout.multiplier > 0.0).then_some(layout)
}

/// Ordered distinct keys mapped to contiguous, equal-width bands.
///
/// With `N` keys over a range of length `L` and padding `p`:
/// `step = L/N`, `bandwidth = step·(1 − p)`, and a band starts at
/// `start + index·step + step·p/2`, so the padding is split evenly on both
/// sides of every band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    keys: Vec<String>,
    index: HashMap<String, usize>,
    start: f64,
    end: f64,
    padding: f64,
    step: f64,
}

impl BandScale {
    /// `range` may be given in either order; bands always run from its low end.
    pub fn new<I, S>(keys: I, range: (f64, f64), padding: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidPadding(padding));
        }
        let (start, end) = ordered(range.0, range.1);
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidConfig(format!(
                "non-finite pixel range [{}, {}]",
                range.0, range.1
            )));
        }

        let mut ordered_keys = Vec::new();
        let mut index = HashMap::new();
        for key in keys {
            let key: String = key.into();
            if index.insert(key.clone(), ordered_keys.len()).is_some() {
                return Err(ChartError::DuplicateKey(key));
            }
            ordered_keys.push(key);
        }

        let step = (end - start) / ordered_keys.len().max(1) as f64;
        Ok(Self {
            keys: ordered_keys,
            index,
            start,
            end,
            padding,
            step,
        })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Band width plus its share of padding (`L/N`).
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.step * (1.0 - self.padding)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Pixel offset where the band for `key` starts.
    pub fn band_start(&self, key: &str) -> Result<f64> {
        let i = self
            .index_of(key)
            .ok_or_else(|| ChartError::UnknownKey(key.to_string()))?;
        Ok(self.start + i as f64 * self.step + self.step * self.padding / 2.0)
    }

    /// Pixel offset of the middle of the band for `key`.
    pub fn center(&self, key: &str) -> Result<f64> {
        Ok(self.band_start(key)? + self.bandwidth() / 2.0)
    }
}

impl Scale for BandScale {
    type Domain = str;

    fn map(&self, value: &str) -> Result<f64> {
        self.band_start(value)
    }

    fn range(&self) -> (f64, f64) {
        (self.start, self.end)
    }
}

/// Ordered distinct keys mapped onto a list of values, cycling when there are
/// more keys than values (series colors).
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale<V> {
    index: HashMap<String, usize>,
    values: Vec<V>,
}

impl<V> OrdinalScale<V> {
    pub fn new<I, S>(keys: I, values: Vec<V>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if values.is_empty() {
            return Err(ChartError::InvalidConfig(
                "ordinal scale needs at least one output value".into(),
            ));
        }
        let mut index = HashMap::new();
        for (i, key) in keys.into_iter().enumerate() {
            let key: String = key.into();
            if index.insert(key.clone(), i).is_some() {
                return Err(ChartError::DuplicateKey(key));
            }
        }
        Ok(Self { index, values })
    }

    pub fn get(&self, key: &str) -> Result<&V> {
        let i = self
            .index
            .get(key)
            .ok_or_else(|| ChartError::UnknownKey(key.to_string()))?;
        Ok(&self.values[i % self.values.len()])
    }
}
