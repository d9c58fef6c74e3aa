//! Regression estimator and the small statistics used by the chart builders.

use crate::error::{ChartError, Result};
use crate::models::Point;
use serde::{Deserialize, Serialize};

/// Slope/intercept of an ordinary-least-squares line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    /// Value of the fitted line at `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Pearson correlation with its t statistic, as printed on the scatter panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub r: f64,
    /// `None` for a perfect fit (|r| = 1) or when there are no degrees of freedom.
    pub t: Option<f64>,
    pub df: usize,
}

/// Single-pass accumulator of the sums the closed forms need.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastSquares {
    n: usize,
    sum_x: f64,
    sum_y: f64,
    sum_xy: f64,
    sum_x2: f64,
    sum_y2: f64,
    x_min: f64,
    x_max: f64,
}

impl LeastSquares {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: f64, y: f64) {
        if self.n == 0 {
            self.x_min = x;
            self.x_max = x;
        } else {
            self.x_min = self.x_min.min(x);
            self.x_max = self.x_max.max(x);
        }
        self.n += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xy += x * y;
        self.sum_x2 += x * x;
        self.sum_y2 += y * y;
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// `n·Σx² − (Σx)²`, i.e. n² times the variance of x.
    fn sxx(&self) -> f64 {
        self.n as f64 * self.sum_x2 - self.sum_x * self.sum_x
    }

    fn syy(&self) -> f64 {
        self.n as f64 * self.sum_y2 - self.sum_y * self.sum_y
    }

    fn sxy(&self) -> f64 {
        self.n as f64 * self.sum_xy - self.sum_x * self.sum_y
    }

    /// Closed-form OLS fit. Fails instead of yielding ±inf/NaN.
    pub fn fit(&self) -> Result<Regression> {
        if self.n < 2 {
            return Err(ChartError::DegenerateInput(format!(
                "need at least 2 points, got {}",
                self.n
            )));
        }
        let denom = self.sxx();
        // Identical x values can still leave a rounding residue in `denom`.
        if self.x_min == self.x_max || denom == 0.0 || !denom.is_finite() {
            return Err(ChartError::DegenerateInput(
                "all points share the same x value".into(),
            ));
        }
        let n = self.n as f64;
        let slope = self.sxy() / denom;
        let intercept = (self.sum_y - slope * self.sum_x) / n;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(ChartError::DegenerateInput(
                "non-finite regression coefficients".into(),
            ));
        }
        Ok(Regression { slope, intercept })
    }

    /// Pearson r, t = r·sqrt(df / (1 − r²)) and df = n − 2.
    pub fn correlation(&self) -> Result<Correlation> {
        // Same preconditions as the fit, plus non-zero variance in y.
        self.fit()?;
        let syy = self.syy();
        if syy <= 0.0 || !syy.is_finite() {
            return Err(ChartError::DegenerateInput(
                "all points share the same y value".into(),
            ));
        }
        let r = (self.sxy() / (self.sxx() * syy).sqrt()).clamp(-1.0, 1.0);
        let df = self.n - 2;
        let one_minus_r2 = 1.0 - r * r;
        let t = (df > 0 && one_minus_r2 > 0.0).then(|| r * (df as f64 / one_minus_r2).sqrt());
        Ok(Correlation { r, t, df })
    }
}

impl FromIterator<Point> for LeastSquares {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut acc = LeastSquares::new();
        for p in iter {
            acc.push(p.x, p.y);
        }
        acc
    }
}

/// Best-fit line through `points` (n ≥ 2, not all x equal).
pub fn linear_regression(points: &[Point]) -> Result<Regression> {
    points.iter().copied().collect::<LeastSquares>().fit()
}

/// Correlation statistics for `points`.
pub fn correlation(points: &[Point]) -> Result<Correlation> {
    points.iter().copied().collect::<LeastSquares>().correlation()
}

/// `(min, max)` over the finite values, `None` if there are none.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn perfect_line() {
        let fit = linear_regression(&pts(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)])).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
        assert!((fit.predict(10.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_is_degenerate() {
        let e = linear_regression(&pts(&[(1.0, 1.0)])).unwrap_err();
        assert!(matches!(e, ChartError::DegenerateInput(_)));
        assert!(linear_regression(&[]).is_err());
    }

    #[test]
    fn repeated_fractional_x_is_degenerate() {
        // 0.1 is not exactly representable; the denominator may not round to zero.
        let e = linear_regression(&pts(&[(0.1, 1.0), (0.1, 2.0), (0.1, 3.0)])).unwrap_err();
        assert!(matches!(e, ChartError::DegenerateInput(_)));
    }

    #[test]
    fn perfect_fit_has_no_t() {
        let c = correlation(&pts(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)])).unwrap();
        assert!((c.r - 1.0).abs() < 1e-12);
        assert_eq!(c.t, None);
        assert_eq!(c.df, 1);
    }

    #[test]
    fn extent_skips_non_finite() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(extent(std::iter::empty()), None);
    }
}
