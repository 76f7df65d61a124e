//! Small numeric helpers shared by the explorers. These follow the standard
//! definitions (sample std with ddof 1, linear-interpolation percentiles,
//! pairwise-complete Pearson) so results line up with common dataframe
//! tooling.

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1). NaN for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Percentile with linear interpolation between closest ranks.
/// `sorted` must be ascending and non-empty; `p` in [0, 100].
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Pearson correlation over paired observations. NaN when fewer than two
/// pairs or either side has zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }
    let mx = mean(&pairs.iter().map(|p| p.0).collect::<Vec<_>>());
    let my = mean(&pairs.iter().map(|p| p.1).collect::<Vec<_>>());
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in pairs {
        cov += (x - mx) * (y - my);
        vx += (x - mx).powi(2);
        vy += (y - my).powi(2);
    }
    let denom = (vx * vy).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

/// An ordinary-least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit a trend line over paired observations. None when fewer than two pairs
/// or the x side has zero variance.
pub fn ols(pairs: &[(f64, f64)]) -> Option<TrendLine> {
    if pairs.len() < 2 {
        return None;
    }
    let mx = mean(&pairs.iter().map(|p| p.0).collect::<Vec<_>>());
    let my = mean(&pairs.iter().map(|p| p.1).collect::<Vec<_>>());
    let mut cov = 0.0;
    let mut vx = 0.0;
    for (x, y) in pairs {
        cov += (x - mx) * (y - my);
        vx += (x - mx).powi(2);
    }
    if vx == 0.0 {
        return None;
    }
    let slope = cov / vx;
    Some(TrendLine {
        slope,
        intercept: my - slope * mx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&v), 3.0);
        assert!((sample_std(&v) - 1.5811388).abs() < 1e-6);
        assert!(mean(&[]).is_nan());
        assert!(sample_std(&[1.0]).is_nan());
    }

    #[test]
    fn percentile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 50.0), 2.5);
        assert_eq!(percentile(&v, 100.0), 4.0);
        assert_eq!(percentile(&v, 25.0), 1.75);
        assert_eq!(percentile(&[7.0], 50.0), 7.0);
    }

    #[test]
    fn pearson_perfect_and_degenerate() {
        let up: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, 2.0 * i as f64)).collect();
        assert!((pearson(&up) - 1.0).abs() < 1e-12);

        let down: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, -(i as f64))).collect();
        assert!((pearson(&down) + 1.0).abs() < 1e-12);

        let flat: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, 3.0)).collect();
        assert!(pearson(&flat).is_nan());
        assert!(pearson(&[(1.0, 1.0)]).is_nan());
    }

    #[test]
    fn ols_recovers_exact_line() {
        let pairs: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 3.0 * i as f64 - 2.0)).collect();
        let line = ols(&pairs).unwrap();
        assert!((line.slope - 3.0).abs() < 1e-12);
        assert!((line.intercept + 2.0).abs() < 1e-12);
        assert!(ols(&[(1.0, 2.0)]).is_none());
        assert!(ols(&[(1.0, 2.0), (1.0, 3.0)]).is_none());
    }
}
