// Scalar statistics over feature matrices.
//
// Population moments (ddof = 0). Skewness is Fisher's g1 and kurtosis is the
// excess kurtosis; both collapse to 0.0 when the variance vanishes so that
// summaries stay finite for constant (or empty) inputs.

/// Six-number summary of a flattened feature matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub skew: f64,
    pub kurtosis: f64,
}

impl Summary {
    pub const ZERO: Summary = Summary {
        mean: 0.0,
        std: 0.0,
        min: 0.0,
        max: 0.0,
        skew: 0.0,
        kurtosis: 0.0,
    };

    /// Summarize `values`, treating non-finite entries as 0.0.
    pub fn from_values(values: &[f64]) -> Summary {
        if values.is_empty() {
            return Summary::ZERO;
        }

        let n = values.len() as f64;
        let clean = |v: f64| if v.is_finite() { v } else { 0.0 };

        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &raw in values {
            let v = clean(raw);
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        let mean = sum / n;

        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for &raw in values {
            let d = clean(raw) - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        m2 /= n;
        m3 /= n;
        m4 /= n;

        let (skew, kurtosis) = if m2 > 1e-24 {
            (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
        } else {
            (0.0, 0.0)
        };

        Summary {
            mean,
            std: m2.sqrt(),
            min,
            max,
            skew,
            kurtosis,
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let var = values.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Pearson correlation of two equal-length vectors.
///
/// `None` when either vector has (near-)zero variance or lengths differ, so
/// callers can skip degenerate pairs instead of propagating NaN.
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }
    let ma = mean(a);
    let mb = mean(b);
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        cov += (x - ma) * (y - mb);
        va += (x - ma) * (x - ma);
        vb += (y - mb) * (y - mb);
    }
    if va < 1e-24 || vb < 1e-24 {
        return None;
    }
    Some(cov / (va.sqrt() * vb.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_basic_moments() {
        let s = Summary::from_values(&[1.0, 2.0, 3.0, 4.0]);
        assert!((s.mean - 2.5).abs() < 1e-12);
        assert!((s.std - 1.25f64.sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        // Symmetric distribution.
        assert!(s.skew.abs() < 1e-12);
    }

    #[test]
    fn test_summary_constant_input_is_finite() {
        let s = Summary::from_values(&[7.0; 100]);
        assert_eq!(s.mean, 7.0);
        assert_eq!(s.std, 0.0);
        assert_eq!(s.skew, 0.0);
        assert_eq!(s.kurtosis, 0.0);
    }

    #[test]
    fn test_summary_sanitizes_non_finite() {
        let s = Summary::from_values(&[f64::NAN, f64::INFINITY, 3.0]);
        assert!(s.mean.is_finite());
        assert!(s.std.is_finite());
        assert_eq!(s.max, 3.0);
        assert_eq!(s.min, 0.0);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(Summary::from_values(&[]), Summary::ZERO);
    }

    #[test]
    fn test_pearson_identical_vectors() {
        let a = vec![1.0, 5.0, 2.0, 8.0];
        let r = pearson(&a, &a).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_anticorrelated() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![3.0, 2.0, 1.0];
        let r = pearson(&a, &b).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_constant_is_none() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[2.0, 3.0, 4.0]).is_none());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_none());
    }
}
