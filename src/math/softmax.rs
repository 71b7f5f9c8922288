use crate::math::matrix::Matrix;

/// Numerically stable softmax of a single score vector.
///
/// The row maximum is subtracted before exponentiating, so large positive
/// scores cannot overflow and very negative ones do not all underflow to
/// zero. Any NaN or infinite input yields a NaN result; it is not trapped.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    if scores.iter().any(|x| !x.is_finite()) {
        return vec![f64::NAN; scores.len()];
    }

    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|&z| (z - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Log of the softmax, computed as `z - max - ln(sum(exp(z - max)))`.
///
/// Stays finite where `softmax(z)[i]` would underflow to zero and its log
/// would be `-inf`. Same NaN policy as [`softmax`].
pub fn log_softmax(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    if scores.iter().any(|x| !x.is_finite()) {
        return vec![f64::NAN; scores.len()];
    }

    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let log_sum = scores.iter().map(|&z| (z - max).exp()).sum::<f64>().ln();
    scores.iter().map(|&z| z - max - log_sum).collect()
}

/// Row-wise softmax over a batch of score vectors.
pub fn softmax_rows(scores: &Matrix) -> Matrix {
    Matrix {
        rows: scores.rows,
        cols: scores.cols,
        data: scores.data.iter().map(|row| softmax(row)).collect(),
    }
}

/// Index of the maximum element. Ties go to the lowest index and NaN never wins;
/// an empty or all-NaN slice yields 0.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    let mut best_val = f64::NEG_INFINITY;
    for (i, &x) in v.iter().enumerate() {
        if x > best_val {
            best = i;
            best_val = x;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn reference_values() {
        let p = softmax(&[2.0, 1.0, 0.1]);
        assert_abs_diff_eq!(p[0], 0.6590, epsilon = 1e-4);
        assert_abs_diff_eq!(p[1], 0.2424, epsilon = 1e-4);
        assert_abs_diff_eq!(p[2], 0.0986, epsilon = 1e-4);
        assert_abs_diff_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_input_is_uniform() {
        for k in [-50.0, 0.0, 3.5, 1e6] {
            for x in softmax(&[k, k, k]) {
                assert_abs_diff_eq!(x, 1.0 / 3.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn shift_invariant() {
        let z = [0.3, -1.2, 4.0, 2.2];
        let base = softmax(&z);
        for c in [-1000.0, -3.0, 0.5, 700.0] {
            let shifted: Vec<f64> = z.iter().map(|x| x + c).collect();
            for (a, b) in base.iter().zip(softmax(&shifted).iter()) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn extreme_scores_do_not_overflow() {
        let p = softmax(&[1000.0, 999.0, -1000.0]);
        assert!(p.iter().all(|x| x.is_finite() && (0.0..=1.0).contains(x)));
        assert_abs_diff_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(p[0] > p[1] && p[2] == 0.0);
    }

    #[test]
    fn single_element_is_one() {
        assert_eq!(softmax(&[-123.4]), vec![1.0]);
        assert_eq!(softmax(&[1e300]), vec![1.0]);
    }

    #[test]
    fn non_finite_input_propagates_nan() {
        assert!(softmax(&[1.0, f64::NAN, 0.0]).iter().all(|x| x.is_nan()));
        assert!(softmax(&[1.0, f64::INFINITY]).iter().all(|x| x.is_nan()));
    }

    #[test]
    fn rows_are_normalized_independently() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![-5.0, 10.0]]).unwrap();
        let p = softmax_rows(&m);
        for row in &p.data {
            assert_abs_diff_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
        assert!(p.data[1][1] > p.data[0][1]);
    }

    #[test]
    fn log_softmax_agrees_and_stays_finite() {
        let z = [2.0, 1.0, 0.1];
        for (l, p) in log_softmax(&z).iter().zip(softmax(&z).iter()) {
            assert_abs_diff_eq!(l.exp(), *p, epsilon = 1e-12);
        }
        let l = log_softmax(&[0.0, -2000.0]);
        assert_abs_diff_eq!(l[1], -2000.0, epsilon = 1e-9);
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[0.1, 0.7, 0.7]), 1);
        assert_eq!(argmax(&[f64::NAN, 0.2, 0.1]), 1);
        assert_eq!(argmax(&[]), 0);
    }
}
