//! Seedable random data sources.

use std::f64::consts::{FRAC_PI_2, PI};

use rand::Rng;
use rand_distr::StandardNormal;

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Standard-normal features with labels drawn uniformly from `0..classes`,
/// independent of the features. Nothing here is learnable, so a well-behaved
/// classifier should sit near `ln(classes)` loss and `1/classes` accuracy.
pub fn random_labels<R: Rng + ?Sized>(
    samples: usize,
    features: usize,
    classes: usize,
    rng: &mut R,
) -> Result<Dataset> {
    check_sizes(samples, features, classes)?;
    let x = standard_normal(samples, features, rng);
    let labels = (0..samples).map(|_| rng.gen_range(0..classes)).collect();
    Dataset::new(x, labels)
}

/// One Gaussian blob per class, with samples scattered around the class
/// centre with std `spread`.
///
/// Centres sit evenly on a circle of radius 3: coordinate `j` of class `k`
/// is `3·cos(2πk/classes + j·π/2)`, so with two or more features every pair
/// of classes is well separated.
pub fn gaussian_clusters<R: Rng + ?Sized>(
    samples: usize,
    features: usize,
    classes: usize,
    spread: f64,
    rng: &mut R,
) -> Result<Dataset> {
    check_sizes(samples, features, classes)?;
    let centres: Vec<Vec<f64>> = (0..classes)
        .map(|k| {
            let angle = 2.0 * PI * k as f64 / classes as f64;
            (0..features)
                .map(|j| 3.0 * (angle + j as f64 * FRAC_PI_2).cos())
                .collect()
        })
        .collect();

    let mut x = standard_normal(samples, features, rng);
    let mut labels = Vec::with_capacity(samples);
    for row in x.data.iter_mut() {
        let class = rng.gen_range(0..classes);
        for (v, c) in row.iter_mut().zip(centres[class].iter()) {
            *v = c + *v * spread;
        }
        labels.push(class);
    }
    Dataset::new(x, labels)
}

fn standard_normal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
    let data = (0..rows)
        .map(|_| (0..cols).map(|_| rng.sample::<f64, _>(StandardNormal)).collect())
        .collect();
    Matrix { rows, cols, data }
}

fn check_sizes(samples: usize, features: usize, classes: usize) -> Result<()> {
    if samples == 0 {
        return Err(Error::EmptyDataset);
    }
    if features == 0 || classes == 0 {
        return Err(Error::InvalidConfig(
            "features and classes must be positive".into(),
        ));
    }
    Ok(())
}
