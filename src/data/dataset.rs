use crate::error::{Error, Result};
use crate::loss::cross_entropy::check_labels;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Features (samples × features) paired with one class label per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Matrix,
    labels: Vec<usize>,
}

/// One mini-batch, copied out of a [`Dataset`].
#[derive(Debug, Clone)]
pub struct Batch {
    pub features: Matrix,
    pub labels: Vec<usize>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Dataset {
    /// Pairs features with labels. Fails on an empty dataset or when the row
    /// count and label count differ.
    pub fn new(features: Matrix, labels: Vec<usize>) -> Result<Dataset> {
        if labels.is_empty() || features.rows == 0 {
            return Err(Error::EmptyDataset);
        }
        if features.rows != labels.len() {
            return Err(Error::ShapeMismatch {
                context: "Dataset::new",
                expected: format!("{} labels", features.rows),
                actual: format!("{} labels", labels.len()),
            });
        }
        Ok(Dataset { features, labels })
    }

    /// Builds a dataset from per-sample rows.
    pub fn from_samples(samples: Vec<Vec<f64>>, labels: Vec<usize>) -> Result<Dataset> {
        if samples.is_empty() {
            return Err(Error::EmptyDataset);
        }
        Dataset::new(Matrix::from_rows(samples)?, labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn num_features(&self) -> usize {
        self.features.cols
    }

    pub fn features(&self) -> &Matrix {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Checks feature width and label range against the network's architecture.
    pub fn validate_for(&self, network: &Network) -> Result<()> {
        if self.num_features() != network.input_features() {
            return Err(Error::shape(
                "Dataset::validate_for",
                (self.len(), network.input_features()),
                self.features.shape(),
            ));
        }
        check_labels(&self.labels, network.num_classes())
    }

    /// Copies the samples at `indices` (in that order) into a batch.
    pub fn batch(&self, indices: &[usize]) -> Batch {
        Batch {
            features: self.features.select_rows(indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Splits `order` into consecutive batches of `batch_size`; the last one
    /// may be smaller. A zero batch size is rejected.
    pub fn batches<'a>(
        &'a self,
        order: &'a [usize],
        batch_size: usize,
    ) -> Result<impl Iterator<Item = Batch> + 'a> {
        if batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be positive".into()));
        }
        Ok(order.chunks(batch_size).map(move |chunk| self.batch(chunk)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::network::create_network;

    fn toy() -> Dataset {
        Dataset::from_samples(
            vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0], vec![6.0, 7.0], vec![8.0, 9.0]],
            vec![0, 1, 2, 1, 0],
        )
        .unwrap()
    }

    #[test]
    fn rejects_mismatched_or_empty_input() {
        assert!(matches!(
            Dataset::new(Matrix::zeros(3, 2), vec![0, 1]),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(Dataset::from_samples(vec![], vec![]), Err(Error::EmptyDataset)));
    }

    #[test]
    fn batches_cover_every_sample_once() {
        let data = toy();
        let order: Vec<usize> = (0..data.len()).rev().collect();
        let batches: Vec<Batch> = data.batches(&order, 2).unwrap().collect();
        assert_eq!(batches.iter().map(Batch::len).collect::<Vec<_>>(), vec![2, 2, 1]);
        assert_eq!(batches[0].labels, vec![0, 1]);
        assert_eq!(batches[0].features.data[0], vec![8.0, 9.0]);
        assert_eq!(batches[2].features.data[0], vec![0.0, 1.0]);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let data = toy();
        let order: Vec<usize> = (0..data.len()).collect();
        assert!(matches!(data.batches(&order, 0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn validate_for_checks_width_and_labels() {
        let data = toy();
        assert!(data.validate_for(&create_network(2, 4, 3).unwrap()).is_ok());
        assert!(matches!(
            data.validate_for(&create_network(3, 4, 3).unwrap()),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(
            data.validate_for(&create_network(2, 4, 2).unwrap()),
            Err(Error::LabelOutOfRange { index: 2, label: 2, num_classes: 2 })
        ));
    }
}
