use std::sync::mpsc;

use crate::data::dataset::Dataset;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::session::{TrainedNetwork, TrainingSession};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` on `dataset` for `config.epochs` epochs and returns it
/// together with the per-epoch loss/accuracy history.
///
/// # Errors
/// - `InvalidConfig` if `epochs` or `batch_size` is zero, or the optimizer
///   hyperparameters are invalid
/// - `ShapeMismatch` if the dataset's feature count differs from the
///   network's input width
/// - `LabelOutOfRange` if any label is not below the network's class count
///
/// All of these are checked before the first update. A diverging run
/// (NaN/Inf loss) is not an error; it shows up in the history.
pub fn train(network: Network, dataset: &Dataset, config: &TrainConfig) -> Result<TrainedNetwork> {
    TrainingSession::new(network, config)?.fit(dataset)
}

/// Like [`train`], additionally sending each epoch's statistics to `progress_tx`.
pub fn train_with_progress(
    network: Network,
    dataset: &Dataset,
    config: &TrainConfig,
    progress_tx: mpsc::Sender<EpochStats>,
) -> Result<TrainedNetwork> {
    TrainingSession::new(network, config)?
        .with_progress(progress_tx)
        .fit(dataset)
}
