use std::sync::mpsc;
use std::time::Instant;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info, warn};

use crate::data::dataset::{Batch, Dataset};
use crate::error::Result;
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::softmax::argmax;
use crate::network::network::Network;
use crate::optim::Optimizer;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Result of one optimizer step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Mean loss of the batch, measured before the update.
    pub loss: f64,
    /// Samples whose arg-max prediction matched the label.
    pub correct: usize,
    pub samples: usize,
}

/// A network after training, together with its per-epoch history.
#[derive(Debug, Clone)]
pub struct TrainedNetwork {
    pub network: Network,
    pub history: Vec<EpochStats>,
}

impl TrainedNetwork {
    pub fn final_stats(&self) -> Option<&EpochStats> {
        self.history.last()
    }
}

/// Owns everything a training run mutates: the network, the optimizer
/// state and the shuffling RNG.
pub struct TrainingSession {
    network: Network,
    optimizer: Box<dyn Optimizer>,
    rng: StdRng,
    config: TrainConfig,
    progress_tx: Option<mpsc::Sender<EpochStats>>,
    history: Vec<EpochStats>,
}

impl TrainingSession {
    pub fn new(network: Network, config: &TrainConfig) -> Result<TrainingSession> {
        config.validate()?;
        let optimizer = config.optimizer.build(&network)?;
        debug!(
            optimizer = optimizer.name(),
            learning_rate = config.optimizer.learning_rate(),
            epochs = config.epochs,
            batch_size = config.batch_size,
            "training session created"
        );
        Ok(TrainingSession {
            network,
            optimizer,
            rng: StdRng::seed_from_u64(config.seed),
            config: config.clone(),
            progress_tx: None,
            history: Vec::new(),
        })
    }

    /// Sends one `EpochStats` per completed epoch to `tx`. A dropped
    /// receiver is ignored; training still runs every configured epoch.
    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn history(&self) -> &[EpochStats] {
        &self.history
    }

    /// forward → loss → backward → optimizer step for one batch.
    pub fn step(&mut self, batch: &Batch) -> Result<StepOutcome> {
        let (logits, cache) = self.network.forward_cached(&batch.features)?;
        let out = CrossEntropyLoss::evaluate(&logits, &batch.labels)?;
        let gradients = self.network.backward(&cache, &out.gradient)?;
        self.optimizer.step(&mut self.network, &gradients)?;

        let correct = out
            .probabilities
            .data
            .iter()
            .zip(batch.labels.iter())
            .filter(|(p, &label)| argmax(p) == label)
            .count();

        Ok(StepOutcome {
            loss: out.loss,
            correct,
            samples: batch.len(),
        })
    }

    /// One full pass over `dataset`; returns and records the epoch statistics.
    pub fn run_epoch(&mut self, dataset: &Dataset) -> Result<EpochStats> {
        dataset.validate_for(&self.network)?;
        let t_start = Instant::now();
        let epoch = self.history.len() + 1;

        let mut order: Vec<usize> = (0..dataset.len()).collect();
        if self.config.shuffle {
            order.shuffle(&mut self.rng);
        }

        let mut total_loss = 0.0;
        let mut correct = 0usize;
        for (i, batch) in dataset.batches(&order, self.config.batch_size)?.enumerate() {
            let outcome = self.step(&batch)?;
            debug!(epoch, batch = i, loss = outcome.loss, "batch done");
            total_loss += outcome.loss * outcome.samples as f64;
            correct += outcome.correct;
        }

        let n = dataset.len() as f64;
        let stats = EpochStats {
            epoch,
            total_epochs: self.config.epochs,
            loss: total_loss / n,
            accuracy: correct as f64 / n,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        if stats.is_finite() {
            info!(
                epoch,
                total = stats.total_epochs,
                loss = stats.loss,
                accuracy = stats.accuracy,
                elapsed_ms = stats.elapsed_ms,
                "epoch complete"
            );
        } else {
            warn!(epoch, loss = stats.loss, "training loss is not finite");
        }

        let receiver_gone = match &self.progress_tx {
            Some(tx) => tx.send(stats.clone()).is_err(),
            None => false,
        };
        if receiver_gone {
            debug!("progress receiver dropped; continuing without reporting");
            self.progress_tx = None;
        }

        self.history.push(stats.clone());
        Ok(stats)
    }

    /// Runs the configured number of epochs and hands back the network.
    pub fn fit(mut self, dataset: &Dataset) -> Result<TrainedNetwork> {
        dataset.validate_for(&self.network)?;
        for _ in 0..self.config.epochs {
            self.run_epoch(dataset)?;
        }
        Ok(self.into_trained())
    }

    pub fn into_trained(self) -> TrainedNetwork {
        TrainedNetwork {
            network: self.network,
            history: self.history,
        }
    }
}
