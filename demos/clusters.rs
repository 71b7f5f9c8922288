/// Gaussian-cluster classification demo for softmax-mlp.
///
/// Architecture: 2 → 32 (ReLU) → 3 (logits)
/// Loss:         softmax cross-entropy
/// Optimizer:    Adam, lr = 0.01
/// Batch size:   16
/// Epochs:       30
///
/// Run with:
///   cargo run --example clusters --release

use std::sync::mpsc;
use std::thread;

use rand::{rngs::StdRng, SeedableRng};

use softmax_mlp::data::synthetic::gaussian_clusters;
use softmax_mlp::{
    predict, train_with_progress, AdamConfig, EpochStats, Network, NetworkConfig, OptimizerConfig,
    TrainConfig,
};

fn main() -> softmax_mlp::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let mut rng = StdRng::seed_from_u64(2024);
    let train_set = gaussian_clusters(600, 2, 3, 0.6, &mut rng)?;

    let network = Network::from_config(&NetworkConfig {
        input_features: 2,
        hidden_units: 32,
        num_classes: 3,
        seed: 7,
    })?;
    let config = TrainConfig::new(30, 16).with_optimizer(OptimizerConfig::Adam(AdamConfig {
        learning_rate: 0.01,
        ..AdamConfig::default()
    }));

    // Print progress from a separate thread while training runs.
    let (tx, rx) = mpsc::channel::<EpochStats>();
    let printer = thread::spawn(move || {
        for stats in rx {
            if stats.epoch % 5 == 0 || stats.epoch == 1 {
                println!(
                    "Epoch {:>2}/{}: loss = {:.4}, accuracy = {:.1}%",
                    stats.epoch,
                    stats.total_epochs,
                    stats.loss,
                    stats.accuracy * 100.0
                );
            }
        }
    });

    let trained = train_with_progress(network, &train_set, &config, tx)?;
    if let Err(panic) = printer.join() {
        std::panic::resume_unwind(panic);
    }

    let prediction = predict(&trained.network, train_set.features())?;
    let correct = prediction
        .classes
        .iter()
        .zip(train_set.labels())
        .filter(|(p, l)| p == l)
        .count();
    println!(
        "Final accuracy: {:.1}% ({correct}/{})",
        100.0 * correct as f64 / train_set.len() as f64,
        train_set.len()
    );

    Ok(())
}
