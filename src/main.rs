//! Trains the classifier on random features with random labels and prints
//! one JSON line per epoch followed by a prediction for the zero vector.
//!
//!   cargo run --release -- [experiment.json]
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for per-batch losses.

use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use softmax_mlp::data::synthetic;
use softmax_mlp::{predict_one, train, ExperimentConfig, Network, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "loading experiment config");
            ExperimentConfig::load_json(&path)?
        }
        None => ExperimentConfig::default(),
    };
    config.validate()?;

    let net_cfg = &config.network;
    let mut data_rng = StdRng::seed_from_u64(net_cfg.seed.wrapping_add(1));
    let dataset = synthetic::random_labels(
        config.samples,
        net_cfg.input_features,
        net_cfg.num_classes,
        &mut data_rng,
    )?;
    info!(
        samples = dataset.len(),
        features = net_cfg.input_features,
        hidden = net_cfg.hidden_units,
        classes = net_cfg.num_classes,
        "generated random-label dataset"
    );

    let network = Network::from_config(net_cfg)?;
    let trained = train(network, &dataset, &config.train)?;

    for stats in &trained.history {
        println!("{}", serde_json::to_string(stats)?);
    }

    let (logits, probabilities, class) =
        predict_one(&trained.network, &vec![0.0; net_cfg.input_features])?;
    println!(
        "{}",
        json!({
            "input": "zeros",
            "logits": logits,
            "probabilities": probabilities,
            "predicted_class": class,
            "chance_loss": (net_cfg.num_classes as f64).ln(),
        })
    );

    Ok(())
}
