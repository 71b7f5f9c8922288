use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use softmax_mlp::data::synthetic::{gaussian_clusters, random_labels};
use softmax_mlp::{
    create_network, predict, predict_one, softmax, train, AdamConfig, Dataset, Error, Matrix,
    Network, NetworkConfig, OptimizerConfig, TrainConfig,
};

#[test]
fn random_labels_settle_near_chance() {
    let mut rng = StdRng::seed_from_u64(17);
    let data = random_labels(1000, 10, 4, &mut rng).unwrap();
    let network = Network::from_config(&NetworkConfig::default()).unwrap();

    let trained = train(network, &data, &TrainConfig::new(10, 32)).unwrap();
    assert_eq!(trained.history.len(), 10);

    let first = &trained.history[0];
    let last = trained.final_stats().unwrap();
    let chance = 4f64.ln();
    assert!(last.loss.is_finite());
    assert!(last.loss < first.loss, "loss went from {} to {}", first.loss, last.loss);
    assert!((last.loss - chance).abs() < 0.15, "final loss {} vs ln 4 = {chance}", last.loss);
    assert!((0.15..0.45).contains(&last.accuracy), "train accuracy {}", last.accuracy);

    // Fresh random labels: nothing carries over, accuracy is chance level.
    let held_out = random_labels(2000, 10, 4, &mut rng).unwrap();
    let prediction = predict(&trained.network, held_out.features()).unwrap();
    let correct = prediction
        .classes
        .iter()
        .zip(held_out.labels())
        .filter(|(p, l)| p == l)
        .count();
    let accuracy = correct as f64 / held_out.len() as f64;
    assert!((accuracy - 0.25).abs() < 0.05, "held-out accuracy {accuracy}");
}

#[test]
fn separable_clusters_are_learned() {
    let mut rng = StdRng::seed_from_u64(4);
    let data = gaussian_clusters(300, 2, 3, 0.3, &mut rng).unwrap();
    let network = Network::from_config(&NetworkConfig {
        input_features: 2,
        hidden_units: 32,
        num_classes: 3,
        seed: 1,
    })
    .unwrap();
    let config = TrainConfig::new(40, 16).with_optimizer(OptimizerConfig::Adam(AdamConfig {
        learning_rate: 0.01,
        ..AdamConfig::default()
    }));

    let trained = train(network, &data, &config).unwrap();
    let last = trained.final_stats().unwrap();
    assert!(last.accuracy > 0.9, "accuracy {}", last.accuracy);
    assert!(last.loss < trained.history[0].loss);
}

#[test]
fn untrained_network_is_uniform_at_zero_input() {
    for classes in [2, 3, 7] {
        let net = create_network(6, 24, classes).unwrap();
        let (_, probs, _) = predict_one(&net, &[0.0; 6]).unwrap();
        for p in probs {
            assert_abs_diff_eq!(p, 1.0 / classes as f64, epsilon = 1e-9);
        }
    }
}

#[test]
fn softmax_properties_hold_on_random_vectors() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let len = rng.gen_range(1..20);
        let z: Vec<f64> = (0..len).map(|_| rng.gen_range(-500.0..500.0)).collect();
        let p = softmax(&z);
        assert_abs_diff_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-6);
        assert!(p.iter().all(|&x| (0.0..=1.0).contains(&x)));

        let c = rng.gen_range(-100.0..100.0);
        let shifted: Vec<f64> = z.iter().map(|x| x + c).collect();
        for (a, b) in p.iter().zip(softmax(&shifted).iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }
}

#[test]
fn training_on_out_of_range_labels_fails_fast() {
    let data = Dataset::new(Matrix::zeros(4, 3), vec![0, 1, 4, 1]).unwrap();
    let result = train(create_network(3, 8, 4).unwrap(), &data, &TrainConfig::default());
    match result {
        Err(Error::LabelOutOfRange { index, label, num_classes }) => {
            assert_eq!((index, label, num_classes), (2, 4, 4));
        }
        other => panic!("expected LabelOutOfRange, got {:?}", other.map(|t| t.history)),
    }
}
