//! End-to-end benchmark runs on the local sampler.

use toniq_adapter_sim::QaoaSimulator;
use toniq_bench::{BenchConfig, Reference, SamplingOptions, run_benchmark, score_backend};

fn config() -> BenchConfig {
    BenchConfig {
        dim: 3,
        lower: 1.0,
        upper: 10.0,
        layers: 1,
        reference_reps: 30,
        target_reps: 5,
        bin_count: 20,
        sampling: SamplingOptions::default().with_seed(11).with_max_iterations(8),
        seed: Some(21),
    }
}

#[tokio::test]
async fn benchmark_reports_score_and_metrics() {
    let ideal = QaoaSimulator::new();
    let noisy = QaoaSimulator::new().with_name("noisy").with_depolarizing(0.2);

    let result = run_benchmark(&ideal, &noisy, &config()).await.unwrap();

    assert_eq!(result.name, "toniq");
    assert!((0.0..=1.0).contains(&result.value));
    assert_eq!(result.metrics["target_backend"], "noisy");
    assert_eq!(result.metrics["dim"], 3);
    assert_eq!(result.metrics["reference_reps"], 30);
    assert_eq!(result.metrics["target_reps"], 5);
    assert_eq!(result.metrics["scores"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn seeded_benchmark_is_reproducible() {
    let ideal = QaoaSimulator::new();
    let a = run_benchmark(&ideal, &ideal, &config()).await.unwrap();
    let b = run_benchmark(&ideal, &ideal, &config()).await.unwrap();
    assert_eq!(a.value, b.value);
    assert_eq!(a.metrics["scores"], b.metrics["scores"]);
}

#[tokio::test]
async fn reference_accuracies_lie_in_unit_interval() {
    let config = config();
    let matrix = config.generate_matrix().unwrap();
    let reference = Reference::build(&QaoaSimulator::new(), matrix, &config)
        .await
        .unwrap();

    assert_eq!(reference.accuracies.len(), 30);
    assert!(reference.accuracies.iter().all(|a| (0.0..=1.0).contains(a)));
    assert_eq!(reference.curve().values().len(), 21);
    assert!((reference.curve().values()[20] - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn fully_depolarized_target_scores_uniform_accuracy() {
    let config = config();
    let matrix = config.generate_matrix().unwrap();
    let reference = Reference::build(&QaoaSimulator::new(), matrix, &config)
        .await
        .unwrap();

    let mixed = QaoaSimulator::new().with_depolarizing(1.0);
    let result = score_backend(&reference, &mixed, &config).await.unwrap();

    // Every target run puts exactly 1/8 on the ground state.
    let expected = reference.scorer.score(0.125).unwrap();
    assert!((result.value - expected).abs() < 1e-12);
    assert_eq!(result.metrics["mean_accuracy"], 0.125);
}

#[tokio::test]
async fn backend_options_leave_reference_ideal() {
    let yaml = "dim: 3\nlower: 1.0\nupper: 10.0\nreference_reps: 10\ntarget_reps: 3\n\
                bin_count: 20\nseed: 21\nsampling:\n  seed: 11\n  max_iterations: 8\n  depolarizing: 1.0\n";
    let config = BenchConfig::from_yaml(yaml).unwrap();
    let matrix = config.generate_matrix().unwrap();
    let reference = Reference::build(&QaoaSimulator::new(), matrix, &config)
        .await
        .unwrap();

    assert!(
        reference.accuracies.iter().any(|a| (a - 0.125).abs() > 1e-9),
        "reference was depolarized: {:?}",
        reference.accuracies
    );

    let result = score_backend(&reference, &QaoaSimulator::new(), &config)
        .await
        .unwrap();
    assert_eq!(result.metrics["mean_accuracy"], 0.125);
}

#[tokio::test]
async fn ideal_target_does_not_replay_reference_runs() {
    let config = config();
    let matrix = config.generate_matrix().unwrap();
    let reference = Reference::build(&QaoaSimulator::new(), matrix, &config)
        .await
        .unwrap();

    let result = score_backend(&reference, &QaoaSimulator::new(), &config)
        .await
        .unwrap();

    // Same seed on both sides would reproduce the first five reference runs.
    let replayed: f64 = reference.accuracies[..5].iter().sum::<f64>() / 5.0;
    let target = result.metrics["mean_accuracy"].as_f64().unwrap();
    assert_ne!(target, replayed);
}
