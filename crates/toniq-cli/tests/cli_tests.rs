//! CLI workflow tests.
//!
//! The CLI is a binary crate, so these tests drive the same library calls the
//! commands make: matrix files in, curves out, curves scored.

// ============================================================================
// Backend selection
// ============================================================================

mod backend_selection {
    use toniq_adapter_sim::QaoaSimulator;
    use toniq_bench::SamplingRunner;

    /// Equivalent to commands::common::get_runner
    fn get_runner(backend: &str, noise: f64) -> anyhow::Result<QaoaSimulator> {
        match backend.to_lowercase().as_str() {
            "simulator" | "sim" => Ok(QaoaSimulator::new()),
            "noisy" | "noisy-sim" => {
                if !(0.0..=1.0).contains(&noise) {
                    anyhow::bail!("Noise strength must be in [0, 1], got {noise}");
                }
                Ok(QaoaSimulator::new().with_name("noisy").with_depolarizing(noise))
            }
            other => anyhow::bail!("Unknown backend: '{other}'. Available: simulator, noisy"),
        }
    }

    #[test]
    fn test_simulator_backend() {
        assert_eq!(get_runner("simulator", 0.0).unwrap().name(), "simulator");
        assert_eq!(get_runner("SIM", 0.0).unwrap().name(), "simulator");
    }

    #[test]
    fn test_noisy_backend() {
        assert_eq!(get_runner("noisy", 0.1).unwrap().name(), "noisy");
        assert!(get_runner("noisy", 1.5).is_err());
    }

    #[test]
    fn test_unknown_backend() {
        let err = get_runner("quantum_computer_9000", 0.0).unwrap_err().to_string();
        assert!(err.contains("Unknown backend"));
    }
}

// ============================================================================
// File workflows
// ============================================================================

mod file_workflows {
    use std::fs;

    use toniq_adapter_sim::QaoaSimulator;
    use toniq_bench::export::{self, ExportConfig};
    use toniq_bench::{
        BenchConfig, QuboMatrix, Reference, SamplingOptions, ScoreCurve, Scorer,
        generate_matrix_seeded, solve_ground_state,
    };

    #[test]
    fn test_matrix_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.json");

        let matrix = generate_matrix_seeded(3, 0.0, 10.0, 1).unwrap();
        export::to_file(&matrix, &path, &ExportConfig::default()).unwrap();

        let rows: Vec<Vec<f64>> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(rows.len(), 3);

        let loaded: QuboMatrix = export::from_file(&path).unwrap();
        assert_eq!(loaded, matrix);
    }

    #[test]
    fn test_ground_state_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.json");
        fs::write(&path, "[[2.0, 0.0], [0.0, 2.0]]").unwrap();

        let matrix: QuboMatrix = export::from_file(&path).unwrap();
        let gs = solve_ground_state(&matrix).unwrap();
        assert_eq!(gs.bitstring, "00");
        assert_eq!(gs.index, 0);
        assert_eq!(gs.energy, 0.0);
    }

    #[test]
    fn test_asymmetric_matrix_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.json");
        fs::write(&path, "[[1.0, 2.0], [0.0, 1.0]]").unwrap();

        let result: toniq_bench::BenchResult<QuboMatrix> = export::from_file(&path);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_reference_then_score() {
        let dir = tempfile::tempdir().unwrap();
        let curve_path = dir.path().join("curve.json");

        let matrix = generate_matrix_seeded(3, 1.0, 5.0, 4).unwrap();
        let config = BenchConfig {
            reference_reps: 20,
            bin_count: 50,
            sampling: SamplingOptions::default().with_seed(8).with_max_iterations(5),
            ..Default::default()
        };
        let reference = Reference::build(&QaoaSimulator::new(), matrix, &config)
            .await
            .unwrap();
        export::to_file(reference.curve(), &curve_path, &ExportConfig::default()).unwrap();

        let curve: ScoreCurve = export::from_file(&curve_path).unwrap();
        assert_eq!(curve.values().len(), 51);
        let scorer = Scorer::from_curve(curve);
        assert_eq!(scorer.score(1.0).unwrap(), 1.0);
        assert!(scorer.score(1.5).is_err());
    }
}

// ============================================================================
// Config loading
// ============================================================================

mod config_loading {
    use std::fs;

    use toniq_bench::BenchConfig;

    #[test]
    fn test_yaml_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.yaml");
        fs::write(
            &path,
            "dim: 3\nlayers: 2\nreference_reps: 50\nsampling:\n  max_iterations: 20\n",
        )
        .unwrap();

        let config = BenchConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.dim, 3);
        assert_eq!(config.layers, 2);
        assert_eq!(config.reference_reps, 50);
        assert_eq!(config.sampling.max_iterations, 20);
        assert_eq!(config.target_reps, 10);
    }

    #[test]
    fn test_missing_config_file() {
        let result = BenchConfig::from_yaml_file(std::path::Path::new("/nonexistent/bench.yaml"));
        assert!(result.is_err());
    }
}
