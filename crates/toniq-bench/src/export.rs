//! JSON persistence for matrices, score curves and benchmark results.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{BenchError, BenchResult};

/// Export configuration.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct ExportConfig {
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Serialize a value to a JSON string.
pub fn to_json<T: Serialize>(value: &T, config: &ExportConfig) -> BenchResult<String> {
    if config.pretty {
        serde_json::to_string_pretty(value).map_err(BenchError::from)
    } else {
        serde_json::to_string(value).map_err(BenchError::from)
    }
}

/// Write a value to a JSON file.
pub fn to_file<T: Serialize>(value: &T, path: &Path, config: &ExportConfig) -> BenchResult<()> {
    let json = to_json(value, config)?;
    std::fs::write(path, json)
        .map_err(|e| BenchError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

/// Read a value back from a JSON file.
pub fn from_file<T: DeserializeOwned>(path: &Path) -> BenchResult<T> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| BenchError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&source).map_err(BenchError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{ScoreCurve, build_reference_curve_with_bins};

    #[test]
    fn test_export_config_default() {
        let config = ExportConfig::default();
        assert!(config.pretty);
    }

    #[test]
    fn test_compact_json() {
        let curve = build_reference_curve_with_bins(&[0.1, 0.9], 2).unwrap();
        let json = to_json(&curve, &ExportConfig { pretty: false }).unwrap();
        assert_eq!(json, r#"{"bin_count":2,"values":[0.0,0.5,1.0]}"#);
    }

    #[test]
    fn test_file_roundtrip() {
        let curve = build_reference_curve_with_bins(&[0.2, 0.4, 0.4], 5).unwrap();
        let path = std::env::temp_dir().join(format!("toniq-curve-{}.json", std::process::id()));

        to_file(&curve, &path, &ExportConfig::default()).unwrap();
        let back: ScoreCurve = from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(back, curve);
    }

    #[test]
    fn test_missing_file() {
        let result: BenchResult<ScoreCurve> = from_file(Path::new("/nonexistent/toniq.json"));
        assert!(matches!(result, Err(BenchError::Io(_))));
    }
}
