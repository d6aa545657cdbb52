//! Performance metrics, run configuration, and the evidence-absent
//! reason record.

use std::io;
use std::path::Path;

use chrono::Utc;
use semdag_core::errors::AnalysisError;
use semdag_core::{AnalysisConfig, TimingRecorder};
use serde_json::{json, Map, Value};

use super::write_artifact;

/// Write `performance_metrics.json`: stage -> duration and completion
/// timestamp.
pub fn write_metrics(path: &Path, timing: &TimingRecorder) -> Result<(), AnalysisError> {
    let mut stages = Map::new();
    for stage in timing.stages() {
        stages.insert(
            stage.stage.clone(),
            json!({
                "duration_secs": stage.duration_secs,
                "timestamp": stage.timestamp.to_rfc3339(),
            }),
        );
    }
    write_pretty(path, &Value::Object(stages))
}

/// Write `run_configuration.json`: the resolved parameters of this run.
pub fn write_run_configuration(
    path: &Path,
    config: &AnalysisConfig,
    db_path: &str,
    output_dir: &Path,
) -> Result<(), AnalysisError> {
    let thresholds: Map<String, Value> = config
        .thresholds_by_degree
        .iter()
        .map(|(hop, value)| (hop.to_string(), json!(value)))
        .collect();

    let record = json!({
        "exposure_cuis": config.exposure_cuis,
        "exposure_name": config.exposure_label,
        "outcome_cuis": config.outcome_cuis,
        "outcome_name": config.outcome_label,
        "predication_types": config.predicates,
        "degree": config.degree,
        "threshold": config.threshold,
        "thresholds_by_degree": thresholds,
        "blocklist_size": config.blocklist_cuis.len(),
        "markov_blanket": config.markov_blanket,
        "database": db_path,
        "output_directory": output_dir.display().to_string(),
        "run_timestamp": Utc::now().to_rfc3339(),
    });
    write_pretty(path, &record)
}

/// Write `no_evidence.json`: the machine-readable reason record emitted
/// when the pre-flight probe finds nothing.
pub fn write_no_evidence(path: &Path, config: &AnalysisConfig) -> Result<(), AnalysisError> {
    let record = json!({
        "outcome": "evidence_absent",
        "exposure_cuis": config.exposure_cuis,
        "outcome_cuis": config.outcome_cuis,
        "predication_types": config.predicates,
        "threshold": config.threshold_for_hop(1),
    });
    write_pretty(path, &record)
}

fn write_pretty(path: &Path, value: &Value) -> Result<(), AnalysisError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|e| AnalysisError::Emit {
        path: path.to_path_buf(),
        source: io::Error::other(e),
    })?;
    text.push('\n');
    write_artifact(path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use semdag_core::FrontierMode;

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            exposure_cuis: vec!["C0011570".into()],
            outcome_cuis: vec!["C0002395".into()],
            exposure_label: "Depression".into(),
            outcome_label: "Alzheimers_Disease".into(),
            predicates: vec!["CAUSES".into()],
            degree: 2,
            threshold: 10,
            thresholds_by_degree: BTreeMap::from([(1, 50), (2, 10)]),
            blocklist_cuis: vec!["C0030705".into()],
            markov_blanket: false,
            frontier: FrontierMode::FirstHop,
        }
    }

    #[test]
    fn metrics_record_every_stage() {
        let mut timing = TimingRecorder::new();
        timing.time("preflight", || ());
        timing.time("hop_1_fetch", || ());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("performance_metrics.json");
        write_metrics(&path, &timing).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed["preflight"]["duration_secs"].is_number());
        assert!(parsed["hop_1_fetch"]["timestamp"].is_string());
    }

    #[test]
    fn run_configuration_echoes_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_configuration.json");
        write_run_configuration(&path, &config(), "semmed.sqlite", dir.path()).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["exposure_name"], "Depression");
        assert_eq!(parsed["degree"], 2);
        assert_eq!(parsed["thresholds_by_degree"]["1"], 50);
        assert_eq!(parsed["blocklist_size"], 1);
    }

    #[test]
    fn no_evidence_record_uses_the_first_hop_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_evidence.json");
        write_no_evidence(&path, &config()).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["outcome"], "evidence_absent");
        assert_eq!(parsed["threshold"], 50);
    }
}
