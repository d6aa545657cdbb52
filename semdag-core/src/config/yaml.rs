//! YAML analysis-config loading.
//!
//! Field names track the historical file format: `min_pmids` for the
//! threshold, `k_hops` as a legacy alias for `degree`, `blacklist_cuis`
//! as the legacy spelling of the blocklist, and `predication_type` /
//! `predication_types` accepting either a single (optionally
//! comma-separated) string or a list.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;

use super::{normalize_predicates, AnalysisConfig, FrontierMode};

const DEFAULT_THRESHOLD: u32 = 50;
const DEFAULT_DEGREE: u32 = 3;

/// A YAML scalar-or-list field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    exposure_cuis: Option<OneOrMany>,
    outcome_cuis: Option<OneOrMany>,
    exposure_name: Option<String>,
    outcome_name: Option<String>,
    predication_type: Option<OneOrMany>,
    predication_types: Option<OneOrMany>,
    min_pmids: Option<u32>,
    degree: Option<u32>,
    k_hops: Option<u32>,
    thresholds_by_degree: BTreeMap<u32, u32>,
    blocklist_cuis: Option<OneOrMany>,
    blacklist_cuis: Option<OneOrMany>,
    markov_blanket: Option<bool>,
    frontier: Option<String>,
}

/// Load and validate an [`AnalysisConfig`] from a YAML file.
pub fn load_yaml_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let raw: RawConfig = serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
        path: path.display().to_string(),
        source,
    })?;

    let exposure_cuis = raw
        .exposure_cuis
        .map(OneOrMany::into_vec)
        .unwrap_or_default();
    let outcome_cuis = raw
        .outcome_cuis
        .map(OneOrMany::into_vec)
        .unwrap_or_default();

    let exposure_label = raw
        .exposure_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("Exposure_{}", exposure_cuis.join("_")));
    let outcome_label = raw
        .outcome_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("Outcome_{}", outcome_cuis.join("_")));

    let predicates = split_predicates(raw.predication_types.or(raw.predication_type));
    let predicates = normalize_predicates(&predicates)?;

    let blocklist_cuis = raw
        .blocklist_cuis
        .or(raw.blacklist_cuis)
        .map(OneOrMany::into_vec)
        .unwrap_or_default();

    let frontier = match raw.frontier.as_deref() {
        None | Some("first-hop") => FrontierMode::FirstHop,
        Some("cumulative") => FrontierMode::Cumulative,
        Some(other) => {
            tracing::warn!(frontier = other, "unknown frontier mode, using first-hop");
            FrontierMode::FirstHop
        }
    };

    let config = AnalysisConfig {
        exposure_cuis,
        outcome_cuis,
        exposure_label,
        outcome_label,
        predicates,
        degree: raw.degree.or(raw.k_hops).unwrap_or(DEFAULT_DEGREE),
        threshold: raw.min_pmids.unwrap_or(DEFAULT_THRESHOLD),
        thresholds_by_degree: raw.thresholds_by_degree,
        blocklist_cuis,
        markov_blanket: raw.markov_blanket.unwrap_or(false),
        frontier,
    };
    config.validate()?;
    Ok(config)
}

/// Flatten the predicate field: each entry may itself be comma-separated.
fn split_predicates(field: Option<OneOrMany>) -> Vec<String> {
    let entries = match field {
        Some(f) => f.into_vec(),
        None => return vec!["CAUSES".to_string()],
    };
    entries
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
