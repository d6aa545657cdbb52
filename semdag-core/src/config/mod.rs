//! Analysis configuration: the immutable record the pipeline consumes.
//!
//! A configuration is built once from a YAML file or a predefined
//! exposure/outcome pair, validated at the boundary, and passed by value.

mod presets;
mod yaml;

use std::collections::BTreeMap;

use crate::errors::ConfigError;

pub use presets::{preset, presets, ExposureOutcomePreset};
pub use yaml::load_yaml_config;

/// Predicates recognized in SemMedDB-style predication stores. Configured
/// predicates outside this set are dropped with a warning.
pub const KNOWN_PREDICATES: [&str; 23] = [
    "CAUSES",
    "TREATS",
    "PREVENTS",
    "INTERACTS_WITH",
    "AFFECTS",
    "ASSOCIATED_WITH",
    "PREDISPOSES",
    "COMPLICATES",
    "AUGMENTS",
    "DISRUPTS",
    "INHIBITS",
    "STIMULATES",
    "PRODUCES",
    "MANIFESTATION_OF",
    "RESULT_OF",
    "PROCESS_OF",
    "PART_OF",
    "ISA",
    "LOCATION_OF",
    "ADMINISTERED_TO",
    "METHOD_OF",
    "USES",
    "DIAGNOSES",
];

/// Which CUI set seeds hops beyond the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierMode {
    /// Every hop >= 2 expands from the hop-1 CUI set. This matches the
    /// historical traversal and keeps breadth bounded.
    #[default]
    FirstHop,
    /// Each hop expands from the union of all CUIs seen so far.
    Cumulative,
}

/// The resolved configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Concept identifiers treated as the exposure.
    pub exposure_cuis: Vec<String>,
    /// Concept identifiers treated as the outcome.
    pub outcome_cuis: Vec<String>,
    /// Display name all exposure CUIs consolidate onto.
    pub exposure_label: String,
    /// Display name all outcome CUIs consolidate onto.
    pub outcome_label: String,
    /// Predicate filter applied to every traversal and Markov-blanket query.
    pub predicates: Vec<String>,
    /// Maximum hop depth (>= 1).
    pub degree: u32,
    /// Default minimum distinct-publication count per retained triple.
    pub threshold: u32,
    /// Optional per-hop threshold overrides.
    pub thresholds_by_degree: BTreeMap<u32, u32>,
    /// CUIs that must never appear as subject or object of a retained
    /// assertion, at any hop.
    pub blocklist_cuis: Vec<String>,
    /// Compute the Markov-blanket union and emit its induced subgraph.
    pub markov_blanket: bool,
    pub frontier: FrontierMode,
}

impl AnalysisConfig {
    /// Effective evidence threshold for a hop: the per-hop override when
    /// present, the flat threshold otherwise.
    pub fn threshold_for_hop(&self, hop: u32) -> u32 {
        self.thresholds_by_degree
            .get(&hop)
            .copied()
            .unwrap_or(self.threshold)
    }

    /// Exposure and outcome CUIs as one list, exposures first.
    pub fn all_target_cuis(&self) -> Vec<String> {
        let mut cuis = self.exposure_cuis.clone();
        cuis.extend(self.outcome_cuis.iter().cloned());
        cuis
    }

    /// Check every invariant. Called once at the boundary, before any
    /// database activity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exposure_cuis.is_empty() {
            return Err(ConfigError::EmptyExposures);
        }
        if self.outcome_cuis.is_empty() {
            return Err(ConfigError::EmptyOutcomes);
        }
        if self.predicates.is_empty() {
            return Err(ConfigError::EmptyPredicates);
        }
        if self.degree < 1 {
            return Err(ConfigError::InvalidDegree {
                degree: self.degree,
            });
        }
        if self.threshold < 1 {
            return Err(ConfigError::ThresholdOutOfRange {
                threshold: self.threshold,
            });
        }
        for (&hop, _) in &self.thresholds_by_degree {
            if hop < 1 || hop > self.degree {
                return Err(ConfigError::HopThresholdOutOfRange {
                    hop,
                    degree: self.degree,
                });
            }
        }
        for cui in &self.blocklist_cuis {
            if self.exposure_cuis.contains(cui) || self.outcome_cuis.contains(cui) {
                return Err(ConfigError::BlocklistOverlap { cui: cui.clone() });
            }
        }
        Ok(())
    }
}

/// Uppercase, dedupe, and vocabulary-check a predicate list. Unknown
/// predicates are dropped with a warning; an all-unknown list is an error.
pub fn normalize_predicates(raw: &[String]) -> Result<Vec<String>, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::EmptyPredicates);
    }

    let mut kept = Vec::new();
    let mut unknown = Vec::new();
    for pred in raw {
        let upper = pred.trim().to_uppercase();
        if upper.is_empty() {
            continue;
        }
        if KNOWN_PREDICATES.contains(&upper.as_str()) {
            if !kept.contains(&upper) {
                kept.push(upper);
            }
        } else {
            unknown.push(upper);
        }
    }

    if !unknown.is_empty() {
        tracing::warn!(
            dropped = unknown.join(", "),
            "ignoring predicates outside the known vocabulary"
        );
    }
    if kept.is_empty() {
        return Err(ConfigError::UnknownPredicates {
            listed: unknown.join(", "),
        });
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AnalysisConfig {
        AnalysisConfig {
            exposure_cuis: vec!["C0011570".into()],
            outcome_cuis: vec!["C0002395".into()],
            exposure_label: "Depression".into(),
            outcome_label: "Alzheimers_Disease".into(),
            predicates: vec!["CAUSES".into()],
            degree: 3,
            threshold: 50,
            thresholds_by_degree: BTreeMap::new(),
            blocklist_cuis: Vec::new(),
            markov_blanket: false,
            frontier: FrontierMode::FirstHop,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn empty_sets_are_rejected() {
        let mut cfg = base_config();
        cfg.exposure_cuis.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyExposures)));

        let mut cfg = base_config();
        cfg.outcome_cuis.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyOutcomes)));

        let mut cfg = base_config();
        cfg.predicates.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyPredicates)));
    }

    #[test]
    fn blocklist_overlap_is_rejected() {
        let mut cfg = base_config();
        cfg.blocklist_cuis.push("C0011570".into());
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::BlocklistOverlap { .. })
        ));
    }

    #[test]
    fn hop_threshold_outside_degree_is_rejected() {
        let mut cfg = base_config();
        cfg.thresholds_by_degree.insert(4, 10);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::HopThresholdOutOfRange { hop: 4, .. })
        ));
    }

    #[test]
    fn per_hop_threshold_falls_back_to_flat() {
        let mut cfg = base_config();
        cfg.thresholds_by_degree.insert(1, 100);
        assert_eq!(cfg.threshold_for_hop(1), 100);
        assert_eq!(cfg.threshold_for_hop(2), 50);
    }

    #[test]
    fn predicate_normalization_filters_unknown() {
        let preds = normalize_predicates(&["causes".into(), "FROBNICATES".into()]).unwrap();
        assert_eq!(preds, vec!["CAUSES".to_string()]);

        assert!(matches!(
            normalize_predicates(&["FROBNICATES".into()]),
            Err(ConfigError::UnknownPredicates { .. })
        ));
    }
}
