//! Predefined exposure/outcome pairs, selectable by name from the CLI.

use std::collections::BTreeMap;

use super::{AnalysisConfig, FrontierMode};

/// A named exposure/outcome pair shipped with the tool.
#[derive(Debug, Clone, Copy)]
pub struct ExposureOutcomePreset {
    pub name: &'static str,
    pub exposure_cuis: &'static [&'static str],
    pub exposure_label: &'static str,
    pub outcome_cuis: &'static [&'static str],
    pub outcome_label: &'static str,
    pub description: &'static str,
}

const PRESETS: [ExposureOutcomePreset; 5] = [
    ExposureOutcomePreset {
        name: "depression_alzheimers",
        exposure_cuis: &["C0011570"],
        exposure_label: "Depression",
        outcome_cuis: &["C0002395"],
        outcome_label: "Alzheimers_Disease",
        description: "Depression and Alzheimer's disease",
    },
    ExposureOutcomePreset {
        name: "hypertension_alzheimers",
        exposure_cuis: &["C0020538"],
        exposure_label: "Hypertension",
        outcome_cuis: &["C0002395"],
        outcome_label: "Alzheimers_Disease",
        description: "Hypertension and Alzheimer's disease",
    },
    ExposureOutcomePreset {
        name: "diabetes_alzheimers",
        exposure_cuis: &["C0011849", "C0011860"],
        exposure_label: "Diabetes_Mellitus",
        outcome_cuis: &["C0002395"],
        outcome_label: "Alzheimers_Disease",
        description: "Diabetes mellitus and Alzheimer's disease",
    },
    ExposureOutcomePreset {
        name: "smoking_cancer",
        exposure_cuis: &["C0037369"],
        exposure_label: "Smoking",
        outcome_cuis: &["C0006826", "C0024121"],
        outcome_label: "Cancer",
        description: "Smoking and cancer",
    },
    ExposureOutcomePreset {
        name: "cardiovascular_dementia",
        exposure_cuis: &["C0020538", "C0003507", "C0018801"],
        exposure_label: "Cardiovascular_Disease",
        outcome_cuis: &["C0002395", "C0011265"],
        outcome_label: "Dementia",
        description: "Cardiovascular diseases and dementia",
    },
];

/// All shipped presets, in display order.
pub fn presets() -> &'static [ExposureOutcomePreset] {
    &PRESETS
}

/// Look up a preset by name.
pub fn preset(name: &str) -> Option<&'static ExposureOutcomePreset> {
    PRESETS.iter().find(|p| p.name == name)
}

impl ExposureOutcomePreset {
    /// Build a full configuration from this preset and run-level parameters.
    pub fn to_config(&self, threshold: u32, degree: u32, markov_blanket: bool) -> AnalysisConfig {
        AnalysisConfig {
            exposure_cuis: self.exposure_cuis.iter().map(|s| s.to_string()).collect(),
            outcome_cuis: self.outcome_cuis.iter().map(|s| s.to_string()).collect(),
            exposure_label: self.exposure_label.to_string(),
            outcome_label: self.outcome_label.to_string(),
            predicates: vec!["CAUSES".to_string()],
            degree,
            threshold,
            thresholds_by_degree: BTreeMap::new(),
            blocklist_cuis: Vec::new(),
            markov_blanket,
            frontier: FrontierMode::FirstHop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        let p = preset("hypertension_alzheimers").unwrap();
        assert_eq!(p.exposure_cuis, &["C0020538"]);
        assert!(preset("nonexistent").is_none());
    }

    #[test]
    fn preset_configs_validate() {
        for p in presets() {
            assert!(p.to_config(50, 3, false).validate().is_ok(), "{}", p.name);
        }
    }
}
