//! Node consolidation: one canonical name per CUI, with every exposure CUI
//! folded onto the configured exposure label and likewise for outcomes.

use std::collections::BTreeSet;

use semdag_core::types::Assertion;
use semdag_core::{clean_node_name, AnalysisConfig, FxHashMap};

/// Maps surface names into the consolidated node namespace.
#[derive(Debug, Default)]
pub struct ConsolidationMap {
    /// CUI -> most frequent surface name over the retained assertions.
    cui_to_canonical: FxHashMap<String, String>,
    /// Cleaned name -> display label. Absent keys map to themselves.
    name_to_display: FxHashMap<String, String>,
    exposure_nodes: BTreeSet<String>,
    outcome_nodes: BTreeSet<String>,
}

impl ConsolidationMap {
    /// Build the map from the retained assertions and the configured
    /// target CUIs. `store_names` carries the sentence-store name per
    /// target CUI (may be incomplete; missing entries fall back to
    /// CUI-derived labels).
    pub fn build(
        assertions: &[Assertion],
        config: &AnalysisConfig,
        store_names: &FxHashMap<String, String>,
    ) -> Self {
        let cui_to_canonical = elect_canonical_names(assertions);

        let mut map = Self {
            cui_to_canonical,
            name_to_display: FxHashMap::default(),
            exposure_nodes: BTreeSet::new(),
            outcome_nodes: BTreeSet::new(),
        };

        let exposure_display = clean_node_name(&config.exposure_label);
        let outcome_display = clean_node_name(&config.outcome_label);

        for cui in &config.exposure_cuis {
            map.fold_target(cui, "Exposure", &exposure_display, store_names);
        }
        for cui in &config.outcome_cuis {
            map.fold_target(cui, "Outcome", &outcome_display, store_names);
        }

        // The elected labels are nodes whenever their CUIs surfaced at all.
        if config
            .exposure_cuis
            .iter()
            .any(|cui| map.cui_to_canonical.contains_key(cui))
        {
            map.exposure_nodes.insert(exposure_display);
        }
        if config
            .outcome_cuis
            .iter()
            .any(|cui| map.cui_to_canonical.contains_key(cui))
        {
            map.outcome_nodes.insert(outcome_display);
        }

        map
    }

    /// Register every known cleaned name of `cui` as folding onto `display`.
    fn fold_target(
        &mut self,
        cui: &str,
        fallback_prefix: &str,
        display: &str,
        store_names: &FxHashMap<String, String>,
    ) {
        let mut known = Vec::new();
        if let Some(name) = store_names.get(cui) {
            known.push(name.clone());
        }
        if let Some(name) = self.cui_to_canonical.get(cui) {
            known.push(name.clone());
        }
        if known.is_empty() {
            known.push(format!("{fallback_prefix}_{cui}"));
        }
        for name in known {
            self.name_to_display
                .insert(clean_node_name(&name), display.to_string());
        }
    }

    /// Clean a surface name and apply the display override.
    pub fn consolidated(&self, surface_name: &str) -> String {
        let cleaned = clean_node_name(surface_name);
        match self.name_to_display.get(&cleaned) {
            Some(display) => display.clone(),
            None => cleaned,
        }
    }

    /// Elected canonical surface name for a CUI, if it appeared in any
    /// retained assertion.
    pub fn canonical_of(&self, cui: &str) -> Option<&str> {
        self.cui_to_canonical.get(cui).map(String::as_str)
    }

    /// Consolidated exposure labels present in the assertion set.
    pub fn exposure_nodes(&self) -> &BTreeSet<String> {
        &self.exposure_nodes
    }

    /// Consolidated outcome labels present in the assertion set.
    pub fn outcome_nodes(&self) -> &BTreeSet<String> {
        &self.outcome_nodes
    }
}

/// Most-frequent-name-wins election per CUI. Ties break to the
/// lexicographically smallest cleaned form.
fn elect_canonical_names(assertions: &[Assertion]) -> FxHashMap<String, String> {
    let mut counts: FxHashMap<String, FxHashMap<String, u32>> = FxHashMap::default();
    for a in assertions {
        *counts
            .entry(a.subject_cui.clone())
            .or_default()
            .entry(a.subject_name.clone())
            .or_insert(0) += 1;
        *counts
            .entry(a.object_cui.clone())
            .or_default()
            .entry(a.object_name.clone())
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(cui, name_counts)| {
            let mut names: Vec<(String, u32)> = name_counts.into_iter().collect();
            names.sort_by(|(a_name, a_count), (b_name, b_count)| {
                b_count
                    .cmp(a_count)
                    .then_with(|| clean_node_name(a_name).cmp(&clean_node_name(b_name)))
            });
            (cui, names.into_iter().next().map(|(n, _)| n).unwrap_or_default())
        })
        .collect()
}
