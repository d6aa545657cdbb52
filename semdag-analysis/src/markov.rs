//! Markov-blanket computation: parents, children, and spouses per target
//! CUI, unioned across every exposure and outcome.

use std::collections::BTreeSet;

use semdag_core::errors::AnalysisError;
use semdag_core::{clean_node_name, AnalysisConfig, TimingRecorder};
use semdag_storage::EvidenceStore;

use crate::cancel::Cancellation;
use crate::consolidation::ConsolidationMap;

/// Union of the Markov blankets of every exposure and outcome CUI, in the
/// consolidated node namespace, always including the exposure and outcome
/// labels themselves.
pub fn compute_mb_union(
    store: &EvidenceStore,
    config: &AnalysisConfig,
    consolidation: &ConsolidationMap,
    timing: &mut TimingRecorder,
    cancel: &Cancellation,
) -> Result<BTreeSet<String>, AnalysisError> {
    let start = std::time::Instant::now();

    let mut union: BTreeSet<String> = BTreeSet::new();
    let targets = config.all_target_cuis();
    for target in &targets {
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        let blanket = blanket_of(store, config, consolidation, target)?;
        tracing::info!(target, nodes = blanket.len(), "markov blanket computed");
        union.extend(blanket);
    }

    union.insert(clean_node_name(&config.exposure_label));
    union.insert(clean_node_name(&config.outcome_label));

    timing.record("markov_blanket_computation", start);
    Ok(union)
}

/// parents(t) ∪ children(t) ∪ spouses(t) for one target, consolidated.
/// Spouses exclude the target's elected canonical name, on top of the
/// CUI-level guard the spouse query applies.
fn blanket_of(
    store: &EvidenceStore,
    config: &AnalysisConfig,
    consolidation: &ConsolidationMap,
    target: &str,
) -> Result<BTreeSet<String>, AnalysisError> {
    let predicates = &config.predicates;
    let threshold = config.threshold;
    let blocklist = &config.blocklist_cuis;

    let parents = store.mb_parents(target, predicates, threshold, blocklist)?;
    let children = store.mb_children(target, predicates, threshold, blocklist)?;
    let children_cuis: Vec<String> = children.iter().map(|(_, cui)| cui.clone()).collect();
    let spouses = store.mb_spouses(target, &children_cuis, predicates, threshold, blocklist)?;

    let own_canonical = consolidation.canonical_of(target).map(clean_node_name);

    let mut blanket = BTreeSet::new();
    for name in parents {
        blanket.insert(consolidation.consolidated(&name));
    }
    for (name, _) in children {
        blanket.insert(consolidation.consolidated(&name));
    }
    for name in spouses {
        if own_canonical.as_deref() == Some(clean_node_name(&name).as_str()) {
            continue;
        }
        blanket.insert(consolidation.consolidated(&name));
    }
    Ok(blanket)
}
