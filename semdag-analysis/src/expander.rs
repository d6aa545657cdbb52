//! The k-hop expander: hop 1 seeds from the configured exposure and
//! outcome CUIs; later hops expand from the hop-1 CUI set (or, in
//! cumulative mode, from every CUI seen so far).

use std::collections::BTreeSet;

use semdag_core::errors::AnalysisError;
use semdag_core::types::Assertion;
use semdag_core::{AnalysisConfig, FrontierMode, TimingRecorder};
use semdag_storage::{EvidenceStore, HopSeed};

use crate::cancel::Cancellation;

/// All retained assertions across hops, plus the frontier CUI set that
/// seeded hops beyond the first.
#[derive(Debug, Default)]
pub struct ExpansionResult {
    pub assertions: Vec<Assertion>,
    pub frontier_cuis: BTreeSet<String>,
}

/// Run the hop loop from 1 to `degree`.
///
/// Assertions keep hop order, then within-hop database order (ascending
/// subject name). Database errors abort; an empty hop simply yields no
/// assertions for that level.
pub fn expand_k_hops(
    store: &EvidenceStore,
    config: &AnalysisConfig,
    timing: &mut TimingRecorder,
    cancel: &Cancellation,
) -> Result<ExpansionResult, AnalysisError> {
    let mut result = ExpansionResult::default();
    let mut first_hop_cuis: BTreeSet<String> = BTreeSet::new();
    let mut seen_cuis: BTreeSet<String> = BTreeSet::new();

    for hop in 1..=config.degree {
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        let threshold = config.threshold_for_hop(hop);
        let raw = timing.time(&format!("hop_{hop}_fetch"), || {
            if hop == 1 {
                store.expand_hop(
                    HopSeed::Targets {
                        exposures: &config.exposure_cuis,
                        outcomes: &config.outcome_cuis,
                    },
                    &config.predicates,
                    threshold,
                    &config.blocklist_cuis,
                    hop,
                )
            } else {
                let frontier: Vec<String> = match config.frontier {
                    FrontierMode::FirstHop => first_hop_cuis.iter().cloned().collect(),
                    FrontierMode::Cumulative => seen_cuis.iter().cloned().collect(),
                };
                store.expand_hop(
                    HopSeed::Frontier(&frontier),
                    &config.predicates,
                    threshold,
                    &config.blocklist_cuis,
                    hop,
                )
            }
        })?;

        tracing::info!(
            hop,
            threshold,
            assertions = raw.len(),
            "hop expansion complete"
        );

        for assertion in &raw {
            seen_cuis.insert(assertion.subject_cui.clone());
            seen_cuis.insert(assertion.object_cui.clone());
        }
        if hop == 1 {
            first_hop_cuis = seen_cuis.clone();
        }
        result.assertions.extend(raw);
    }

    result.frontier_cuis = match config.frontier {
        FrontierMode::FirstHop => first_hop_cuis,
        FrontierMode::Cumulative => seen_cuis,
    };
    Ok(result)
}
