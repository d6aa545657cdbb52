//! The single entry point: pre-flight, hop loop, consolidation, graph
//! build, optional Markov blanket, emission.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use semdag_core::errors::AnalysisError;
use semdag_core::timing::StageTiming;
use semdag_core::types::SentenceRef;
use semdag_core::{clean_node_name, AnalysisConfig, FxHashMap, TimingRecorder};
use semdag_storage::EvidenceStore;

use crate::cancel::Cancellation;
use crate::consolidation::ConsolidationMap;
use crate::emit;
use crate::expander;
use crate::graph::CausalGraph;
use crate::markov;

/// How a run ended. Evidence absence is a controlled outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed {
        nodes: usize,
        edges: usize,
        assertions: usize,
        mb_nodes: Option<usize>,
    },
    EvidenceAbsent,
}

/// Timing-and-outcome record returned to the caller.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub timings: Vec<StageTiming>,
    pub artifacts: Vec<PathBuf>,
}

/// Run the full analysis against an open store, writing artifacts into
/// `output_dir`.
pub fn run(
    config: &AnalysisConfig,
    store: &EvidenceStore,
    output_dir: &Path,
    cancel: &Cancellation,
) -> Result<RunReport, AnalysisError> {
    let total_start = Instant::now();
    let mut timing = TimingRecorder::new();

    std::fs::create_dir_all(output_dir).map_err(|source| AnalysisError::Emit {
        path: output_dir.to_path_buf(),
        source,
    })?;

    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }

    // Fail fast when the (exposures, outcomes, predicates, threshold)
    // combination has no evidence at all.
    let has_evidence = timing.time("preflight", || {
        store.evidence_exists(
            &config.exposure_cuis,
            &config.outcome_cuis,
            &config.predicates,
            config.threshold_for_hop(1),
        )
    })?;
    if !has_evidence {
        tracing::warn!(
            exposures = config.exposure_cuis.len(),
            outcomes = config.outcome_cuis.len(),
            threshold = config.threshold_for_hop(1),
            "pre-flight probe found no qualifying evidence"
        );
        let reason_path = output_dir.join("no_evidence.json");
        emit::metrics::write_no_evidence(&reason_path, config)?;
        timing.record("total_execution", total_start);
        return Ok(RunReport {
            outcome: RunOutcome::EvidenceAbsent,
            timings: timing.stages().to_vec(),
            artifacts: vec![reason_path],
        });
    }

    let expansion = expander::expand_k_hops(store, config, &mut timing, cancel)?;
    tracing::info!(
        assertions = expansion.assertions.len(),
        frontier = expansion.frontier_cuis.len(),
        "hop expansion finished"
    );

    // Sentence and canonical-name fetches degrade on failure: missing
    // sentences become empty lists, missing names fall back to CUI-derived
    // labels.
    let refs: Vec<SentenceRef> = expansion
        .assertions
        .iter()
        .flat_map(|a| a.sentence_refs.iter().cloned())
        .collect();
    let pmid_sentences = timing.time("sentence_fetch", || match store.fetch_sentences(&refs) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(error = %e, "sentence fetch failed, continuing without sentence texts");
            BTreeMap::new()
        }
    });

    let consolidation = timing.time("consolidation", || {
        let store_names = match store.fetch_canonical_names(&config.all_target_cuis()) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "canonical-name fetch failed, using CUI-derived labels");
                FxHashMap::default()
            }
        };
        ConsolidationMap::build(&expansion.assertions, config, &store_names)
    });

    let graph = timing.time("graph_construction", || {
        CausalGraph::build(&expansion.assertions, &consolidation)
    });

    let mb_union = if config.markov_blanket {
        Some(markov::compute_mb_union(
            store,
            config,
            &consolidation,
            &mut timing,
            cancel,
        )?)
    } else {
        None
    };

    let emission_start = Instant::now();
    let mut artifacts = Vec::new();

    let exposure_label = clean_node_name(&config.exposure_label);
    let outcome_label = clean_node_name(&config.outcome_label);

    let dag_path = output_dir.join(format!("degree_{}.R", config.degree));
    let dag_script = emit::dagitty::render_dag(
        &graph.node_labels(),
        &graph.edge_labels(),
        &exposure_label,
        &outcome_label,
    );
    emit::write_artifact(&dag_path, &dag_script)?;
    artifacts.push(dag_path);

    let dossier_path = output_dir.join(format!("causal_assertions_{}.json", config.degree));
    let dossier = emit::dossier::render_dossier(&expansion.assertions, &pmid_sentences);
    emit::write_artifact(&dossier_path, &dossier)?;
    artifacts.push(dossier_path);

    if let Some(mb) = &mb_union {
        let (mb_nodes, mb_edges) = graph.induced_subgraph(mb);
        let mb_path = output_dir.join("MarkovBlanket_Union.R");
        let mb_script =
            emit::dagitty::render_dag(&mb_nodes, &mb_edges, &exposure_label, &outcome_label);
        emit::write_artifact(&mb_path, &mb_script)?;
        artifacts.push(mb_path);
    }

    let run_config_path = output_dir.join("run_configuration.json");
    let db_path = store.path().unwrap_or_else(|| ":memory:".to_string());
    emit::metrics::write_run_configuration(&run_config_path, config, &db_path, output_dir)?;
    artifacts.push(run_config_path);

    timing.record("emission", emission_start);
    timing.record("total_execution", total_start);

    let metrics_path = output_dir.join("performance_metrics.json");
    emit::metrics::write_metrics(&metrics_path, &timing)?;
    artifacts.push(metrics_path);

    Ok(RunReport {
        outcome: RunOutcome::Completed {
            nodes: graph.graph.node_count(),
            edges: graph.graph.edge_count(),
            assertions: expansion.assertions.len(),
            mb_nodes: mb_union.as_ref().map(|mb| mb.len()),
        },
        timings: timing.stages().to_vec(),
        artifacts,
    })
}
