//! Directed causal graph over consolidated node labels.

use std::collections::BTreeSet;

use petgraph::graph::{DiGraph, NodeIndex};
use semdag_core::types::Assertion;
use semdag_core::FxHashMap;

use crate::consolidation::ConsolidationMap;

/// The graph artifact: nodes and edges in the consolidated namespace,
/// with exposure and outcome annotations.
#[derive(Debug, Default)]
pub struct CausalGraph {
    pub graph: DiGraph<String, ()>,
    node_ids: FxHashMap<String, NodeIndex>,
    /// Exposure labels present in the node set.
    pub exposures: BTreeSet<String>,
    /// Outcome labels present in the node set.
    pub outcomes: BTreeSet<String>,
}

impl CausalGraph {
    /// Build the graph from the assertion list. Endpoints are consolidated;
    /// self-loops arising from consolidation are dropped; duplicate edges
    /// collapse. The elected exposure and outcome labels are always nodes,
    /// even when isolated.
    pub fn build(assertions: &[Assertion], consolidation: &ConsolidationMap) -> Self {
        let mut graph = Self::default();

        for assertion in assertions {
            let u = consolidation.consolidated(&assertion.subject_name);
            let v = consolidation.consolidated(&assertion.object_name);
            if u == v {
                continue;
            }
            graph.add_edge(&u, &v);
        }

        for label in consolidation.exposure_nodes() {
            graph.intern(label);
        }
        for label in consolidation.outcome_nodes() {
            graph.intern(label);
        }

        let nodes = graph.node_labels();
        graph.exposures = consolidation
            .exposure_nodes()
            .iter()
            .filter(|l| nodes.contains(*l))
            .cloned()
            .collect();
        graph.outcomes = consolidation
            .outcome_nodes()
            .iter()
            .filter(|l| nodes.contains(*l))
            .cloned()
            .collect();

        tracing::info!(
            nodes = graph.graph.node_count(),
            edges = graph.graph.edge_count(),
            "causal graph constructed"
        );
        graph
    }

    fn intern(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_ids.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.node_ids.insert(label.to_string(), idx);
        idx
    }

    fn add_edge(&mut self, u: &str, v: &str) {
        let ui = self.intern(u);
        let vi = self.intern(v);
        if self.graph.find_edge(ui, vi).is_none() {
            self.graph.add_edge(ui, vi, ());
        }
    }

    /// All node labels, sorted.
    pub fn node_labels(&self) -> BTreeSet<String> {
        self.graph.node_weights().cloned().collect()
    }

    /// All edges as (source label, target label), sorted.
    pub fn edge_labels(&self) -> BTreeSet<(String, String)> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (u, v) = self.graph.edge_endpoints(e)?;
                Some((self.graph[u].clone(), self.graph[v].clone()))
            })
            .collect()
    }

    /// Subgraph induced on `keep`: the kept nodes and the edges with both
    /// endpoints kept.
    pub fn induced_subgraph(
        &self,
        keep: &BTreeSet<String>,
    ) -> (BTreeSet<String>, BTreeSet<(String, String)>) {
        let nodes: BTreeSet<String> = self
            .node_labels()
            .into_iter()
            .filter(|n| keep.contains(n))
            .collect();
        let edges: BTreeSet<(String, String)> = self
            .edge_labels()
            .into_iter()
            .filter(|(u, v)| nodes.contains(u) && nodes.contains(v))
            .collect();
        (nodes, edges)
    }
}
