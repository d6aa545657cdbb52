//! DAGitty R-script rendering.
//!
//! The script recreates the DAG with one node or edge per line:
//!
//! ```text
//! g <- dagitty('dag {
//!  Exposure_Label [exposure]
//!  Outcome_Label [outcome]
//!  Other_Node
//!  Exposure_Label -> Other_Node
//! }')
//! ```

use std::collections::BTreeSet;

/// Render the DAG script. Exposure and outcome tag lines appear only when
/// the corresponding label is in the node set; remaining nodes and the
/// edges follow in sorted order.
pub fn render_dag(
    nodes: &BTreeSet<String>,
    edges: &BTreeSet<(String, String)>,
    exposure_label: &str,
    outcome_label: &str,
) -> String {
    let mut lines = vec!["g <- dagitty('dag {".to_string()];

    if nodes.contains(exposure_label) {
        lines.push(format!(" {exposure_label} [exposure]"));
    }
    if nodes.contains(outcome_label) {
        lines.push(format!(" {outcome_label} [outcome]"));
    }

    for node in nodes {
        if node != exposure_label && node != outcome_label {
            lines.push(format!(" {node}"));
        }
    }
    for (src, dst) in edges {
        lines.push(format!(" {src} -> {dst}"));
    }

    lines.push("}')".to_string());
    let mut script = lines.join("\n");
    script.push('\n');
    script
}
