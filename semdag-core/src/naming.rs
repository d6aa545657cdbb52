//! Node-name normalization for DAG identifiers.

/// Label used when a concept name cleans down to nothing.
pub const UNKNOWN_NODE: &str = "unknown_node";

/// Clean a surface name into an identifier-safe node label.
///
/// Every run of whitespace and punctuation (underscore excepted) becomes a
/// single underscore; leading and trailing underscores are trimmed. Case is
/// preserved. An empty result yields [`UNKNOWN_NODE`].
pub fn clean_node_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut pending_sep = false;

    for ch in name.chars() {
        let is_sep = ch.is_whitespace() || (ch.is_ascii_punctuation() && ch != '_') || ch == '_';
        if is_sep {
            pending_sep = true;
        } else {
            if pending_sep && !cleaned.is_empty() {
                cleaned.push('_');
            }
            pending_sep = false;
            cleaned.push(ch);
        }
    }

    if cleaned.is_empty() {
        UNKNOWN_NODE.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn replaces_punctuation_runs_with_single_underscore() {
        assert_eq!(clean_node_name("Alzheimer's Disease"), "Alzheimer_s_Disease");
        assert_eq!(clean_node_name("Diabetes Mellitus, Type 2"), "Diabetes_Mellitus_Type_2");
        assert_eq!(clean_node_name("TNF-alpha|protein"), "TNF_alpha_protein");
    }

    #[test]
    fn trims_and_collapses_underscores() {
        assert_eq!(clean_node_name("__Hypertension__"), "Hypertension");
        assert_eq!(clean_node_name("a___b"), "a_b");
        assert_eq!(clean_node_name("  spaced  out  "), "spaced_out");
    }

    #[test]
    fn empty_and_all_punctuation_inputs_fall_back() {
        assert_eq!(clean_node_name(""), UNKNOWN_NODE);
        assert_eq!(clean_node_name("..."), UNKNOWN_NODE);
        assert_eq!(clean_node_name("_"), UNKNOWN_NODE);
    }

    #[test]
    fn preserves_case() {
        assert_eq!(clean_node_name("mRNA Expression"), "mRNA_Expression");
    }

    proptest! {
        #[test]
        fn cleaning_is_idempotent(input in ".*") {
            let once = clean_node_name(&input);
            prop_assert_eq!(clean_node_name(&once), once);
        }

        #[test]
        fn output_never_empty(input in ".*") {
            prop_assert!(!clean_node_name(&input).is_empty());
        }

        #[test]
        fn output_has_no_boundary_underscores(input in ".*") {
            let cleaned = clean_node_name(&input);
            prop_assert!(!cleaned.starts_with('_'));
            prop_assert!(!cleaned.ends_with('_'));
        }
    }
}
