//! The evidence dossier: per-pmid deduplicated sentences plus compact
//! assertion records.
//!
//! The layout is deliberate: `pmid_refs` arrays always render on a single
//! line so long reference lists stay scannable, while every other array
//! goes single-line only up to ten elements. serde_json's pretty printer
//! cannot express either rule, so the document is assembled by hand with
//! serde_json handling string escaping.

use std::collections::BTreeMap;

use semdag_core::types::Assertion;

/// Elements at or below this count render on one line.
const INLINE_ARRAY_LIMIT: usize = 10;

/// Render the dossier document. Every pmid referenced by an assertion is
/// guaranteed a key in `pmid_sentences` (missing pmids get empty lists).
pub fn render_dossier(
    assertions: &[Assertion],
    pmid_sentences: &BTreeMap<String, Vec<String>>,
) -> String {
    let mut sentences = pmid_sentences.clone();
    for assertion in assertions {
        for pmid in &assertion.pmids {
            sentences.entry(pmid.clone()).or_default();
        }
    }

    let mut out = String::new();
    out.push_str("{\n");

    out.push_str("  \"pmid_sentences\": {");
    if sentences.is_empty() {
        out.push_str("},\n");
    } else {
        out.push('\n');
        let last = sentences.len() - 1;
        for (i, (pmid, texts)) in sentences.iter().enumerate() {
            out.push_str("    ");
            out.push_str(&json_string(pmid));
            out.push_str(": ");
            out.push_str(&render_array(texts, 4, false));
            out.push_str(if i == last { "\n" } else { ",\n" });
        }
        out.push_str("  },\n");
    }

    out.push_str("  \"assertions\": [");
    if assertions.is_empty() {
        out.push_str("]\n");
    } else {
        out.push('\n');
        let last = assertions.len() - 1;
        for (i, assertion) in assertions.iter().enumerate() {
            out.push_str(&render_assertion(assertion));
            out.push_str(if i == last { "\n" } else { ",\n" });
        }
        out.push_str("  ]\n");
    }

    out.push_str("}\n");
    out
}

fn render_assertion(a: &Assertion) -> String {
    let mut out = String::new();
    out.push_str("    {\n");
    push_field(&mut out, "subj", &json_string(&a.subject_name), true);
    push_field(&mut out, "subj_cui", &json_string(&a.subject_cui), true);
    push_field(&mut out, "predicate", &json_string(&a.predicate), true);
    push_field(&mut out, "obj", &json_string(&a.object_name), true);
    push_field(&mut out, "obj_cui", &json_string(&a.object_cui), true);
    push_field(&mut out, "ev_count", &a.evidence_count.to_string(), true);
    push_field(&mut out, "hop", &json_string(&a.degree_label()), true);
    // pmid_refs stays on one line regardless of length.
    push_field(&mut out, "pmid_refs", &render_array(&a.pmids, 6, true), false);
    out.push_str("    }");
    out
}

fn push_field(out: &mut String, key: &str, value: &str, trailing_comma: bool) {
    out.push_str("      ");
    out.push_str(&json_string(key));
    out.push_str(": ");
    out.push_str(value);
    out.push_str(if trailing_comma { ",\n" } else { "\n" });
}

/// Render a string array: inline when forced or at most
/// [`INLINE_ARRAY_LIMIT`] elements, one element per line otherwise.
fn render_array(items: &[String], indent: usize, force_inline: bool) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    if force_inline || items.len() <= INLINE_ARRAY_LIMIT {
        let parts: Vec<String> = items.iter().map(|s| json_string(s)).collect();
        return format!("[{}]", parts.join(", "));
    }

    let pad = " ".repeat(indent);
    let inner_pad = " ".repeat(indent + 2);
    let mut out = String::from("[\n");
    let last = items.len() - 1;
    for (i, item) in items.iter().enumerate() {
        out.push_str(&inner_pad);
        out.push_str(&json_string(item));
        out.push_str(if i == last { "\n" } else { ",\n" });
    }
    out.push_str(&pad);
    out.push(']');
    out
}

/// JSON-escape a string through serde_json.
fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
