//! Hop-expansion and pre-flight queries over the predication table.
//!
//! Every query groups rows by triple, thresholds on the distinct supporting
//! pmid count, excludes the non-substantive semantic types on both sides,
//! and orders by subject name for deterministic downstream artifacts.

use rusqlite::{params, Connection, OptionalExtension};
use semdag_core::errors::StorageError;
use semdag_core::types::{Assertion, SentenceRef};

use crate::connection::TableNames;

use super::{excluded_semtypes_sql, string_array};

const TRIPLE_COLUMNS: &str = "cp.subject_name, cp.object_name, COUNT(DISTINCT cp.pmid) AS evidence,
       cp.subject_cui, cp.object_cui, cp.predicate,
       GROUP_CONCAT(DISTINCT cp.pmid) AS pmid_list,
       GROUP_CONCAT(DISTINCT cp.pmid || ':' || cp.sentence_id) AS ref_list";

const TRIPLE_GROUPING: &str = "GROUP BY cp.subject_name, cp.object_name, cp.subject_cui, cp.object_cui, cp.predicate
HAVING COUNT(DISTINCT cp.pmid) >= ?1
ORDER BY cp.subject_name ASC";

fn blocklist_clause(blocklist: &[String], param: u32) -> String {
    if blocklist.is_empty() {
        String::new()
    } else {
        format!(
            "\n  AND cp.subject_cui NOT IN rarray(?{param})\n  AND cp.object_cui NOT IN rarray(?{param})"
        )
    }
}

/// First hop: triples touching any exposure or outcome CUI.
pub fn fetch_first_hop(
    conn: &Connection,
    tables: &TableNames,
    exposure_cuis: &[String],
    outcome_cuis: &[String],
    predicates: &[String],
    min_pmids: u32,
    blocklist: &[String],
) -> Result<Vec<Assertion>, StorageError> {
    let semtypes = excluded_semtypes_sql();
    let sql = format!(
        "SELECT {TRIPLE_COLUMNS}
FROM {table} cp
WHERE cp.predicate IN rarray(?2)
  AND (cp.subject_cui IN rarray(?3) OR cp.object_cui IN rarray(?3)
       OR cp.subject_cui IN rarray(?4) OR cp.object_cui IN rarray(?4))
  AND cp.subject_semtype NOT IN {semtypes}
  AND cp.object_semtype NOT IN {semtypes}{blocklist}
{TRIPLE_GROUPING}",
        table = tables.predication,
        blocklist = blocklist_clause(blocklist, 5),
    );

    let pred_arr = string_array(predicates);
    let exposure_arr = string_array(exposure_cuis);
    let outcome_arr = string_array(outcome_cuis);
    let block_arr = string_array(blocklist);
    let mut bound: Vec<&dyn rusqlite::ToSql> =
        vec![&min_pmids, &pred_arr, &exposure_arr, &outcome_arr];
    if !blocklist.is_empty() {
        bound.push(&block_arr);
    }

    collect_assertions(conn, &sql, &bound, 1, "hop_1")
}

/// Hop >= 2: triples touching any frontier CUI.
pub fn fetch_next_hop(
    conn: &Connection,
    tables: &TableNames,
    frontier: &[String],
    predicates: &[String],
    min_pmids: u32,
    blocklist: &[String],
    hop_level: u32,
) -> Result<Vec<Assertion>, StorageError> {
    if frontier.is_empty() {
        return Ok(Vec::new());
    }

    let semtypes = excluded_semtypes_sql();
    let sql = format!(
        "SELECT {TRIPLE_COLUMNS}
FROM {table} cp
WHERE cp.predicate IN rarray(?2)
  AND (cp.subject_cui IN rarray(?3) OR cp.object_cui IN rarray(?3))
  AND cp.subject_semtype NOT IN {semtypes}
  AND cp.object_semtype NOT IN {semtypes}{blocklist}
{TRIPLE_GROUPING}",
        table = tables.predication,
        blocklist = blocklist_clause(blocklist, 4),
    );

    let pred_arr = string_array(predicates);
    let frontier_arr = string_array(frontier);
    let block_arr = string_array(blocklist);
    let mut bound: Vec<&dyn rusqlite::ToSql> = vec![&min_pmids, &pred_arr, &frontier_arr];
    if !blocklist.is_empty() {
        bound.push(&block_arr);
    }

    collect_assertions(conn, &sql, &bound, hop_level, &format!("hop_{hop_level}"))
}

/// Pre-flight probe: does at least one hop-1 triple meet the threshold?
/// Same filter as the first hop, under `LIMIT 1`.
pub fn evidence_exists(
    conn: &Connection,
    tables: &TableNames,
    exposure_cuis: &[String],
    outcome_cuis: &[String],
    predicates: &[String],
    min_pmids: u32,
) -> Result<bool, StorageError> {
    let semtypes = excluded_semtypes_sql();
    let sql = format!(
        "SELECT 1
FROM {table} cp
WHERE cp.predicate IN rarray(?2)
  AND (cp.subject_cui IN rarray(?3) OR cp.object_cui IN rarray(?3)
       OR cp.subject_cui IN rarray(?4) OR cp.object_cui IN rarray(?4))
  AND cp.subject_semtype NOT IN {semtypes}
  AND cp.object_semtype NOT IN {semtypes}
GROUP BY cp.subject_name, cp.object_name, cp.subject_cui, cp.object_cui, cp.predicate
HAVING COUNT(DISTINCT cp.pmid) >= ?1
LIMIT 1",
        table = tables.predication,
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| StorageError::query("preflight", e))?;
    let hit: Option<i64> = stmt
        .query_row(
            params![
                min_pmids,
                string_array(predicates),
                string_array(exposure_cuis),
                string_array(outcome_cuis),
            ],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::query("preflight", e))?;
    Ok(hit.is_some())
}

fn collect_assertions(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
    hop_level: u32,
    operation: &str,
) -> Result<Vec<Assertion>, StorageError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| StorageError::query(operation, e))?;
    let rows = stmt
        .query_map(params, move |row| {
            let pmid_list: Option<String> = row.get(6)?;
            let ref_list: Option<String> = row.get(7)?;
            Ok(Assertion {
                subject_name: row.get(0)?,
                object_name: row.get(1)?,
                evidence_count: row.get::<_, i64>(2)? as u32,
                subject_cui: row.get(3)?,
                object_cui: row.get(4)?,
                predicate: row.get(5)?,
                pmids: split_pmids(pmid_list.as_deref()),
                sentence_refs: split_sentence_refs(ref_list.as_deref()),
                hop_level,
            })
        })
        .map_err(|e| StorageError::query(operation, e))?;

    let mut assertions = Vec::new();
    for row in rows {
        assertions.push(row.map_err(|e| StorageError::query(operation, e))?);
    }
    Ok(assertions)
}

/// Split an aggregated pmid list into a sorted, deduplicated vector.
/// `GROUP_CONCAT(DISTINCT …)` gives no ordering guarantee, so sort here.
fn split_pmids(list: Option<&str>) -> Vec<String> {
    let mut pmids: Vec<String> = list
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().to_string())
        .collect();
    pmids.sort();
    pmids.dedup();
    pmids
}

/// Split an aggregated `pmid:sentence_id` list into sentence refs.
fn split_sentence_refs(list: Option<&str>) -> Vec<SentenceRef> {
    let mut refs: Vec<SentenceRef> = list
        .unwrap_or_default()
        .split(',')
        .filter_map(|pair| {
            let (pmid, sentence_id) = pair.trim().split_once(':')?;
            Some(SentenceRef {
                pmid: pmid.trim().to_string(),
                sentence_id: sentence_id.trim().to_string(),
            })
        })
        .collect();
    refs.sort_by(|a, b| (&a.pmid, &a.sentence_id).cmp(&(&b.pmid, &b.sentence_id)));
    refs.dedup();
    refs
}
