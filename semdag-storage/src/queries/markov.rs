//! Markov-blanket leg queries: parents, children, and spouses of one target.
//!
//! Each leg applies the predicate filter, the evidence threshold on distinct
//! pmids, the semantic-type exclusion on the non-target side, and the
//! blocklist on both sides.

use rusqlite::Connection;
use semdag_core::errors::StorageError;

use crate::connection::TableNames;

use super::{excluded_semtypes_sql, string_array};

fn blocklist_clause(blocklist: &[String], param: u32) -> String {
    if blocklist.is_empty() {
        String::new()
    } else {
        format!(
            "\n  AND cp.subject_cui NOT IN rarray(?{param})\n  AND cp.object_cui NOT IN rarray(?{param})"
        )
    }
}

/// Subjects of `subject -> target` triples meeting the threshold.
pub fn fetch_parents(
    conn: &Connection,
    tables: &TableNames,
    target_cui: &str,
    predicates: &[String],
    min_pmids: u32,
    blocklist: &[String],
) -> Result<Vec<String>, StorageError> {
    let sql = format!(
        "SELECT cp.subject_name
FROM {table} cp
WHERE cp.predicate IN rarray(?2)
  AND cp.object_cui = ?3
  AND cp.subject_semtype NOT IN {semtypes}{blocklist}
GROUP BY cp.subject_name
HAVING COUNT(DISTINCT cp.pmid) >= ?1
ORDER BY cp.subject_name",
        table = tables.predication,
        semtypes = excluded_semtypes_sql(),
        blocklist = blocklist_clause(blocklist, 4),
    );
    collect_single_column(conn, &sql, target_cui, predicates, min_pmids, blocklist, "mb_parents")
}

/// (name, cui) of `target -> object` triples meeting the threshold.
pub fn fetch_children(
    conn: &Connection,
    tables: &TableNames,
    target_cui: &str,
    predicates: &[String],
    min_pmids: u32,
    blocklist: &[String],
) -> Result<Vec<(String, String)>, StorageError> {
    let sql = format!(
        "SELECT cp.object_name, cp.object_cui
FROM {table} cp
WHERE cp.predicate IN rarray(?2)
  AND cp.subject_cui = ?3
  AND cp.object_semtype NOT IN {semtypes}{blocklist}
GROUP BY cp.object_name, cp.object_cui
HAVING COUNT(DISTINCT cp.pmid) >= ?1
ORDER BY cp.object_name",
        table = tables.predication,
        semtypes = excluded_semtypes_sql(),
        blocklist = blocklist_clause(blocklist, 4),
    );

    let pred_arr = string_array(predicates);
    let block_arr = string_array(blocklist);
    let target = target_cui.to_string();
    let mut bound: Vec<&dyn rusqlite::ToSql> = vec![&min_pmids, &pred_arr, &target];
    if !blocklist.is_empty() {
        bound.push(&block_arr);
    }

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| StorageError::query("mb_children", e))?;
    let rows = stmt
        .query_map(&bound[..], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| StorageError::query("mb_children", e))?;

    let mut children = Vec::new();
    for row in rows {
        children.push(row.map_err(|e| StorageError::query("mb_children", e))?);
    }
    Ok(children)
}

/// Subjects of `subject -> child` triples for the target's children,
/// excluding the target itself as subject.
pub fn fetch_spouses(
    conn: &Connection,
    tables: &TableNames,
    target_cui: &str,
    children_cuis: &[String],
    predicates: &[String],
    min_pmids: u32,
    blocklist: &[String],
) -> Result<Vec<String>, StorageError> {
    if children_cuis.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT cp.subject_name
FROM {table} cp
WHERE cp.predicate IN rarray(?2)
  AND cp.object_cui IN rarray(?3)
  AND cp.subject_cui != ?4
  AND cp.subject_semtype NOT IN {semtypes}{blocklist}
GROUP BY cp.subject_name
HAVING COUNT(DISTINCT cp.pmid) >= ?1
ORDER BY cp.subject_name",
        table = tables.predication,
        semtypes = excluded_semtypes_sql(),
        blocklist = blocklist_clause(blocklist, 5),
    );

    let pred_arr = string_array(predicates);
    let children_arr = string_array(children_cuis);
    let block_arr = string_array(blocklist);
    let target = target_cui.to_string();
    let mut bound: Vec<&dyn rusqlite::ToSql> = vec![&min_pmids, &pred_arr, &children_arr, &target];
    if !blocklist.is_empty() {
        bound.push(&block_arr);
    }

    collect_strings(conn, &sql, &bound, "mb_spouses")
}

fn collect_single_column(
    conn: &Connection,
    sql: &str,
    target_cui: &str,
    predicates: &[String],
    min_pmids: u32,
    blocklist: &[String],
    operation: &str,
) -> Result<Vec<String>, StorageError> {
    let pred_arr = string_array(predicates);
    let block_arr = string_array(blocklist);
    let target = target_cui.to_string();
    let mut bound: Vec<&dyn rusqlite::ToSql> = vec![&min_pmids, &pred_arr, &target];
    if !blocklist.is_empty() {
        bound.push(&block_arr);
    }
    collect_strings(conn, sql, &bound, operation)
}

fn collect_strings(
    conn: &Connection,
    sql: &str,
    bound: &[&dyn rusqlite::ToSql],
    operation: &str,
) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| StorageError::query(operation, e))?;
    let rows = stmt
        .query_map(bound, |row| row.get::<_, String>(0))
        .map_err(|e| StorageError::query(operation, e))?;

    let mut values = Vec::new();
    for row in rows {
        values.push(row.map_err(|e| StorageError::query(operation, e))?);
    }
    Ok(values)
}
