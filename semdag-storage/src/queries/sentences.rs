//! Sentence-store queries: evidence text retrieval and canonical names.

use std::collections::BTreeMap;

use rusqlite::{params, Connection};
use semdag_core::errors::StorageError;
use semdag_core::types::SentenceRef;
use semdag_core::{FxHashMap, FxHashSet};

use crate::connection::TableNames;

use super::string_array;

/// Batch-fetch sentence texts for a set of (pmid, sentence_id) refs,
/// deduplicated per pmid.
pub fn fetch_sentences_by_refs(
    conn: &Connection,
    tables: &TableNames,
    refs: &[SentenceRef],
) -> Result<BTreeMap<String, Vec<String>>, StorageError> {
    if refs.is_empty() {
        return Ok(BTreeMap::new());
    }

    let pmids: Vec<String> = refs.iter().map(|r| r.pmid.clone()).collect();
    let sentence_ids: Vec<String> = refs.iter().map(|r| r.sentence_id.clone()).collect();

    let sql = format!(
        "SELECT pmid, sentence
FROM {table}
WHERE pmid IN rarray(?1)
  AND sentence_id IN rarray(?2)
ORDER BY pmid, sentence_id",
        table = tables.sentence,
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| StorageError::query("fetch_sentences", e))?;
    let rows = stmt
        .query_map(
            params![string_array(&pmids), string_array(&sentence_ids)],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .map_err(|e| StorageError::query("fetch_sentences", e))?;

    let mut by_pmid: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
    for row in rows {
        let (pmid, sentence) = row.map_err(|e| StorageError::query("fetch_sentences", e))?;
        if seen.insert((pmid.clone(), sentence.clone())) {
            by_pmid.entry(pmid).or_default().push(sentence);
        }
    }
    Ok(by_pmid)
}

/// Fetch one name per CUI from the sentence store. When a CUI carries
/// several names, the lexicographically first wins for determinism.
pub fn fetch_canonical_names(
    conn: &Connection,
    tables: &TableNames,
    cuis: &[String],
) -> Result<FxHashMap<String, String>, StorageError> {
    if cuis.is_empty() {
        return Ok(FxHashMap::default());
    }

    let sql = format!(
        "SELECT DISTINCT cui, name
FROM {table}
WHERE cui IN rarray(?1)
ORDER BY cui, name",
        table = tables.sentence,
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| StorageError::query("fetch_canonical_names", e))?;
    let rows = stmt
        .query_map(params![string_array(cuis)], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| StorageError::query("fetch_canonical_names", e))?;

    let mut names: FxHashMap<String, String> = FxHashMap::default();
    for row in rows {
        let (cui, name) = row.map_err(|e| StorageError::query("fetch_canonical_names", e))?;
        names.entry(cui).or_insert(name);
    }
    Ok(names)
}
