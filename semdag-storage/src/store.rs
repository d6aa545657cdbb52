//! `EvidenceStore`, the sole gateway to the causal-triple and sentence
//! stores. Owns the connection; serializes all reads through it.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::Connection;
use semdag_core::errors::StorageError;
use semdag_core::types::{Assertion, SentenceRef};
use semdag_core::FxHashMap;

use crate::connection::{self, TableNames};
use crate::queries;

/// What seeds a hop expansion.
#[derive(Debug, Clone, Copy)]
pub enum HopSeed<'a> {
    /// Hop 1: triples touching any configured exposure or outcome CUI.
    Targets {
        exposures: &'a [String],
        outcomes: &'a [String],
    },
    /// Hop >= 2: triples touching any frontier CUI.
    Frontier(&'a [String]),
}

/// Read-only access to the predication and sentence tables.
pub struct EvidenceStore {
    pub(crate) conn: Connection,
    tables: TableNames,
    path: Option<String>,
}

impl EvidenceStore {
    /// Open a file-backed store. Table names come from the environment
    /// (`DB_PREDICATION_SCHEMA` and friends), defaulting to
    /// `main.predication` / `main.sentence`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = connection::open_connection(path)?;
        Ok(Self {
            conn,
            tables: TableNames::from_env(),
            path: Some(path.display().to_string()),
        })
    }

    /// In-memory store with default table names, for tests and fixtures.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = connection::open_in_memory()?;
        Ok(Self {
            conn,
            tables: TableNames::defaults(),
            path: None,
        })
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    /// Database file path (None for in-memory stores).
    pub fn path(&self) -> Option<String> {
        self.path.clone()
    }

    /// Pre-flight probe: at least one hop-1 triple meets the threshold.
    pub fn evidence_exists(
        &self,
        exposure_cuis: &[String],
        outcome_cuis: &[String],
        predicates: &[String],
        min_pmids: u32,
    ) -> Result<bool, StorageError> {
        require_predicates(predicates, "preflight")?;
        tracing::debug!(
            exposures = exposure_cuis.len(),
            outcomes = outcome_cuis.len(),
            min_pmids,
            "running pre-flight probe"
        );
        queries::predication::evidence_exists(
            &self.conn,
            &self.tables,
            exposure_cuis,
            outcome_cuis,
            predicates,
            min_pmids,
        )
    }

    /// Expand one hop, returning the retained assertions annotated with
    /// `hop_level`.
    pub fn expand_hop(
        &self,
        seed: HopSeed<'_>,
        predicates: &[String],
        min_pmids: u32,
        blocklist: &[String],
        hop_level: u32,
    ) -> Result<Vec<Assertion>, StorageError> {
        require_predicates(predicates, &format!("hop_{hop_level}"))?;
        match seed {
            HopSeed::Targets {
                exposures,
                outcomes,
            } => {
                tracing::debug!(
                    hop = hop_level,
                    exposures = exposures.len(),
                    outcomes = outcomes.len(),
                    min_pmids,
                    blocklist = blocklist.len(),
                    "expanding first hop"
                );
                queries::predication::fetch_first_hop(
                    &self.conn,
                    &self.tables,
                    exposures,
                    outcomes,
                    predicates,
                    min_pmids,
                    blocklist,
                )
            }
            HopSeed::Frontier(frontier) => {
                tracing::debug!(
                    hop = hop_level,
                    frontier = frontier.len(),
                    min_pmids,
                    blocklist = blocklist.len(),
                    "expanding hop"
                );
                queries::predication::fetch_next_hop(
                    &self.conn,
                    &self.tables,
                    frontier,
                    predicates,
                    min_pmids,
                    blocklist,
                    hop_level,
                )
            }
        }
    }

    /// Batch sentence retrieval, deduplicated per pmid.
    pub fn fetch_sentences(
        &self,
        refs: &[SentenceRef],
    ) -> Result<BTreeMap<String, Vec<String>>, StorageError> {
        queries::sentences::fetch_sentences_by_refs(&self.conn, &self.tables, refs)
    }

    /// One name per CUI from the sentence store.
    pub fn fetch_canonical_names(
        &self,
        cuis: &[String],
    ) -> Result<FxHashMap<String, String>, StorageError> {
        queries::sentences::fetch_canonical_names(&self.conn, &self.tables, cuis)
    }

    /// Markov-blanket parents of a target CUI.
    pub fn mb_parents(
        &self,
        target_cui: &str,
        predicates: &[String],
        min_pmids: u32,
        blocklist: &[String],
    ) -> Result<Vec<String>, StorageError> {
        require_predicates(predicates, "mb_parents")?;
        queries::markov::fetch_parents(
            &self.conn,
            &self.tables,
            target_cui,
            predicates,
            min_pmids,
            blocklist,
        )
    }

    /// Markov-blanket children (name, cui) of a target CUI.
    pub fn mb_children(
        &self,
        target_cui: &str,
        predicates: &[String],
        min_pmids: u32,
        blocklist: &[String],
    ) -> Result<Vec<(String, String)>, StorageError> {
        require_predicates(predicates, "mb_children")?;
        queries::markov::fetch_children(
            &self.conn,
            &self.tables,
            target_cui,
            predicates,
            min_pmids,
            blocklist,
        )
    }

    /// Markov-blanket spouses: other parents of the target's children.
    pub fn mb_spouses(
        &self,
        target_cui: &str,
        children_cuis: &[String],
        predicates: &[String],
        min_pmids: u32,
        blocklist: &[String],
    ) -> Result<Vec<String>, StorageError> {
        require_predicates(predicates, "mb_spouses")?;
        queries::markov::fetch_spouses(
            &self.conn,
            &self.tables,
            target_cui,
            children_cuis,
            predicates,
            min_pmids,
            blocklist,
        )
    }

}

fn require_predicates(predicates: &[String], operation: &str) -> Result<(), StorageError> {
    if predicates.is_empty() {
        return Err(StorageError::Query {
            operation: operation.to_string(),
            message: "empty predicate set".to_string(),
        });
    }
    Ok(())
}
