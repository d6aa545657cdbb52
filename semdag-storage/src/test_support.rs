//! In-memory fixture stores for adapter and pipeline tests.

use crate::store::EvidenceStore;

/// One predication row. `semtype` defaults keep rows substantive unless a
/// test opts into an excluded type.
#[derive(Debug, Clone)]
pub struct PredicationRow {
    pub subject_cui: String,
    pub subject_name: String,
    pub subject_semtype: String,
    pub object_cui: String,
    pub object_name: String,
    pub object_semtype: String,
    pub predicate: String,
    pub pmid: String,
    pub sentence_id: String,
}

impl PredicationRow {
    /// A `CAUSES` row with disease semantic types on both sides.
    pub fn causes(
        subject_cui: &str,
        subject_name: &str,
        object_cui: &str,
        object_name: &str,
        pmid: &str,
        sentence_id: &str,
    ) -> Self {
        Self {
            subject_cui: subject_cui.to_string(),
            subject_name: subject_name.to_string(),
            subject_semtype: "dsyn".to_string(),
            object_cui: object_cui.to_string(),
            object_name: object_name.to_string(),
            object_semtype: "dsyn".to_string(),
            predicate: "CAUSES".to_string(),
            pmid: pmid.to_string(),
            sentence_id: sentence_id.to_string(),
        }
    }

    pub fn with_subject_semtype(mut self, semtype: &str) -> Self {
        self.subject_semtype = semtype.to_string();
        self
    }

    pub fn with_object_semtype(mut self, semtype: &str) -> Self {
        self.object_semtype = semtype.to_string();
        self
    }

    pub fn with_predicate(mut self, predicate: &str) -> Self {
        self.predicate = predicate.to_string();
        self
    }
}

/// One sentence-store row.
#[derive(Debug, Clone)]
pub struct SentenceRow {
    pub pmid: String,
    pub sentence_id: String,
    pub sentence: String,
    pub cui: String,
    pub name: String,
}

impl SentenceRow {
    pub fn new(pmid: &str, sentence_id: &str, sentence: &str, cui: &str, name: &str) -> Self {
        Self {
            pmid: pmid.to_string(),
            sentence_id: sentence_id.to_string(),
            sentence: sentence.to_string(),
            cui: cui.to_string(),
            name: name.to_string(),
        }
    }
}

/// Build an in-memory store with the default schema, seeded with the given
/// rows.
pub fn seeded_store(predications: &[PredicationRow], sentences: &[SentenceRow]) -> EvidenceStore {
    let store = EvidenceStore::open_in_memory().expect("in-memory store");
    create_schema(&store);
    for row in predications {
        store
            .conn
            .execute(
                "INSERT INTO predication
                 (subject_cui, subject_name, subject_semtype,
                  object_cui, object_name, object_semtype,
                  predicate, pmid, sentence_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    row.subject_cui,
                    row.subject_name,
                    row.subject_semtype,
                    row.object_cui,
                    row.object_name,
                    row.object_semtype,
                    row.predicate,
                    row.pmid,
                    row.sentence_id,
                ],
            )
            .expect("insert predication row");
    }
    for row in sentences {
        store
            .conn
            .execute(
                "INSERT INTO sentence (pmid, sentence_id, sentence, cui, name)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![row.pmid, row.sentence_id, row.sentence, row.cui, row.name],
            )
            .expect("insert sentence row");
    }
    store
}

/// Replicate `pmid_count` evidence rows for one triple, with matching
/// sentence-store rows.
pub fn repeated_evidence(
    subject_cui: &str,
    subject_name: &str,
    object_cui: &str,
    object_name: &str,
    pmid_count: u32,
    pmid_base: u32,
) -> (Vec<PredicationRow>, Vec<SentenceRow>) {
    let mut predications = Vec::new();
    let mut sentences = Vec::new();
    for i in 0..pmid_count {
        let pmid = format!("{}", pmid_base + i);
        let sentence_id = format!("s{}", pmid_base + i);
        predications.push(PredicationRow::causes(
            subject_cui,
            subject_name,
            object_cui,
            object_name,
            &pmid,
            &sentence_id,
        ));
        sentences.push(SentenceRow::new(
            &pmid,
            &sentence_id,
            &format!("{subject_name} causes {object_name} (study {pmid})."),
            subject_cui,
            subject_name,
        ));
    }
    (predications, sentences)
}

fn create_schema(store: &EvidenceStore) {
    store
        .conn
        .execute_batch(
            "CREATE TABLE predication (
                 subject_cui TEXT NOT NULL,
                 subject_name TEXT NOT NULL,
                 subject_semtype TEXT NOT NULL,
                 object_cui TEXT NOT NULL,
                 object_name TEXT NOT NULL,
                 object_semtype TEXT NOT NULL,
                 predicate TEXT NOT NULL,
                 pmid TEXT NOT NULL,
                 sentence_id TEXT NOT NULL
             );
             CREATE TABLE sentence (
                 pmid TEXT NOT NULL,
                 sentence_id TEXT NOT NULL,
                 sentence TEXT NOT NULL,
                 cui TEXT NOT NULL,
                 name TEXT NOT NULL
             );
             CREATE INDEX idx_predication_subject ON predication (subject_cui);
             CREATE INDEX idx_predication_object ON predication (object_cui);
             CREATE INDEX idx_sentence_pmid ON sentence (pmid, sentence_id);",
        )
        .expect("create fixture schema");
}
