use crate::error::{Error, Result};
use crate::tokenizer::tokenize;
use std::collections::HashMap;
use std::fmt::Display;

pub type TermId = u32;
pub type DocId = u32;

#[derive(Debug, Clone)]
pub struct DocMeta {
    /// Stable caller-facing identifier, usually the source file name.
    pub external_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_frequency: u32, // always > 0
}

/// Term dictionary plus one posting list per term.
///
/// A posting list is both the posting set of its term (the doc ids) and that
/// term's row of the frequency table (the counts), so the two can never
/// disagree. Lists are sorted by `doc_id` because ids are handed out in
/// increasing order and each document is indexed once.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub dictionary: HashMap<String, TermId>,
    pub postings: Vec<Vec<Posting>>, // indexed by TermId
    pub docs: Vec<DocMeta>,          // indexed by DocId
    pub doc_id_map: HashMap<String, DocId>,
}

/// Outcome of a batch build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub indexed: usize,
    pub skipped: Vec<(String, String)>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index one document's extracted text.
    pub fn index_document(&mut self, external_id: &str, text: &str) -> Result<DocId> {
        if self.doc_id_map.contains_key(external_id) {
            return Err(Error::DuplicateDocument(external_id.to_string()));
        }
        let doc_id = self.docs.len() as DocId;

        let mut tf_counts: HashMap<String, u32> = HashMap::new();
        for term in tokenize(text) {
            *tf_counts.entry(term).or_insert(0) += 1;
        }
        let unique_terms = tf_counts.len();

        for (term, tf) in tf_counts {
            let next_term_id = self.postings.len() as TermId;
            let tid = *self.dictionary.entry(term).or_insert(next_term_id);
            if tid == next_term_id {
                self.postings.push(Vec::new());
            }
            self.postings[tid as usize].push(Posting { doc_id, term_frequency: tf });
        }

        self.docs.push(DocMeta { external_id: external_id.to_string() });
        self.doc_id_map.insert(external_id.to_string(), doc_id);
        tracing::debug!(document = external_id, unique_terms, "indexed document");
        Ok(doc_id)
    }

    /// Index a whole corpus. Documents whose extraction failed upstream are
    /// logged and skipped; the rest of the corpus is still indexed.
    pub fn build<I, S, E>(&mut self, documents: I) -> BuildReport
    where
        I: IntoIterator<Item = (S, std::result::Result<String, E>)>,
        S: AsRef<str>,
        E: Display,
    {
        let mut report = BuildReport::default();
        for (external_id, text) in documents {
            let external_id = external_id.as_ref();
            let outcome = match text {
                Ok(text) => self.index_document(external_id, &text).map(|_| ()),
                Err(e) => Err(Error::Extraction { document: external_id.to_string(), reason: e.to_string() }),
            };
            match outcome {
                Ok(()) => report.indexed += 1,
                Err(e) => {
                    tracing::warn!(document = external_id, error = %e, "skipping document");
                    report.skipped.push((external_id.to_string(), e.to_string()));
                }
            }
        }
        tracing::info!(num_docs = self.num_docs(), num_terms = self.num_terms(), skipped = report.skipped.len(), "indexing complete");
        report
    }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn num_terms(&self) -> usize { self.dictionary.len() }

    /// External ids of all indexed documents, in indexing order.
    pub fn documents(&self) -> impl Iterator<Item = &str> + '_ {
        self.docs.iter().map(|d| d.external_id.as_str())
    }

    pub fn postings_for(&self, term: &str) -> Option<&[Posting]> {
        let tid = *self.dictionary.get(term)?;
        self.postings.get(tid as usize).map(Vec::as_slice)
    }

    /// External ids of documents containing `term`, or `None` if no document does.
    pub fn posting_set(&self, term: &str) -> Option<Vec<&str>> {
        let postings = self.postings_for(term)?;
        Some(postings.iter().map(|p| self.external_id(p.doc_id)).collect())
    }

    /// Occurrences of `term` in the named document; zero when absent.
    pub fn term_frequency(&self, term: &str, external_id: &str) -> u32 {
        let (Some(postings), Some(&doc_id)) = (self.postings_for(term), self.doc_id_map.get(external_id)) else {
            return 0;
        };
        postings
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .map(|i| postings[i].term_frequency)
            .unwrap_or(0)
    }

    pub fn external_id(&self, doc_id: DocId) -> &str {
        &self.docs[doc_id as usize].external_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_local_to_each_document() {
        let mut idx = InvertedIndex::new();
        idx.index_document("a.html", "rust rust rust tokio").unwrap();
        idx.index_document("b.html", "rust").unwrap();
        assert_eq!(idx.term_frequency("rust", "a.html"), 3);
        assert_eq!(idx.term_frequency("rust", "b.html"), 1);
        assert_eq!(idx.term_frequency("tokio", "b.html"), 0);
        assert_eq!(idx.posting_set("rust").unwrap(), vec!["a.html", "b.html"]);
        assert_eq!(idx.num_terms(), 2);
    }

    #[test]
    fn stopwords_are_not_indexed() {
        let mut idx = InvertedIndex::new();
        idx.index_document("a.html", "the cat is on a mat").unwrap();
        assert!(idx.posting_set("the").is_none());
        assert!(idx.posting_set("a").is_none());
        assert!(idx.posting_set("cat").is_some());
    }

    #[test]
    fn postings_match_frequency_table() {
        let mut idx = InvertedIndex::new();
        idx.index_document("a.html", "alpha beta beta").unwrap();
        idx.index_document("b.html", "beta gamma").unwrap();
        for (term, &tid) in &idx.dictionary {
            for p in &idx.postings[tid as usize] {
                assert!(p.term_frequency > 0);
                assert_eq!(idx.term_frequency(term, idx.external_id(p.doc_id)), p.term_frequency);
            }
        }
    }

    #[test]
    fn duplicate_document_is_rejected() {
        let mut idx = InvertedIndex::new();
        idx.index_document("a.html", "alpha").unwrap();
        let err = idx.index_document("a.html", "alpha alpha").unwrap_err();
        assert!(matches!(err, Error::DuplicateDocument(ref id) if id == "a.html"));
        assert_eq!(idx.term_frequency("alpha", "a.html"), 1);
        assert_eq!(idx.num_docs(), 1);
    }

    #[test]
    fn build_skips_failed_documents() {
        let mut idx = InvertedIndex::new();
        let docs = vec![
            ("a.html", Ok("alpha".to_string())),
            ("bad.html", Err("invalid utf-8")),
            ("c.html", Ok("gamma".to_string())),
        ];
        let report = idx.build(docs);
        assert_eq!(report.indexed, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "bad.html");
        assert_eq!(idx.documents().collect::<Vec<_>>(), vec!["a.html", "c.html"]);
    }

    #[test]
    fn build_skips_repeated_ids() {
        let mut idx = InvertedIndex::new();
        let docs: Vec<(&str, std::result::Result<String, String>)> = vec![
            ("a.html", Ok("alpha".to_string())),
            ("a.html", Ok("alpha alpha beta".to_string())),
        ];
        let report = idx.build(docs);
        assert_eq!(report.indexed, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "a.html");
        assert!(report.skipped[0].1.contains("already indexed"));
        assert_eq!(idx.term_frequency("alpha", "a.html"), 1);
        assert!(idx.posting_set("beta").is_none());
    }
}
