//! Conjunctive query evaluation over an [`InvertedIndex`].
//!
//! A document matches only if it contains every distinct query term. Matches
//! are scored by summing the term frequencies of the query terms and ranked
//! by score, highest first. Equal scores fall back to the document's external
//! id so output is reproducible across runs.

use crate::index::{DocId, InvertedIndex, Posting};
use crate::tokenizer::tokenize;
use serde::Serialize;
use std::fmt;

/// Why a query produced the hits it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Disposition {
    EmptyQuery,
    AllStopwords,
    TermNotFound { term: String },
    NoIntersection,
    Matches { count: usize },
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "Empty query. Please enter some search terms."),
            Self::AllStopwords => write!(f, "Query contains only stopwords. Please use more specific terms."),
            Self::TermNotFound { term } => write!(f, "Term '{}' not found in any document.", term),
            Self::NoIntersection => write!(f, "No documents found matching all query terms."),
            Self::Matches { count } => write!(f, "Found {} matching documents:", count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: String,
    /// Distinct normalized terms, in first-seen order.
    pub terms: Vec<String>,
    pub disposition: Disposition,
    pub hits: Vec<SearchHit>,
}

impl SearchOutcome {
    fn empty(query: &str, terms: Vec<String>, disposition: Disposition) -> Self {
        Self { query: query.to_string(), terms, disposition, hits: Vec::new() }
    }
}

impl InvertedIndex {
    /// Resolve a raw query string into ranked hits.
    pub fn query(&self, raw_query: &str) -> SearchOutcome {
        if raw_query.trim().is_empty() {
            return SearchOutcome::empty(raw_query, Vec::new(), Disposition::EmptyQuery);
        }

        // Repeated terms count once for matching and for scoring.
        let mut terms: Vec<String> = Vec::new();
        for term in tokenize(raw_query) {
            if !terms.contains(&term) { terms.push(term); }
        }
        if terms.is_empty() {
            return SearchOutcome::empty(raw_query, terms, Disposition::AllStopwords);
        }

        let mut lists: Vec<&[Posting]> = Vec::with_capacity(terms.len());
        for term in &terms {
            match self.postings_for(term) {
                Some(postings) => lists.push(postings),
                None => {
                    tracing::debug!(%term, "query term has no postings");
                    let disposition = Disposition::TermNotFound { term: term.clone() };
                    return SearchOutcome::empty(raw_query, terms, disposition);
                }
            }
        }

        let hits = score_intersection(&lists);
        if hits.is_empty() {
            return SearchOutcome::empty(raw_query, terms, Disposition::NoIntersection);
        }

        let mut ranked: Vec<SearchHit> = hits
            .into_iter()
            .map(|(doc_id, score)| SearchHit { doc_id, name: self.external_id(doc_id).to_string(), score })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));

        SearchOutcome {
            query: raw_query.to_string(),
            terms,
            disposition: Disposition::Matches { count: ranked.len() },
            hits: ranked,
        }
    }
}

/// Intersect sorted posting lists, summing term frequencies of the survivors.
fn score_intersection(lists: &[&[Posting]]) -> Vec<(DocId, u32)> {
    let mut order: Vec<&[Posting]> = lists.to_vec();
    order.sort_by_key(|l| l.len());
    let Some((shortest, rest)) = order.split_first() else { return Vec::new() };

    let mut acc: Vec<(DocId, u32)> = shortest.iter().map(|p| (p.doc_id, p.term_frequency)).collect();
    for list in rest {
        let mut i = 0;
        let mut j = 0;
        let mut out = Vec::with_capacity(acc.len());
        while i < acc.len() && j < list.len() {
            if acc[i].0 == list[j].doc_id {
                out.push((acc[i].0, acc[i].1 + list[j].term_frequency));
                i += 1;
                j += 1;
            } else if acc[i].0 < list[j].doc_id {
                i += 1;
            } else {
                j += 1;
            }
        }
        if out.is_empty() { return out; }
        acc = out;
    }
    acc
}
