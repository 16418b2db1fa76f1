//! Rendering of query outcomes for people and for golden-file diffs.
//!
//! Renderers write to any [`Write`]; callers choose the sink.

use crate::index::InvertedIndex;
use crate::query::{Disposition, SearchOutcome};
use crate::urls::UrlMap;
use serde::Serialize;
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;
const SEPARATOR_WIDTH: usize = 60;

pub const DEFAULT_TEST_QUERIES: &[&str] = &[
    "",
    "the and is",
    "nonexistentterm",
    "threats",
    "cloud security",
    "cyber attack",
    "malware crypto",
];

/// Outcomes of a fixed query list, in query order.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub outcomes: Vec<SearchOutcome>,
}

pub fn run_batch<S: AsRef<str>>(index: &InvertedIndex, queries: &[S]) -> Transcript {
    Transcript { outcomes: queries.iter().map(|q| index.query(q.as_ref())).collect() }
}

/// Disposition message followed by the result list. With matches the
/// message is the list header.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &SearchOutcome, urls: &UrlMap) -> io::Result<()> {
    if !matches!(outcome.disposition, Disposition::Matches { .. }) {
        writeln!(out, "{}", outcome.disposition)?;
    }
    if outcome.hits.is_empty() {
        return writeln!(out, "No results to display.");
    }
    writeln!(out)?;
    writeln!(out, "{}", outcome.disposition)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for (rank, hit) in outcome.hits.iter().enumerate() {
        writeln!(out, "{}. {} (Relevance score: {})", rank + 1, hit.name, hit.score)?;
        writeln!(out, "   URL: {}", urls.display_url(&hit.name))?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

#[derive(Serialize)]
struct JsonHit<'a> {
    name: &'a str,
    score: u32,
    url: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    query: &'a str,
    terms: &'a [String],
    disposition: &'a Disposition,
    message: String,
    hits: Vec<JsonHit<'a>>,
}

impl Transcript {
    pub fn write_text<W: Write>(&self, out: &mut W, urls: &UrlMap) -> io::Result<()> {
        for outcome in &self.outcomes {
            writeln!(out, "Query: '{}'", outcome.query)?;
            write_outcome(out, outcome, urls)?;
            writeln!(out)?;
            writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: &mut W, urls: &UrlMap) -> serde_json::Result<()> {
        let outcomes: Vec<JsonOutcome<'_>> = self
            .outcomes
            .iter()
            .map(|o| JsonOutcome {
                query: &o.query,
                terms: &o.terms,
                disposition: &o.disposition,
                message: o.disposition.to_string(),
                hits: o.hits.iter().map(|h| JsonHit { name: &h.name, score: h.score, url: urls.get(&h.name) }).collect(),
            })
            .collect();
        serde_json::to_writer_pretty(out, &outcomes)
    }
}
