// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge zone: a CSV-exported knowledge base searched per message.
//!
//! The CSV comes from a local file or from a published spreadsheet export
//! fetched over HTTP at startup.
//!
//! Each CSV row becomes one entry of `(column, value)` pairs. Search is
//! plain lower-cased substring matching over the whole row.

use std::path::Path;

use haven_core::HavenError;
use tracing::{debug, info};

/// One knowledge base row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub fields: Vec<(String, String)>,
    /// Lower-cased concatenation of every value, for matching.
    haystack: String,
}

impl KnowledgeEntry {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        let haystack = fields
            .iter()
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Self { fields, haystack }
    }

    fn matches(&self, query: &str, words: &[&str]) -> bool {
        if self.haystack.contains(query) {
            return true;
        }
        match words {
            [] => false,
            [_] => words.iter().any(|w| self.haystack.contains(w)),
            _ => words.iter().all(|w| self.haystack.contains(w)),
        }
    }

    /// `• column: value | column: value`, skipping blank values.
    fn format_line(&self) -> String {
        let parts = self
            .fields
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>();
        format!("• {}", parts.join(" | "))
    }
}

/// In-memory knowledge base.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// Parses CSV text with a header row.
    pub fn from_csv(content: &str) -> Result<Self, HavenError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader.headers().map_err(HavenError::storage)?.clone();
        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(HavenError::storage)?;
            if record.iter().all(|v| v.is_empty()) {
                continue;
            }
            let fields = headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.to_string(), record.get(i).unwrap_or_default().to_string()))
                .collect();
            entries.push(KnowledgeEntry::new(fields));
        }
        Ok(Self { entries })
    }

    /// Loads a CSV file from disk.
    pub async fn load(path: &Path) -> Result<Self, HavenError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(HavenError::storage)?;
        let base = Self::from_csv(&content)?;
        info!(path = %path.display(), entries = base.len(), "loaded knowledge base");
        Ok(base)
    }

    /// Fetches a published CSV export.
    pub async fn fetch(url: &str) -> Result<Self, HavenError> {
        let response = reqwest::Client::new()
            .get(url)
            .header(reqwest::header::ACCEPT, "text/csv")
            .send()
            .await
            .map_err(HavenError::storage)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HavenError::Storage {
                source: format!("knowledge base fetch returned {status}").into(),
            });
        }
        let content = response.text().await.map_err(HavenError::storage)?;
        let base = Self::from_csv(&content)?;
        info!(url, entries = base.len(), "fetched knowledge base");
        Ok(base)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries relevant to `query`.
    ///
    /// A row matches on the exact phrase; otherwise every word longer than
    /// two characters must appear, or the single such word when there is
    /// only one.
    pub fn search(&self, query: &str) -> Vec<&KnowledgeEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let words: Vec<&str> = query.split_whitespace().filter(|w| w.len() > 2).collect();
        let hits: Vec<&KnowledgeEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.matches(&query, &words))
            .collect();
        debug!(hits = hits.len(), "knowledge base search");
        hits
    }

    /// Formatted context for the best `limit` matches, or `None` if nothing matched.
    pub fn context_for(&self, query: &str, limit: usize) -> Option<String> {
        let lines: Vec<String> = self
            .search(query)
            .into_iter()
            .take(limit)
            .map(KnowledgeEntry::format_line)
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(format!("Relevant Knowledge Base Information:\n{}", lines.join("\n")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Topic,Answer,Notes\n\
        Office hours,We are available 9am to 5pm weekdays,\n\
        Sleep,\"Try a wind-down routine, no screens\",evening\n\
        \n\
        Anxiety,Box breathing helps calm the body,\n";

    #[test]
    fn parses_rows_and_skips_blank_lines() {
        let kb = KnowledgeBase::from_csv(CSV).unwrap();
        assert_eq!(kb.len(), 3);
    }

    #[test]
    fn phrase_match() {
        let kb = KnowledgeBase::from_csv(CSV).unwrap();
        let hits = kb.search("wind-down routine");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fields[0].1, "Sleep");
    }

    #[test]
    fn multi_word_query_requires_all_words() {
        let kb = KnowledgeBase::from_csv(CSV).unwrap();
        assert_eq!(kb.search("breathing calm").len(), 1);
        assert!(kb.search("breathing weekdays").is_empty());
    }

    #[test]
    fn short_words_are_ignored() {
        let kb = KnowledgeBase::from_csv(CSV).unwrap();
        assert!(kb.search("to be").is_empty());
    }

    #[test]
    fn context_formats_non_blank_fields() {
        let kb = KnowledgeBase::from_csv(CSV).unwrap();
        let context = kb.context_for("office hours", 5).unwrap();
        assert_eq!(
            context,
            "Relevant Knowledge Base Information:\n\
             • Topic: Office hours | Answer: We are available 9am to 5pm weekdays"
        );
        assert!(kb.context_for("volcano", 5).is_none());
    }

    #[tokio::test]
    async fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.csv");
        std::fs::write(&path, CSV).unwrap();
        let kb = KnowledgeBase::load(&path).await.unwrap();
        assert_eq!(kb.len(), 3);
    }

    #[tokio::test]
    async fn fetch_reads_published_export() {
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/export"))
            .and(header("accept", "text/csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CSV))
            .expect(1)
            .mount(&server)
            .await;

        let kb = KnowledgeBase::fetch(&format!("{}/export", server.uri()))
            .await
            .unwrap();
        assert_eq!(kb.len(), 3);
        assert_eq!(kb.search("box breathing").len(), 1);
    }

    #[tokio::test]
    async fn fetch_error_status_is_storage_error() {
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = KnowledgeBase::fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, HavenError::Storage { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn load_missing_file_is_storage_error() {
        let err = KnowledgeBase::load(Path::new("/nonexistent/kb.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, HavenError::Storage { .. }));
    }
}
