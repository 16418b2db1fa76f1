//! File name to display URL mapping.
//!
//! The side file is line oriented: `<filename> <url>`, separated by
//! whitespace. Blank lines and lines starting with `//` are ignored. The
//! mapping is only used when rendering results.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const URL_NOT_AVAILABLE: &str = "URL not available";

#[derive(Debug, Default, Clone)]
pub struct UrlMap {
    urls: HashMap<String, String>,
}

impl UrlMap {
    pub fn new() -> Self { Self::default() }

    pub fn parse(text: &str) -> Self {
        let mut urls = HashMap::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") { continue; }
            match line.split_once(char::is_whitespace) {
                Some((file, url)) if !url.trim().is_empty() => {
                    urls.insert(file.to_string(), url.trim().to_string());
                }
                _ => tracing::debug!(line = lineno + 1, "skipping malformed url mapping line"),
            }
        }
        Self { urls }
    }

    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::UrlMap { path: path.to_path_buf(), source })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Like [`UrlMap::try_load`], but a missing or unreadable file yields an
    /// empty mapping and a warning.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load(path) {
            Ok(map) => {
                tracing::info!(mappings = map.len(), "loaded url mappings");
                map
            }
            Err(e) => {
                tracing::warn!(error = %e, "urls will not be displayed");
                Self::default()
            }
        }
    }

    pub fn get(&self, file: &str) -> Option<&str> { self.urls.get(file).map(String::as_str) }

    pub fn display_url(&self, file: &str) -> &str { self.get(file).unwrap_or(URL_NOT_AVAILABLE) }

    pub fn len(&self) -> usize { self.urls.len() }

    pub fn is_empty(&self) -> bool { self.urls.is_empty() }
}
