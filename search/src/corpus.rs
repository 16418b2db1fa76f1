use scraper::Html;
use search_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// `.html`/`.htm` files directly inside `dir`, sorted by file name.
pub fn html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::read_dir(dir).map_err(|source| Error::CorpusUnavailable { path: dir.to_path_buf(), source })?;
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let p = entry.path();
        if p.is_file() {
            if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                if matches!(ext, "html" | "htm") {
                    files.push(p.to_path_buf());
                }
            }
        }
    }
    Ok(files)
}

/// Visible text of an HTML document. Input must be UTF-8.
pub fn extract_text(raw: &[u8]) -> std::result::Result<String, std::str::Utf8Error> {
    let body = std::str::from_utf8(raw)?;
    let doc = Html::parse_document(body);
    Ok(doc.root_element().text().collect::<String>())
}

/// Read and extract every page of the corpus. Per-document failures are
/// returned in place so the index build can skip them.
pub fn load_documents(dir: &Path) -> Result<Vec<(String, std::result::Result<String, String>)>> {
    let files = html_files(dir)?;
    tracing::info!(dir = %dir.display(), files = files.len(), "building index");
    let docs = files
        .into_iter()
        .map(|path| {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            let text = fs::read(&path)
                .map_err(|e| e.to_string())
                .and_then(|raw| extract_text(&raw).map_err(|e| e.to_string()));
            (name, text)
        })
        .collect();
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_visible_text() {
        let text = extract_text(b"<html><head><title>Cloud</title></head><body><p>Security <b>threats</b></p></body></html>").unwrap();
        assert!(text.contains("Cloud"));
        assert!(text.contains("Security threats"));
        assert!(!text.contains("<b>"));
    }

    #[test]
    fn lists_only_html_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.htm"), "<p>b</p>").unwrap();
        fs::write(dir.path().join("a.html"), "<p>a</p>").unwrap();
        fs::write(dir.path().join("input.txt"), "a.html https://a.example/").unwrap();
        let names: Vec<_> = html_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.html", "b.htm"]);
    }

    #[test]
    fn invalid_utf8_is_a_per_document_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.html"), "<p>cloud security</p>").unwrap();
        fs::write(dir.path().join("bad.html"), [0xff, 0xfe, 0x00]).unwrap();
        let docs = load_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].0, "bad.html");
        assert!(docs[0].1.is_err());
        assert!(docs[1].1.is_ok());
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = html_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::CorpusUnavailable { .. }));
    }
}
