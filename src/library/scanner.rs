//! Directory scanning for study languages and documents
//!
//! Traversal errors are logged and the offending entry skipped; a scan never
//! fails as a whole. Results come back in traversal order, not sorted.

use std::fs;
use std::path::{Path, PathBuf};

/// A document found under the texts root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// Full path to the file
    pub path: PathBuf,
    /// Path relative to the texts root, for display
    pub name: String,
}

/// Snapshot of what is available to study, taken once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Language identifiers (directory names relative to the languages root)
    pub languages: Vec<String>,
    /// Documents under the texts root
    pub documents: Vec<DocumentEntry>,
}

impl Catalog {
    /// Scan both roots
    pub fn scan(languages_root: &Path, texts_root: &Path) -> Self {
        let catalog =
            Self { languages: list_languages(languages_root), documents: list_documents(texts_root) };
        tracing::info!(
            "Found {} languages in {:?} and {} documents in {:?}",
            catalog.languages.len(),
            languages_root,
            catalog.documents.len(),
            texts_root
        );
        catalog
    }
}

/// Every directory below `root`, excluding `root` itself
pub fn list_languages(root: &Path) -> Vec<String> {
    let mut languages = Vec::new();
    walk(root, &mut |path, is_dir| {
        if is_dir {
            languages.push(relative_name(root, path));
        }
    });
    languages
}

/// Every non-directory entry below `root`
pub fn list_documents(root: &Path) -> Vec<DocumentEntry> {
    let mut documents = Vec::new();
    walk(root, &mut |path, is_dir| {
        if !is_dir {
            documents.push(DocumentEntry { path: path.to_path_buf(), name: relative_name(root, path) });
        }
    });
    documents
}

/// Depth-first pre-order walk below `dir`, calling `visit(path, is_dir)` per entry
fn walk(dir: &Path, visit: &mut dyn FnMut(&Path, bool)) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot scan {:?}: {}", dir, e);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping entry in {:?}: {}", dir, e);
                continue;
            }
        };

        let path = entry.path();
        let is_dir = match entry.file_type() {
            // Symlinks are never followed, so a link back up the tree cannot loop
            Ok(file_type) => file_type.is_dir(),
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                continue;
            }
        };

        visit(&path, is_dir);
        if is_dir {
            walk(&path, visit);
        }
    }
}

/// `path` relative to `root`, with `/` separators
fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
        v.sort();
        v
    }

    #[test]
    fn languages_are_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("spanish")).unwrap();
        fs::create_dir_all(dir.path().join("mandarin")).unwrap();
        fs::write(dir.path().join("mandarin").join("levels.json"), "{}").unwrap();

        let languages = sorted(list_languages(dir.path()));
        assert_eq!(languages, vec!["mandarin".to_string(), "spanish".to_string()]);
    }

    #[test]
    fn nested_language_directories_use_relative_names() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("mandarin").join("hsk1")).unwrap();

        let languages = sorted(list_languages(dir.path()));
        assert_eq!(languages, vec!["mandarin".to_string(), "mandarin/hsk1".to_string()]);
    }

    #[test]
    fn documents_are_found_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("news").join("2024")).unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("news").join("2024").join("b.txt"), "b").unwrap();

        let names = sorted(list_documents(dir.path()).into_iter().map(|d| d.name).collect());
        assert_eq!(names, vec!["a.txt".to_string(), "news/2024/b.txt".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("spanish")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("spanish").join("loop")).unwrap();

        assert_eq!(list_languages(dir.path()), vec!["spanish".to_string()]);
        let names: Vec<String> = list_documents(dir.path()).into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["spanish/loop".to_string()]);
    }

    #[test]
    fn missing_root_yields_empty_lists() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(list_languages(&missing).is_empty());
        assert!(list_documents(&missing).is_empty());
    }

    #[test]
    fn catalog_scans_both_roots() {
        let dir = TempDir::new().unwrap();
        let languages = dir.path().join("languages");
        let texts = dir.path().join("texts");
        fs::create_dir_all(languages.join("spanish")).unwrap();
        fs::create_dir_all(&texts).unwrap();
        fs::write(texts.join("cuento.txt"), "Había una vez").unwrap();

        let catalog = Catalog::scan(&languages, &texts);
        assert_eq!(catalog.languages, vec!["spanish".to_string()]);
        assert_eq!(catalog.documents.len(), 1);
        assert_eq!(catalog.documents[0].path, texts.join("cuento.txt"));
    }
}
