use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
const SKIP_DIRS: &[&str] = &["target", "node_modules", "dist", "pkg"];

/// Discover story files under `root`.
///
/// A file path is returned as-is. A directory is walked recursively for
/// `*.json` files, skipping hidden and build directories, in file-name order.
pub fn scan_story_files(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .map(DirEntry::into_path)
        .collect()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_str().unwrap_or("");
    name.starts_with('.') || SKIP_DIRS.contains(&name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_single_file_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("story.txt");
        fs::write(&file, "{}").unwrap();
        assert_eq!(scan_story_files(&file), vec![file]);
    }

    #[test]
    fn test_walks_json_and_skips_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("volume2")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("b.json"), "{}").unwrap();
        fs::write(root.join("a.json"), "{}").unwrap();
        fs::write(root.join("notes.md"), "").unwrap();
        fs::write(root.join("volume2/chapters.json"), "{}").unwrap();
        fs::write(root.join("target/out.json"), "{}").unwrap();
        fs::write(root.join(".cache/x.json"), "{}").unwrap();

        let found: Vec<PathBuf> = scan_story_files(root)
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            found,
            vec![
                PathBuf::from("a.json"),
                PathBuf::from("b.json"),
                PathBuf::from("volume2/chapters.json"),
            ]
        );
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        assert!(scan_story_files(Path::new("/nonexistent/story/dir")).is_empty());
    }
}
