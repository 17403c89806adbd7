// SPDX-License-Identifier: PMPL-1.0-or-later

//! Template source discovery
//!
//! Expands configured template sets into an ordered list of template files,
//! each paired with the destination root it renders into.

use crate::config::TemplateSet;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub path: PathBuf,
    pub dest_root: PathBuf,
}

/// Expand every template set. Directories are walked in sorted order and
/// filtered by extension; plain paths are kept as given, even when they do
/// not exist, so later stages can report them.
pub fn collect(sets: &[TemplateSet]) -> Result<Vec<TemplateSource>> {
    let mut sources = Vec::new();
    for set in sets {
        for src in &set.src {
            if src.is_dir() {
                for path in walk_templates(src, &set.extensions)? {
                    sources.push(TemplateSource {
                        path,
                        dest_root: set.dest.clone(),
                    });
                }
            } else {
                sources.push(TemplateSource {
                    path: src.clone(),
                    dest_root: set.dest.clone(),
                });
            }
        }
    }
    Ok(sources)
}

fn walk_templates(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", dir.display()))?;
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn walks_directories_in_sorted_order() {
        let dir = TempDir::new().expect("temp dir should create");
        let root = dir.path().join("templates");
        fs::create_dir_all(root.join("sub")).expect("dirs should create");
        fs::write(root.join("b.html"), "b").expect("write");
        fs::write(root.join("a.HTML"), "a").expect("write");
        fs::write(root.join("notes.txt"), "skip").expect("write");
        fs::write(root.join("sub/c.htm"), "c").expect("write");

        let set = TemplateSet::new(vec![root.clone()], "dist");
        let sources = collect(&[set]).expect("collect should succeed");
        let paths: Vec<PathBuf> = sources.iter().map(|s| s.path.clone()).collect();

        assert_eq!(
            paths,
            vec![root.join("a.HTML"), root.join("b.html"), root.join("sub/c.htm")]
        );
        assert!(sources.iter().all(|s| s.dest_root == Path::new("dist")));
    }

    #[test]
    fn keeps_missing_files_for_later_warning() {
        let set = TemplateSet::new(vec![PathBuf::from("does/not/exist.html")], "out");
        let sources = collect(&[set]).expect("collect should succeed");
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, PathBuf::from("does/not/exist.html"));
    }
}
