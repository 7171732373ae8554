//! Repository file discovery
//!
//! Walks a repository root and loads the text of every file whose extension
//! is in the supported set. A file that cannot be read or decoded is logged
//! and skipped; it never aborts discovery of the rest.

use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::DiscoveryError;

/// Default extensions handled by the downstream rewrite pipeline
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["py", "js", "ts", "java", "c", "cpp"];

/// Load repository files as a path-to-text mapping.
///
/// Paths are relative to `root`, and the mapping is ordered so traversal is
/// deterministic across runs.
pub fn load_repository_files(
    root: &Path,
    extensions: &[String],
) -> Result<BTreeMap<String, String>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::RootNotFound {
            path: root.display().to_string(),
        });
    }

    let mut files = BTreeMap::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .ignore(true)
        .parents(true)
        .build();

    for entry in walker.flatten() {
        let path = entry.path();

        if path == root {
            continue;
        }

        // Skip .git directory
        if path.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }

        if !path.is_file() || !has_supported_extension(path, extensions) {
            continue;
        }

        let relative_path = match path.strip_prefix(root).ok().and_then(|p| p.to_str()) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => continue,
        };

        match std::fs::read_to_string(path) {
            Ok(content) => {
                files.insert(relative_path, content);
            }
            Err(e) => {
                warn!(file = %relative_path, error = %e, "skipping unreadable file");
            }
        }
    }

    debug!(count = files.len(), "repository files loaded");
    Ok(files)
}

fn has_supported_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions.iter().any(|supported| supported == ext)
}
