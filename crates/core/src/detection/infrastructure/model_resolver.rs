use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::APP_DIR_NAME;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model '{name}' not found; looked in: {}", display_paths(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },
    #[error("could not determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolve a model file by name from the default search locations.
///
/// Resolution order:
/// 1. Current working directory
/// 2. User model cache directory (platform-specific), when one exists
pub fn resolve(name: &str) -> Result<PathBuf, ModelResolveError> {
    let cwd = std::env::current_dir().map_err(ModelResolveError::CurrentDir)?;
    let mut search_dirs = vec![cwd];
    search_dirs.extend(model_cache_dir());
    resolve_in(name, &search_dirs)
}

/// Return the first `dir/name` that exists, in the given order.
pub fn resolve_in(name: &str, dirs: &[PathBuf]) -> Result<PathBuf, ModelResolveError> {
    let candidates: Vec<PathBuf> = dirs.iter().map(|d| d.join(name)).collect();
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        log::debug!("Resolved model {name} at {}", found.display());
        return Ok(found.clone());
    }
    Err(ModelResolveError::NotFound {
        name: name.to_string(),
        searched: candidates,
    })
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/blobface/models/`
/// - Linux: `$XDG_CACHE_HOME/blobface/models/` or `~/.cache/blobface/models/`
/// - Windows: `%LOCALAPPDATA%/blobface/models/`
pub fn model_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "macos"))]
    let base = dirs::cache_dir();
    base.map(|d| cache_subdir(&d))
}

fn cache_subdir(base: &Path) -> PathBuf {
    base.join(APP_DIR_NAME).join("models")
}
