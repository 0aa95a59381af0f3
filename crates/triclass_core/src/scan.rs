//! Resolve user-supplied paths into lists of training images.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Options controlling how folders are expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// When true, scan subdirectories recursively.
    pub recursive: bool,
}

/// Expand `path` into the supported image files it names.
///
/// A file is returned as-is when its extension is supported; a directory is
/// listed (sorted by path). Missing paths are an error.
pub fn collect_images(path: impl AsRef<Path>, opts: ScanOptions) -> Result<Vec<PathBuf>> {
    let root = path.as_ref();
    if !root.exists() {
        return Err(Error::PathNotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(if is_supported_image(root) {
            vec![root.to_path_buf()]
        } else {
            tracing::warn!("skipping unsupported file {}", root.display());
            Vec::new()
        });
    }

    let walker = if opts.recursive {
        WalkDir::new(root)
    } else {
        WalkDir::new(root).max_depth(1)
    };

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("walkdir error: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_supported_image(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// [`collect_images`] over several paths, concatenated in argument order.
pub fn collect_many<P: AsRef<Path>>(paths: &[P], opts: ScanOptions) -> Result<Vec<PathBuf>> {
    let mut all = Vec::new();
    for p in paths {
        all.extend(collect_images(p, opts)?);
    }
    Ok(all)
}

fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            matches!(ext.as_str(), "jpg" | "jpeg" | "png")
        }
        None => false,
    }
}
