//! Asset synchronization into the output directory.
//!
//! Covers the three asset classes the pipeline publishes: the image tree,
//! the favicon files (flattened into the output root), and on wasm builds
//! the compiled artifact plus loader scripts. Copies skip destinations
//! that are not older than their source, so repeated builds stay cheap.

use crate::log;
use crate::utils::fileset::{self, Filters};
use anyhow::Result;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Recursively mirror `src` into `dst`.
///
/// Files missing or older in `dst` are copied; up-to-date files are left
/// untouched. A failure on one file is logged and does not stop the rest.
///
/// # Errors
/// Fails only when `src` itself cannot be traversed.
pub fn sync_tree(src: &Path, dst: &Path) -> Result<()> {
    let files = fileset::discover(src, &Filters::new())?;

    for file in &files {
        // discover() only yields paths under src, so strip cannot fail
        let rel = file.strip_prefix(src).unwrap_or(file);
        let target = dst.join(rel);
        if let Err(e) = sync_one(file, &target) {
            log!("error"; "{}: {:#}", file.display(), e);
        }
    }

    Ok(())
}

/// Copy an explicit list of files into a single destination directory.
///
/// Same up-to-date-skip semantics as [`sync_tree`]; per-file failures are
/// logged and skipped.
pub fn sync_files(files: &[PathBuf], dst: &Path) -> Result<()> {
    for file in files {
        let Some(name) = file.file_name() else {
            log!("error"; "{}: no file name", file.display());
            continue;
        };
        let target = dst.join(name);
        if let Err(e) = sync_one(file, &target) {
            log!("error"; "{}: {:#}", file.display(), e);
        }
    }

    Ok(())
}

/// Copy a single file unless the destination is already up to date.
fn sync_one(src: &Path, dst: &Path) -> Result<()> {
    if is_up_to_date(src, dst) {
        return Ok(());
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::copy(src, dst)?;
    Ok(())
}

/// Check if destination is up-to-date compared to source.
///
/// Timestamp comparison, not content hashing. Missing metadata on either
/// side forces a copy.
pub fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let Ok(src_meta) = src.metadata() else {
        return false;
    };
    let Ok(dst_meta) = dst.metadata() else {
        return false;
    };

    let Ok(src_time) = src_meta.modified() else {
        return false;
    };
    let Ok(dst_time) = dst_meta.modified() else {
        return false;
    };

    src_time <= dst_time
}
