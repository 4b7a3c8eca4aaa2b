//! Archive assembly: stage the layout under a scratch directory, then
//! deflate-compress it into the output container.
//!
//! The scratch directory is a [`TempDir`], so it is removed on every exit
//! path, including failures part-way through staging.

use std::env;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::bundle::layout::{ICON_DEST, MANIFEST_DEST};
use crate::bundle::BundleDescriptor;
use crate::error::{Result, XapkitError};

/// Stage every layout entry plus `manifest.json` (and `icon.png` when icon
/// bytes are present) under a scratch directory, then zip the tree into
/// `output`.
pub fn write_archive(
    descriptor: &BundleDescriptor,
    icon: Option<&[u8]>,
    output: &Path,
) -> Result<()> {
    let staging = TempDir::new_in(scratch_base()).map_err(|e| XapkitError::ArchiveWriteFailed {
        path: output.display().to_string(),
        reason: format!("failed to create staging directory: {e}"),
    })?;

    stage(descriptor, icon, staging.path())?;
    zip_tree(staging.path(), output)?;
    Ok(())
}

fn write_failed(dest: &str, e: impl std::fmt::Display) -> XapkitError {
    XapkitError::ArchiveWriteFailed {
        path: dest.to_string(),
        reason: e.to_string(),
    }
}

fn stage(descriptor: &BundleDescriptor, icon: Option<&[u8]>, root: &Path) -> Result<()> {
    let pb = ProgressBar::new(descriptor.layout.entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    for entry in &descriptor.layout.entries {
        pb.set_message(entry.dest.clone());
        let dest = root.join(&entry.dest);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| write_failed(&entry.dest, e))?;
        }
        fs::copy(&entry.source, &dest).map_err(|e| write_failed(&entry.dest, e))?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let manifest_json = descriptor.manifest.to_json()?;
    fs::write(root.join(MANIFEST_DEST), manifest_json)
        .map_err(|e| write_failed(MANIFEST_DEST, e))?;

    if let Some(bytes) = icon {
        fs::write(root.join(ICON_DEST), bytes).map_err(|e| write_failed(ICON_DEST, e))?;
    }

    Ok(())
}

fn zip_tree(root: &Path, output: &Path) -> Result<()> {
    let out_display = output.display().to_string();
    let file = File::create(output).map_err(|e| write_failed(&out_display, e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| write_failed(&out_display, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = archive_name(root, entry.path())?;
        zip.start_file(name.clone(), options)
            .map_err(|e| write_failed(&name, e))?;
        let mut src = File::open(entry.path()).map_err(|e| write_failed(&name, e))?;
        io::copy(&mut src, &mut zip).map_err(|e| write_failed(&name, e))?;
    }

    zip.finish().map_err(|e| write_failed(&out_display, e))?;
    Ok(())
}

/// `/`-separated archive path of `path` relative to `root`.
fn archive_name(root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .map_err(|e| write_failed(&path.display().to_string(), e))?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Absolute base for scratch directories, so a relative TMPDIR never lands
/// them under the current working directory.
fn scratch_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            PathBuf::from("C:\\Windows\\Temp")
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}
