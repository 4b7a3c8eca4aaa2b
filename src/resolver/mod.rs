//! Input resolution: classify the files of a bundle directory into roles.
//!
//! The resolver only reads directory entries and stat metadata. File sizes
//! are captured here so later stages never touch the file system again to
//! compute them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, XapkitError};

/// The canonical base package filename. Matching is exact: there must be one
/// unambiguous base, so a pattern would be wrong here.
pub const BASE_PACKAGE_NAME: &str = "base.apk";

/// A classified input file with its size as read at resolve time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    /// Final filename component, lossily decoded.
    pub name: String,
    pub size: u64,
}

/// The classified contents of one bundle source directory.
#[derive(Debug, Clone)]
pub struct InputSet {
    pub directory: PathBuf,
    pub base_package: ResolvedFile,
    pub expansions: Vec<ResolvedFile>,
    pub split_configs: Vec<ResolvedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    BasePackage,
    Expansion,
    SplitConfig,
}

/// Classify a filename into its bundle role, if it has one.
fn classify(name: &str) -> Option<Role> {
    if name == BASE_PACKAGE_NAME {
        return Some(Role::BasePackage);
    }
    if name.ends_with(".obb") {
        return Some(Role::Expansion);
    }
    if has_infix(name, "config.", ".apk") || has_infix(name, "asset.", ".apk") {
        return Some(Role::SplitConfig);
    }
    None
}

/// True when `name` is `<prefix><anything><suffix>` with non-overlapping
/// prefix and suffix, e.g. `config.arm64_v8a.apk` but not `config.apk`.
fn has_infix(name: &str, prefix: &str, suffix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .is_some()
}

/// Scan `directory` and produce an [`InputSet`], or fail fast when a
/// required role is missing.
///
/// Entries are visited in filename order. The order carries no meaning; it
/// only has to be deterministic so repeated runs produce identical bundles.
pub fn resolve(directory: &Path) -> Result<InputSet> {
    if !directory.is_dir() {
        return Err(XapkitError::NotADirectory {
            path: directory.display().to_string(),
        });
    }

    let mut entries: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, path));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut base_package = None;
    let mut expansions = Vec::new();
    let mut split_configs = Vec::new();

    for (name, path) in entries {
        let Some(role) = classify(&name) else {
            continue;
        };
        let size = fs::metadata(&path)?.len();
        let file = ResolvedFile { path, name, size };
        match role {
            Role::BasePackage => base_package = Some(file),
            Role::Expansion => expansions.push(file),
            Role::SplitConfig => split_configs.push(file),
        }
    }

    let base_package = base_package.ok_or_else(|| XapkitError::MissingBasePackage {
        path: directory.display().to_string(),
    })?;

    if expansions.is_empty() && split_configs.is_empty() {
        return Err(XapkitError::NoSupplementaryFiles {
            path: directory.display().to_string(),
        });
    }

    Ok(InputSet {
        directory: directory.to_path_buf(),
        base_package,
        expansions,
        split_configs,
    })
}
