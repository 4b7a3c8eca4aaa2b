//! `aapt`-backed package inspector.
//!
//! Runs `aapt dump badging` against the base package and answers icon
//! queries by pulling the resource straight out of the APK zip. The binary
//! is located from an explicit path or from the Android SDK's
//! `build-tools/<version>/` directory, newest version first.

use std::env;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use zip::ZipArchive;

use super::badging::Badging;
use super::{PackageIdentity, PackageInspector};
use crate::error::{Result, XapkitError};

const AAPT_BINARIES: &[&str] = &["aapt", "aapt2", "aapt.exe", "aapt2.exe"];

/// Inspector backed by the Android SDK's `aapt` binary.
pub struct AaptInspector {
    aapt: PathBuf,
}

impl AaptInspector {
    pub fn new(aapt: PathBuf) -> Self {
        Self { aapt }
    }

    /// Locate an `aapt` binary: an explicit path wins, then the newest
    /// build-tools under `$ANDROID_SDK_ROOT` / `$ANDROID_HOME`.
    pub fn discover(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }
        let sdk_root = env::var_os("ANDROID_SDK_ROOT")
            .or_else(|| env::var_os("ANDROID_HOME"))
            .map(PathBuf::from);
        sdk_root
            .as_deref()
            .and_then(locate_in_sdk)
            .map(Self::new)
            .ok_or(XapkitError::AaptNotFound)
    }

    /// Path to the binary this inspector runs.
    pub fn binary(&self) -> &Path {
        &self.aapt
    }

    fn badging(&self, apk: &Path) -> Result<Badging> {
        let inspection_failed = |reason: String| XapkitError::InspectionFailed {
            path: apk.display().to_string(),
            reason,
        };

        let output = Command::new(&self.aapt)
            .arg("dump")
            .arg("badging")
            .arg(apk)
            .output()
            .map_err(|e| inspection_failed(format!("failed to run {}: {e}", self.aapt.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(inspection_failed(format!(
                "aapt exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Badging::parse(&String::from_utf8_lossy(&output.stdout))
            .map_err(|e| inspection_failed(e.to_string()))
    }
}

impl PackageInspector for AaptInspector {
    fn identity(&self, apk: &Path) -> Result<PackageIdentity> {
        let badging = self.badging(apk)?;
        Ok(PackageIdentity {
            package_name: badging.package_name,
            app_name: badging.app_name,
            version_code: badging.version_code,
            version_name: badging.version_name,
            min_sdk_version: badging.min_sdk_version,
            target_sdk_version: badging.target_sdk_version,
            permissions: badging.permissions,
        })
    }

    fn icon(&self, apk: &Path, max_density: u16) -> Result<Option<Vec<u8>>> {
        let badging = self.badging(apk)?;
        let Some(resource) = badging.icon_for(max_density) else {
            return Ok(None);
        };
        // adaptive icons reference compiled XML, which is useless as icon.png
        if resource.ends_with(".xml") {
            return Ok(None);
        }

        let inspection_failed = |reason: String| XapkitError::InspectionFailed {
            path: apk.display().to_string(),
            reason,
        };

        let file = File::open(apk).map_err(|e| inspection_failed(e.to_string()))?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| inspection_failed(e.to_string()))?;
        let mut entry = archive
            .by_name(resource)
            .map_err(|e| inspection_failed(format!("icon entry {resource}: {e}")))?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| inspection_failed(format!("icon entry {resource}: {e}")))?;
        Ok(Some(bytes))
    }
}

/// Find an `aapt` binary under `<sdk>/build-tools/<version>/`, preferring
/// the highest version directory that actually contains one.
fn locate_in_sdk(sdk_root: &Path) -> Option<PathBuf> {
    let build_tools = sdk_root.join("build-tools");
    let mut versions: Vec<PathBuf> = fs::read_dir(&build_tools)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    versions.sort_by_key(|path| version_key(path));

    for dir in versions.into_iter().rev() {
        for name in AAPT_BINARIES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Numeric sort key for a build-tools directory name like `34.0.0`.
fn version_key(path: &Path) -> Vec<u32> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
        .split('.')
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}
