//! Bundle descriptor construction.
//!
//! Verification gates manifest and layout construction: one inconsistent
//! expansion file invalidates the whole bundle, because a partially
//! consistent bundle is not installable. Each build is a pure pipeline over
//! an [`InputSet`] and a [`PackageIdentity`]; nothing here touches the file
//! system.

use std::path::Path;

use crate::error::{Result, XapkitError};
use crate::inspect::PackageIdentity;
use crate::resolver::InputSet;

pub mod expansion;
pub mod layout;
pub mod manifest;

use expansion::ExpansionName;
use layout::BundleLayout;
use manifest::{ExpansionEntry, Manifest, SplitApk, EXTERNAL_STORAGE, XAPK_FORMAT_VERSION};

/// Everything the archive sink needs: the manifest and the file layout.
#[derive(Debug, Clone)]
pub struct BundleDescriptor {
    pub manifest: Manifest,
    pub layout: BundleLayout,
}

/// Check that every expansion file embeds the declared package name.
///
/// Split configs are deliberately not checked: their stems encode a variant
/// id (`config.arm64_v8a`), not an identity token. This is the seam to
/// extend if stricter validation is ever wanted.
pub fn verify_identity(inputs: &InputSet, identity: &PackageIdentity) -> Result<()> {
    for file in &inputs.expansions {
        let name = ExpansionName::parse(&file.name)?;
        if name.package_name != identity.package_name {
            return Err(XapkitError::IdentityMismatch {
                file: file.name.clone(),
                expected: identity.package_name.clone(),
                found: name.package_name,
            });
        }
    }
    Ok(())
}

/// Assemble the manifest from resolved sizes and the package identity.
pub fn build_manifest(inputs: &InputSet, identity: &PackageIdentity) -> Manifest {
    let total_size = inputs.base_package.size
        + inputs.expansions.iter().map(|f| f.size).sum::<u64>()
        + inputs.split_configs.iter().map(|f| f.size).sum::<u64>();

    let mut split_apks = vec![SplitApk {
        file: layout::base_package_dest(&identity.package_name),
        id: "base".to_string(),
    }];
    let mut split_configs = Vec::with_capacity(inputs.split_configs.len());
    for file in &inputs.split_configs {
        let id = file_stem(&file.name);
        split_apks.push(SplitApk {
            file: file.name.clone(),
            id: id.clone(),
        });
        split_configs.push(id);
    }

    let expansions: Vec<ExpansionEntry> = inputs
        .expansions
        .iter()
        .map(|file| {
            let install_path =
                layout::expansion_install_path(&identity.package_name, &file.name);
            ExpansionEntry {
                file: install_path.clone(),
                install_location: EXTERNAL_STORAGE.to_string(),
                install_path,
            }
        })
        .collect();

    Manifest {
        xapk_version: XAPK_FORMAT_VERSION,
        package_name: identity.package_name.clone(),
        name: identity.app_name.clone(),
        version_code: identity.version_code,
        version_name: identity.version_name.clone(),
        min_sdk_version: identity.min_sdk_version,
        target_sdk_version: identity.target_sdk_version,
        permissions: identity.permissions.clone(),
        total_size,
        split_apks,
        split_configs: (!split_configs.is_empty()).then_some(split_configs),
        expansions: (!expansions.is_empty()).then_some(expansions),
    }
}

/// Verify, then build the manifest and layout. No partial output: a failed
/// verification produces nothing.
pub fn build(inputs: &InputSet, identity: &PackageIdentity) -> Result<BundleDescriptor> {
    verify_identity(inputs, identity)?;
    Ok(BundleDescriptor {
        manifest: build_manifest(inputs, identity),
        layout: layout::build_layout(inputs, identity),
    })
}

/// Filename without its final extension, e.g. `config.arm64_v8a.apk` to
/// `config.arm64_v8a`.
fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}
