//! Destination paths inside the staged archive.
//!
//! The layout is a pure naming function of the input set and the package
//! identity. Destinations always use forward slashes; they are archive
//! paths, not host paths.

use std::path::PathBuf;

use crate::inspect::PackageIdentity;
use crate::resolver::InputSet;

/// Archive path of the embedded JSON descriptor.
pub const MANIFEST_DEST: &str = "manifest.json";

/// Archive path of the optional icon.
pub const ICON_DEST: &str = "icon.png";

/// One input file and its destination inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub source: PathBuf,
    /// Archive-relative destination, `/`-separated.
    pub dest: String,
}

/// Where every input file lands inside the output archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    pub entries: Vec<PlannedFile>,
}

/// Archive-root name of the base package: renamed after its package.
pub fn base_package_dest(package_name: &str) -> String {
    format!("{package_name}.apk")
}

/// Destination of an expansion file, also its install path on device.
pub fn expansion_install_path(package_name: &str, file_name: &str) -> String {
    format!("Android/obb/{package_name}/{file_name}")
}

/// Filename of the finished container.
pub fn archive_file_name(identity: &PackageIdentity) -> String {
    format!("{}_{}.xapk", identity.package_name, identity.version_name)
}

/// Compute the layout: base package renamed at the root, expansions under
/// their obb install path, split configs at the root under original names.
pub fn build_layout(inputs: &InputSet, identity: &PackageIdentity) -> BundleLayout {
    let mut entries = Vec::with_capacity(1 + inputs.expansions.len() + inputs.split_configs.len());

    entries.push(PlannedFile {
        source: inputs.base_package.path.clone(),
        dest: base_package_dest(&identity.package_name),
    });
    for file in &inputs.expansions {
        entries.push(PlannedFile {
            source: file.path.clone(),
            dest: expansion_install_path(&identity.package_name, &file.name),
        });
    }
    for file in &inputs.split_configs {
        entries.push(PlannedFile {
            source: file.path.clone(),
            dest: file.name.clone(),
        });
    }

    BundleLayout { entries }
}
