//! Package inspection: reading identity metadata out of the base package.
//!
//! The bundle builder never parses APK internals itself; it consumes a
//! [`PackageInspector`]. The production implementation ([`aapt::AaptInspector`])
//! shells out to the Android SDK's `aapt`, while tests substitute synthetic
//! identities.

use std::path::Path;

use crate::error::Result;

pub mod aapt;
mod badging;

/// Densities are capped well below this; passing it asks for the densest
/// icon the package ships.
pub const MAX_ICON_DENSITY: u16 = 65_534;

/// Identity metadata read from a base package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    /// Reverse-domain package name, the identity key for the whole bundle.
    pub package_name: String,
    pub app_name: String,
    pub version_code: u32,
    pub version_name: String,
    pub min_sdk_version: u32,
    pub target_sdk_version: u32,
    pub permissions: Vec<String>,
}

/// Read-only queries against a base package file.
pub trait PackageInspector {
    /// Read the package's identity metadata. Any failure here is fatal to
    /// the bundle build.
    fn identity(&self, apk: &Path) -> Result<PackageIdentity>;

    /// Read the bytes of the densest launcher icon not exceeding
    /// `max_density`, or `None` when the package ships no usable raster
    /// icon. Failures are non-fatal: the caller degrades to "no icon".
    fn icon(&self, apk: &Path, max_density: u16) -> Result<Option<Vec<u8>>>;
}
