//! Error types and handling for xapkit
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Build phase an error originated in.
///
/// Every error maps to exactly one stage so callers can tell which phase of
/// the pipeline failed without matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Inspect,
    Verify,
    Manifest,
    Archive,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolve => "resolve",
            Stage::Inspect => "inspect",
            Stage::Verify => "verify",
            Stage::Manifest => "manifest",
            Stage::Archive => "archive",
        };
        f.write_str(name)
    }
}

/// Main error type for xapkit operations
#[derive(Error, Diagnostic, Debug)]
pub enum XapkitError {
    // Input resolution errors
    #[error("Not a directory: {path}")]
    #[diagnostic(
        code(xapkit::resolve::not_a_directory),
        help("Pass a directory containing base.apk plus .obb or split .apk files")
    )]
    NotADirectory { path: String },

    #[error("No base.apk found in: {path}")]
    #[diagnostic(
        code(xapkit::resolve::missing_base_package),
        help("The bundle directory must contain exactly one base package named base.apk")
    )]
    MissingBasePackage { path: String },

    #[error("No expansion or split-config files found in: {path}")]
    #[diagnostic(
        code(xapkit::resolve::no_supplementary_files),
        help(
            "A bare base.apk gains nothing from the XAPK container; add .obb files \
             or config.*.apk / asset.*.apk splits"
        )
    )]
    NoSupplementaryFiles { path: String },

    // Package inspection errors
    #[error("aapt not found")]
    #[diagnostic(
        code(xapkit::inspect::aapt_not_found),
        help(
            "Install the Android SDK build-tools and set ANDROID_SDK_ROOT or ANDROID_HOME, \
             or pass --aapt with the path to the aapt binary"
        )
    )]
    AaptNotFound,

    #[error("Failed to inspect package {path}: {reason}")]
    #[diagnostic(code(xapkit::inspect::failed))]
    InspectionFailed { path: String, reason: String },

    // Identity verification errors
    #[error("Malformed expansion file name: {file}")]
    #[diagnostic(
        code(xapkit::verify::malformed_expansion_name),
        help("Expansion files must be named <kind>.<version>.<package.name>.obb")
    )]
    MalformedExpansionName { file: String },

    #[error("Expansion file '{file}' belongs to '{found}', not '{expected}'")]
    #[diagnostic(
        code(xapkit::verify::identity_mismatch),
        help("All files in the bundle directory must come from the same app and build")
    )]
    IdentityMismatch {
        file: String,
        expected: String,
        found: String,
    },

    // Manifest errors
    #[error("Failed to encode manifest: {reason}")]
    #[diagnostic(code(xapkit::manifest::encode_failed))]
    ManifestEncodeFailed { reason: String },

    // Archive errors
    #[error("Failed to write archive entry {path}: {reason}")]
    #[diagnostic(code(xapkit::archive::write_failed))]
    ArchiveWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(xapkit::resolve::io_error))]
    IoError { message: String },
}

impl XapkitError {
    /// The pipeline stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            XapkitError::NotADirectory { .. }
            | XapkitError::MissingBasePackage { .. }
            | XapkitError::NoSupplementaryFiles { .. }
            | XapkitError::IoError { .. } => Stage::Resolve,
            XapkitError::AaptNotFound | XapkitError::InspectionFailed { .. } => Stage::Inspect,
            XapkitError::MalformedExpansionName { .. } | XapkitError::IdentityMismatch { .. } => {
                Stage::Verify
            }
            XapkitError::ManifestEncodeFailed { .. } => Stage::Manifest,
            XapkitError::ArchiveWriteFailed { .. } => Stage::Archive,
        }
    }
}

impl From<std::io::Error> for XapkitError {
    fn from(err: std::io::Error) -> Self {
        XapkitError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for XapkitError {
    fn from(err: serde_json::Error) -> Self {
        XapkitError::ManifestEncodeFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, XapkitError>;
