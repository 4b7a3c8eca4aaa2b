//! Expansion filename parsing.
//!
//! Expansion files embed their owning package's identity in the filename:
//! `<kind>.<version>.<package.name>.obb`, e.g.
//! `main.123.com.example.app.obb`. An explicit parser keeps malformed names
//! failing predictably instead of producing a wrong token that happens not
//! to match.

use crate::error::{Result, XapkitError};

/// A parsed expansion filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionName {
    /// First stem segment, conventionally `main` or `patch`.
    pub kind: String,
    /// Second stem segment, conventionally the owning version code.
    pub version: String,
    /// Remaining stem segments rejoined with `.` — the embedded package name.
    pub package_name: String,
}

impl ExpansionName {
    /// Parse a filename like `main.123.com.example.app.obb`.
    ///
    /// Requires the `.obb` extension, at least three stem segments, and no
    /// empty segments.
    pub fn parse(file_name: &str) -> Result<Self> {
        let malformed = || XapkitError::MalformedExpansionName {
            file: file_name.to_string(),
        };

        let stem = file_name.strip_suffix(".obb").ok_or_else(malformed)?;
        let segments: Vec<&str> = stem.split('.').collect();
        if segments.len() < 3 || segments.iter().any(|segment| segment.is_empty()) {
            return Err(malformed());
        }

        Ok(ExpansionName {
            kind: segments[0].to_string(),
            version: segments[1].to_string(),
            package_name: segments[2..].join("."),
        })
    }
}
