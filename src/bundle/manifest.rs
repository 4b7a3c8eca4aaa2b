//! The XAPK manifest wire format.
//!
//! Field order and the optional-key contract are load-bearing: existing
//! installers parse this JSON, and they distinguish "no splits" by the
//! absence of the key, never by an empty list.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Container format version emitted in every manifest.
pub const XAPK_FORMAT_VERSION: u32 = 2;

/// The only install location the format defines for expansion files.
pub const EXTERNAL_STORAGE: &str = "EXTERNAL_STORAGE";

/// One installable package inside the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitApk {
    /// Filename at the archive root.
    pub file: String,
    /// Split identifier; the base package is always `"base"`.
    pub id: String,
}

/// One expansion file and where the installer must place it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionEntry {
    pub file: String,
    pub install_location: String,
    pub install_path: String,
}

/// The JSON descriptor embedded in the container as `manifest.json`.
///
/// Constructed once by the bundle builder and immutable thereafter.
/// `split_configs` and `expansions` are `None` (and the keys absent on the
/// wire) exactly when the corresponding input sequence is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub xapk_version: u32,
    pub package_name: String,
    pub name: String,
    pub version_code: u32,
    pub version_name: String,
    pub min_sdk_version: u32,
    pub target_sdk_version: u32,
    pub permissions: Vec<String>,
    pub total_size: u64,
    pub split_apks: Vec<SplitApk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_configs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansions: Option<Vec<ExpansionEntry>>,
}

impl Manifest {
    /// Serialize to the wire format: 4-space-indented JSON, keys in
    /// declaration order.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_manifest() -> Manifest {
        Manifest {
            xapk_version: XAPK_FORMAT_VERSION,
            package_name: "com.example.app".to_string(),
            name: "Example App".to_string(),
            version_code: 123,
            version_name: "1.0".to_string(),
            min_sdk_version: 21,
            target_sdk_version: 34,
            permissions: vec!["android.permission.INTERNET".to_string()],
            total_size: 3000,
            split_apks: vec![SplitApk {
                file: "com.example.app.apk".to_string(),
                id: "base".to_string(),
            }],
            split_configs: None,
            expansions: None,
        }
    }

    #[test]
    fn test_optional_keys_absent_when_none() {
        let json = minimal_manifest().to_json().unwrap();
        assert!(!json.contains("split_configs"));
        assert!(!json.contains("expansions"));
    }

    #[test]
    fn test_optional_keys_present_when_some() {
        let mut manifest = minimal_manifest();
        manifest.split_configs = Some(vec!["config.arm64_v8a".to_string()]);
        manifest.expansions = Some(vec![ExpansionEntry {
            file: "Android/obb/com.example.app/main.123.com.example.app.obb".to_string(),
            install_location: EXTERNAL_STORAGE.to_string(),
            install_path: "Android/obb/com.example.app/main.123.com.example.app.obb".to_string(),
        }]);
        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"split_configs\""));
        assert!(json.contains("\"expansions\""));
        assert!(json.contains("\"install_location\": \"EXTERNAL_STORAGE\""));
    }

    #[test]
    fn test_round_trip() {
        let mut manifest = minimal_manifest();
        manifest.expansions = Some(vec![ExpansionEntry {
            file: "Android/obb/com.example.app/main.123.com.example.app.obb".to_string(),
            install_location: EXTERNAL_STORAGE.to_string(),
            install_path: "Android/obb/com.example.app/main.123.com.example.app.obb".to_string(),
        }]);

        let json = manifest.to_json().unwrap();
        let parsed: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn test_wire_format_exact() {
        let json = minimal_manifest().to_json().unwrap();
        let expected = r#"{
    "xapk_version": 2,
    "package_name": "com.example.app",
    "name": "Example App",
    "version_code": 123,
    "version_name": "1.0",
    "min_sdk_version": 21,
    "target_sdk_version": 34,
    "permissions": [
        "android.permission.INTERNET"
    ],
    "total_size": 3000,
    "split_apks": [
        {
            "file": "com.example.app.apk",
            "id": "base"
        }
    ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_deserialize_missing_optional_keys() {
        let json = r#"{
            "xapk_version": 2,
            "package_name": "com.example.app",
            "name": "Example App",
            "version_code": 1,
            "version_name": "1.0",
            "min_sdk_version": 21,
            "target_sdk_version": 34,
            "permissions": [],
            "total_size": 10,
            "split_apks": [{"file": "com.example.app.apk", "id": "base"}]
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.split_configs, None);
        assert_eq!(manifest.expansions, None);
    }
}
