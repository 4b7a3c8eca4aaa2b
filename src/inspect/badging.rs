//! Parser for `aapt dump badging` output.
//!
//! The badging dump is line-oriented; each line is a tag followed by either
//! a single quoted value (`sdkVersion:'21'`) or `key='value'` attributes
//! (`package: name='com.example.app' versionCode='7' ...`).

use std::fmt;

/// Everything xapkit needs out of a badging dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badging {
    pub package_name: String,
    pub app_name: String,
    pub version_code: u32,
    pub version_name: String,
    pub min_sdk_version: u32,
    pub target_sdk_version: u32,
    pub permissions: Vec<String>,
    /// Icon resource paths keyed by density. The density-less
    /// `application: icon=` attribute is recorded at density 0.
    pub icons: Vec<(u16, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgingError {
    MissingField(&'static str),
    BadNumber { field: &'static str, value: String },
}

impl fmt::Display for BadgingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgingError::MissingField(name) => {
                write!(f, "badging output is missing '{name}'")
            }
            BadgingError::BadNumber { field, value } => {
                write!(f, "badging field '{field}' is not a number: '{value}'")
            }
        }
    }
}

impl std::error::Error for BadgingError {}

/// Value of `key='...'` within a badging line.
fn attr(line: &str, key: &str) -> Option<String> {
    let marker = format!("{key}='");
    let start = line.find(&marker)? + marker.len();
    let rest = &line[start..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

/// Single quoted value of a `tag:'...'` line.
fn quoted_value(line: &str) -> Option<String> {
    let start = line.find('\'')? + 1;
    let rest = &line[start..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

fn parse_number(field: &'static str, value: String) -> Result<u32, BadgingError> {
    value
        .parse()
        .map_err(|_| BadgingError::BadNumber { field, value })
}

impl Badging {
    pub fn parse(text: &str) -> Result<Self, BadgingError> {
        let mut package_name = None;
        let mut version_code = None;
        let mut version_name = None;
        let mut label = None;
        let mut plain_label = None;
        let mut min_sdk = None;
        let mut target_sdk = None;
        let mut permissions: Vec<String> = Vec::new();
        let mut icons = Vec::new();

        for line in text.lines() {
            if let Some(rest) = line.strip_prefix("package:") {
                package_name = attr(rest, "name");
                version_code = attr(rest, "versionCode");
                version_name = attr(rest, "versionName");
            } else if let Some(rest) = line.strip_prefix("application-label:") {
                plain_label = quoted_value(rest);
            } else if let Some(rest) = line.strip_prefix("application:") {
                label = attr(rest, "label");
                if let Some(icon) = attr(rest, "icon") {
                    icons.push((0, icon));
                }
            } else if let Some(rest) = line.strip_prefix("sdkVersion:") {
                min_sdk = quoted_value(rest);
            } else if let Some(rest) = line.strip_prefix("targetSdkVersion:") {
                target_sdk = quoted_value(rest);
            } else if let Some(rest) = line.strip_prefix("uses-permission:") {
                if let Some(name) = attr(rest, "name") {
                    if !permissions.contains(&name) {
                        permissions.push(name);
                    }
                }
            } else if let Some(rest) = line.strip_prefix("application-icon-") {
                let Some((density, _)) = rest.split_once(':') else {
                    continue;
                };
                if let (Ok(density), Some(path)) = (density.parse::<u16>(), quoted_value(rest)) {
                    icons.push((density, path));
                }
            }
        }

        Ok(Badging {
            package_name: package_name.ok_or(BadgingError::MissingField("package name"))?,
            app_name: plain_label
                .or(label)
                .ok_or(BadgingError::MissingField("application label"))?,
            version_code: parse_number(
                "versionCode",
                version_code.ok_or(BadgingError::MissingField("versionCode"))?,
            )?,
            version_name: version_name.ok_or(BadgingError::MissingField("versionName"))?,
            min_sdk_version: parse_number(
                "sdkVersion",
                min_sdk.ok_or(BadgingError::MissingField("sdkVersion"))?,
            )?,
            target_sdk_version: parse_number(
                "targetSdkVersion",
                target_sdk.ok_or(BadgingError::MissingField("targetSdkVersion"))?,
            )?,
            permissions,
            icons,
        })
    }

    /// The resource path of the densest icon not exceeding `max_density`.
    pub fn icon_for(&self, max_density: u16) -> Option<&str> {
        self.icons
            .iter()
            .filter(|(density, _)| *density <= max_density)
            .max_by_key(|(density, _)| *density)
            .map(|(_, path)| path.as_str())
    }
}
