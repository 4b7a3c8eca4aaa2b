//! Build command: resolve the bundle directory, inspect the base package,
//! verify cross-file identity, and pack the container.

use std::path::PathBuf;

use console::style;

use crate::archive;
use crate::bundle;
use crate::bundle::layout;
use crate::cli::BuildArgs;
use crate::error::Result;
use crate::inspect::aapt::AaptInspector;
use crate::inspect::{MAX_ICON_DENSITY, PackageInspector};
use crate::resolver::{self, InputSet};

/// Run build command
pub fn run(args: BuildArgs, verbose: bool) -> Result<()> {
    let inputs = resolver::resolve(&args.directory)?;
    if verbose {
        print_inputs(&inputs);
    }
    let inspector = AaptInspector::discover(args.aapt)?;
    build_bundle(&inputs, &inspector, args.output, args.manifest_only)
}

/// Drive the pipeline against any inspector. Split from [`run`] so the flow
/// is exercisable with synthetic identities.
fn build_bundle(
    inputs: &InputSet,
    inspector: &dyn PackageInspector,
    output: Option<PathBuf>,
    manifest_only: bool,
) -> Result<()> {
    let identity = inspector.identity(&inputs.base_package.path)?;
    println!(
        "{} {} {} ({})",
        style("Inspected").green().bold(),
        identity.package_name,
        identity.version_name,
        identity.version_code
    );

    let descriptor = bundle::build(inputs, &identity)?;
    println!(
        "{} {} expansion file(s), {} split config(s)",
        style("Verified").green().bold(),
        inputs.expansions.len(),
        inputs.split_configs.len()
    );

    if manifest_only {
        println!("{}", descriptor.manifest.to_json()?);
        return Ok(());
    }

    // icon failure degrades to no icon; it is the only non-fatal path
    let icon = match inspector.icon(&inputs.base_package.path, MAX_ICON_DENSITY) {
        Ok(icon) => icon,
        Err(e) => {
            eprintln!("{} skipping icon: {}", style("warning:").yellow().bold(), e);
            None
        }
    };

    let output =
        output.unwrap_or_else(|| inputs.directory.join(layout::archive_file_name(&identity)));
    archive::write_archive(&descriptor, icon.as_deref(), &output)?;
    println!(
        "{} {} ({})",
        style("Created").green().bold(),
        output.display(),
        human_size(descriptor.manifest.total_size)
    );
    Ok(())
}

fn print_inputs(inputs: &InputSet) {
    println!("base package: {}", inputs.base_package.name);
    for file in &inputs.expansions {
        println!("expansion:    {}", file.name);
    }
    for file in &inputs.split_configs {
        println!("split config: {}", file.name);
    }
}

fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XapkitError;
    use crate::inspect::PackageIdentity;
    use std::fs::File;
    use std::path::Path;
    use tempfile::TempDir;
    use zip::ZipArchive;

    struct FakeInspector {
        identity: PackageIdentity,
        icon: std::result::Result<Option<Vec<u8>>, ()>,
    }

    impl PackageInspector for FakeInspector {
        fn identity(&self, _apk: &Path) -> Result<PackageIdentity> {
            Ok(self.identity.clone())
        }

        fn icon(&self, apk: &Path, _max_density: u16) -> Result<Option<Vec<u8>>> {
            match &self.icon {
                Ok(bytes) => Ok(bytes.clone()),
                Err(()) => Err(XapkitError::InspectionFailed {
                    path: apk.display().to_string(),
                    reason: "icon query failed".to_string(),
                }),
            }
        }
    }

    fn identity() -> PackageIdentity {
        PackageIdentity {
            package_name: "com.example.app".to_string(),
            app_name: "Example App".to_string(),
            version_code: 123,
            version_name: "1.0".to_string(),
            min_sdk_version: 21,
            target_sdk_version: 34,
            permissions: Vec::new(),
        }
    }

    fn bundle_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("base.apk"), vec![1u8; 100]).unwrap();
        std::fs::write(
            temp.path().join("main.123.com.example.app.obb"),
            vec![2u8; 200],
        )
        .unwrap();
        temp
    }

    #[test]
    fn test_build_bundle_writes_default_output() {
        let dir = bundle_dir();
        let inputs = resolver::resolve(dir.path()).unwrap();
        let inspector = FakeInspector {
            identity: identity(),
            icon: Ok(Some(b"png".to_vec())),
        };

        build_bundle(&inputs, &inspector, None, false).unwrap();

        let output = dir.path().join("com.example.app_1.0.xapk");
        assert!(output.is_file());
        let archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"icon.png"));
        assert!(names.contains(&"manifest.json"));
    }

    #[test]
    fn test_build_bundle_icon_failure_is_non_fatal() {
        let dir = bundle_dir();
        let inputs = resolver::resolve(dir.path()).unwrap();
        let inspector = FakeInspector {
            identity: identity(),
            icon: Err(()),
        };

        build_bundle(&inputs, &inspector, None, false).unwrap();

        let output = dir.path().join("com.example.app_1.0.xapk");
        let archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(!names.contains(&"icon.png"));
    }

    #[test]
    fn test_build_bundle_manifest_only_skips_archive() {
        let dir = bundle_dir();
        let inputs = resolver::resolve(dir.path()).unwrap();
        let inspector = FakeInspector {
            identity: identity(),
            icon: Ok(None),
        };

        build_bundle(&inputs, &inspector, None, true).unwrap();

        assert!(!dir.path().join("com.example.app_1.0.xapk").exists());
    }

    #[test]
    fn test_build_bundle_identity_mismatch_aborts() {
        let dir = bundle_dir();
        let inputs = resolver::resolve(dir.path()).unwrap();
        let mut wrong = identity();
        wrong.package_name = "com.example.other".to_string();
        let inspector = FakeInspector {
            identity: wrong,
            icon: Ok(None),
        };

        let err = build_bundle(&inputs, &inspector, None, false).unwrap_err();
        assert!(matches!(err, XapkitError::IdentityMismatch { .. }));
        assert!(!dir.path().join("com.example.other_1.0.xapk").exists());
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KiB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MiB");
    }
}
