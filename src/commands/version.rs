//! Version command implementation

use crate::error::Result;
use crate::inspect::aapt::AaptInspector;

/// Run version command
pub fn run() -> Result<()> {
    println!("xapkit {}", env!("CARGO_PKG_VERSION"));
    println!();
    match AaptInspector::discover(None) {
        Ok(inspector) => println!("aapt: {}", inspector.binary().display()),
        Err(_) => println!("aapt: not found (set ANDROID_SDK_ROOT / ANDROID_HOME or use --aapt)"),
    }
    Ok(())
}
