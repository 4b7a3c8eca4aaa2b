//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// xapkit - XAPK container packer
///
/// Pack a base APK with its OBB expansion files and split-config APKs into a
/// single XAPK container.
#[derive(Parser, Debug)]
#[command(
    name = "xapkit",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Pack split APKs and OBB expansion files into a single XAPK container",
    long_about = "xapkit takes a directory holding a base.apk, its OBB expansion files and any \
                  config.*.apk / asset.*.apk split packages, verifies they all belong to the \
                  same app, and packs them into one installable .xapk archive with an embedded \
                  manifest.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  xapkit build ./com.example.app/\n    \
                  xapkit build ./downloads/app --output app.xapk\n    \
                  xapkit build ./downloads/app --manifest-only\n    \
                  xapkit build ./downloads/app --aapt ~/android/build-tools/34.0.0/aapt\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/xapkit/xapkit"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack a bundle directory into an XAPK container
    Build(BuildArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Pack a bundle directory (output lands next to the inputs):\n    \
                  xapkit build ./com.example.app/\n\n\
                  Pack to an explicit output file:\n    \
                  xapkit build ./downloads/app -o /tmp/app.xapk\n\n\
                  Print the manifest without packing:\n    \
                  xapkit build ./downloads/app --manifest-only\n\n\
                  Use a specific aapt binary:\n    \
                  xapkit build ./downloads/app --aapt ~/android/build-tools/34.0.0/aapt")]
pub struct BuildArgs {
    /// Directory containing base.apk plus .obb and split .apk files
    pub directory: PathBuf,

    /// Output archive path (defaults to <package>_<version>.xapk in the bundle directory)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Path to the aapt binary (otherwise located via ANDROID_SDK_ROOT / ANDROID_HOME)
    #[arg(long, env = "AAPT")]
    pub aapt: Option<PathBuf>,

    /// Print the manifest JSON to stdout and skip writing the archive
    #[arg(long)]
    pub manifest_only: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    xapkit completions --shell bash > ~/.bash_completion.d/xapkit\n\n\
                  Generate zsh completions:\n    xapkit completions --shell zsh > ~/.zfunc/_xapkit\n\n\
                  Generate fish completions:\n    xapkit completions --shell fish > ~/.config/fish/completions/xapkit.fish")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(long, value_enum)]
    pub shell: clap_complete::Shell,
}
