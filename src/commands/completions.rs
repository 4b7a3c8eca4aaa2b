//! Shell completions command

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::CompletionsArgs;
use crate::error::Result;

/// Generate shell completions
pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    generate(args.shell, &mut cmd, "xapkit", &mut std::io::stdout().lock());
    Ok(())
}
