//! Shell completions command

use clap::CommandFactory;

use cross_repo::error::Result;

use crate::cli::{Cli, CompletionsArgs};

/// Generate shell completions
pub fn run(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(
        args.shell,
        &mut cmd,
        "cross-repo",
        &mut std::io::stdout().lock(),
    );
    Ok(())
}
