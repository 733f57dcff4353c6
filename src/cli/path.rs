use clap::Parser;

/// Arguments for the path command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print where master of the core repository is cached:\n    cross-repo path manageiq\n\n\
                  Use it from a shell:\n    cd \"$(cross-repo path manageiq-api@ivanchuk)\"")]
pub struct PathArgs {
    /// Repository identifier ([org/]repo[@ref])
    pub identifier: String,
}
