use clap::Parser;

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve a branch to its commit:\n    cross-repo resolve manageiq@ivanchuk\n\n\
                  Print machine-readable descriptors:\n    cross-repo resolve --json manageiq manageiq-api")]
pub struct ResolveArgs {
    /// Repository identifiers ([org/]repo[@ref])
    #[arg(required = true, value_name = "IDENTIFIER")]
    pub identifiers: Vec<String>,

    /// Print descriptors as JSON
    #[arg(long)]
    pub json: bool,
}
