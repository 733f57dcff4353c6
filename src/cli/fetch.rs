use clap::Parser;

/// Arguments for the fetch command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Fetch the core repository at master:\n    cross-repo fetch manageiq\n\n\
                  Fetch several plugins in parallel:\n    cross-repo fetch -j 4 manageiq-api manageiq-ui-classic@ivanchuk\n\n\
                  Fetch from another organization:\n    cross-repo fetch my-fork/manageiq@feature-branch")]
pub struct FetchArgs {
    /// Repository identifiers ([org/]repo[@ref])
    #[arg(required = true, value_name = "IDENTIFIER")]
    pub identifiers: Vec<String>,

    /// Number of repositories to fetch at once (defaults to the number of CPUs)
    #[arg(long, short = 'j', value_name = "N", value_parser = clap::value_parser!(usize))]
    pub jobs: Option<usize>,
}
