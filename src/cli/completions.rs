use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    cross-repo completions bash > ~/.bash_completion.d/cross-repo\n\n\
                  Generate zsh completions:\n    cross-repo completions zsh > ~/.zfunc/_cross-repo\n\n\
                  Generate fish completions:\n    cross-repo completions fish > ~/.config/fish/completions/cross-repo.fish\n\n\
                  Generate PowerShell completions:\n    cross-repo completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
