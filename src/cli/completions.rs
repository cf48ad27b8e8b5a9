use clap::Parser;
use clap_complete::Shell;

/// Arguments for the completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Bash:\n    artifact completions bash > ~/.bash_completion.d/artifact\n\n\
                  Zsh:\n    artifact completions zsh > ~/.zfunc/_artifact\n\n\
                  Fish:\n    artifact completions fish > ~/.config/fish/completions/artifact.fish")]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
