//! CLI definitions using clap derive API
//!
//! One submodule per command holds its argument type. `__serve` is the hidden entry point the
//! supervisor re-executes the binary with.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod clean;
pub mod completions;
pub mod create;
pub mod list;
pub mod open;
pub mod save;
pub mod serve;
pub mod stop;
pub mod update;

pub use clean::CleanArgs;
pub use completions::CompletionsArgs;
pub use create::CreateArgs;
pub use list::ListArgs;
pub use open::OpenArgs;
pub use save::{SaveArgs, UnsaveArgs};
pub use serve::ServeArgs;
pub use stop::StopArgs;
pub use update::UpdateArgs;

/// Artifact - disposable local previews of UI components
#[derive(Parser, Debug)]
#[command(
    name = "artifact",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Disposable live previews for React components",
    long_about = "Artifact turns a component file or snippet into a local live preview served by \
                  its own background process. Previews hot-reload on change and shut themselves \
                  down once no browser is watching.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  artifact create src/Button.tsx --open \x1b[90m# Preview a component\x1b[0m\n   \
                  artifact update a1b2c3               \x1b[90m# Push changes to open browsers\x1b[0m\n   \
                  artifact list                        \x1b[90m# Show artifacts and their servers\x1b[0m\n   \
                  artifact save a1b2c3                 \x1b[90m# Keep it in this project\x1b[0m\n   \
                  artifact clean --all                 \x1b[90m# Remove stopped artifacts\x1b[0m\n\n\
                  "
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
    /// Create a preview from a component file or inline code
    Create(CreateArgs),

    /// Refresh an artifact's content and reload its watchers
    Update(UpdateArgs),

    /// Open an artifact in the browser, restarting its server if needed
    Open(OpenArgs),

    /// Persist an artifact under .artifact/saved/ in the current directory
    Save(SaveArgs),

    /// Move a saved artifact back to the temp area
    Unsave(UnsaveArgs),

    /// Stop preview servers
    Stop(StopArgs),

    /// Remove artifacts and their files
    Clean(CleanArgs),

    /// List artifacts
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Run a preview server (spawned by the CLI itself)
    #[command(name = "__serve", hide = true)]
    Serve(ServeArgs),
}

impl Commands {
    pub fn is_server(&self) -> bool {
        matches!(self, Commands::Serve(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_list() {
        let cli = Cli::try_parse_from(["artifact", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List(_)));

        let cli = Cli::try_parse_from(["artifact", "ls", "--json"]).unwrap();
        match cli.command {
            Commands::List(args) => assert!(args.json),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_parsing_open() {
        let cli = Cli::try_parse_from(["artifact", "open", "a1b2c3", "--no-browser"]).unwrap();
        match cli.command {
            Commands::Open(args) => {
                assert_eq!(args.id, "a1b2c3");
                assert!(args.no_browser);
            }
            _ => panic!("Expected Open command"),
        }
    }

    #[test]
    fn test_cli_parsing_save_unsave() {
        let cli = Cli::try_parse_from(["artifact", "save", "a1b2c3"]).unwrap();
        assert!(matches!(cli.command, Commands::Save(ref args) if args.id == "a1b2c3"));

        let cli = Cli::try_parse_from(["artifact", "unsave", "a1b2c3"]).unwrap();
        assert!(matches!(cli.command, Commands::Unsave(ref args) if args.id == "a1b2c3"));
    }

    #[test]
    fn test_cli_parsing_update() {
        let cli = Cli::try_parse_from(["artifact", "update", "a1b2c3", "--code", "x"]).unwrap();
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.id, "a1b2c3");
                assert_eq!(args.code.as_deref(), Some("x"));
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_cli_global_verbose() {
        let cli = Cli::try_parse_from(["artifact", "list", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.command.is_server());
    }

    #[test]
    fn test_cli_completions_shell() {
        let cli = Cli::try_parse_from(["artifact", "completions", "ZSH"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, clap_complete::Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
        assert!(Cli::try_parse_from(["artifact", "completions", "tcsh"]).is_err());
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
