use clap::Parser;
use std::path::PathBuf;

/// Arguments for the create command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Preview a component file:\n    artifact create src/Button.tsx\n\n\
                  Preview inline code:\n    artifact create --code 'export default function X(){return null}'\n\n\
                  Override the display name:\n    artifact create src/Button.tsx --name PrimaryButton\n\n\
                  Create and open in the browser:\n    artifact create src/Button.tsx --open")]
pub struct CreateArgs {
    /// Component file to preview
    #[arg(conflicts_with = "code", required_unless_present = "code")]
    pub file: Option<PathBuf>,

    /// Inline component source instead of a file
    #[arg(long)]
    pub code: Option<String>,

    /// Display name (defaults to the detected component name)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Open the preview in the browser once it is running
    #[arg(long)]
    pub open: bool,
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parsing_create_file() {
        let cli = Cli::try_parse_from(["artifact", "create", "Button.tsx", "--open"]).unwrap();
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.file, Some(PathBuf::from("Button.tsx")));
                assert!(args.code.is_none());
                assert!(args.open);
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_cli_parsing_create_code() {
        let cli = Cli::try_parse_from([
            "artifact",
            "create",
            "--code",
            "export default function X(){return null}",
            "-n",
            "Demo",
        ])
        .unwrap();
        match cli.command {
            Commands::Create(args) => {
                assert!(args.file.is_none());
                assert_eq!(args.name.as_deref(), Some("Demo"));
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_cli_create_requires_exactly_one_source() {
        assert!(Cli::try_parse_from(["artifact", "create"]).is_err());
        assert!(
            Cli::try_parse_from(["artifact", "create", "A.tsx", "--code", "x"]).is_err()
        );
    }
}
