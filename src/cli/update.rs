use clap::Parser;

/// Arguments for the update command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Re-read the source file and reload watchers:\n    artifact update a1b2c3\n\n\
                  Replace inline code:\n    artifact update a1b2c3 --code 'export default function Y(){return null}'")]
pub struct UpdateArgs {
    /// Artifact ID
    pub id: String,

    /// New inline source (inline artifacts only)
    #[arg(long)]
    pub code: Option<String>,
}
