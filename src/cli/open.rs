use clap::Parser;

/// Arguments for the open command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Open a preview, restarting its server if needed:\n    artifact open a1b2c3\n\n\
                  Only make sure the server is running:\n    artifact open a1b2c3 --no-browser")]
pub struct OpenArgs {
    /// Artifact ID
    pub id: String,

    /// Start the server without launching a browser
    #[arg(long)]
    pub no_browser: bool,
}
