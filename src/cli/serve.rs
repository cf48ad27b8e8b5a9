use clap::Parser;
use std::path::PathBuf;

/// Arguments of the preview server process. Passed by the supervisor, not typed by users.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub port: u16,

    #[arg(long)]
    pub content_dir: PathBuf,

    #[arg(long)]
    pub runtime_dir: PathBuf,

    #[arg(long, default_value_t = 30)]
    pub idle_timeout_secs: u64,
}
