use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "delinkify")]
#[command(about = "Replace media-post links with locally re-published media", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the media behind each URL into the working directory
    Fetch(FetchArgs),
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// URLs of media posts to delinkify
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Override the configured working directory
    #[arg(long)]
    pub tmp_dir: Option<PathBuf>,
}
