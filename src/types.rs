// types.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // Enable debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    // Specify custom config path
    #[arg(short, long, global = true, default_value = "resolver_config.json")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a kubeconfig for a host and PEM encoded credentials
    Render {
        #[arg(long)]
        host: String,
        #[arg(long)]
        ca: PathBuf,
        #[arg(long)]
        cert: PathBuf,
        #[arg(long)]
        key: PathBuf,
        #[arg(long)]
        cluster_name: String,
        /// Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Resolve the connection for a kubeconfig secret, or the ambient kubeconfig
    Resolve {
        #[arg(long)]
        secret_name: Option<String>,
        #[arg(short, long)]
        namespace: Option<String>,
    },
    /// Show the clusters, users and contexts of a kubeconfig file
    Inspect { file: PathBuf },
}
