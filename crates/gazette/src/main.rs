//! Gazette CLI - static blog and RSS feed generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "Static blog and RSS feed generator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a site.toml and a sample blog post
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the blog pages, assets and feed
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Absolute site URL, overrides the config file
        #[arg(long, env = "SITE")]
        site: Option<String>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Generate only the RSS feed
    Feed {
        /// Absolute site URL, overrides the config file
        #[arg(long, env = "SITE")]
        site: Option<String>,

        /// Write the feed to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to config or "dist")
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Absolute site URL; its path is where the site is served
        #[arg(long, env = "SITE")]
        site: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // SITE may come from a .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build {
            output,
            site,
            no_minify,
        } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&cli.config, output, site, minify).await?;
        }
        Commands::Feed { site, out } => {
            commands::feed::run(&cli.config, site, out).await?;
        }
        Commands::Serve { port, dir, site } => {
            commands::serve::run(&cli.config, port, dir, site).await?;
        }
    }

    Ok(())
}
