//! CLI entry point for ai-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ai-blog")]
#[command(version)]
#[command(about = "A minimal static blog front end", long_about = None)]
struct Cli {
    /// Site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Read resources from a deployed site at this base URL
    #[arg(short, long, global = true)]
    remote: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the post list, optionally running searches against it
    #[command(alias = "i")]
    Index {
        /// Search query to apply after loading (repeatable)
        #[arg(short, long = "search")]
        searches: Vec<String>,

        /// Read search input line by line from stdin
        #[arg(long)]
        interactive: bool,
    },

    /// Render a single post
    #[command(alias = "p")]
    Post {
        /// Slug of the post
        slug: Option<String>,

        /// Raw location query string, e.g. "?slug=hello"
        #[arg(short, long, conflicts_with = "slug")]
        query: Option<String>,
    },

    /// List indexed posts
    List,

    /// Check the post index for problems
    Check,

    /// Preview the site locally, reloading pages when posts change
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "ai_blog=debug,info"
    } else {
        "ai_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let site_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let remote = cli.remote;
    let open_blog = || -> Result<ai_blog::Blog> {
        Ok(ai_blog::Blog::new(&site_dir)?.with_remote(remote.clone()))
    };

    match cli.command {
        Commands::Index {
            searches,
            interactive,
        } => {
            let blog = open_blog()?;
            ai_blog::commands::index::run(&blog, &searches, interactive).await?;
        }

        Commands::Post { slug, query } => {
            let blog = open_blog()?;
            ai_blog::commands::post::run(&blog, slug.as_deref(), query.as_deref()).await?;
        }

        Commands::List => {
            let blog = open_blog()?;
            ai_blog::commands::list::run(&blog).await?;
        }

        Commands::Check => {
            let blog = open_blog()?;
            ai_blog::commands::check::run(&blog).await?;
        }

        Commands::Server {
            port,
            ip,
            r#static,
        } => {
            let blog = open_blog()?;
            if blog.remote.is_some() {
                anyhow::bail!("--remote cannot be used with the server command");
            }
            ai_blog::server::start(&blog, &ip, port, !r#static).await?;
        }

        Commands::Version => {
            println!("ai-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
