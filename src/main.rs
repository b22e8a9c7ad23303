//! CLI entry point for horizon

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "horizon")]
#[command(version)]
#[command(about = "Content backend for a gaming-news site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Horizon site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Convert brace markup to HTML
    Convert {
        /// Markup file (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Save all content and write the page contexts
    #[command(alias = "g")]
    Build {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List site information
    List {
        /// Type of content to list (post, author, tag, category, type)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Upload a .jpg and create its resized variants
    Upload {
        /// Image to upload
        file: PathBuf,

        /// Title of the image
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List uploaded images
    Images,

    /// Delete an uploaded image and its variants
    DeleteImage {
        /// Upload folder, relative to the media directory
        folder: PathBuf,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "horizon=debug,info"
    } else {
        "horizon=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing Horizon site in {:?}", target_dir);
            horizon::commands::init::init_site(&target_dir)?;
            println!("Initialized Horizon site in {:?}", target_dir);
        }

        Commands::Convert { file } => {
            let horizon = horizon::Horizon::new(&base_dir)?;
            horizon::commands::convert::run(&horizon, file.as_deref())?;
        }

        Commands::Build { watch } => {
            let horizon = horizon::Horizon::new(&base_dir)?;
            tracing::info!("Building page contexts...");

            horizon.build()?;
            println!("Built successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                horizon::commands::build::watch(&horizon).await?;
            }
        }

        Commands::List { r#type } => {
            let horizon = horizon::Horizon::new(&base_dir)?;
            horizon::commands::list::run(&horizon, &r#type)?;
        }

        Commands::Upload { file, title } => {
            let horizon = horizon::Horizon::new(&base_dir)?;
            let file = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            horizon::commands::images::upload(&horizon, &file, title.as_deref())?;
        }

        Commands::Images => {
            let horizon = horizon::Horizon::new(&base_dir)?;
            horizon::commands::images::list(&horizon)?;
        }

        Commands::DeleteImage { folder } => {
            let horizon = horizon::Horizon::new(&base_dir)?;
            horizon::commands::images::delete(&horizon, &folder)?;
        }

        Commands::Clean => {
            let horizon = horizon::Horizon::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            horizon.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("horizon version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
