use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_site::notebook::NotebookTransform;
use course_site::tree::{render_tree, ContentNode};
use course_site::{build, BuildConfig, OrderIndex};

#[derive(Parser)]
#[command(name = "course")]
#[command(about = "Build a static course site from manifest-ordered Markdown")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every listed source into a notebook and write the order index
    Build(ConfigArgs),
    /// Print the resolved content tree
    Tree(ConfigArgs),
    /// Print the order index without building
    Order(ConfigArgs),
}

#[derive(Args, Default)]
struct ConfigArgs {
    /// JSON config file; environment variables are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source root holding the top-level manifest
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output root, wiped on every build
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reserved manifest file name
    #[arg(long)]
    manifest_name: Option<String>,

    /// Reserved home file name
    #[arg(long)]
    home_name: Option<String>,
}

impl ConfigArgs {
    fn resolve(self) -> anyhow::Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::load(path)?,
            None => BuildConfig::from_env(),
        };

        if let Some(source) = self.source {
            config.source_root = source;
        }
        if let Some(output) = self.output {
            config.output_root = output;
        }
        if let Some(name) = self.manifest_name {
            config.manifest_filename = name;
        }
        if let Some(name) = self.home_name {
            config.home_filename = name;
        }

        Ok(config)
    }
}

/// Initialize tracing on stderr so `tree` and `order` output stays clean
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "course_site=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Build(args)) => run_build(args.resolve()?)?,
        Some(Commands::Tree(args)) => {
            let config = args.resolve()?;
            let root = ContentNode::root(&config).context("Failed to resolve content tree")?;
            print!("{}", render_tree(&root));
        }
        Some(Commands::Order(args)) => {
            let config = args.resolve()?;
            let root = ContentNode::root(&config).context("Failed to resolve content tree")?;
            println!("{}", OrderIndex::from_entries(root.flattened()).to_json()?);
        }
        None => run_build(ConfigArgs::default().resolve()?)?,
    }

    Ok(())
}

fn run_build(config: BuildConfig) -> anyhow::Result<()> {
    let report = build(&config, &mut NotebookTransform)
        .with_context(|| format!("Build of {} failed", config.source_root.display()))?;

    match report.order_index {
        Some(path) => tracing::info!("Order index written to {}", path.display()),
        None => tracing::info!("No sections declared, order index skipped"),
    }

    Ok(())
}
