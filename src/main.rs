use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use closure_diff::config;
use closure_diff::diff::render::{DiffRenderer, DiffSources};
use closure_diff::diff::renderers::{MarkdownRenderer, TextRenderer};
use closure_diff::diff::{PackageDiff, diff_inventories};
use closure_diff::inventory::Inventory;
use closure_diff::inventory::builder;
use closure_diff::store::nix::NixStore;

#[derive(Parser)]
#[command(name = "closure-diff")]
#[command(version, about = "Inventory and diff the package closures of build results")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inventory the closure of a build result into a JSON document
    List {
        /// Build result path (e.g. a result symlink)
        result_path: String,
        /// Where to write the inventory JSON
        output: PathBuf,
    },
    /// Diff two inventory documents
    Diff {
        /// Old inventory JSON
        old: PathBuf,
        /// New inventory JSON
        new: PathBuf,
        /// Render a GitHub-flavored Markdown diff block
        #[arg(long)]
        github: bool,
        /// Where to write the structured diff JSON
        #[arg(long, value_name = "PATH", default_value = config::DEFAULT_DIFF_OUTPUT)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors exit 1; --help and --version still exit 0
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    init_logging(cli.debug);

    match cli.command {
        Command::List {
            result_path,
            output,
        } => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run_list(&result_path, &output)),
        Command::Diff {
            old,
            new,
            github,
            out,
        } => run_diff(&old, &new, github, &out),
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_list(result_path: &str, output: &Path) -> anyhow::Result<()> {
    let store = NixStore::new();
    let inventory = builder::build(&store, result_path).await?;
    inventory.save(output)?;
    debug!("Inventory written to {}", output.display());
    Ok(())
}

fn run_diff(old_path: &Path, new_path: &Path, github: bool, out: &Path) -> anyhow::Result<()> {
    let old = Inventory::load(old_path)?;
    let new = Inventory::load(new_path)?;
    let diff = diff_inventories(&old, &new);

    let sources = DiffSources {
        old: absolute(old_path),
        new: absolute(new_path),
    };
    let renderer: Box<dyn DiffRenderer> = if github {
        Box::new(MarkdownRenderer)
    } else {
        Box::new(TextRenderer)
    };
    print!("{}", renderer.render(&diff, &sources));

    save_diff(&diff, out)?;
    debug!("Structured diff written to {}", out.display());
    Ok(())
}

fn save_diff(diff: &PackageDiff, out: &Path) -> anyhow::Result<()> {
    diff.save(out)
        .with_context(|| format!("Failed to write {}", out.display()))
}

/// Absolute form of a path for rendering headers; the path itself need not
/// exist anymore by the time it is rendered.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
