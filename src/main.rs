use clap::Parser;
use helptree_core::{config::Config, HelpBundle, StartupParams};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "helptree", about = "Browse and search a command-help catalog")]
struct Cli {
    /// Help bundle JSON: `{ header, footer, aliases, tree }`.
    bundle: PathBuf,

    /// Page to open, without the `.html` suffix (e.g. `zos-jobs_list`).
    #[arg(long)]
    page: Option<String>,

    /// Start in the flattened list view.
    #[arg(long)]
    list: bool,

    /// Run one search headless, print matching node ids and exit.
    #[arg(long)]
    query: Option<String>,

    /// Write debug logs to /tmp/helptree-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/helptree-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("helptree debug log started, tail -f /tmp/helptree-debug.log");
    }

    let bundle = HelpBundle::from_path(&cli.bundle)?;

    if let Some(query) = cli.query {
        for id in helptree::headless::query_ids(bundle, &query, cli.list) {
            println!("{id}");
        }
        return Ok(());
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });
    let startup = StartupParams { page: cli.page, list_view: cli.list };
    helptree_tui::run(bundle, config, startup)
}
