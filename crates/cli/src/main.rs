mod config;
mod render;

use std::io;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use events::EventBus;
use scheduler::{RunOutcome, SortDriver, SortSession};
use sortviz_core::Algorithm;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{SortvizConfig, CONFIG_DIR, CONFIG_FILE};
use crate::render::{run_instant, OutputFormat, Printer};

#[derive(Parser)]
#[command(name = "sortviz")]
#[command(about = "Animate sorting algorithms one step at a time", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort a shuffled buffer, printing every step
    Run(RunArgs),
    /// Write a default .sortviz/config.toml
    Init,
    /// List available algorithms
    Algorithms,
}

#[derive(Args, Clone)]
struct RunArgs {
    /// insertion, merge, quick or heap
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Number of values to sort
    #[arg(short, long)]
    size: Option<usize>,

    /// Delay between steps in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Shuffle seed, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run without pacing
    #[arg(long)]
    instant: bool,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run(args)) => run(args).await,
        Some(Commands::Init) => init_project().await,
        Some(Commands::Algorithms) => {
            list_algorithms();
            Ok(())
        }
        None => run(cli.run).await,
    }
}

async fn init_project() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = SortvizConfig::path(&cwd);

    if config_path.exists() {
        println!("Already initialized at {}", config_path.display());
        return Ok(());
    }

    let path = SortvizConfig::default().write(&cwd).await?;
    println!("Created {}", path.display());
    println!();
    println!("Edit {}/{} to change the defaults, then run 'sortviz'.", CONFIG_DIR, CONFIG_FILE);

    Ok(())
}

fn list_algorithms() {
    for alg in Algorithm::ALL {
        println!("  {:<10} {}", alg.as_str(), alg.label());
    }
}

async fn run(args: RunArgs) -> Result<()> {
    init_tracing();

    let cwd = std::env::current_dir()?;
    let mut config = SortvizConfig::load(&cwd).await?.unwrap_or_default().session;

    if let Some(name) = args.algorithm.as_deref() {
        config.algorithm = name.parse()?;
    }
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.interval_ms = interval_ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if !config.in_recommended_range() {
        tracing::warn!(
            size = config.size,
            interval_ms = config.interval_ms,
            "Settings outside the usual 10-80 values / 5-200 ms range"
        );
    }

    let mut session = SortSession::new(config).context("Invalid configuration")?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let bus = EventBus::new();
    let mut printer = Printer::new(bus.subscription(), format, io::stdout());
    let mut driver = SortDriver::from_config(session.config()).with_event_bus(bus.clone());

    driver.announce_buffer(&session);
    driver.begin(&mut session);

    let (outcome, printer) = if args.instant {
        let outcome = run_instant(&mut driver, &mut session, &mut printer)
            .context("Failed to print events")?;
        tracing::debug!(published = bus.published(), "Run finished");
        (outcome, printer)
    } else {
        let printer = tokio::spawn(printer.follow());
        let (tx, shutdown) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(true);
            }
        });
        let outcome = driver.run(&mut session, shutdown).await;

        // Closes the bus so the printer cannot wait forever.
        drop(driver);
        let published = bus.published();
        drop(bus);
        let printer = printer
            .await
            .context("Event printer failed")?
            .context("Failed to print events")?;
        tracing::debug!(published, "Run finished");
        (outcome, printer)
    };

    if printer.missed() > 0 {
        tracing::warn!(missed = printer.missed(), "Some step events were not printed");
    }

    if !args.json {
        match outcome {
            RunOutcome::Completed(summary) => println!(
                "\n{} finished in {} steps: sorted = {}",
                summary.algorithm.label(),
                summary.steps,
                session.buffer().is_sorted()
            ),
            RunOutcome::Cancelled(summary) => println!(
                "\n{} cancelled after {} steps",
                summary.algorithm.label(),
                summary.steps
            ),
            RunOutcome::Idle => {}
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sortviz=info,scheduler=info".into()),
        )
        .init();
}
