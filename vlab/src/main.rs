use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use vlab_core::{ChartPoll, Panel};
use vlab_gui::{run_gui, GuiConfig};

mod output;

use output::{print_error, print_failures, print_info, print_registry};

const DEFAULT_CONFIG: &str = "config.json";

#[derive(Parser)]
#[command(
    name = "vlab",
    version,
    about = "Config-driven virtual lab control panel",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Panel configuration (JSON)
    #[arg(default_value = DEFAULT_CONFIG)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the panel and run it, with or without a window
    Run {
        #[arg(default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        /// Run without GUI
        #[arg(long)]
        no_gui: bool,
        /// Chart ticks to run headless
        #[arg(long, default_value_t = 10)]
        ticks: u64,
    },
    /// Load and compose the configuration, then report what was built
    Check {
        #[arg(default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        None => open_window(&cli.config),
        Some(Commands::Run {
            config,
            no_gui,
            ticks,
        }) => {
            if no_gui {
                run_headless(&config, ticks)
            } else {
                open_window(&config)
            }
        }
        Some(Commands::Check { config }) => check(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            print_error(&message);
            ExitCode::FAILURE
        }
    }
}

fn load(path: &Path) -> Result<Panel, String> {
    Panel::load(path).map_err(|err| format!("{}: {err}", path.display()))
}

fn open_window(path: &Path) -> Result<(), String> {
    let panel = load(path)?;
    run_gui(GuiConfig::default(), panel).map_err(|err| err.to_string())
}

fn check(path: &Path) -> Result<(), String> {
    let panel = load(path)?;
    print_registry(&panel);
    print_failures(panel.report());
    if let Some(err) = panel.chart_error() {
        print_info(&format!("chart disabled: {err}"));
    }
    Ok(())
}

fn run_headless(path: &Path, ticks: u64) -> Result<(), String> {
    let mut panel = load(path)?;
    print_info(&format!("{} widgets built", panel.report().built));
    let Some(chart) = panel.chart_mut() else {
        print_info("No chart configured");
        return Ok(());
    };

    while chart.ticks() < ticks {
        match chart.poll(Instant::now()) {
            ChartPoll::Waiting(wait) => std::thread::sleep(wait),
            ChartPoll::Ticked { redraw, .. } => {
                log::info!(
                    "chart tick {} {}",
                    chart.ticks(),
                    if redraw { "redrawn" } else { "failed" }
                );
            }
            ChartPoll::Cancelled => break,
        }
    }
    print_info(&format!(
        "{} chart ticks, {} failed",
        chart.ticks(),
        chart.failed_ticks()
    ));
    panel.shutdown();
    Ok(())
}
