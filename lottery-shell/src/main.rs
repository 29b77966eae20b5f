// std
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
// crates
use clap::Parser;
use lottery::{Amount, LotteryConfig, Series};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use tracing::level_filters::LevelFilter;
// internal
use crate::settings::{load_json_from_file, ShellSettings};
use crate::shell::{closing_message, SharedSeries, Shell};

mod log;
mod settings;
mod shell;

/// Opens a command line application to handle the lottery
#[derive(Debug, Parser)]
#[command(name = "lottery-shell")]
pub struct LotteryApp {
    /// Json file path, on `ShellSettings` format
    #[clap(long, short)]
    input_settings: Option<PathBuf>,
    /// Initial pot value (default: 200)
    #[clap(long)]
    pot: Option<Amount>,
    /// Seed of the draws, derived from the current time if absent
    #[clap(long)]
    seed: Option<u64>,
    #[clap(long, default_value = "plain")]
    log_format: log::LogFormat,
    #[clap(long, default_value = "stderr")]
    log_to: log::LogOutput,
    #[clap(long, default_value = "warn")]
    log_level: LevelFilter,
}

impl LotteryApp {
    pub fn run(self) -> anyhow::Result<()> {
        tracing::info!("Arguments: {:?}", self);
        let Self {
            input_settings,
            pot,
            seed,
            log_format: _,
            log_to: _,
            log_level: _,
        } = self;
        let settings: ShellSettings = match input_settings {
            Some(path) => load_json_from_file(&path)?,
            None => ShellSettings::default(),
        };
        let config = resolve_config(settings.lottery, pot);

        let seed = seed.or(settings.seed).unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("Time went backwards")
                .as_secs()
        });
        tracing::info!("Seed: {}", seed);
        tracing::info!("Config: {}", serde_json::to_string(&config)?);

        let series: SharedSeries = Arc::new(Mutex::new(Series::new(
            config,
            ChaCha12Rng::seed_from_u64(seed),
        )));
        handle_interrupt(Arc::clone(&series))?;

        let stdin = std::io::stdin();
        Shell::new(series, std::io::stdout()).run(stdin.lock())
    }
}

/// The `--pot` flag wins over the settings file.
fn resolve_config(config: LotteryConfig, pot: Option<Amount>) -> LotteryConfig {
    match pot {
        Some(pot) => config.with_initial_pot(pot),
        None => config,
    }
}

fn handle_interrupt(series: SharedSeries) -> anyhow::Result<()> {
    ctrlc::set_handler(move || {
        // Waits for any purchase or draw in progress
        let pot = series.lock().get_pot();
        println!();
        println!("{}", closing_message(pot));
        tracing::info!("Interrupted, pot: {}", pot);
        std::process::exit(0);
    })?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let app: LotteryApp = LotteryApp::parse();
    let guard = log::config_tracing(app.log_format, &app.log_to, app.log_level)?;

    if let Err(e) = app.run() {
        tracing::error!("error: {}", e);
        drop(guard);
        std::process::exit(1);
    }
    Ok(())
}
