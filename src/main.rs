use clap::Parser;
use crossbeam_channel as cbc;
use log::{error, info};
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::thread::spawn;

use elevator::building::building::Building;
use elevator::building::notification::Notification;
use elevator::driver::{input, output, realtime, traffic};
use elevator::util::config::SimConfig;
use elevator::util::constants as setting;
use elevator::util::error::ConfigError;

#[derive(Debug, Parser)]
#[command(about = "Simulates elevator dispatch in a multi-floor building")]
struct Args {
    /// JSON file with simulation settings
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Highest floor number (ground floor is 0)
    #[arg(long, short)]
    floors: Option<usize>,

    #[arg(long, short)]
    elevators: Option<usize>,

    /// Building type, e.g. "office"
    #[arg(long, short)]
    building: Option<String>,

    /// min-waiting-time, nearest or round-robin
    #[arg(long, short)]
    strategy: Option<String>,

    /// Run headless with this many random calls instead of reading stdin
    #[arg(long)]
    demo_calls: Option<usize>,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(args: &Args) -> Result<SimConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(floors) = args.floors {
        config.floors = floors;
    }
    if let Some(elevators) = args.elevators {
        config.elevators = elevators;
    }
    if let Some(building) = &args.building {
        config.building = building.clone();
    }
    if let Some(strategy) = &args.strategy {
        config.strategy = Some(strategy.clone());
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };

    let (notify_tx, notify_rx) = cbc::unbounded::<Notification>();
    let mut building = match Building::new(config, notify_tx) {
        Ok(b) => b,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };
    let printer = spawn(move || output::print_notifications(notify_rx));

    match args.demo_calls {
        Some(count) => {
            let calls = traffic::random_calls(
                count,
                building.config().max_floor(),
                setting::DEMO_CALL_WINDOW_SEC,
                args.seed,
            );
            let outcomes = traffic::replay(&mut building, &calls);
            let accepted = outcomes.iter().filter(|o| o.is_ok()).count();
            info!(
                "Replayed {} calls ({} accepted or already served), done at {:?}",
                calls.len(),
                accepted,
                building.now()
            );
        }
        None => {
            println!(
                "Enter floor numbers 0..={} to call an elevator, q to quit",
                building.config().max_floor()
            );
            let (driver_tx, driver_rx) = mpsc::channel();
            {
                let driver_tx = driver_tx.clone();
                spawn(move || {
                    let stdin = io::stdin();
                    input::read_calls(stdin.lock(), driver_tx)
                });
            }
            realtime::run(&mut building, driver_rx, driver_tx);
        }
    }

    // Dropping the building closes the notification channel.
    drop(building);
    if printer.join().is_err() {
        error!("Notification printer panicked");
    }
}
