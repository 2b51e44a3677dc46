use crate::console::{Interactive, Piped};
use crate::registry::ScheduleRegistry;
use crate::scenario::Scenario;
use crate::session::{Rendering, Session};
use clap::Parser;
use log::info;
use std::io::IsTerminal;
use std::path::PathBuf;

mod console;
mod destination;
mod error;
mod flight;
mod logger;
mod pool;
mod registry;
mod scenario;
mod session;
mod time;

const DEFAULT_POOL_SIZE: usize = 50;

#[derive(Parser)]
#[command(version, about = "Flight schedule desk")]
struct Args {
    /// Number of destination schedules that can be active at once
    #[arg(value_name = "POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE, value_parser = parse_pool_size)]
    pool_size: usize,

    /// JSON scenario with schedules to create on start-up
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Render listings as tables
    #[arg(short, long)]
    table: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Never colour error messages
    #[arg(long)]
    no_color: bool,
}

fn parse_pool_size(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("Bad number of default max schedules specified.".to_string()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init(args.log_file.as_deref())?;

    let mut registry = ScheduleRegistry::new(args.pool_size);
    info!("Registry ready with {} schedule slots", registry.capacity());

    if let Some(path) = &args.scenario {
        let scenario = Scenario::load_from_file(path)?;
        scenario.seed(&mut registry)?;
        println!("Loaded schedules from {}", path.display());
    }

    let stdout = std::io::stdout();
    let interactive = std::io::stdin().is_terminal();
    let rendering = Rendering {
        banner: true,
        table: args.table,
        color: interactive && !args.no_color && stdout.is_terminal(),
    };

    if interactive {
        let mut session = Session::new(registry, Interactive::new()?, stdout.lock(), rendering);
        session.run()?;
    } else {
        let source = Piped::new(std::io::stdin().lock());
        let mut session = Session::new(registry, source, stdout.lock(), rendering);
        session.run()?;
    }
    Ok(())
}
