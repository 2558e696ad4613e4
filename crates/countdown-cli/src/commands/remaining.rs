use clap::Args;
use countdown_core::{parse_wall_clock, Clock, Config, CountdownEngine, SystemClock};

#[derive(Args)]
pub struct RemainingArgs {
    /// Target time of day (HH:MM); defaults to the configured target
    #[arg(long)]
    target: Option<String>,
    /// Evaluate at this local time ("YYYY-MM-DD HH:MM:SS") instead of now
    #[arg(long)]
    at: Option<String>,
}

pub fn run(args: RemainingArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let target = super::resolve_target(args.target.as_deref(), &config)?;
    let now = match args.at.as_deref() {
        Some(raw) => parse_wall_clock(raw)?,
        None => SystemClock.now(),
    };

    let mut engine = CountdownEngine::new(target, now);
    let completed = engine.tick(now);
    println!("{}", serde_json::to_string_pretty(&engine.snapshot(now))?);
    if let Some(event) = completed {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }
    Ok(())
}
