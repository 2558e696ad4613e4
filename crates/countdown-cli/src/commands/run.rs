use clap::Args;
use countdown_core::{
    Clock, Config, CountdownEngine, CountdownHandle, CountdownRunner, SystemClock, TargetTime,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::terminal::{render_history, TerminalSink};

#[derive(Args)]
pub struct RunArgs {
    /// Target time of day (HH:MM); defaults to the configured target
    #[arg(long)]
    target: Option<String>,
    /// Only show completions, not the running clock
    #[arg(long)]
    quiet: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let target = super::resolve_target(args.target.as_deref(), &config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let engine = runtime.block_on(countdown(target, &config, args.quiet));
    // Stdin is read on a blocking thread that may never return.
    runtime.shutdown_background();

    println!();
    println!("{}", render_history(engine.history()));
    Ok(())
}

async fn countdown(target: TargetTime, config: &Config, quiet: bool) -> CountdownEngine {
    let clock = SystemClock;
    let engine = CountdownEngine::new(target, clock.now())
        .with_celebration(config.countdown.celebration());
    let sink = TerminalSink::new(config.notifications.clone(), quiet);
    let (runner, handle) = CountdownRunner::new(engine, clock, sink);
    let runner = runner.with_tick_interval(config.countdown.tick_interval());

    tracing::info!(target_time = %target, "countdown started");
    tokio::spawn(read_targets(handle.clone()));
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            return;
        }
        handle.shutdown();
    });

    runner.run().await
}

/// Each stdin line is a new target time of day.
async fn read_targets(handle: CountdownHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => match line.parse::<TargetTime>() {
                Ok(target) => {
                    if !handle.set_target(target) {
                        break;
                    }
                }
                Err(e) => eprintln!("\r{e}"),
            },
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stopped reading targets from stdin");
                break;
            }
        }
    }
}
