//! Transmit-window simulation
//!
//! Runs the scheduler through simulated hours of outbound traffic on a manual
//! clock and prints a JSON summary.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use txwindow_rs::net::{BoundedPool, Packet, PacketPriority, PortNum, Radio, TxFailure};
use txwindow_rs::queue::QueueStrategy;
use txwindow_rs::sched::{DiscardReason, SchedulerConfig, SendOutcome, StatsReport, TransmitScheduler};
use txwindow_rs::time::{ManualClock, TimeOfDay};
use txwindow_rs::window::{Mode, TimeWindowConfig};

#[derive(Debug, Parser)]
#[command(
    name = "window-sim",
    about = "Drive the transmit-window scheduler through a simulated day"
)]
struct Args {
    /// Window start (HH:MM, local time)
    #[arg(long, default_value = "21:00")]
    window_start: TimeOfDay,

    /// Window end (HH:MM, exclusive)
    #[arg(long, default_value = "23:00")]
    window_end: TimeOfDay,

    /// Outside-window behaviour: drop, queue or receive
    #[arg(long, default_value = "queue")]
    mode: Mode,

    #[arg(long, default_value_t = 32)]
    queue_size: u16,

    #[arg(long, default_value_t = 3600)]
    expire_secs: u32,

    /// JSON window config; replaces the window flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Queue ordering; overrides the scheduler config file
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// JSON scheduler config (queue strategy and drain budget)
    #[arg(long)]
    scheduler_config: Option<PathBuf>,

    /// Local time the simulation starts at
    #[arg(long, default_value = "00:00")]
    start: TimeOfDay,

    /// Simulated duration in hours
    #[arg(long, default_value_t = 24)]
    hours: u64,

    /// Seconds between outbound packets
    #[arg(long, default_value_t = 600)]
    send_every_secs: u64,

    /// Seconds between periodic drain ticks
    #[arg(long, default_value_t = 60)]
    tick_secs: u64,

    /// Every Nth transmit attempt fails transiently (0 = never)
    #[arg(long, default_value_t = 0)]
    fail_every: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Fifo,
    Priority,
}

impl From<StrategyArg> for QueueStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Fifo => QueueStrategy::Fifo,
            StrategyArg::Priority => QueueStrategy::Priority,
        }
    }
}

/// Radio that succeeds except for every `fail_every`-th attempt.
struct FlakyRadio {
    fail_every: u64,
    attempts: u64,
    transmitted: u64,
}

impl Radio for FlakyRadio {
    fn transmit(&mut self, pkt: Packet) -> Result<(), TxFailure> {
        self.attempts += 1;
        if self.fail_every > 0 && self.attempts % self.fail_every == 0 {
            return Err(TxFailure::transient(pkt));
        }
        self.transmitted += 1;
        debug!(pkt_id = %pkt.id, "on air");
        Ok(())
    }
}

#[derive(Debug, Default, Serialize)]
struct Discards {
    outside_window: u64,
    transmit_suppressed: u64,
    queue_full: u64,
}

#[derive(Debug, Serialize)]
struct Summary {
    window: String,
    mode: Mode,
    strategy: QueueStrategy,
    packets_offered: u64,
    sent_direct: u64,
    queued: u64,
    discarded: Discards,
    send_errors: u64,
    tick_drained: u64,
    transmitted: u64,
    final_queue_len: usize,
    stats: StatsReport,
}

fn window_config(args: &Args) -> Result<TimeWindowConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config {
        let raw = fs::read_to_string(path)?;
        return Ok(TimeWindowConfig::from_json(&raw)?);
    }
    let mut cfg = TimeWindowConfig::window(args.window_start, args.window_end, args.mode);
    cfg.set_queue_size(args.queue_size)?;
    cfg.set_expire_secs(args.expire_secs)?;
    Ok(cfg)
}

fn scheduler_config(args: &Args) -> Result<SchedulerConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.scheduler_config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => SchedulerConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.into();
    }
    Ok(config)
}

/// Deterministic traffic mix so runs are reproducible.
fn make_packet(mut pkt: Packet, n: u64) -> Packet {
    if n % 5 == 0 {
        pkt = pkt.with_want_ack(true);
    }
    if n % 11 == 0 {
        pkt.with_port(PortNum::Emergency, b"sos".to_vec())
            .with_priority(PacketPriority::Reliable)
    } else if n % 7 == 0 {
        pkt.with_port(PortNum::Position, vec![0; 12])
    } else {
        pkt.with_port(PortNum::TextMessage, format!("msg {n}").into_bytes())
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Summary, Box<dyn std::error::Error>> {
    let cfg = window_config(args)?;
    let config = scheduler_config(args)?;
    let strategy = config.strategy;
    if args.send_every_secs == 0 || args.tick_secs == 0 {
        return Err("--send-every-secs and --tick-secs must be positive".into());
    }

    let clock = ManualClock::starting_at(args.start);
    let radio = FlakyRadio {
        fail_every: args.fail_every,
        attempts: 0,
        transmitted: 0,
    };
    let mut sched = TransmitScheduler::new(config, &cfg, radio, BoundedPool::new(4096), clock.clone());

    info!(
        window = %cfg.window_label(),
        mode = %cfg.mode,
        ?strategy,
        max_per_cycle = config.budget.max_packets_per_cycle,
        "▶️  starting simulation"
    );

    let mut offered = 0u64;
    let mut sent_direct = 0u64;
    let mut queued = 0u64;
    let mut send_errors = 0u64;
    let mut tick_drained = 0u64;
    let mut discarded = Discards::default();

    for t in 0..args.hours.saturating_mul(3600) {
        if t % args.send_every_secs == 0 {
            let Some(pkt) = sched.pool_mut().alloc_zeroed() else {
                return Err("packet pool exhausted".into());
            };
            offered += 1;
            match sched.send(&cfg, make_packet(pkt, offered)) {
                Ok(SendOutcome::Sent) => sent_direct += 1,
                Ok(SendOutcome::Queued) => queued += 1,
                Ok(SendOutcome::Discarded(reason)) => match reason {
                    DiscardReason::OutsideWindow => discarded.outside_window += 1,
                    DiscardReason::TransmitSuppressed => discarded.transmit_suppressed += 1,
                    DiscardReason::QueueFull => discarded.queue_full += 1,
                },
                Err(_) => send_errors += 1,
            }
        }
        if t % args.tick_secs == 0 {
            tick_drained += sched.drain(&cfg) as u64;
        }
        clock.advance(Duration::from_secs(1));
    }

    let summary = Summary {
        window: cfg.window_label(),
        mode: cfg.mode,
        strategy,
        packets_offered: offered,
        sent_direct,
        queued,
        discarded,
        send_errors,
        tick_drained,
        transmitted: sched.radio().transmitted,
        final_queue_len: sched.queue_len(),
        stats: sched.stats_report(),
    };
    info!(
        transmitted = summary.transmitted,
        queued = summary.final_queue_len,
        "✅ simulation done"
    );
    Ok(summary)
}
