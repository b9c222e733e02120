/**
 * Thrust Allocator Binary
 *
 * Loads the thruster configuration, then reads wrenches from stdin:
 *   fx fy fz tx ty tz
 * and prints the per-thruster forces and the packed signal word.
 * With --port the word is also sent to the actuator controller.
 *
 * Usage: thrust_allocator --config config/thrusters.toml [--port /dev/ttyACM0]
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use thrust_alloc::node::{ThrustNode, FORCES_TOPIC, INPUT_TOPIC, QUEUE_DEPTH, SIGNALS_TOPIC};
use thrust_alloc::{AllocatorConfig, SerialLink, ThrustVector, TopicRegistry, Wrench, Topic};

#[derive(Parser, Debug)]
#[command(name = "thrust_allocator", about = "Allocate 6-DoF wrenches to thruster signal words")]
struct Args{
    /// Thruster configuration (TOML)
    #[arg(short, long, default_value = "config/thrusters.toml")]
    config: PathBuf,

    /// Serial port of the actuator controller
    #[arg(short, long)]
    port: Option<String>,

    #[arg(short, long, default_value_t = 9600)]
    baud: u32,
}

fn parse_wrench(line: &str) -> Option<Wrench>{
    let values: Vec<f64> = line.split_whitespace()
        .map(|v| v.parse().ok())
        .collect::<Option<_>>()?;
    let values: [f64; 6] = values.try_into().ok()?;
    Some(Wrench::from_array(values))
}

fn main() -> Result<()>{
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = AllocatorConfig::load(&args.config)?;
    let allocator = Arc::new(config.build().context("refusing to start")?);

    println!("==============================================");
    println!("  Thrust Allocator");
    println!("==============================================");
    println!("  Config:    {}", args.config.display());
    println!("  Thrusters: {}", allocator.thruster_count());
    println!("  Bits:      {}", allocator.quantization().bits());
    println!("==============================================\n");

    let registry = TopicRegistry::new();
    let mut node = ThrustNode::new(Arc::clone(&allocator), &registry)?;
    if let Some(port) = args.port.as_deref(){
        let link = SerialLink::open(port, args.baud)
            .with_context(|| format!("Failed to open port {}", port))?;
        node = node.with_sink(Box::new(link));
    }

    let input: Arc<Topic<Wrench>> = registry.get_or_create(INPUT_TOPIC, QUEUE_DEPTH)?;
    let forces: Arc<Topic<ThrustVector>> = registry.get_or_create(FORCES_TOPIC, QUEUE_DEPTH)?;
    let signals: Arc<Topic<u32>> = registry.get_or_create(SIGNALS_TOPIC, QUEUE_DEPTH)?;

    println!("Enter wrenches as 'fx fy fz tx ty tz' (or 'x' to exit):");

    let stdin = io::stdin();
    loop{
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0{
            break;
        }

        let line = line.trim();
        match line{
            "x" | "exit" | "quit" => break,
            "" => continue,
            _ => {}
        }

        let Some(wrench) = parse_wrench(line) else{
            warn!("expected six numbers, got: {}", line);
            continue;
        };

        input.publish(wrench);
        node.spin_once();

        while let Some((thrust, _)) = forces.try_receive(){
            let formatted: Vec<String> = thrust.iter().map(|f| format!("{:.3}", f)).collect();
            println!("[FORCES] {}", formatted.join(" "));
        }
        while let Some((signal, _)) = signals.try_receive(){
            println!("[SIGNAL] {:#010x} levels={:?}", signal, allocator.decode(signal));
        }
    }

    println!("[SHUTDOWN]");
    node.stop_thrusters();
    Ok(())
}
