/**
 * Thrust Node
 *
 * Runtime glue around a frozen ThrustAllocator:
 * 1. Takes wrenches from `input_forces`
 * 2. Publishes per-thruster forces on `output_forces`
 * 3. Publishes packed words on `signals` and forwards them to the sink
 * On shutdown the neutral word is sent so every thruster stops.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

use crate::allocator::ThrustAllocator;
use crate::error::Result;
use crate::pubsub::{Publisher, Subscriber, TopicRegistry};
use crate::uart::SignalSink;
use crate::wrench::{ThrustVector, Wrench};

pub const INPUT_TOPIC: &str = "input_forces";
pub const FORCES_TOPIC: &str = "output_forces";
pub const SIGNALS_TOPIC: &str = "signals";
pub const QUEUE_DEPTH: usize = 10;

pub struct ThrustNode{
    allocator: Arc<ThrustAllocator>,
    input: Subscriber<Wrench>,
    forces: Publisher<ThrustVector>,
    signals: Publisher<u32>,
    sink: Option<Box<dyn SignalSink>>,
    running: Arc<AtomicBool>,
}

impl ThrustNode{
    pub fn new(allocator: Arc<ThrustAllocator>, registry: &TopicRegistry) -> Result<Self>{
        let input = Subscriber::new(registry.get_or_create(INPUT_TOPIC, QUEUE_DEPTH)?);
        let forces = Publisher::new(registry.get_or_create(FORCES_TOPIC, QUEUE_DEPTH)?);
        let signals = Publisher::new(registry.get_or_create(SIGNALS_TOPIC, QUEUE_DEPTH)?);

        Ok(ThrustNode{
            allocator,
            input,
            forces,
            signals,
            sink: None,
            //cleared only by shutdown, so a stop before run is kept
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    pub fn with_sink(mut self, sink: Box<dyn SignalSink>) -> Self{
        self.sink = Some(sink);
        self
    }

    pub fn allocator(&self) -> &Arc<ThrustAllocator>{
        &self.allocator
    }

    /// Handle that stops `run` from another thread
    pub fn running_flag(&self) -> Arc<AtomicBool>{
        Arc::clone(&self.running)
    }

    pub fn shutdown(&self){
        self.running.store(false, Ordering::SeqCst);
    }

    /// Handles every queued wrench, returns how many
    pub fn spin_once(&mut self) -> usize{
        let mut handled = 0;
        while let Some(wrench) = self.input.try_recv(){
            let out = self.allocator.process(&wrench);
            self.forces.publish(out.thrust);
            self.signals.publish(out.signal);
            self.transmit(out.signal);
            handled += 1;
        }
        handled
    }

    /// Spins until shut down, then sends the neutral word (blocking).
    /// A node shut down before `run` only sends the neutral word.
    pub fn run(&mut self, period: Duration){
        self.run_loop(period);
    }

    /// Start in background thread
    pub fn start_background(mut self, period: Duration) -> (JoinHandle<()>, Arc<AtomicBool>){
        let running = self.running_flag();
        let handle = thread::spawn(move ||{
            self.run_loop(period);
        });
        (handle, running)
    }

    fn run_loop(&mut self, period: Duration){
        info!(thrusters = self.allocator.thruster_count(), "Thrust node started");

        while self.running.load(Ordering::SeqCst){
            if self.spin_once() == 0{
                thread::sleep(period);
            }
        }

        info!("Stopping thrusters...");
        self.stop_thrusters();
    }

    pub fn stop_thrusters(&mut self){
        let neutral = self.allocator.neutral_signal();
        self.signals.publish(neutral);
        self.transmit(neutral);
    }

    fn transmit(&mut self, word: u32){
        if let Some(sink) = self.sink.as_mut(){
            if let Err(e) = sink.send_signal(word){
                warn!("failed to send signal {:#010x}: {}", word, e);
            }
        }
    }
}
