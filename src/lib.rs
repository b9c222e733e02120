pub mod error;
pub mod geometry;
pub mod wrench;
pub mod allocation;
pub mod pinv;
pub mod mapper;
pub mod quantizer;
pub mod packer;
pub mod allocator;
pub mod config;
pub mod pubsub;
pub mod uart;
pub mod node;
pub mod ffi;

#[cfg(feature = "python")]
pub mod python;

pub use error::{Error, Result};
pub use geometry::{ThrusterGeometry, ThrusterMount, MAX_THRUSTERS};
pub use wrench::{Wrench, ThrustVector};
pub use allocation::AllocationMatrix;
pub use pinv::PseudoInverse;
pub use mapper::map_wrench;
pub use quantizer::QuantizationConfig;
pub use packer::{SignalLayout, FRAME_MARKER};
pub use allocator::{ThrustAllocator, Allocation};
pub use config::AllocatorConfig;

pub use pubsub::{
    Message, Topic,
    Publisher, Subscriber,
    TopicRegistry,
};
pub use uart::{SignalSink, SerialLink};
pub use node::ThrustNode;
