/**
 * Thrust Allocator
 *
 * Built once from the thruster geometry and quantization settings, then
 * frozen. Every incoming wrench goes through
 *   pseudo-inverse mapping -> per-thruster quantization -> signal packing
 * without touching shared state, so one allocator can sit behind an Arc
 * and serve any number of threads.
 */

use tracing::{info, trace};

use crate::allocation::AllocationMatrix;
use crate::error::Result;
use crate::geometry::{ThrusterGeometry, MAX_THRUSTERS};
use crate::mapper::map_wrench;
use crate::packer::SignalLayout;
use crate::pinv::PseudoInverse;
use crate::quantizer::QuantizationConfig;
use crate::wrench::{ThrustVector, Wrench};

/// Result of one wrench: forces for monitoring, word for the hardware
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation{
    pub thrust: ThrustVector,
    pub signal: u32,
}

#[derive(Debug, Clone)]
pub struct ThrustAllocator{
    geometry: ThrusterGeometry,
    allocation: AllocationMatrix,
    pinv: PseudoInverse,
    quantization: QuantizationConfig,
    layout: SignalLayout,
}

impl ThrustAllocator{
    pub fn new(geometry: ThrusterGeometry, quantization: QuantizationConfig) -> Result<Self>{
        //layout first so bad bit budgets never reach the solver
        let layout = SignalLayout::new(quantization.bits(), geometry.len())?;
        let allocation = AllocationMatrix::from_geometry(&geometry)?;
        let pinv = PseudoInverse::compute(&allocation)?;

        info!(
            thrusters = geometry.len(),
            bits_per_thruster = quantization.bits(),
            max_fwd = quantization.max_fwd(),
            max_rev = quantization.max_rev(),
            rank = pinv.rank(),
            "Thrust allocator ready"
        );

        Ok(ThrustAllocator{ geometry, allocation, pinv, quantization, layout })
    }

    pub fn allocate(&self, wrench: &Wrench) -> ThrustVector{
        map_wrench(&self.pinv, wrench)
    }

    pub fn encode(&self, thrust: &ThrustVector) -> u32{
        let mut levels = [0u32; MAX_THRUSTERS];
        for (level, force) in levels.iter_mut().zip(thrust.iter()){
            *level = self.quantization.force_to_level(force);
        }
        self.layout.pack(&levels[..thrust.len().min(self.layout.thruster_count())])
    }

    pub fn process(&self, wrench: &Wrench) -> Allocation{
        let thrust = self.allocate(wrench);
        let signal = self.encode(&thrust);
        trace!(?wrench, thrust = ?thrust.as_slice(), signal, "allocated");
        Allocation{ thrust, signal }
    }

    /// Every thruster at its zero-force level
    pub fn neutral_signal(&self) -> u32{
        let levels = [self.quantization.neutral_level(); MAX_THRUSTERS];
        self.layout.pack(&levels[..self.thruster_count()])
    }

    /// Wrench a thrust vector actually produces on the vehicle
    pub fn forward(&self, thrust: &ThrustVector) -> Wrench{
        self.allocation.forward(thrust)
    }

    pub fn decode(&self, signal: u32) -> Vec<u32>{
        self.layout.unpack(signal)[..self.thruster_count()].to_vec()
    }

    pub fn thruster_count(&self) -> usize{
        self.geometry.len()
    }

    pub fn geometry(&self) -> &ThrusterGeometry{
        &self.geometry
    }

    pub fn allocation_matrix(&self) -> &AllocationMatrix{
        &self.allocation
    }

    pub fn pseudo_inverse(&self) -> &PseudoInverse{
        &self.pinv
    }

    pub fn quantization(&self) -> &QuantizationConfig{
        &self.quantization
    }

    pub fn layout(&self) -> &SignalLayout{
        &self.layout
    }
}
