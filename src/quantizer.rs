/**
 * Level Quantizer
 *
 * Turns a thruster force into the unsigned level the actuator controller
 * understands. With B bits per thruster:
 *   0 .. 2^(B-1)        reverse, 0 = max_rev, 2^(B-1) = no force
 *   2^(B-1) .. 2^B - 1  forward, 2^B - 1 = max_fwd
 * Forces beyond the limits saturate.
 */

use crate::error::{Error, Result};

/// Forces smaller than this (N) are sent as zero
pub const DEAD_ZONE: f64 = 0.1;

/// Kilogram-force to newton
pub const KGF_TO_NEWTON: f64 = 9.807;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizationConfig{
    bits: u32,
    max_fwd: f64,
    max_rev: f64,
}

impl QuantizationConfig{
    /// `max_fwd` and `max_rev` are in newtons
    pub fn new(bits: u32, max_fwd: f64, max_rev: f64) -> Result<Self>{
        //levels must fit a u32 alongside the shift
        if bits == 0 || bits >= u32::BITS{
            return Err(Error::InvalidBitWidth(bits));
        }
        if !(max_fwd.is_finite() && max_fwd > 0.0){
            return Err(Error::InvalidForceLimit{ name: "max_fwd", value: max_fwd });
        }
        if !(max_rev.is_finite() && max_rev > 0.0){
            return Err(Error::InvalidForceLimit{ name: "max_rev", value: max_rev });
        }
        Ok(QuantizationConfig{ bits, max_fwd, max_rev })
    }

    /// Same as `new` with limits in kilogram-force
    pub fn from_kgf(bits: u32, max_fwd_kgf: f64, max_rev_kgf: f64) -> Result<Self>{
        Self::new(bits, max_fwd_kgf * KGF_TO_NEWTON, max_rev_kgf * KGF_TO_NEWTON)
    }

    pub fn bits(&self) -> u32{
        self.bits
    }

    pub fn max_fwd(&self) -> f64{
        self.max_fwd
    }

    pub fn max_rev(&self) -> f64{
        self.max_rev
    }

    /// 2^B
    pub fn encode_levels(&self) -> u32{
        1 << self.bits
    }

    /// Level sent for zero force, 2^(B-1)
    pub fn neutral_level(&self) -> u32{
        self.encode_levels() / 2
    }

    pub fn mask(&self) -> u32{
        self.encode_levels() - 1
    }

    pub fn force_to_level(&self, force: f64) -> u32{
        let half = self.neutral_level();

        //NaN would otherwise fall into the reverse branch and saturate
        let force = if force.is_nan() || force.abs() < DEAD_ZONE{ 0.0 }else{ force };

        let level = if force >= 0.0{
            let fraction = force.min(self.max_fwd) / self.max_fwd;
            (fraction * (half - 1) as f64).ceil() as u32 + half
        }else{
            let fraction = force.max(-self.max_rev) / -self.max_rev;
            half - (fraction * half as f64).ceil() as u32
        };

        level & self.mask()
    }
}
