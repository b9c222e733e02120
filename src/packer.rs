/**
 * Signal Packer
 *
 * Packs every thruster level into one u32 for the actuator controller.
 * Thruster i occupies bits [B*i, B*i + B); bits 24-31 carry a fixed
 * marker so the receiver can tell a real frame from line noise.
 */

use crate::error::{Error, Result};
use crate::geometry::MAX_THRUSTERS;

pub const SIGNAL_WORD_BITS: u32 = u32::BITS;
pub const MARKER_BITS: u32 = 8;
pub const MARKER_SHIFT: u32 = SIGNAL_WORD_BITS - MARKER_BITS;
pub const FRAME_MARKER: u32 = 0b1010_1010 << MARKER_SHIFT;

/// Bits left for thruster levels below the marker
pub const LEVEL_BITS_AVAILABLE: u32 = MARKER_SHIFT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalLayout{
    bits: u32,
    count: usize,
}

impl SignalLayout{
    pub fn new(bits: u32, count: usize) -> Result<Self>{
        if bits == 0{
            return Err(Error::InvalidBitWidth(bits));
        }
        if count == 0{
            return Err(Error::NoThrusters);
        }
        if count > MAX_THRUSTERS{
            return Err(Error::TooManyThrusters{ count, max: MAX_THRUSTERS });
        }
        let required = bits.saturating_mul(count as u32);
        if required > LEVEL_BITS_AVAILABLE{
            return Err(Error::SignalOverflow{ required, available: LEVEL_BITS_AVAILABLE });
        }
        Ok(SignalLayout{ bits, count })
    }

    pub fn bits(&self) -> u32{
        self.bits
    }

    pub fn thruster_count(&self) -> usize{
        self.count
    }

    fn mask(&self) -> u32{
        (1 << self.bits) - 1
    }

    /// Levels past the thruster count are ignored; each level is masked to B bits
    pub fn pack(&self, levels: &[u32]) -> u32{
        levels.iter()
            .take(self.count)
            .enumerate()
            .fold(FRAME_MARKER, |word, (i, &level)|{
                word | ((level & self.mask()) << (self.bits * i as u32))
            })
    }

    pub fn level(&self, word: u32, index: usize) -> Option<u32>{
        if index >= self.count{
            return None;
        }
        Some((word >> (self.bits * index as u32)) & self.mask())
    }

    pub fn unpack(&self, word: u32) -> [u32; MAX_THRUSTERS]{
        let mut levels = [0u32; MAX_THRUSTERS];
        for (i, level) in levels.iter_mut().take(self.count).enumerate(){
            *level = (word >> (self.bits * i as u32)) & self.mask();
        }
        levels
    }
}

pub fn has_marker(word: u32) -> bool{
    word >> MARKER_SHIFT == FRAME_MARKER >> MARKER_SHIFT
}
