/**
 * Allocator Configuration
 *
 * TOML with the deployed parameter names, so a flat parameter dump works
 * unchanged thanks to dotted keys:
 *
 *   num_thrusters = 8
 *   bits_per_thruster = 3
 *   max_fwd = 5.25   # kgf
 *   max_rev = 4.1    # kgf
 *   thruster1.contrib.x = 0.7071
 *   thruster1.lx = 0.2
 *
 * The i-th active thruster takes the i-th entry of THRUSTER_NAMES. Any other
 * top-level key is ignored.
 */

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::allocator::ThrustAllocator;
use crate::error::{Error, Result};
use crate::geometry::{ThrusterGeometry, ThrusterMount, MAX_THRUSTERS};
use crate::quantizer::QuantizationConfig;

/// Parameter names of the thruster slots, in allocation order
//thruster7 is not part of the deployed naming
pub const THRUSTER_NAMES: [&str; MAX_THRUSTERS] = [
    "thruster1", "thruster2", "thruster3", "thruster4", "thruster5",
    "thruster6", "thruster8", "thruster9", "thruster10",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Contribution{
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThrusterParams{
    pub contrib: Contribution,
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,
}

impl ThrusterParams{
    pub fn mount(&self) -> ThrusterMount{
        ThrusterMount::new(
            [self.lx, self.ly, self.lz],
            [self.contrib.x, self.contrib.y, self.contrib.z],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AllocatorConfig{
    pub num_thrusters: usize,
    pub bits_per_thruster: u32,
    /// Forward limit per thruster (kgf)
    pub max_fwd: f64,
    /// Reverse limit per thruster (kgf)
    pub max_rev: f64,
    //everything else, thruster tables are picked out by name
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl AllocatorConfig{
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self>{
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| Error::Io{ path: path.to_path_buf(), source })?;
        toml::from_str(&contents)
            .map_err(|source| Error::Parse{ path: path.to_path_buf(), source })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self>{
        toml::from_str(contents)
            .map_err(|source| Error::Parse{ path: "<inline>".into(), source })
    }

    pub fn geometry(&self) -> Result<ThrusterGeometry>{
        let mut geometry = ThrusterGeometry::new(self.num_thrusters)?;

        for (i, name) in THRUSTER_NAMES.iter().take(self.num_thrusters).enumerate(){
            match self.thruster(name)?{
                Some(params) => geometry.set(i, params.mount())?,
                None => warn!(thruster = *name, "no geometry configured, thruster will not be used"),
            }
        }

        let active = &THRUSTER_NAMES[..self.num_thrusters.min(MAX_THRUSTERS)];
        for key in self.extra.keys().filter(|key| !active.contains(&key.as_str())){
            debug!(key = %key, "ignoring config key");
        }

        Ok(geometry)
    }

    /// Geometry table of one thruster, `None` when absent
    pub fn thruster(&self, name: &str) -> Result<Option<ThrusterParams>>{
        let Some(value) = self.extra.get(name) else{
            return Ok(None);
        };
        value.clone().try_into()
            .map(Some)
            .map_err(|source| Error::ThrusterTable{ name: name.to_string(), source })
    }

    pub fn quantization(&self) -> Result<QuantizationConfig>{
        QuantizationConfig::from_kgf(self.bits_per_thruster, self.max_fwd, self.max_rev)
    }

    pub fn build(&self) -> Result<ThrustAllocator>{
        ThrustAllocator::new(self.geometry()?, self.quantization()?)
    }
}
