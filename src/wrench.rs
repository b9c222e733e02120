use nalgebra::Vector6;
use crate::geometry::MAX_THRUSTERS;

/// Commanded force (N) and torque (N m) in the vehicle frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Wrench{
    pub force: [f64; 3],
    pub torque: [f64; 3],
}

impl Wrench{
    pub fn new(force: [f64; 3], torque: [f64; 3]) -> Self{
        Wrench{ force, torque }
    }

    /// [fx, fy, fz, tx, ty, tz]
    pub fn from_array(values: [f64; 6]) -> Self{
        Wrench{
            force: [values[0], values[1], values[2]],
            torque: [values[3], values[4], values[5]],
        }
    }

    pub fn to_array(&self) -> [f64; 6]{
        [
            self.force[0], self.force[1], self.force[2],
            self.torque[0], self.torque[1], self.torque[2],
        ]
    }

    pub fn to_vector(&self) -> Vector6<f64>{
        Vector6::from(self.to_array())
    }

    pub fn from_vector(v: &Vector6<f64>) -> Self{
        Wrench{
            force: [v[0], v[1], v[2]],
            torque: [v[3], v[4], v[5]],
        }
    }
}

/// Per-thruster force (N), fixed capacity so the hot path never allocates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrustVector{
    forces: [f64; MAX_THRUSTERS],
    len: usize,
}

impl ThrustVector{
    /// Copies at most MAX_THRUSTERS values
    pub fn from_slice(values: &[f64]) -> Self{
        let len = values.len().min(MAX_THRUSTERS);
        let mut forces = [0.0; MAX_THRUSTERS];
        forces[..len].copy_from_slice(&values[..len]);
        ThrustVector{ forces, len }
    }

    pub(crate) fn from_parts(forces: [f64; MAX_THRUSTERS], len: usize) -> Self{
        ThrustVector{ forces, len }
    }

    pub fn as_slice(&self) -> &[f64]{
        &self.forces[..self.len]
    }

    pub fn get(&self, index: usize) -> Option<f64>{
        self.as_slice().get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_{
        self.as_slice().iter().copied()
    }

    pub fn len(&self) -> usize{
        self.len
    }

    pub fn is_empty(&self) -> bool{
        self.len == 0
    }

    pub fn to_vec(&self) -> Vec<f64>{
        self.as_slice().to_vec()
    }
}
