/**
 * Allocation Matrix
 *
 * Maps one unit of scalar thrust per thruster to the wrench it produces.
 * Rows 0-2 are force (x, y, z), rows 3-5 torque (x, y, z); column i is
 * thruster i. Columns past the thruster count stay zero.
 */

use nalgebra::{SMatrix, SVector, Vector6};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{ThrusterGeometry, MAX_THRUSTERS};
use crate::wrench::{ThrustVector, Wrench};

pub type AllocMat = SMatrix<f64, 6, MAX_THRUSTERS>;

#[derive(Debug, Clone)]
pub struct AllocationMatrix{
    matrix: AllocMat,
    count: usize,
}

impl AllocationMatrix{
    pub fn from_geometry(geometry: &ThrusterGeometry) -> Result<Self>{
        if geometry.is_empty(){
            return Err(Error::NoThrusters);
        }

        let mut matrix = AllocMat::zeros();
        for (i, mount) in geometry.active().iter().enumerate(){
            //directions are used as configured, no normalisation
            let f = mount.contribution;
            let tau = mount.torque();
            matrix.set_column(i, &Vector6::new(f[0], f[1], f[2], tau[0], tau[1], tau[2]));
        }

        debug!(thrusters = geometry.len(), "allocation matrix:{}", matrix.columns(0, geometry.len()).clone_owned());

        Ok(AllocationMatrix{ matrix, count: geometry.len() })
    }

    /// Full fixed-capacity matrix, padding columns included
    pub fn matrix(&self) -> &AllocMat{
        &self.matrix
    }

    pub fn column(&self, index: usize) -> Option<[f64; 6]>{
        if index >= self.count{
            return None;
        }
        let col = self.matrix.column(index);
        Some([col[0], col[1], col[2], col[3], col[4], col[5]])
    }

    pub fn thruster_count(&self) -> usize{
        self.count
    }

    /// Wrench produced by a thrust vector; extra or missing entries count as zero
    pub fn forward(&self, thrust: &ThrustVector) -> Wrench{
        let mut t = SVector::<f64, MAX_THRUSTERS>::zeros();
        for (i, force) in thrust.iter().take(self.count).enumerate(){
            t[i] = force;
        }
        Wrench::from_vector(&(self.matrix * t))
    }
}
