/**
 * Thruster Geometry
 *
 * Mounting position (lever arm from the centre of gravity) and force
 * direction of every thruster, stored in a fixed-capacity table.
 */

use crate::error::{Error, Result};

/// Largest thruster count the allocator supports
pub const MAX_THRUSTERS: usize = 9;

/// One thruster's mounting: where it sits and which way it pushes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrusterMount{
    /// Position relative to the centre of gravity (m)
    pub lever_arm: [f64; 3],
    /// Force produced by one unit of thrust, vehicle frame
    pub contribution: [f64; 3],
}

impl ThrusterMount{
    pub const ZERO: ThrusterMount = ThrusterMount{
        lever_arm: [0.0; 3],
        contribution: [0.0; 3],
    };

    pub fn new(lever_arm: [f64; 3], contribution: [f64; 3]) -> Self{
        ThrusterMount{ lever_arm, contribution }
    }

    /// Torque about the centre of gravity for one unit of thrust
    pub fn torque(&self) -> [f64; 3]{
        cross(&self.lever_arm, &self.contribution)
    }
}

/// tau = r x F
pub fn cross(r: &[f64; 3], f: &[f64; 3]) -> [f64; 3]{
    [
        r[1] * f[2] - r[2] * f[1],
        r[2] * f[0] - r[0] * f[2],
        r[0] * f[1] - r[1] * f[0],
    ]
}

#[derive(Debug, Clone)]
pub struct ThrusterGeometry{
    mounts: [ThrusterMount; MAX_THRUSTERS],
    count: usize,
}

impl ThrusterGeometry{
    /// Geometry for `count` thrusters, every mount zeroed
    pub fn new(count: usize) -> Result<Self>{
        if count == 0{
            return Err(Error::NoThrusters);
        }
        if count > MAX_THRUSTERS{
            return Err(Error::TooManyThrusters{ count, max: MAX_THRUSTERS });
        }
        Ok(ThrusterGeometry{
            mounts: [ThrusterMount::ZERO; MAX_THRUSTERS],
            count,
        })
    }

    pub fn from_mounts(mounts: &[ThrusterMount]) -> Result<Self>{
        let mut geometry = Self::new(mounts.len())?;
        geometry.mounts[..mounts.len()].copy_from_slice(mounts);
        Ok(geometry)
    }

    pub fn set(&mut self, index: usize, mount: ThrusterMount) -> Result<()>{
        if index >= self.count{
            return Err(Error::ThrusterIndex{ index, count: self.count });
        }
        self.mounts[index] = mount;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&ThrusterMount>{
        self.active().get(index)
    }

    /// The configured thrusters, padding excluded
    pub fn active(&self) -> &[ThrusterMount]{
        &self.mounts[..self.count]
    }

    pub fn len(&self) -> usize{
        self.count
    }

    pub fn is_empty(&self) -> bool{
        self.count == 0
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn test_cross_unit_axes(){
        assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(cross(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]);
        assert_eq!(cross(&[0.0, 1.0, 0.0], &[1.0, 0.0, 0.0]), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_mount_torque(){
        //vertical thruster mounted forward of the CG pitches the nose
        let mount = ThrusterMount::new([0.2, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let torque = mount.torque();
        assert_eq!(torque, [0.0, -0.2, 0.0]);
    }

    #[test]
    fn test_geometry_rejects_bad_counts(){
        assert!(matches!(ThrusterGeometry::new(0), Err(Error::NoThrusters)));
        assert!(matches!(
            ThrusterGeometry::new(MAX_THRUSTERS + 1),
            Err(Error::TooManyThrusters{ count: 10, max: 9 })
        ));
        assert!(ThrusterGeometry::new(MAX_THRUSTERS).is_ok());
    }

    #[test]
    fn test_geometry_set_and_active(){
        let mut geometry = ThrusterGeometry::new(2).unwrap();
        let mount = ThrusterMount::new([0.1, 0.2, 0.3], [1.0, 0.0, 0.0]);
        geometry.set(1, mount).unwrap();

        assert_eq!(geometry.len(), 2);
        assert_eq!(geometry.active().len(), 2);
        assert_eq!(geometry.get(1), Some(&mount));
        assert_eq!(geometry.get(0), Some(&ThrusterMount::ZERO));
        assert!(geometry.get(2).is_none());
        assert!(matches!(geometry.set(2, mount), Err(Error::ThrusterIndex{ index: 2, count: 2 })));
    }
}
