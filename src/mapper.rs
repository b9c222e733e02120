use nalgebra::SVector;

use crate::geometry::MAX_THRUSTERS;
use crate::pinv::PseudoInverse;
use crate::wrench::{ThrustVector, Wrench};

/// thrust = pinv * wrench
///
/// Pure and allocation free; runs once per incoming wrench.
pub fn map_wrench(pinv: &PseudoInverse, wrench: &Wrench) -> ThrustVector{
    let thrust: SVector<f64, MAX_THRUSTERS> = pinv.matrix() * wrench.to_vector();
    ThrustVector::from_parts(thrust.into(), pinv.thruster_count())
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::allocation::AllocationMatrix;
    use crate::geometry::fixtures;

    fn pinv_for(geometry: &crate::geometry::ThrusterGeometry) -> (AllocationMatrix, PseudoInverse){
        let alloc = AllocationMatrix::from_geometry(geometry).unwrap();
        let pinv = PseudoInverse::compute(&alloc).unwrap();
        (alloc, pinv)
    }

    #[test]
    fn test_output_length_matches_thrusters(){
        let (_, pinv) = pinv_for(&fixtures::eight_thrusters());
        let thrust = map_wrench(&pinv, &Wrench::from_array([10.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
        assert_eq!(thrust.len(), 8);

        let (_, pinv) = pinv_for(&fixtures::four_verticals());
        let thrust = map_wrench(&pinv, &Wrench::default());
        assert_eq!(thrust.len(), 4);
        assert!(thrust.iter().all(|t| t == 0.0));
    }

    #[test]
    fn test_mapping_is_deterministic(){
        let (_, pinv) = pinv_for(&fixtures::eight_thrusters());
        let wrench = Wrench::from_array([12.5, -3.0, 7.25, 0.4, -1.1, 2.0]);
        let a = map_wrench(&pinv, &wrench);
        let b = map_wrench(&pinv, &wrench);
        for (x, y) in a.iter().zip(b.iter()){
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_reachable_wrench_is_reproduced(){
        let (alloc, pinv) = pinv_for(&fixtures::eight_thrusters());
        let wrench = Wrench::from_array([20.0, -5.0, 8.0, 0.5, -0.3, 1.2]);
        let produced = alloc.forward(&map_wrench(&pinv, &wrench));
        for (want, got) in wrench.to_array().iter().zip(produced.to_array().iter()){
            assert!((want - got).abs() < 1e-9, "want {} got {}", want, got);
        }
    }

    #[test]
    fn test_surge_uses_horizontals_only(){
        let (_, pinv) = pinv_for(&fixtures::eight_thrusters());
        let thrust = map_wrench(&pinv, &Wrench::from_array([10.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
        for i in 0..4{
            assert!(thrust.get(i).unwrap() > 0.0);
        }
        for i in 4..8{
            assert!(thrust.get(i).unwrap().abs() < 1e-9);
        }
    }

    #[test]
    fn test_unreachable_wrench_gets_least_squares_answer(){
        let (alloc, pinv) = pinv_for(&fixtures::four_verticals());
        //surge cannot be produced by verticals, heave can
        let wrench = Wrench::from_array([50.0, 0.0, 20.0, 0.0, 0.0, 0.0]);
        let thrust = map_wrench(&pinv, &wrench);
        for t in thrust.iter(){
            assert!((t - 5.0).abs() < 1e-9);
        }
        let produced = alloc.forward(&thrust);
        assert!(produced.force[0].abs() < 1e-9);
        assert!((produced.force[2] - 20.0).abs() < 1e-9);
    }
}
