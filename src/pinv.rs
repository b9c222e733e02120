/**
 * Pseudo-Inverse Solver
 *
 * Moore-Penrose pseudo-inverse of the allocation matrix through SVD.
 * Rank-deficient layouts and layouts with fewer than six thrusters are
 * fine: singular values below tolerance are dropped and the result is the
 * minimum-norm least-squares inverse.
 */

use nalgebra::{SMatrix, SVD};
use tracing::{debug, warn};

use crate::allocation::AllocationMatrix;
use crate::error::{Error, Result};
use crate::geometry::MAX_THRUSTERS;

pub type PinvMat = SMatrix<f64, MAX_THRUSTERS, 6>;

#[derive(Debug, Clone)]
pub struct PseudoInverse{
    matrix: PinvMat,
    count: usize,
    rank: usize,
}

impl PseudoInverse{
    pub fn compute(alloc: &AllocationMatrix) -> Result<Self>{
        let count = alloc.thruster_count();

        //max_niter = 0 iterates until convergence
        let svd = SVD::try_new(*alloc.matrix(), true, true, f64::EPSILON, 0)
            .ok_or_else(|| Error::Decomposition("SVD did not converge".to_string()))?;

        let sigma = &svd.singular_values;
        let sigma_max = sigma.max();
        let tolerance = sigma_max * (count.max(6) as f64) * f64::EPSILON;
        let rank = sigma.iter().filter(|&&s| s > tolerance).count();

        debug!(?sigma, tolerance, rank, "allocation singular values");
        if rank < 6{
            warn!(rank, thrusters = count, "allocation matrix is rank deficient, using least-squares allocation");
        }

        //padding columns are zero so their rows of the inverse come out zero
        let matrix = svd.pseudo_inverse(tolerance)
            .map_err(|e| Error::Decomposition(e.to_string()))?;

        Ok(PseudoInverse{ matrix, count, rank })
    }

    pub fn matrix(&self) -> &PinvMat{
        &self.matrix
    }

    pub fn thruster_count(&self) -> usize{
        self.count
    }

    /// Number of singular values kept; 6 means every wrench is reachable
    pub fn rank(&self) -> usize{
        self.rank
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use nalgebra::SMatrix;
    use crate::geometry::{fixtures, ThrusterGeometry, ThrusterMount};

    fn assert_close<const R: usize, const C: usize>(a: &SMatrix<f64, R, C>, b: &SMatrix<f64, R, C>){
        let diff = (a - b).abs().max();
        assert!(diff < 1e-9, "matrices differ by {}:{}{}", diff, a, b);
    }

    #[test]
    fn test_square_layout_inverts_exactly(){
        let alloc = AllocationMatrix::from_geometry(&fixtures::six_thrusters()).unwrap();
        let pinv = PseudoInverse::compute(&alloc).unwrap();
        assert_eq!(pinv.rank(), 6);

        let a = alloc.matrix().fixed_view::<6, 6>(0, 0).into_owned();
        let p = pinv.matrix().fixed_view::<6, 6>(0, 0).into_owned();
        assert_close(&(p * a), &SMatrix::<f64, 6, 6>::identity());
        assert_close(&(a * p), &SMatrix::<f64, 6, 6>::identity());
    }

    #[test]
    fn test_redundant_layout_is_right_inverse(){
        let alloc = AllocationMatrix::from_geometry(&fixtures::eight_thrusters()).unwrap();
        let pinv = PseudoInverse::compute(&alloc).unwrap();
        assert_eq!(pinv.rank(), 6);
        assert_eq!(pinv.thruster_count(), 8);
        assert_close(&(alloc.matrix() * pinv.matrix()), &SMatrix::<f64, 6, 6>::identity());
    }

    #[test]
    fn test_padding_rows_are_zero(){
        let alloc = AllocationMatrix::from_geometry(&fixtures::eight_thrusters()).unwrap();
        let pinv = PseudoInverse::compute(&alloc).unwrap();
        assert!(pinv.matrix().row(8).iter().all(|x| x.abs() < 1e-12));
    }

    #[test]
    fn test_underactuated_layout_satisfies_penrose(){
        let alloc = AllocationMatrix::from_geometry(&fixtures::four_verticals()).unwrap();
        let pinv = PseudoInverse::compute(&alloc).unwrap();
        assert_eq!(pinv.rank(), 3);

        let a = alloc.matrix();
        let p = pinv.matrix();
        assert_close(&(a * p * a), a);
        assert_close(&(p * a * p), p);
        let ap = a * p;
        assert_close(&ap, &ap.transpose());
        let pa = p * a;
        assert_close(&pa, &pa.transpose());
    }

    #[test]
    fn test_degenerate_layout_does_not_fail(){
        //two identical thrusters and one with no contribution at all
        let mount = ThrusterMount::new([0.1, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let geometry = ThrusterGeometry::from_mounts(&[mount, mount, ThrusterMount::ZERO]).unwrap();
        let alloc = AllocationMatrix::from_geometry(&geometry).unwrap();
        let pinv = PseudoInverse::compute(&alloc).unwrap();
        assert_eq!(pinv.rank(), 1);
        //surge is split evenly over the duplicates
        let p = pinv.matrix();
        assert!((p[(0, 0)] - 0.5).abs() < 1e-12);
        assert!((p[(1, 0)] - 0.5).abs() < 1e-12);
        assert!(p.row(2).iter().all(|x| x.abs() < 1e-12));
    }

    #[test]
    fn test_all_zero_layout_gives_zero_inverse(){
        let geometry = ThrusterGeometry::new(3).unwrap();
        let alloc = AllocationMatrix::from_geometry(&geometry).unwrap();
        let pinv = PseudoInverse::compute(&alloc).unwrap();
        assert_eq!(pinv.rank(), 0);
        assert!(pinv.matrix().iter().all(|&x| x == 0.0));
    }
}
