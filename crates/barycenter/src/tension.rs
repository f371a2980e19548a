//! Cable tension distribution through the barycenter of the feasible polygon.
//!
//! Model
//! - An 8-cable parallel robot has a `6×8` wrench matrix `W`. Tensions `τ`
//!   produce the wrench `W·τ`; for a desired wrench `w` the solution set is
//!   `τ = p + H·λ` with `p = Wᵀ(WWᵀ)⁻¹w` and `H` an `8×2` kernel basis.
//! - Tension limits `τ_min <= τ_i <= τ_max` become the bands
//!   `τ_min - p_i <= H_i·λ <= τ_max - p_i` on the kernel coordinates `λ`.
//! - The distribution picks `λ` at the barycenter of that polygon, which is
//!   as far from all limits as an area-weighted average gets.
//!
//! Code cross-refs: `geom2::barycenter`, `feed::wire::encode`

use nalgebra::{Matrix6, SMatrix, SVector, SymmetricEigen, Vector2, Vector6};
use thiserror::Error;

use crate::geom2::{barycenter, Centroid, Constraint, ConstraintSet, Degenerate, GeomCfg, Polygon, N};

/// Wrench matrix: one column per cable.
pub type WrenchMatrix = SMatrix<f64, 6, N>;
/// Kernel basis: one row per cable.
pub type KernelBasis = SMatrix<f64, N, 2>;
pub type Tensions = SVector<f64, N>;

/// Relative threshold below which an eigenvalue of `WᵀW` counts as zero.
const RANK_EPS: f64 = 1e-10;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum TensionError {
    #[error("tension limits are inverted: tau_min={tau_min} > tau_max={tau_max}")]
    InvalidLimits { tau_min: f64, tau_max: f64 },
    #[error("wrench matrix has non-finite entries")]
    NonFinite,
    #[error("wrench matrix kernel has dimension {0}, expected 2")]
    KernelDimension(usize),
    #[error("W·Wᵀ is not invertible")]
    Singular,
}

/// Robot description: wrench matrix and common tension limits.
#[derive(Clone, Debug, PartialEq)]
pub struct TensionProblem {
    pub w: WrenchMatrix,
    pub tau_min: f64,
    pub tau_max: f64,
}

/// `τ = p + H·λ` decomposition for one desired wrench.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelSplit {
    pub particular: Tensions,
    pub kernel: KernelBasis,
}

impl KernelSplit {
    /// Tensions at kernel coordinates `lambda`.
    #[inline]
    pub fn tensions(&self, lambda: Vector2<f64>) -> Tensions {
        self.particular + self.kernel * lambda
    }
}

/// Result of one distribution step.
#[derive(Clone, Debug, PartialEq)]
pub struct TensionDistribution {
    pub split: KernelSplit,
    pub constraints: ConstraintSet,
    pub outcome: Result<(Polygon, Centroid, Tensions), Degenerate>,
}

impl TensionProblem {
    pub fn new(w: WrenchMatrix, tau_min: f64, tau_max: f64) -> Result<Self, TensionError> {
        if !(tau_min <= tau_max) {
            return Err(TensionError::InvalidLimits { tau_min, tau_max });
        }
        if w.iter().any(|v| !v.is_finite()) {
            return Err(TensionError::NonFinite);
        }
        Ok(Self { w, tau_min, tau_max })
    }

    /// Particular (minimum-norm) solution and kernel basis for `wrench`.
    pub fn split(&self, wrench: &Vector6<f64>) -> Result<KernelSplit, TensionError> {
        let kernel = self.kernel_basis()?;
        let wwt: Matrix6<f64> = self.w * self.w.transpose();
        let inv = wwt.try_inverse().ok_or(TensionError::Singular)?;
        let particular = self.w.transpose() * (inv * wrench);
        Ok(KernelSplit { particular, kernel })
    }

    /// Orthonormal basis of `ker W` from the two smallest eigenpairs of `WᵀW`.
    fn kernel_basis(&self) -> Result<KernelBasis, TensionError> {
        let wtw = self.w.transpose() * self.w;
        let eig = SymmetricEigen::new(wtw);
        let scale = eig.eigenvalues.amax().max(1.0);
        let mut idx: Vec<usize> = (0..N).collect();
        idx.sort_by(|&i, &j| {
            eig.eigenvalues[i]
                .partial_cmp(&eig.eigenvalues[j])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let null_dim = idx
            .iter()
            .filter(|&&i| eig.eigenvalues[i].abs() <= RANK_EPS * scale)
            .count();
        if null_dim != 2 {
            return Err(TensionError::KernelDimension(null_dim));
        }
        let c0 = eig.eigenvectors.column(idx[0]).into_owned();
        let c1 = eig.eigenvectors.column(idx[1]).into_owned();
        Ok(KernelBasis::from_columns(&[c0, c1]))
    }

    /// Bands on the kernel coordinates induced by the tension limits.
    pub fn constraints(&self, split: &KernelSplit) -> ConstraintSet {
        let mut cs = [Constraint::new(Vector2::zeros(), 0.0, 0.0); N];
        for (i, c) in cs.iter_mut().enumerate() {
            let h = Vector2::new(split.kernel[(i, 0)], split.kernel[(i, 1)]);
            let p = split.particular[i];
            *c = Constraint::new(h, self.tau_min - p, self.tau_max - p);
        }
        ConstraintSet::new(cs)
    }

    /// Full step: split, build bands, take the barycenter, map back to tensions.
    pub fn distribute(
        &self,
        wrench: &Vector6<f64>,
        cfg: GeomCfg,
    ) -> Result<TensionDistribution, TensionError> {
        let split = self.split(wrench)?;
        let constraints = self.constraints(&split);
        let outcome = barycenter(&constraints, cfg).map(|(polygon, centroid)| {
            let tau = split.tensions(centroid.point);
            (polygon, centroid, tau)
        });
        if let Err(d) = &outcome {
            tracing::info!(vertices = d.feasible_vertices(), "no feasible tension distribution");
        }
        Ok(TensionDistribution {
            split,
            constraints,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `W = [I₆ | M]`: kernel spanned by the columns of `[-M; I₂]`.
    fn block_wrench() -> WrenchMatrix {
        let m = SMatrix::<f64, 6, 2>::new(
            0.3, -0.2, //
            0.1, 0.4, //
            -0.5, 0.2, //
            0.2, 0.1, //
            0.0, -0.3, //
            0.4, 0.25,
        );
        let mut w = WrenchMatrix::zeros();
        w.fixed_view_mut::<6, 6>(0, 0).copy_from(&Matrix6::identity());
        w.fixed_view_mut::<6, 2>(0, 6).copy_from(&m);
        w
    }

    #[test]
    fn kernel_is_annihilated_and_orthonormal() {
        let prob = TensionProblem::new(block_wrench(), 0.0, 10.0).unwrap();
        let split = prob.split(&Vector6::new(1.0, -2.0, 0.5, 0.0, 3.0, 1.0)).unwrap();
        assert!((prob.w * split.kernel).norm() < 1e-9);
        let gram = split.kernel.transpose() * split.kernel;
        assert!((gram - nalgebra::Matrix2::identity()).norm() < 1e-9);
    }

    #[test]
    fn barycenter_tensions_reach_wrench_within_limits() {
        let prob = TensionProblem::new(block_wrench(), 1.0, 10.0).unwrap();
        // A wrench produced by mid-range tensions is feasible with margin.
        let tau0 = Tensions::from_element(5.0);
        let wrench = prob.w * tau0;
        let dist = prob.distribute(&wrench, GeomCfg::default()).unwrap();
        let (poly, cen, tau) = dist.outcome.expect("feasible");
        assert!(poly.len() >= 3);
        assert!(cen.area > 0.0);
        assert!((prob.w * tau - wrench).norm() < 1e-9);
        for t in tau.iter() {
            assert!(*t >= 1.0 - 1e-6 && *t <= 10.0 + 1e-6, "tension {t} out of limits");
        }
        // The centroid is inside every band it was computed from.
        assert!(dist.constraints.contains_eps(cen.point, 1e-6));
    }

    #[test]
    fn unreachable_wrench_is_degenerate() {
        let prob = TensionProblem::new(block_wrench(), 0.0, 1.0).unwrap();
        let wrench = Vector6::new(100.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let dist = prob.distribute(&wrench, GeomCfg::default()).unwrap();
        assert!(dist.outcome.is_err());
    }

    #[test]
    fn rejects_bad_problems() {
        assert_eq!(
            TensionProblem::new(block_wrench(), 2.0, 1.0),
            Err(TensionError::InvalidLimits {
                tau_min: 2.0,
                tau_max: 1.0
            })
        );
        let mut w = block_wrench();
        w[(0, 0)] = f64::NAN;
        assert_eq!(
            TensionProblem::new(w, 0.0, 1.0),
            Err(TensionError::NonFinite)
        );
        // Rank 5: row 5 duplicates row 4, kernel becomes 3-dimensional.
        let mut w = block_wrench();
        let r4 = w.row(4).into_owned();
        w.set_row(5, &r4);
        let prob = TensionProblem::new(w, 0.0, 1.0).unwrap();
        assert_eq!(
            prob.split(&Vector6::zeros()),
            Err(TensionError::KernelDimension(3))
        );
    }
}
