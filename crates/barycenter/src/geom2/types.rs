//! Basic 2D types and tolerances for two-sided half-space constraints.
//!
//! - `GeomCfg`: centralizes epsilons for determinant, feasibility, and area checks.
//! - `Constraint`: closed band `a <= h·x <= b` with helper predicates.
//! - `ConstraintSet`: exactly `N` constraints forming one snapshot.
//!
//! Code cross-refs: `enumerate::enumerate`, `assemble::assemble`, `feed::wire`

use nalgebra::Vector2;

/// Number of constraints in one snapshot (one per cable of the robot).
pub const N: usize = 8;

/// Upper bound on the number of vertices `enumerate` can return: `4·C(N,2)`.
pub const MAX_VERTICES: usize = 4 * N * (N - 1) / 2;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Pairs with `|det [h_i; h_j]| <= eps_det` are treated as parallel.
    pub eps_det: f64,
    /// Slack allowed on both sides of every band during feasibility filtering.
    pub eps_feas: f64,
    /// Polygons with `|area| <= eps_area` are degenerate.
    pub eps_area: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-12,
            eps_feas: 1e-6,
            eps_area: 1e-12,
        }
    }
}

impl GeomCfg {
    /// Same tolerances with a different feasibility slack.
    #[inline]
    pub fn with_eps_feas(self, eps_feas: f64) -> Self {
        Self { eps_feas, ..self }
    }
}

/// Closed band `a <= h · x <= b` (no normalization required here).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraint {
    pub h: Vector2<f64>,
    pub a: f64,
    pub b: f64,
}

impl Constraint {
    #[inline]
    pub fn new(h: Vector2<f64>, a: f64, b: f64) -> Self {
        Self { h, a, b }
    }
    #[inline]
    pub fn eval(&self, x: Vector2<f64>) -> f64 {
        self.h.dot(&x)
    }
    #[inline]
    pub fn satisfies_eps(&self, x: Vector2<f64>, eps: f64) -> bool {
        let s = self.eval(x);
        s >= self.a - eps && s <= self.b + eps
    }
    /// Both bounds, lower first; the order in which boundary lines are visited.
    #[inline]
    pub fn bounds(&self) -> [f64; 2] {
        [self.a, self.b]
    }
}

/// One complete snapshot of `N` constraints.
///
/// Invariants:
/// - Exactly `N` constraints (enforced by the array type).
/// - Input order is preserved; the algorithms treat pairs symmetrically.
/// - Immutable and `Copy`: consumers always work on their own copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstraintSet {
    cs: [Constraint; N],
}

impl ConstraintSet {
    #[inline]
    pub fn new(cs: [Constraint; N]) -> Self {
        Self { cs }
    }
    #[inline]
    pub fn constraints(&self) -> &[Constraint; N] {
        &self.cs
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.cs.iter()
    }
    /// Membership check with slack `eps` applied to every band.
    #[inline]
    pub fn contains_eps(&self, x: Vector2<f64>, eps: f64) -> bool {
        self.cs.iter().all(|c| c.satisfies_eps(x, eps))
    }
}

impl std::ops::Index<usize> for ConstraintSet {
    type Output = Constraint;
    #[inline]
    fn index(&self, i: usize) -> &Constraint {
        &self.cs[i]
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;
    fn into_iter(self) -> Self::IntoIter {
        self.cs.iter()
    }
}
