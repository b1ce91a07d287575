//! Generic access to the components of vectors of any dimension.

use crate::num::Scalar;
use approx::AbsDiffEq;
use num_traits::Float;

/// Number of machine epsilons a floating point component may deviate by,
/// relative to its magnitude, in [`components_approx_eq`].
pub const APPROX_EQ_EPSILONS: u32 = 8;

/// A vector with a fixed number of components of an arithmetic scalar type
/// that can be read by index.
///
/// Implemented by [`Vector2`](crate::Vector2), [`Vector3`](crate::Vector3)
/// and [`Vector4`](crate::Vector4), so generic code can treat all of them
/// uniformly.
pub trait VectorLike: Copy {
    /// The scalar type of the components.
    type Value: Scalar;

    /// The number of components.
    const DIMENSION: usize;

    /// Returns the component at the given index.
    ///
    /// # Panics
    /// If `index` is not smaller than [`Self::DIMENSION`](VectorLike::DIMENSION).
    fn component(&self, index: usize) -> Self::Value;
}

/// Whether all components of `a` and `b` are exactly equal.
pub fn components_eq<V: VectorLike>(a: &V, b: &V) -> bool {
    (0..V::DIMENSION).all(|i| a.component(i) == b.component(i))
}

/// Whether all components of `a` and `b` differ by at most `epsilon`.
pub fn components_abs_diff_eq<V: VectorLike>(a: &V, b: &V, epsilon: V::Value) -> bool {
    (0..V::DIMENSION).all(|i| a.component(i).abs_diff_eq(&b.component(i), epsilon))
}

/// Whether `a` and `b` are equal up to rounding.
///
/// Integer components must be exactly equal. Floating point components may
/// differ by [`APPROX_EQ_EPSILONS`] machine epsilons of their scalar type,
/// scaled by the larger of their magnitudes when that exceeds one.
pub fn components_approx_eq<V: VectorLike>(a: &V, b: &V) -> bool {
    if !<V::Value as Scalar>::IS_FLOAT {
        return components_eq(a, b);
    }
    let epsilon = V::Value::default_epsilon().to_real();
    (0..V::DIMENSION)
        .all(|i| reals_approx_eq(a.component(i).to_real(), b.component(i).to_real(), epsilon))
}

fn reals_approx_eq<F: Float>(a: F, b: F, epsilon: F) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(F::one());
    let tolerance = epsilon * F::from(APPROX_EQ_EPSILONS).unwrap_or_else(F::one) * scale;
    (a - b).abs() <= tolerance
}
