//! Matrices.

use crate::{
    num::{Scalar, det2},
    promote::{Promote, Promoted},
    vector::{Vector2, Vector3, Vector4},
};
use approx::RelativeEq;
use bytemuck::{Pod, Zeroable};
use num_traits::{AsPrimitive, Zero};
use std::ops::{Index, IndexMut};

/// A 2x2 matrix, stored as two column vectors.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2<T: Scalar> {
    columns: [Vector2<T>; 2],
}

/// A 3x3 matrix, stored as three column vectors.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3<T: Scalar> {
    columns: [Vector3<T>; 3],
}

/// A 4x4 matrix, stored as four column vectors.
///
/// Each column is a [`Vector4`], so matrix-vector and matrix-matrix products
/// run in the SIMD register bound to four lanes of `T`, if any.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4<T: Scalar> {
    columns: [Vector4<T>; 4],
}

/// Implements everything that is shared between the matrix types of
/// different dimensions.
macro_rules! impl_matrix {
    ($matrix:ident, $vector:ident, $n:literal) => {
        impl<T: Scalar> $matrix<T> {
            /// Creates an identity matrix.
            #[inline]
            pub fn identity() -> Self {
                Self::from_diagonal(&$vector::same(T::one()))
            }

            /// Creates a matrix with all zeros.
            #[inline]
            pub fn zeros() -> Self {
                Self::from_columns([$vector::zeros(); $n])
            }

            /// Creates a diagonal matrix with the given diagonal.
            #[inline]
            pub fn from_diagonal(diagonal: &$vector<T>) -> Self {
                let mut matrix = Self::zeros();
                for (i, &value) in diagonal.as_array().iter().enumerate() {
                    matrix.columns[i][i] = value;
                }
                matrix
            }

            /// Creates a matrix with the given columns.
            #[inline]
            pub const fn from_columns(columns: [$vector<T>; $n]) -> Self {
                Self { columns }
            }

            /// Creates a matrix with the given rows.
            #[inline]
            pub fn from_rows(rows: [$vector<T>; $n]) -> Self {
                Self::from_columns(std::array::from_fn(|j| {
                    $vector::from_array(std::array::from_fn(|i| rows[i][j]))
                }))
            }

            /// The columns of the matrix.
            #[inline]
            pub const fn columns(&self) -> &[$vector<T>; $n] {
                &self.columns
            }

            /// The column with index `j`.
            ///
            /// # Panics
            /// If `j` is outside the matrix.
            #[inline]
            pub fn column(&self, j: usize) -> &$vector<T> {
                &self.columns[j]
            }

            /// Replaces the column with index `j`.
            ///
            /// # Panics
            /// If `j` is outside the matrix.
            #[inline]
            pub fn set_column(&mut self, j: usize, column: $vector<T>) {
                self.columns[j] = column;
            }

            /// Returns the row with index `i` as a vector.
            ///
            /// # Panics
            /// If `i` is outside the matrix.
            #[inline]
            pub fn row(&self, i: usize) -> $vector<T> {
                $vector::from_array(self.columns.map(|column| column[i]))
            }

            /// Returns the element at row `i` and column `j`.
            ///
            /// # Panics
            /// If the indices are outside the matrix.
            #[inline]
            pub fn element(&self, i: usize, j: usize) -> T {
                self.columns[j][i]
            }

            /// Returns a mutable reference to the element at row `i` and column
            /// `j`.
            ///
            /// # Panics
            /// If the indices are outside the matrix.
            #[inline]
            pub fn element_mut(&mut self, i: usize, j: usize) -> &mut T {
                &mut self.columns[j][i]
            }

            /// Returns the diagonal of this matrix as a vector.
            #[inline]
            pub fn diagonal(&self) -> $vector<T> {
                $vector::from_array(std::array::from_fn(|i| self.columns[i][i]))
            }

            /// Computes the sum of the diagonal elements.
            #[inline]
            pub fn trace(&self) -> T {
                self.diagonal()
                    .as_array()
                    .iter()
                    .fold(T::zero(), |sum, &value| sum.add_wrapped(value))
            }

            /// Returns a matrix with the given closure applied to each element.
            #[inline]
            pub fn mapped(&self, mut f: impl FnMut(T) -> T) -> Self {
                Self::from_columns(self.columns.map(|column| column.mapped(&mut f)))
            }

            /// Converts the matrix to scalar type `S`, converting each element
            /// with `as` semantics.
            #[inline]
            pub fn cast<S: Scalar>(&self) -> $matrix<S>
            where
                T: AsPrimitive<S>,
            {
                $matrix::from_columns(self.columns.map(|column| column.cast::<S>()))
            }

            /// The elements in column-major order.
            #[inline]
            pub fn as_slice(&self) -> &[T] {
                bytemuck::cast_slice(self.columns.as_slice())
            }

            /// Returns the transpose of this matrix.
            #[inline]
            pub fn transpose(&self) -> Self {
                Self::from_rows(self.columns)
            }

            /// Returns the inverse of this matrix, or [`None`] if its determinant
            /// is exactly zero.
            #[inline]
            pub fn checked_inverse(&self) -> Option<$matrix<T::Real>> {
                if self.to_real().determinant().is_zero() {
                    None
                } else {
                    Some(self.inverse())
                }
            }

            /// Computes `self * vector` in the scalar type of the matrix, as a
            /// linear combination of the columns accumulated in column order.
            #[inline]
            pub(crate) fn mul_vector(&self, vector: &$vector<T>) -> $vector<T> {
                let mut result = self.columns[0].scaled_by(vector[0]);
                for (column, &factor) in self.columns.iter().zip(vector.as_array()).skip(1) {
                    result = result.sum_with(&column.scaled_by(factor));
                }
                result
            }

            /// Computes `vector * self`, with `vector` taken as a row vector.
            #[inline]
            pub(crate) fn left_mul_vector(&self, vector: &$vector<T>) -> $vector<T> {
                $vector::from_array(self.columns.map(|column| vector.dot_with(&column)))
            }

            #[inline]
            pub(crate) fn mul_matrix(&self, rhs: &Self) -> Self {
                Self::from_columns(rhs.columns.map(|column| self.mul_vector(&column)))
            }

            #[inline]
            pub(crate) fn to_real(&self) -> $matrix<T::Real> {
                $matrix::from_columns(self.columns.map(|column| column.to_real()))
            }

            #[inline]
            pub(crate) fn promoted<S>(&self) -> $matrix<Promoted<T, S>>
            where
                T: Promote<S>,
            {
                $matrix::from_columns(self.columns.map(|column| column.promoted::<S>()))
            }

            #[inline]
            pub(crate) fn promoted_as_rhs<L: Promote<T>>(&self) -> $matrix<Promoted<L, T>> {
                $matrix::from_columns(self.columns.map(|column| column.promoted_as_rhs::<L>()))
            }

            #[inline]
            pub(crate) fn sum_with(&self, other: &Self) -> Self {
                Self::from_columns(std::array::from_fn(|j| {
                    self.columns[j].sum_with(&other.columns[j])
                }))
            }

            #[inline]
            pub(crate) fn difference_with(&self, other: &Self) -> Self {
                Self::from_columns(std::array::from_fn(|j| {
                    self.columns[j].difference_with(&other.columns[j])
                }))
            }

            #[inline]
            pub(crate) fn scaled_by(&self, factor: T) -> Self {
                Self::from_columns(self.columns.map(|column| column.scaled_by(factor)))
            }

            #[inline]
            pub(crate) fn divided_by(&self, divisor: T) -> Self {
                Self::from_columns(self.columns.map(|column| column.divided_by(divisor)))
            }
        }

        impl<T: Scalar> Default for $matrix<T> {
            /// The identity matrix.
            fn default() -> Self {
                Self::identity()
            }
        }

        // SAFETY: The columns are `Pod` vectors whose sizes are multiples of
        // their alignment, so the array has no padding.
        unsafe impl<T: Scalar> Zeroable for $matrix<T> {}
        unsafe impl<T: Scalar> Pod for $matrix<T> {}

        /// Column access.
        impl<T: Scalar> Index<usize> for $matrix<T> {
            type Output = $vector<T>;

            #[inline]
            fn index(&self, j: usize) -> &Self::Output {
                &self.columns[j]
            }
        }

        impl<T: Scalar> IndexMut<usize> for $matrix<T> {
            #[inline]
            fn index_mut(&mut self, j: usize) -> &mut Self::Output {
                &mut self.columns[j]
            }
        }

        /// Element access by `(row, column)`.
        impl<T: Scalar> Index<(usize, usize)> for $matrix<T> {
            type Output = T;

            #[inline]
            fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
                &self.columns[j][i]
            }
        }

        impl<T: Scalar> IndexMut<(usize, usize)> for $matrix<T> {
            #[inline]
            fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
                &mut self.columns[j][i]
            }
        }

        impl_binop!(
            Add, add, [T: Scalar, S: Scalar] where [T: Promote<S>],
            $matrix<T>, $matrix<S>, $matrix<Promoted<T, S>>,
            |a, b| { a.promoted::<S>().sum_with(&b.promoted_as_rhs::<T>()) }
        );

        impl_binop!(
            Sub, sub, [T: Scalar, S: Scalar] where [T: Promote<S>],
            $matrix<T>, $matrix<S>, $matrix<Promoted<T, S>>,
            |a, b| { a.promoted::<S>().difference_with(&b.promoted_as_rhs::<T>()) }
        );

        impl_binop!(
            Mul, mul, [T: Scalar, S: Scalar] where [T: Promote<S>],
            $matrix<T>, $vector<S>, $vector<Promoted<T, S>>,
            |m, v| { m.promoted::<S>().mul_vector(&v.promoted_as_rhs::<T>()) }
        );

        impl_binop!(
            Mul, mul, [T: Scalar, S: Scalar] where [T: Promote<S>],
            $vector<T>, $matrix<S>, $vector<Promoted<T, S>>,
            |v, m| { m.promoted_as_rhs::<T>().left_mul_vector(&v.promoted::<S>()) }
        );

        impl_binop!(
            Mul, mul, [T: Scalar, S: Scalar] where [T: Promote<S>],
            $matrix<T>, $matrix<S>, $matrix<Promoted<T, S>>,
            |a, b| { a.promoted::<S>().mul_matrix(&b.promoted_as_rhs::<T>()) }
        );

        impl_binop_assign!(
            AddAssign, add_assign, [T: Scalar, S: Scalar] where [S: AsPrimitive<T>],
            $matrix<T>, $matrix<S>,
            |a, b| { *a = a.sum_with(&b.cast::<T>()); }
        );

        impl_binop_assign!(
            SubAssign, sub_assign, [T: Scalar, S: Scalar] where [S: AsPrimitive<T>],
            $matrix<T>, $matrix<S>,
            |a, b| { *a = a.difference_with(&b.cast::<T>()); }
        );

        // Computes the full product into a temporary before assigning.
        impl_binop_assign!(
            MulAssign, mul_assign, [T: Scalar, S: Scalar] where [S: AsPrimitive<T>],
            $matrix<T>, $matrix<S>,
            |a, b| { *a = a.mul_matrix(&b.cast::<T>()); }
        );

        impl_binop_assign!(
            MulAssign, mul_assign, [T: Scalar, S: Scalar] where [S: AsPrimitive<T>],
            $vector<T>, $matrix<S>,
            |v, m| { *v = m.cast::<T>().left_mul_vector(v); }
        );

        impl_unary_op!(
            Neg, neg, [T: Scalar + ::std::ops::Neg<Output = T>],
            $matrix<T>, $matrix<T>,
            |val| { val.mapped(|element| -element) }
        );

        impl_scalar_ops!($matrix => f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

        impl_abs_diff_eq!([T: Scalar], $matrix<T>, T, |a, b, epsilon| {
            a.columns
                .iter()
                .zip(&b.columns)
                .all(|(a, b)| ::approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
        });

        impl_relative_eq!([T: Scalar + RelativeEq], $matrix<T>, T, |a, b, epsilon, max_relative| {
            a.columns
                .iter()
                .zip(&b.columns)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
        });
    };
}

impl_matrix!(Matrix2, Vector2, 2);
impl_matrix!(Matrix3, Vector3, 3);
impl_matrix!(Matrix4, Vector4, 4);

impl<T: Scalar> Matrix2<T> {
    /// Creates a new matrix with the given elements, listed row by row.
    #[inline]
    pub fn new(m00: T, m01: T, m10: T, m11: T) -> Self {
        Self::from_rows([Vector2::new(m00, m01), Vector2::new(m10, m11)])
    }

    /// Computes the determinant `m00*m11 - m01*m10`.
    ///
    /// Integer determinants are computed with wrapping arithmetic, so the
    /// result is exact whenever it is representable in `T`, even if an
    /// intermediate product or difference is not.
    #[inline]
    pub fn determinant(&self) -> T {
        let [[m00, m10], [m01, m11]] = self.columns.map(|column| column.to_array());
        det2(m00, m01, m10, m11)
    }

    /// Computes the inverse of this matrix in the floating point type of the
    /// scalar.
    ///
    /// A singular matrix gives infinite or NaN elements. Use
    /// [`Self::checked_inverse`] to detect that case.
    #[inline]
    pub fn inverse(&self) -> Matrix2<T::Real> {
        let [[m00, m10], [m01, m11]] = self.to_real().columns.map(|column| column.to_array());
        let determinant = m00 * m11 - m01 * m10;
        Matrix2::new(m11, -m01, -m10, m00).divided_by(determinant)
    }
}

impl<T: Scalar> Matrix3<T> {
    /// Creates a new matrix with the given elements, listed row by row.
    #[inline]
    pub fn new(m00: T, m01: T, m02: T, m10: T, m11: T, m12: T, m20: T, m21: T, m22: T) -> Self {
        Self::from_rows([
            Vector3::new(m00, m01, m02),
            Vector3::new(m10, m11, m12),
            Vector3::new(m20, m21, m22),
        ])
    }

    /// Computes the determinant by cofactor expansion along the first row.
    ///
    /// Integer determinants are computed with wrapping arithmetic, so the
    /// result is exact whenever it is representable in `T`.
    #[inline]
    pub fn determinant(&self) -> T {
        let [[m00, m10, m20], [m01, m11, m21], [m02, m12, m22]] =
            self.columns.map(|column| column.to_array());

        m00.mul_wrapped(det2(m11, m12, m21, m22))
            .sub_wrapped(m01.mul_wrapped(det2(m10, m12, m20, m22)))
            .add_wrapped(m02.mul_wrapped(det2(m10, m11, m20, m21)))
    }

    /// Computes the inverse of this matrix in the floating point type of the
    /// scalar.
    ///
    /// A singular matrix gives infinite or NaN elements. Use
    /// [`Self::checked_inverse`] to detect that case.
    #[inline]
    pub fn inverse(&self) -> Matrix3<T::Real> {
        let [c0, c1, c2] = self.to_real().columns;

        // Each row of the adjugate is the cross product of the other two
        // columns, so its dot product with its own column is the determinant.
        let r0 = c1.cross_with(&c2);
        let r1 = c2.cross_with(&c0);
        let r2 = c0.cross_with(&c1);
        let determinant = c0.dot_with(&r0);

        Matrix3::from_rows([r0, r1, r2]).divided_by(determinant)
    }
}

/// The 2x2 minors of the upper two rows (`s`) and lower two rows (`c`) of a
/// 4x4 matrix, from which both the determinant and the adjugate follow.
struct Minors4<T> {
    s: [T; 6],
    c: [T; 6],
}

impl<T: Scalar> Minors4<T> {
    /// Column pairs of the minors, in storage order.
    const COLUMN_PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

    fn of(m: &[[T; 4]; 4]) -> Self {
        let minors_of_rows = |upper: usize, lower: usize| {
            Self::COLUMN_PAIRS
                .map(|(p, q)| det2(m[upper][p], m[upper][q], m[lower][p], m[lower][q]))
        };
        Self {
            s: minors_of_rows(0, 1),
            c: minors_of_rows(2, 3),
        }
    }

    fn determinant(&self) -> T {
        let Self { s, c } = self;
        s[0].mul_wrapped(c[5])
            .sub_wrapped(s[1].mul_wrapped(c[4]))
            .add_wrapped(s[2].mul_wrapped(c[3]))
            .add_wrapped(s[3].mul_wrapped(c[2]))
            .sub_wrapped(s[4].mul_wrapped(c[1]))
            .add_wrapped(s[5].mul_wrapped(c[0]))
    }
}

impl<T: Scalar> Matrix4<T> {
    /// Creates a new matrix with the given elements, listed row by row.
    #[inline]
    pub fn new(
        m00: T,
        m01: T,
        m02: T,
        m03: T,
        m10: T,
        m11: T,
        m12: T,
        m13: T,
        m20: T,
        m21: T,
        m22: T,
        m23: T,
        m30: T,
        m31: T,
        m32: T,
        m33: T,
    ) -> Self {
        Self::from_rows([
            Vector4::new(m00, m01, m02, m03),
            Vector4::new(m10, m11, m12, m13),
            Vector4::new(m20, m21, m22, m23),
            Vector4::new(m30, m31, m32, m33),
        ])
    }

    /// Computes the determinant by Laplace expansion along the upper two
    /// rows.
    ///
    /// Integer determinants are computed with wrapping arithmetic, so the
    /// result is exact whenever it is representable in `T`.
    #[inline]
    pub fn determinant(&self) -> T {
        Minors4::of(&self.rows_as_arrays()).determinant()
    }

    /// Computes the inverse of this matrix in the floating point type of the
    /// scalar.
    ///
    /// A singular matrix gives infinite or NaN elements. Use
    /// [`Self::checked_inverse`] to detect that case.
    pub fn inverse(&self) -> Matrix4<T::Real> {
        let m = self.to_real().rows_as_arrays();
        let minors = Minors4::of(&m);
        let Minors4 { s, c } = &minors;

        let adjugate = Matrix4::new(
            m[1][1] * c[5] - m[1][2] * c[4] + m[1][3] * c[3],
            -m[0][1] * c[5] + m[0][2] * c[4] - m[0][3] * c[3],
            m[3][1] * s[5] - m[3][2] * s[4] + m[3][3] * s[3],
            -m[2][1] * s[5] + m[2][2] * s[4] - m[2][3] * s[3],
            -m[1][0] * c[5] + m[1][2] * c[2] - m[1][3] * c[1],
            m[0][0] * c[5] - m[0][2] * c[2] + m[0][3] * c[1],
            -m[3][0] * s[5] + m[3][2] * s[2] - m[3][3] * s[1],
            m[2][0] * s[5] - m[2][2] * s[2] + m[2][3] * s[1],
            m[1][0] * c[4] - m[1][1] * c[2] + m[1][3] * c[0],
            -m[0][0] * c[4] + m[0][1] * c[2] - m[0][3] * c[0],
            m[3][0] * s[4] - m[3][1] * s[2] + m[3][3] * s[0],
            -m[2][0] * s[4] + m[2][1] * s[2] - m[2][3] * s[0],
            -m[1][0] * c[3] + m[1][1] * c[1] - m[1][2] * c[0],
            m[0][0] * c[3] - m[0][1] * c[1] + m[0][2] * c[0],
            -m[3][0] * s[3] + m[3][1] * s[1] - m[3][2] * s[0],
            m[2][0] * s[3] - m[2][1] * s[1] + m[2][2] * s[0],
        );

        adjugate.divided_by(minors.determinant())
    }

    fn rows_as_arrays(&self) -> [[T; 4]; 4] {
        std::array::from_fn(|i| self.row(i).to_array())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use crate::vector_like::components_approx_eq;
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;
    use std::any::TypeId;

    const EPSILON: f64 = 1e-12;

    fn type_of<T: 'static>(_value: &T) -> TypeId {
        TypeId::of::<T>()
    }

    fn to_nalgebra4(m: &Matrix4<f64>) -> nalgebra::Matrix4<f64> {
        nalgebra::Matrix4::from_column_slice(m.as_slice())
    }

    fn matrix3_example() -> Matrix3<f64> {
        Matrix3::new(2.0, -1.0, 0.0, 1.0, 3.0, 2.0, 0.0, 1.0, 4.0)
    }

    fn matrix4_example() -> Matrix4<f64> {
        Matrix4::new(
            4.0, 7.0, 2.0, 3.0, //
            0.0, 5.0, 0.0, 1.0, //
            1.0, 0.0, 6.0, 0.0, //
            2.0, 1.0, 0.0, 3.0,
        )
    }

    fn rotation_about_z(angle: f64) -> Matrix3<f64> {
        let (sin, cos) = angle.sin_cos();
        Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0)
    }

    prop_compose! {
        fn matrix2_strategy(max_element: f64)(
            elements in prop::array::uniform4(-max_element..max_element),
        ) -> Matrix2<f64> {
            let [m00, m01, m10, m11] = elements;
            Matrix2::new(m00, m01, m10, m11)
        }
    }

    prop_compose! {
        fn matrix3_strategy(max_element: f64)(
            elements in prop::array::uniform9(-max_element..max_element),
        ) -> Matrix3<f64> {
            let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = elements;
            Matrix3::new(m00, m01, m02, m10, m11, m12, m20, m21, m22)
        }
    }

    prop_compose! {
        fn matrix4_strategy(max_element: f64)(
            columns in prop::array::uniform4(prop::array::uniform4(-max_element..max_element)),
        ) -> Matrix4<f64> {
            Matrix4::from_columns(columns.map(Vector4::from_array))
        }
    }

    // === Construction and access ===

    #[test]
    fn default_matrices_are_identity() {
        assert_eq!(Matrix2::<f32>::default(), Matrix2::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Matrix3::<i32>::default(), Matrix3::identity());
        assert_eq!(
            Matrix4::<f64>::default(),
            Matrix4::from_diagonal(&Vector4::same(1.0))
        );
    }

    #[test]
    fn creating_matrix_from_row_major_elements_stores_columns() {
        let m = Matrix2::new(1_i32, 2, 3, 4);
        assert_eq!(m[0], Vector2::new(1, 3));
        assert_eq!(m[1], Vector2::new(2, 4));
        assert_eq!(m.as_slice(), &[1, 3, 2, 4]);
    }

    #[test]
    fn element_at_row_and_column_is_column_element_at_row() {
        let m = matrix3_example();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m[(i, j)], m[j][i]);
                assert_eq!(m.element(i, j), m.column(j)[i]);
                assert_eq!(m.row(i)[j], m[(i, j)]);
            }
        }
        assert_eq!(m[(1, 2)], 2.0);
        assert_eq!(m[(2, 1)], 1.0);
    }

    #[test]
    fn creating_matrix_from_columns_and_rows_works() {
        let a = Vector3::new(1_u8, 2, 3);
        let b = Vector3::new(4_u8, 5, 6);
        let c = Vector3::new(7_u8, 8, 9);
        let by_columns = Matrix3::from_columns([a, b, c]);
        let by_rows = Matrix3::from_rows([a, b, c]);
        assert_eq!(by_columns.columns(), &[a, b, c]);
        assert_eq!(by_rows.row(1), b);
        assert_eq!(by_rows, by_columns.transpose());
    }

    #[test]
    fn replacing_columns_and_elements_works() {
        let mut m = Matrix2::<f64>::zeros();
        m[1] = Vector2::new(5.0, 6.0);
        m.set_column(0, Vector2::new(1.0, 2.0));
        *m.element_mut(0, 1) = -5.0;
        m[(1, 0)] = -2.0;
        assert_eq!(m, Matrix2::new(1.0, -5.0, -2.0, 6.0));
    }

    #[test]
    #[should_panic]
    fn indexing_matrix_column_out_of_range_panics() {
        let m = Matrix2::<f32>::identity();
        let _column = m[2];
    }

    #[test]
    #[should_panic]
    fn indexing_matrix_element_out_of_range_panics() {
        let m = Matrix4::<i32>::identity();
        let _element = m[(4, 0)];
    }

    #[test]
    fn diagonal_and_trace_work() {
        let m = matrix4_example();
        assert_eq!(m.diagonal(), Vector4::new(4.0, 5.0, 6.0, 3.0));
        assert_eq!(m.trace(), 18.0);
    }

    #[test]
    fn mapping_and_casting_matrices_works() {
        let m = Matrix2::new(1.5_f64, -2.5, 3.25, 4.0);
        assert_eq!(m.mapped(|e| e * 2.0), Matrix2::new(3.0, -5.0, 6.5, 8.0));
        assert_eq!(m.cast::<i32>(), Matrix2::new(1, -2, 3, 4));
        assert_eq!(m.cast::<f32>().cast::<f64>(), m);
    }

    #[test]
    fn matrix_storage_has_no_padding() {
        assert_eq!(std::mem::size_of::<Matrix4<f32>>(), 64);
        assert_eq!(std::mem::size_of::<Matrix3<f64>>(), 72);
        assert_eq!(std::mem::size_of::<Matrix2<u8>>(), 4);
        assert_eq!(Matrix4::<f32>::identity().as_slice().len(), 16);
    }

    // === Arithmetic and promotion ===

    #[test]
    fn adding_and_subtracting_matrices_promotes() {
        let a = Matrix2::new(1_i32, 2, 3, 4);
        let b = Matrix2::new(0.5_f32, 0.5, 0.5, 0.5);
        let sum = a + b;
        assert_eq!(type_of(&sum), TypeId::of::<Matrix2<f32>>());
        assert_eq!(sum, Matrix2::new(1.5, 2.5, 3.5, 4.5));
        assert_eq!(&b - &a, Matrix2::new(-0.5, -1.5, -2.5, -3.5));
    }

    #[test]
    fn compound_matrix_assignment_coerces_right_operand() {
        let mut m = Matrix2::new(1_i32, 2, 3, 4);
        m += Matrix2::new(0.5_f64, 1.5, -0.5, 2.5);
        assert_eq!(m, Matrix2::new(1, 3, 3, 6));
        m -= Matrix2::<i64>::identity();
        assert_eq!(m, Matrix2::new(0, 3, 3, 5));
        m *= 2_u8;
        assert_eq!(m, Matrix2::new(0, 6, 6, 10));
        m /= 3.9_f32;
        assert_eq!(m, Matrix2::new(0, 2, 2, 3));
    }

    #[test]
    fn scaling_matrices_works_from_both_sides() {
        let m = Matrix3::<f32>::identity();
        let scaled = m * 2.0_f64;
        assert_eq!(type_of(&scaled), TypeId::of::<Matrix3<f64>>());
        assert_eq!(scaled, Matrix3::from_diagonal(&Vector3::same(2.0)));
        assert_eq!(2.0_f64 * m, scaled);
        assert_eq!(scaled / 2_i32, m.cast::<f64>());
        assert_eq!(-m, Matrix3::from_diagonal(&Vector3::same(-1.0)));
    }

    #[test]
    fn matrix_vector_product_combines_rows_with_vector() {
        let m = Matrix2::new(1_i32, 2, 3, 4);
        assert_eq!(m * Vector2::new(5_i32, 6), Vector2::new(17, 39));

        let product = matrix3_example() * Vector3::new(1_i32, 2, 3);
        assert_eq!(product, Vector3::new(0.0, 13.0, 14.0));
    }

    #[test]
    fn vector_matrix_product_treats_vector_as_row() {
        let m = Matrix2::new(1_i32, 2, 3, 4);
        let v = Vector2::new(5_i32, 6);
        assert_eq!(v * m, Vector2::new(23, 34));
        assert_eq!(v * m, m.transpose() * v);

        let mut v = v;
        v *= m;
        assert_eq!(v, Vector2::new(23, 34));

        let mut v = Vector2::new(1.0_f32, 1.0);
        v *= Matrix2::new(0.5_f64, 0.25, 0.125, 1.0);
        assert_eq!(v, Vector2::new(0.625_f32, 1.25));
    }

    #[test]
    fn identity_matrix_leaves_vectors_unchanged_from_both_sides() {
        let v = Vector4::new(1.5_f32, -2.0, 3.25, 1e7);
        let identity = Matrix4::<f32>::identity();
        assert_eq!(identity * v, v);
        assert_eq!(v * identity, v);

        let v = Vector3::new(7_i64, -8, 9);
        assert_eq!(Matrix3::<i64>::identity() * v, v);
        assert_eq!(v * Matrix3::<i64>::identity(), v);
    }

    #[test]
    fn matrix_product_works_and_is_not_commutative() {
        let a = Matrix2::new(1_i32, 2, 3, 4);
        let b = Matrix2::new(0_i32, 1, 1, 0);
        assert_eq!(a * b, Matrix2::new(2, 1, 4, 3));
        assert_eq!(b * a, Matrix2::new(3, 4, 1, 2));
        assert_ne!(a * b, b * a);
        assert_eq!(a * Matrix2::<i32>::identity(), a);
        assert_eq!(a * (a * 3_i32), (a * 3_i32) * a);
    }

    #[test]
    fn matrix_product_assignment_equals_product() {
        let a = matrix4_example();
        let b = matrix4_example().transpose();
        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);

        let mut m = Matrix2::new(1_i32, 1, 0, 1);
        m *= Matrix2::new(1.9_f64, 0.0, 0.0, 1.9);
        assert_eq!(m, Matrix2::new(1, 1, 0, 1));
    }

    // === Determinant ===

    #[test]
    fn determinant_of_identity_is_one() {
        assert_eq!(Matrix2::<i32>::identity().determinant(), 1);
        assert_eq!(Matrix3::<f32>::identity().determinant(), 1.0);
        assert_eq!(Matrix4::<f64>::identity().determinant(), 1.0);
    }

    #[test]
    fn determinants_of_example_matrices_are_correct() {
        assert_eq!(Matrix2::new(3_i32, 8, 4, 6).determinant(), -14);
        assert_eq!(matrix3_example().determinant(), 24.0);
        assert_eq!(Matrix3::new(6_i64, 1, 1, 4, -2, 5, 2, 8, 7).determinant(), -306);
        assert_abs_diff_eq!(matrix4_example().determinant(), 212.0, epsilon = EPSILON);
    }

    #[test]
    fn determinant_with_duplicate_or_proportional_row_is_zero() {
        assert_eq!(Matrix2::new(2_i32, 4, 1, 2).determinant(), 0);
        assert_eq!(Matrix3::new(1_i32, 2, 3, 4, 5, 6, 1, 2, 3).determinant(), 0);
        let m = Matrix4::from_columns([
            Vector4::new(1.0_f64, 2.0, 3.0, 4.0),
            Vector4::new(0.0, 1.0, 0.0, 1.0),
            Vector4::new(2.0, 4.0, 6.0, 8.0),
            Vector4::new(5.0, 3.0, 1.0, 2.0),
        ]);
        assert_eq!(m.determinant(), 0.0);
    }

    #[test]
    fn swapping_two_rows_flips_sign_of_determinant() {
        let m = matrix4_example();
        let rows = [m.row(1), m.row(0), m.row(2), m.row(3)];
        assert_abs_diff_eq!(
            Matrix4::from_rows(rows).determinant(),
            -m.determinant(),
            epsilon = EPSILON
        );
        let m = matrix3_example();
        let swapped = Matrix3::from_columns([m[2], m[1], m[0]]);
        assert_eq!(swapped.determinant(), -m.determinant());
    }

    #[test]
    fn scaling_matrix_scales_determinant_by_power_of_dimension() {
        let m = matrix3_example();
        assert_abs_diff_eq!((m * 2.0_f64).determinant(), 8.0 * m.determinant(), epsilon = EPSILON);
        let m = matrix4_example();
        assert_abs_diff_eq!((m * 2.0_f64).determinant(), 16.0 * m.determinant(), epsilon = 1e-9);
        let m = Matrix2::new(3_i32, 8, 4, 6);
        assert_eq!((m * 3_i32).determinant(), 9 * m.determinant());
    }

    #[test]
    fn determinants_of_unsigned_permutation_matrices_are_exact() {
        let m = Matrix3::new(0_u32, 1, 0, 0, 0, 1, 1, 0, 0);
        assert_eq!(m.determinant(), 1);
        assert_eq!(m.transpose().determinant(), 1);

        let m = Matrix4::new(
            0_u8, 1, 0, 0, //
            1, 0, 0, 0, //
            0, 0, 0, 1, //
            0, 0, 1, 0,
        );
        assert_eq!(m.determinant(), 1);
        assert_eq!(m.transpose().determinant(), 1);

        assert_eq!(Matrix2::new(0_u16, 1, 1, 0).determinant(), u16::MAX);
        assert_eq!(Matrix2::new(1_u16, 2, 3, 7).determinant(), 1);
    }

    #[test]
    fn integer_determinant_is_exact_when_intermediate_products_overflow() {
        assert_eq!(Matrix3::new(100_i8, 100, 0, 1, 2, 0, 0, 0, 1).determinant(), 100);
        assert_eq!(Matrix2::new(100_i8, 99, 101, 100).determinant(), 1);
    }

    // === Transpose and inverse ===

    #[test]
    fn transposing_identity_gives_identity() {
        assert_eq!(Matrix4::<f32>::identity().transpose(), Matrix4::identity());
    }

    #[test]
    fn transposing_twice_gives_original_matrix() {
        let m = matrix4_example();
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose()[(0, 1)], m[(1, 0)]);
    }

    #[test]
    fn multiplying_example_matrix2_by_its_inverse_gives_identity() {
        let m = Matrix2::new(1.0_f64, 2.0, 3.0, 1.0);
        let inverse = m.inverse();
        assert_abs_diff_eq!(m * inverse, Matrix2::identity(), epsilon = EPSILON);
        assert_abs_diff_eq!(inverse * m, Matrix2::identity(), epsilon = EPSILON);
    }

    #[test]
    fn inverse_of_example_integer_matrix2_is_exact() {
        let inverse = Matrix2::new(2_i32, 1, 5, 3).inverse();
        assert_eq!(type_of(&inverse), TypeId::of::<Matrix2<f64>>());
        assert_eq!(inverse, Matrix2::new(3.0, -1.0, -5.0, 2.0));
        assert_eq!(
            Matrix2::new(2.0_f32, 1.0, 5.0, 3.0).inverse(),
            Matrix2::new(3.0, -1.0, -5.0, 2.0)
        );
    }

    #[test]
    fn multiplying_matrix3_and_matrix4_by_inverse_gives_identity() {
        let m = matrix3_example();
        assert_abs_diff_eq!(m * m.inverse(), Matrix3::identity(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.inverse() * m, Matrix3::identity(), epsilon = EPSILON);

        let m = matrix4_example();
        assert_abs_diff_eq!(m * m.inverse(), Matrix4::identity(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.inverse() * m, Matrix4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn inverse_of_rotation_is_transpose() {
        let rotation = rotation_about_z(0.7);
        assert_abs_diff_eq!(rotation.inverse(), rotation.transpose(), epsilon = EPSILON);
    }

    #[test]
    fn inverting_singular_matrix_gives_non_finite_elements_in_every_dimension() {
        let is_non_finite = |elements: &[f64]| elements.iter().any(|e| !e.is_finite());
        assert!(is_non_finite(Matrix2::new(1_i32, 2, 2, 4).inverse().as_slice()));
        assert!(is_non_finite(
            Matrix3::new(1_i32, 2, 3, 4, 5, 6, 7, 8, 9).inverse().as_slice()
        ));
        assert!(is_non_finite(Matrix4::<f64>::zeros().inverse().as_slice()));
    }

    #[test]
    fn checked_inverse_detects_singular_matrices() {
        assert_eq!(Matrix2::new(1.0_f64, 2.0, 2.0, 4.0).checked_inverse(), None);
        assert_eq!(Matrix3::<f32>::zeros().checked_inverse(), None);
        assert_eq!(
            Matrix2::new(2_i32, 1, 5, 3).checked_inverse(),
            Some(Matrix2::new(3.0, -1.0, -5.0, 2.0))
        );
        assert!(matrix4_example().checked_inverse().is_some());
    }

    #[test]
    fn static_forms_match_member_forms() {
        let m = matrix4_example();
        assert_eq!(Matrix4::determinant(&m).to_bits(), m.determinant().to_bits());
        assert_eq!(Matrix4::transpose(&m), m.transpose());
        assert_eq!(Matrix4::inverse(&m), m.inverse());
    }

    #[test]
    fn inverse_columns_are_approximately_equal_to_nalgebra_inverse() {
        let m = matrix4_example();
        let expected = to_nalgebra4(&m).try_inverse().unwrap();
        let inverse = m.inverse();
        for j in 0..4 {
            let expected_column = Vector4::from_array(std::array::from_fn(|i| expected[(i, j)]));
            assert!(components_approx_eq(&inverse[j], &expected_column));
        }
    }

    // === Properties ===

    proptest! {
        #[test]
        fn determinant_of_product_is_product_of_determinants(
            a in matrix3_strategy(10.0),
            b in matrix3_strategy(10.0),
        ) {
            let expected = a.determinant() * b.determinant();
            prop_assert!(abs_diff_eq!(
                (a * b).determinant(),
                expected,
                epsilon = 1e-6 * (1.0 + expected.abs())
            ));
        }
    }

    proptest! {
        #[test]
        fn determinant_of_transpose_equals_determinant(m in matrix4_strategy(10.0)) {
            let determinant = m.determinant();
            prop_assert!(abs_diff_eq!(
                m.transpose().determinant(),
                determinant,
                epsilon = 1e-9 * (1.0 + determinant.abs())
            ));
        }
    }

    proptest! {
        #[test]
        fn determinant4_matches_nalgebra(m in matrix4_strategy(10.0)) {
            let expected = to_nalgebra4(&m).determinant();
            prop_assert!(abs_diff_eq!(
                m.determinant(),
                expected,
                epsilon = 1e-8 * (1.0 + expected.abs())
            ));
        }
    }

    proptest! {
        #[test]
        fn unsigned_determinant3_wraps_to_exact_value(
            rows in prop::array::uniform3(prop::array::uniform3(0_u32..10)),
        ) {
            let m = Matrix3::from_rows(rows.map(Vector3::from_array));
            let exact = m.to_real().determinant() as i64;
            prop_assert_eq!(m.determinant(), exact as u32);
            prop_assert_eq!(m.transpose().determinant(), m.determinant());
        }
    }

    proptest! {
        #[test]
        fn unsigned_determinant4_wraps_to_exact_value(
            rows in prop::array::uniform4(prop::array::uniform4(0_u32..10)),
        ) {
            let m = Matrix4::from_rows(rows.map(Vector4::from_array));
            let exact = m.to_real().determinant() as i64;
            prop_assert_eq!(m.determinant(), exact as u32);
            prop_assert_eq!(m.transpose().determinant(), m.determinant());
        }
    }

    proptest! {
        #[test]
        fn multiplying_by_inverse_gives_identity(m in matrix4_strategy(10.0)) {
            prop_assume!(m.determinant().abs() > 1.0);
            let tolerance = 1e-8 * m.inverse().as_slice().iter().fold(1.0_f64, |max, e| max.max(e.abs()));
            prop_assert!(abs_diff_eq!(m * m.inverse(), Matrix4::identity(), epsilon = tolerance));
            prop_assert!(abs_diff_eq!(m.inverse() * m, Matrix4::identity(), epsilon = tolerance));
        }
    }

    proptest! {
        #[test]
        fn matrix2_inverse_times_matrix_gives_identity(m in matrix2_strategy(10.0)) {
            prop_assume!(m.determinant().abs() > 1e-2);
            let tolerance = 1e-10 * m.inverse().as_slice().iter().fold(1.0_f64, |max, e| max.max(e.abs()));
            prop_assert!(abs_diff_eq!(m.inverse() * m, Matrix2::identity(), epsilon = tolerance * 10.0));
        }
    }

    proptest! {
        #[test]
        fn matrix_product_is_associative(
            a in matrix3_strategy(10.0),
            b in matrix3_strategy(10.0),
            c in matrix3_strategy(10.0),
        ) {
            prop_assert!(abs_diff_eq!((a * b) * c, a * (b * c), epsilon = 1e-9));
        }
    }

    proptest! {
        #[test]
        fn identity_leaves_matrices_unchanged(m in matrix4_strategy(1e3)) {
            prop_assert_eq!(Matrix4::<f64>::identity() * m, m);
            prop_assert_eq!(m * Matrix4::<f64>::identity(), m);
        }
    }
}
