//! Vectors.

use crate::{
    num::{Scalar, det2},
    promote::{Promote, Promoted},
    simd::{LaneStorage, Lanes},
    vector_like::VectorLike,
};
use bytemuck::{Pod, Zeroable};
use core::fmt;
use num_traits::{AsPrimitive, Float};
use std::ops::{Index, IndexMut};

/// A 2-dimensional vector.
///
/// The components are available as `x`/`y`, as the color channels `r`/`g`,
/// as the texture coordinates `s`/`t` and by index. All of these name the
/// same storage, so a write through one is seen through the others.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct Vector2<T: Scalar> {
    lanes: <T as Lanes<2>>::Storage,
}

/// A 3-dimensional vector.
///
/// The components are available as `x`/`y`/`z`, as the color channels
/// `r`/`g`/`b`, as the texture coordinates `s`/`t`/`p` and by index. All of
/// these name the same storage.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct Vector3<T: Scalar> {
    lanes: <T as Lanes<3>>::Storage,
}

/// A 4-dimensional vector.
///
/// The components are available as `x`/`y`/`z`/`w`, as the color channels
/// `r`/`g`/`b`/`a`, as the texture coordinates `s`/`t`/`p`/`q` and by index.
/// All of these name the same storage.
///
/// When the target has a SIMD register for four lanes of `T` (see
/// [`Lanes`]), the storage is aligned for that register and elementwise
/// arithmetic runs in it.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct Vector4<T: Scalar> {
    lanes: <T as Lanes<4>>::Storage,
}

type Storage<T, const N: usize> = <T as Lanes<N>>::Storage;

/// Implements everything that is shared between the vector types of
/// different dimensions.
macro_rules! impl_vector {
    ($vector:ident, $n:literal, [$($component:ident),+]) => {
        impl<T: Scalar> $vector<T> {
            /// The number of components.
            pub const DIMENSION: usize = $n;

            /// The alignment of the component storage in bytes, which exceeds
            /// the alignment of `T` when the lanes are bound to a SIMD register.
            pub const ALIGNMENT: usize = <T as Lanes<$n>>::ALIGNMENT;

            /// Creates a new vector with all zeros.
            #[inline]
            pub fn zeros() -> Self {
                Self::same(T::zero())
            }

            /// Creates a new vector with the same value for all components.
            #[inline]
            pub fn same(value: T) -> Self {
                Self::from_array([value; $n])
            }

            /// Creates a new vector with the given components.
            #[inline]
            pub fn from_array(components: [T; $n]) -> Self {
                Self::from_lanes(<Storage<T, $n> as LaneStorage<T, $n>>::from_array(components))
            }

            /// Returns the components as an array.
            #[inline]
            pub fn to_array(&self) -> [T; $n] {
                *self.as_array()
            }

            /// The components as an array.
            #[inline]
            pub fn as_array(&self) -> &[T; $n] {
                self.lanes.as_array()
            }

            /// The components as a mutable array.
            #[inline]
            pub fn as_array_mut(&mut self) -> &mut [T; $n] {
                self.lanes.as_array_mut()
            }

            /// The components as a slice.
            #[inline]
            pub fn as_slice(&self) -> &[T] {
                self.as_array()
            }

            /// Converts the vector to scalar type `S`, converting each component
            /// with `as` semantics. Widening conversions are lossless, narrowing
            /// ones round or truncate.
            #[inline]
            pub fn cast<S: Scalar>(&self) -> $vector<S>
            where
                T: AsPrimitive<S>,
            {
                $vector::from_array(self.to_array().map(|component| component.as_()))
            }

            /// Returns a vector with the given closure applied to each component.
            #[inline]
            pub fn mapped(&self, f: impl FnMut(T) -> T) -> Self {
                Self::from_array(self.to_array().map(f))
            }

            /// Multiplies each component by the corresponding component in
            /// another vector.
            #[inline]
            pub fn component_mul(&self, other: &Self) -> Self {
                Self::from_lanes(<T as Lanes<$n>>::mul_lanes(&self.lanes, &other.lanes))
            }

            /// Computes the dot product of this vector with another, in the
            /// common scalar type of the two.
            #[inline]
            pub fn dot<S: Scalar>(&self, other: &$vector<S>) -> Promoted<T, S>
            where
                T: Promote<S>,
            {
                self.promoted::<S>().dot_with(&other.promoted_as_rhs::<T>())
            }

            /// Computes the square of the magnitude (length) of the vector.
            #[inline]
            pub fn mag_squared(&self) -> T {
                self.dot_with(self)
            }

            /// Computes the magnitude (length) of the vector. The result is
            /// floating point also for integer vectors.
            #[inline]
            pub fn mag(&self) -> T::Real {
                let real = self.to_real();
                real.dot_with(&real).sqrt()
            }

            /// Computes the normalized version of the vector.
            ///
            /// Normalizing the zero vector gives NaN components.
            #[inline]
            pub fn normalize(&self) -> $vector<T::Real> {
                let real = self.to_real();
                real.scaled_by(real.dot_with(&real).sqrt().recip())
            }

            /// Computes the projection of this vector onto `onto`, which is the
            /// component of this vector parallel to `onto`.
            ///
            /// If `onto_normalized` is `true`, `onto` is assumed to be of unit
            /// length and the division by its squared magnitude is skipped. The
            /// result is wrong if it is not.
            #[inline]
            pub fn project<S: Scalar>(
                &self,
                onto: &$vector<S>,
                onto_normalized: bool,
            ) -> $vector<Promoted<T, S>>
            where
                T: Promote<S>,
            {
                self.promoted::<S>()
                    .projected_onto(&onto.promoted_as_rhs::<T>(), onto_normalized)
            }

            /// Computes the rejection of this vector from `onto`, which is the
            /// component of this vector orthogonal to `onto`. The projection and
            /// the rejection sum to this vector.
            ///
            /// See [`Self::project`] for the meaning of `onto_normalized`.
            #[inline]
            pub fn reject<S: Scalar>(
                &self,
                onto: &$vector<S>,
                onto_normalized: bool,
            ) -> $vector<Promoted<T, S>>
            where
                T: Promote<S>,
            {
                let this = self.promoted::<S>();
                this.difference_with(
                    &this.projected_onto(&onto.promoted_as_rhs::<T>(), onto_normalized),
                )
            }

            fn projected_onto(&self, onto: &Self, onto_normalized: bool) -> Self {
                let along = self.dot_with(onto);
                if onto_normalized {
                    onto.scaled_by(along)
                } else {
                    onto.scaled_by(along / onto.dot_with(onto))
                }
            }

            #[inline]
            pub(crate) fn to_real(&self) -> $vector<T::Real> {
                $vector::from_array(self.to_array().map(Scalar::to_real))
            }

            /// Converts the components of the left operand of a mixed-type
            /// operation with `S` to the common type.
            #[inline]
            pub(crate) fn promoted<S>(&self) -> $vector<Promoted<T, S>>
            where
                T: Promote<S>,
            {
                $vector::from_array(self.to_array().map(<T as Promote<S>>::promote))
            }

            /// Converts the components of the right operand of a mixed-type
            /// operation with `L` to the common type.
            #[inline]
            pub(crate) fn promoted_as_rhs<L: Promote<T>>(&self) -> $vector<Promoted<L, T>> {
                $vector::from_array(self.to_array().map(<L as Promote<T>>::promote_rhs))
            }

            #[inline]
            pub(crate) const fn from_lanes(lanes: Storage<T, $n>) -> Self {
                Self { lanes }
            }

            #[inline]
            pub(crate) fn sum_with(&self, other: &Self) -> Self {
                Self::from_lanes(<T as Lanes<$n>>::add_lanes(&self.lanes, &other.lanes))
            }

            #[inline]
            pub(crate) fn difference_with(&self, other: &Self) -> Self {
                Self::from_lanes(<T as Lanes<$n>>::sub_lanes(&self.lanes, &other.lanes))
            }

            #[inline]
            pub(crate) fn scaled_by(&self, factor: T) -> Self {
                Self::from_lanes(<T as Lanes<$n>>::scale_lanes(&self.lanes, factor))
            }

            /// # Panics
            /// For integer scalars, if `divisor` is zero.
            #[inline]
            pub(crate) fn divided_by(&self, divisor: T) -> Self {
                Self::from_lanes(<T as Lanes<$n>>::div_lanes(&self.lanes, divisor))
            }

            /// Lanewise products summed in index order, which keeps the result
            /// independent of whether the lanes are bound to a register.
            #[inline]
            pub(crate) fn dot_with(&self, other: &Self) -> T {
                let products = <T as Lanes<$n>>::mul_lanes(&self.lanes, &other.lanes);
                products
                    .as_array()
                    .iter()
                    .fold(T::zero(), |sum, &product| sum.add_wrapped(product))
            }
        }

        impl<T: Scalar> Default for $vector<T> {
            /// The zero vector.
            fn default() -> Self {
                Self::zeros()
            }
        }

        impl<T: Scalar> PartialEq for $vector<T> {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.as_array() == other.as_array()
            }
        }

        impl<T: Scalar> fmt::Debug for $vector<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let [$($component),+] = self.to_array();
                f.debug_struct(stringify!($vector))
                    $(.field(stringify!($component), &$component))+
                    .finish()
            }
        }

        // SAFETY: The lane storage is a `T` array, possibly wrapped in an
        // alignment wrapper whose size is asserted to equal that of the array,
        // so it has no padding and every bit pattern of the `T`s is valid.
        unsafe impl<T: Scalar> Zeroable for $vector<T> {}
        unsafe impl<T: Scalar> Pod for $vector<T> {}

        impl<T: Scalar> From<[T; $n]> for $vector<T> {
            #[inline]
            fn from(components: [T; $n]) -> Self {
                Self::from_array(components)
            }
        }

        impl<T: Scalar> From<$vector<T>> for [T; $n] {
            #[inline]
            fn from(vector: $vector<T>) -> Self {
                vector.to_array()
            }
        }

        /// # Panics
        /// If `index` is not smaller than the dimension.
        impl<T: Scalar> Index<usize> for $vector<T> {
            type Output = T;

            #[inline]
            fn index(&self, index: usize) -> &Self::Output {
                &self.as_array()[index]
            }
        }

        impl<T: Scalar> IndexMut<usize> for $vector<T> {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut self.as_array_mut()[index]
            }
        }

        impl<T: Scalar> VectorLike for $vector<T> {
            type Value = T;

            const DIMENSION: usize = $n;

            #[inline]
            fn component(&self, index: usize) -> T {
                self[index]
            }
        }

        impl_binop!(
            Add, add, [T: Scalar, S: Scalar] where [T: Promote<S>],
            $vector<T>, $vector<S>, $vector<Promoted<T, S>>,
            |a, b| { a.promoted::<S>().sum_with(&b.promoted_as_rhs::<T>()) }
        );

        impl_binop!(
            Sub, sub, [T: Scalar, S: Scalar] where [T: Promote<S>],
            $vector<T>, $vector<S>, $vector<Promoted<T, S>>,
            |a, b| { a.promoted::<S>().difference_with(&b.promoted_as_rhs::<T>()) }
        );

        impl_binop_assign!(
            AddAssign, add_assign, [T: Scalar, S: Scalar] where [S: AsPrimitive<T>],
            $vector<T>, $vector<S>,
            |a, b| { *a = a.sum_with(&b.cast::<T>()); }
        );

        impl_binop_assign!(
            SubAssign, sub_assign, [T: Scalar, S: Scalar] where [S: AsPrimitive<T>],
            $vector<T>, $vector<S>,
            |a, b| { *a = a.difference_with(&b.cast::<T>()); }
        );

        impl_unary_op!(
            Neg, neg, [T: Scalar + ::std::ops::Neg<Output = T>],
            $vector<T>, $vector<T>,
            |val| { val.mapped(|component| -component) }
        );

        impl_scalar_ops!($vector => f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

        impl_abs_diff_eq!([T: Scalar], $vector<T>, T, |a, b, epsilon| {
            a.as_array()
                .iter()
                .zip(b.as_array())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
        });

        impl_relative_eq!([T: Scalar + approx::RelativeEq], $vector<T>, T, |a, b, epsilon, max_relative| {
            a.as_array()
                .iter()
                .zip(b.as_array())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
        });
    };
}

impl_vector!(Vector2, 2, [x, y]);
impl_vector!(Vector3, 3, [x, y, z]);
impl_vector!(Vector4, 4, [x, y, z, w]);

impl<T: Scalar> Vector2<T> {
    /// Creates a new vector with the given components.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self::from_array([x, y])
    }

    /// Creates a new vector from components of any arithmetic types, each
    /// converted to `T` with `as` semantics.
    #[inline]
    pub fn from_coerced(x: impl AsPrimitive<T>, y: impl AsPrimitive<T>) -> Self {
        Self::new(x.as_(), y.as_())
    }

    /// Creates a unit vector along the x-axis.
    #[inline]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero())
    }

    /// Creates a unit vector along the y-axis.
    #[inline]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one())
    }

    impl_component_accessors!(
        0 => [x, x_mut, "x-component"; r, r_mut, "red channel"; s, s_mut, "s-coordinate"],
        1 => [y, y_mut, "y-component"; g, g_mut, "green channel"; t, t_mut, "t-coordinate"],
    );

    /// Converts the vector to 3D by appending the given z-component.
    #[inline]
    pub fn extended(&self, z: T) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), z)
    }

    /// Computes the scalar cross product `x1*y2 - y1*x2`, which is the
    /// z-component of the cross product of the two vectors embedded in the
    /// xy-plane. It is zero for parallel vectors and changes sign when the
    /// operands are swapped.
    #[inline]
    pub fn cross<S: Scalar>(&self, other: &Vector2<S>) -> Promoted<T, S>
    where
        T: Promote<S>,
    {
        let [x1, y1] = self.promoted::<S>().to_array();
        let [x2, y2] = other.promoted_as_rhs::<T>().to_array();
        det2(x1, y1, x2, y2)
    }
}

impl<T: Scalar> Vector3<T> {
    /// Creates a new vector with the given components.
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self::from_array([x, y, z])
    }

    /// Creates a new vector from components of any arithmetic types, each
    /// converted to `T` with `as` semantics.
    #[inline]
    pub fn from_coerced(
        x: impl AsPrimitive<T>,
        y: impl AsPrimitive<T>,
        z: impl AsPrimitive<T>,
    ) -> Self {
        Self::new(x.as_(), y.as_(), z.as_())
    }

    /// Creates a new vector from a 2D vector of any scalar type, converted
    /// with `as` semantics, and a z-component.
    #[inline]
    pub fn from_vector2<S: Scalar + AsPrimitive<T>>(xy: &Vector2<S>, z: T) -> Self {
        xy.cast::<T>().extended(z)
    }

    /// Creates a unit vector along the x-axis.
    #[inline]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }

    /// Creates a unit vector along the y-axis.
    #[inline]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one(), T::zero())
    }

    /// Creates a unit vector along the z-axis.
    #[inline]
    pub fn unit_z() -> Self {
        Self::new(T::zero(), T::zero(), T::one())
    }

    impl_component_accessors!(
        0 => [x, x_mut, "x-component"; r, r_mut, "red channel"; s, s_mut, "s-coordinate"],
        1 => [y, y_mut, "y-component"; g, g_mut, "green channel"; t, t_mut, "t-coordinate"],
        2 => [z, z_mut, "z-component"; b, b_mut, "blue channel"; p, p_mut, "p-coordinate"],
    );

    /// The x- and y-components as a 2D vector.
    #[inline]
    pub fn xy(&self) -> Vector2<T> {
        Vector2::new(self.x(), self.y())
    }

    /// Converts the vector to 4D by appending the given w-component.
    #[inline]
    pub fn extended(&self, w: T) -> Vector4<T> {
        Vector4::new(self.x(), self.y(), self.z(), w)
    }

    /// Computes the cross product of this vector with another, in the common
    /// scalar type of the two. The result is perpendicular to both operands
    /// and changes sign when the operands are swapped.
    #[inline]
    pub fn cross<S: Scalar>(&self, other: &Vector3<S>) -> Vector3<Promoted<T, S>>
    where
        T: Promote<S>,
    {
        self.promoted::<S>().cross_with(&other.promoted_as_rhs::<T>())
    }

    pub(crate) fn cross_with(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.to_array();
        let [bx, by, bz] = other.to_array();
        Self::new(
            det2(ay, az, by, bz),
            det2(az, ax, bz, bx),
            det2(ax, ay, bx, by),
        )
    }
}

impl<T: Scalar> Vector4<T> {
    /// Creates a new vector with the given components.
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self::from_array([x, y, z, w])
    }

    /// Creates a new vector from components of any arithmetic types, each
    /// converted to `T` with `as` semantics.
    #[inline]
    pub fn from_coerced(
        x: impl AsPrimitive<T>,
        y: impl AsPrimitive<T>,
        z: impl AsPrimitive<T>,
        w: impl AsPrimitive<T>,
    ) -> Self {
        Self::new(x.as_(), y.as_(), z.as_(), w.as_())
    }

    /// Creates a new vector from a 3D vector of any scalar type, converted
    /// with `as` semantics, and a w-component.
    #[inline]
    pub fn from_vector3<S: Scalar + AsPrimitive<T>>(xyz: &Vector3<S>, w: T) -> Self {
        xyz.cast::<T>().extended(w)
    }

    /// Creates a new vector from a 2D vector of any scalar type, converted
    /// with `as` semantics, and z- and w-components.
    #[inline]
    pub fn from_vector2<S: Scalar + AsPrimitive<T>>(xy: &Vector2<S>, z: T, w: T) -> Self {
        xy.cast::<T>().extended(z).extended(w)
    }

    /// Concatenates two 2D vectors of any scalar types, converted with `as`
    /// semantics.
    #[inline]
    pub fn from_vector2_pair<S, R>(xy: &Vector2<S>, zw: &Vector2<R>) -> Self
    where
        S: Scalar + AsPrimitive<T>,
        R: Scalar + AsPrimitive<T>,
    {
        let [x, y] = xy.cast::<T>().to_array();
        let [z, w] = zw.cast::<T>().to_array();
        Self::new(x, y, z, w)
    }

    /// Creates a unit vector along the x-axis.
    #[inline]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Creates a unit vector along the y-axis.
    #[inline]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one(), T::zero(), T::zero())
    }

    /// Creates a unit vector along the z-axis.
    #[inline]
    pub fn unit_z() -> Self {
        Self::new(T::zero(), T::zero(), T::one(), T::zero())
    }

    /// Creates a unit vector along the w-axis.
    #[inline]
    pub fn unit_w() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    impl_component_accessors!(
        0 => [x, x_mut, "x-component"; r, r_mut, "red channel"; s, s_mut, "s-coordinate"],
        1 => [y, y_mut, "y-component"; g, g_mut, "green channel"; t, t_mut, "t-coordinate"],
        2 => [z, z_mut, "z-component"; b, b_mut, "blue channel"; p, p_mut, "p-coordinate"],
        3 => [w, w_mut, "w-component"; a, a_mut, "alpha channel"; q, q_mut, "q-coordinate"],
    );

    /// The x- and y-components as a 2D vector.
    #[inline]
    pub fn xy(&self) -> Vector2<T> {
        Vector2::new(self.x(), self.y())
    }

    /// The x-, y- and z-components as a 3D vector.
    #[inline]
    pub fn xyz(&self) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), self.z())
    }
}
