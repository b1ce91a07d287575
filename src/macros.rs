//! Utility macros.

/// Implements a binary operator for all four combinations of owned and
/// borrowed operands. The body receives both operands by reference.
///
/// Generic parameters go in the leading brackets, followed by an optional
/// bracketed where clause.
macro_rules! impl_binop {
    (
        $op:ident, $method:ident, [$($generics:tt)*] $(where [$($bounds:tt)*])?,
        $tl:ty, $tr:ty, $to:ty, |$lhs:ident, $rhs:ident| $body:block
    ) => {
        impl<'a, $($generics)*> ::std::ops::$op<&'a $tr> for &'a $tl
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for &$tl
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                ::std::ops::$op::$method(self, &rhs)
            }
        }

        impl<'a, $($generics)*> ::std::ops::$op<&'a $tr> for $tl
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                ::std::ops::$op::$method(&self, rhs)
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for $tl
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                ::std::ops::$op::$method(&self, &rhs)
            }
        }
    };
}

macro_rules! impl_unary_op {
    (
        $op:ident, $method:ident, [$($generics:tt)*] $(where [$($bounds:tt)*])?,
        $t:ty, $to:ty, |$this:ident| $body:block
    ) => {
        impl<$($generics)*> ::std::ops::$op for &$t
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                let $this = self;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op for $t
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                ::std::ops::$op::$method(&self)
            }
        }
    };
}

macro_rules! impl_binop_assign {
    (
        $op:ident, $method:ident, [$($generics:tt)*] $(where [$($bounds:tt)*])?,
        $tl:ty, $tr:ty, |$lhs:ident, $rhs:ident| $body:block
    ) => {
        impl<$($generics)*> ::std::ops::$op<&$tr> for $tl
        $(where $($bounds)*)?
        {
            #[inline]
            fn $method(&mut self, rhs: &$tr) {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for $tl
        $(where $($bounds)*)?
        {
            #[inline]
            fn $method(&mut self, rhs: $tr) {
                ::std::ops::$op::$method(self, &rhs);
            }
        }
    };
}

/// Implements the promoting `*` and `/` and the coercing `*=` and `/=` between
/// a container type generic over its scalar and each of the given primitive
/// scalar types, plus `scalar * container`.
///
/// The container must provide `promoted`, `promoted_as_rhs`, `scaled_by` and
/// `divided_by`.
macro_rules! impl_scalar_ops {
    ($container:ident => $($s:ty),+) => {
        $(
            impl_binop!(
                Mul, mul, [T: $crate::num::Scalar] where [T: $crate::promote::Promote<$s>],
                $container<T>, $s, $container<$crate::promote::Promoted<T, $s>>,
                |a, b| {
                    a.promoted::<$s>()
                        .scaled_by(<T as $crate::promote::Promote<$s>>::promote_rhs(*b))
                }
            );

            impl_binop!(
                Mul, mul, [T: $crate::num::Scalar] where [$s: $crate::promote::Promote<T>],
                $s, $container<T>, $container<$crate::promote::Promoted<$s, T>>,
                |a, b| {
                    b.promoted_as_rhs::<$s>()
                        .scaled_by(<$s as $crate::promote::Promote<T>>::promote(*a))
                }
            );

            impl_binop!(
                Div, div, [T: $crate::num::Scalar] where [T: $crate::promote::Promote<$s>],
                $container<T>, $s, $container<$crate::promote::Promoted<T, $s>>,
                |a, b| {
                    a.promoted::<$s>()
                        .divided_by(<T as $crate::promote::Promote<$s>>::promote_rhs(*b))
                }
            );

            impl_binop_assign!(
                MulAssign, mul_assign, [T: $crate::num::Scalar] where [$s: ::num_traits::AsPrimitive<T>],
                $container<T>, $s,
                |a, b| {
                    *a = a.scaled_by(::num_traits::AsPrimitive::<T>::as_(*b));
                }
            );

            impl_binop_assign!(
                DivAssign, div_assign, [T: $crate::num::Scalar] where [$s: ::num_traits::AsPrimitive<T>],
                $container<T>, $s,
                |a, b| {
                    *a = a.divided_by(::num_traits::AsPrimitive::<T>::as_(*b));
                }
            );
        )+
    };
}

/// Implements [`approx::AbsDiffEq`] for a container generic over its scalar,
/// with the scalar itself as epsilon type.
macro_rules! impl_abs_diff_eq {
    ([$($generics:tt)*], $t:ty, $eps:ty, |$arg1:ident, $arg2:ident, $arg3:ident| $body:block) => {
        impl<$($generics)*> ::approx::AbsDiffEq for $t {
            type Epsilon = $eps;

            fn default_epsilon() -> Self::Epsilon {
                <$eps as ::approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                $body
            }
        }
    };
}

/// Implements [`approx::RelativeEq`] for a container generic over its scalar.
macro_rules! impl_relative_eq {
    (
        [$($generics:tt)*], $t:ty, $eps:ty,
        |$arg1:ident, $arg2:ident, $arg3:ident, $arg4:ident| $body:block
    ) => {
        impl<$($generics)*> ::approx::RelativeEq for $t {
            fn default_max_relative() -> Self::Epsilon {
                <$eps as ::approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                let $arg4 = max_relative;
                $body
            }
        }
    };
}

/// Defines getters and mutable getters for named components that alias the
/// lanes of a vector.
macro_rules! impl_component_accessors {
    ($($index:literal => [$($name:ident, $name_mut:ident, $doc:literal);+]),+ $(,)?) => {
        $($(
            #[doc = concat!("The ", $doc, ".")]
            #[inline]
            pub fn $name(&self) -> T {
                self.as_array()[$index]
            }

            #[doc = concat!("A mutable reference to the ", $doc, ".")]
            #[inline]
            pub fn $name_mut(&mut self) -> &mut T {
                &mut self.as_array_mut()[$index]
            }
        )+)+
    };
}
