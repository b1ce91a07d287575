//! Fixed-size generic vectors and matrices over primitive scalars, with
//! arithmetic between mixed scalar types and SIMD registers selected at
//! compile time.

#[macro_use]
mod macros;

#[cfg(feature = "nalgebra")]
pub mod interop;
pub mod matrix;
pub mod num;
pub mod promote;
pub mod simd;
pub mod vector;
pub mod vector_like;

pub use matrix::{Matrix2, Matrix3, Matrix4};
pub use num::{Float, Scalar};
pub use promote::{Promote, Promoted};
pub use vector::{Vector2, Vector3, Vector4};
pub use vector_like::VectorLike;

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Vec4 = Vector4<f32>;

pub type DVec2 = Vector2<f64>;
pub type DVec3 = Vector3<f64>;
pub type DVec4 = Vector4<f64>;

pub type IVec2 = Vector2<i32>;
pub type IVec3 = Vector3<i32>;
pub type IVec4 = Vector4<i32>;

pub type Mat2 = Matrix2<f32>;
pub type Mat3 = Matrix3<f32>;
pub type Mat4 = Matrix4<f32>;

pub type DMat2 = Matrix2<f64>;
pub type DMat3 = Matrix3<f64>;
pub type DMat4 = Matrix4<f64>;
