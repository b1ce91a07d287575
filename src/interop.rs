//! Conversions to and from the fixed-size types of [`nalgebra`].

use crate::{
    matrix::{Matrix2, Matrix3, Matrix4},
    num::Scalar,
    vector::{Vector2, Vector3, Vector4},
};

macro_rules! impl_nalgebra_conversions {
    ($vector:ident, $matrix:ident, $n:literal) => {
        impl<T: Scalar> From<$vector<T>> for nalgebra::SVector<T, $n> {
            fn from(vector: $vector<T>) -> Self {
                vector.to_array().into()
            }
        }

        impl<T: Scalar> From<nalgebra::SVector<T, $n>> for $vector<T> {
            fn from(vector: nalgebra::SVector<T, $n>) -> Self {
                Self::from_array(vector.into())
            }
        }

        impl<T: Scalar> From<$matrix<T>> for nalgebra::SMatrix<T, $n, $n> {
            fn from(matrix: $matrix<T>) -> Self {
                matrix.columns().map(|column| column.to_array()).into()
            }
        }

        impl<T: Scalar> From<nalgebra::SMatrix<T, $n, $n>> for $matrix<T> {
            fn from(matrix: nalgebra::SMatrix<T, $n, $n>) -> Self {
                let columns: [[T; $n]; $n] = matrix.into();
                Self::from_columns(columns.map($vector::from_array))
            }
        }
    };
}

impl_nalgebra_conversions!(Vector2, Matrix2, 2);
impl_nalgebra_conversions!(Vector3, Matrix3, 3);
impl_nalgebra_conversions!(Vector4, Matrix4, 4);
