//! Core shared types.
//!
//! Point data is stored the way the estimators consume it: one row per point
//! in a dynamic `nalgebra` matrix, column 0 holding x and column 1 holding y.

use nalgebra::DMatrix;

use crate::error::{Error, Result};

/// Dynamic matrix of `f64`, one row per observation.
pub type DataMatrix = DMatrix<f64>;

/// Ordered set of 2-D points with index correspondence between x and y.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    data: DataMatrix,
}

impl PointSet {
    /// Build a point set from matching x and y slices.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        let n = xs.len();
        let data = DataMatrix::from_fn(n, 2, |r, c| if c == 0 { xs[r] } else { ys[r] });
        Ok(Self { data })
    }

    /// Wrap an existing N×2 matrix.
    pub fn from_matrix(data: DataMatrix) -> Result<Self> {
        if data.ncols() != 2 {
            return Err(Error::InvalidParameter(format!(
                "point matrix must have 2 columns, got {}",
                data.ncols()
            )));
        }
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn x(&self, i: usize) -> f64 {
        self.data[(i, 0)]
    }

    pub fn y(&self, i: usize) -> f64 {
        self.data[(i, 1)]
    }

    pub fn xs(&self) -> Vec<f64> {
        self.data.column(0).iter().copied().collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.data.column(1).iter().copied().collect()
    }

    /// Iterate over `(x, y)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (0..self.len()).map(move |i| (self.x(i), self.y(i)))
    }

    /// Underlying N×2 matrix.
    pub fn data(&self) -> &DataMatrix {
        &self.data
    }

    /// Smallest and largest x-value, `None` when empty.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let col = self.data.column(0);
        Some((col.min(), col.max()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_columns_keeps_index_correspondence() {
        let points = PointSet::from_columns(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points.x(1), 2.0);
        assert_eq!(points.y(1), 20.0);
        assert_eq!(points.iter().last(), Some((3.0, 30.0)));
        assert_eq!(points.x_bounds(), Some((1.0, 3.0)));
    }

    #[test]
    fn from_columns_rejects_length_mismatch() {
        let err = PointSet::from_columns(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { xs: 2, ys: 1 }));
    }

    #[test]
    fn from_matrix_requires_two_columns() {
        assert!(PointSet::from_matrix(DataMatrix::zeros(4, 3)).is_err());
        assert!(PointSet::from_matrix(DataMatrix::zeros(4, 2)).is_ok());
    }
}
