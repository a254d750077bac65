use super::{Matrix, Vector};
use crate::prelude::*;
use std::ops::{AddAssign, Mul};

pub trait Dot<I> {
    type Output;
    fn dot(self, rhs: I) -> Result<Self::Output>;
}

pub trait Transpose: Sized {
    fn transpose(&self) -> Result<Self>;
}

impl<T: Clone> Transpose for Matrix<T> {
    fn transpose(&self) -> Result<Self> {
        let (rows, cols) = self.shape()?;
        let mut data = Vec::with_capacity(rows * cols);

        for col in 0..cols {
            for row in 0..rows {
                data.push(self[(row, col)].clone());
            }
        }

        Ok(Matrix {
            data,
            dim: (cols, rows),
        })
    }
}

/// Matrix product.
impl<'a, T> Dot<&Matrix<T>> for &'a Matrix<T>
where
    T: Mul<Output = T> + Default + AddAssign + Copy,
{
    type Output = Matrix<T>;
    fn dot(self, rhs: &Matrix<T>) -> Result<Self::Output> {
        let (rows, inner) = self.shape()?;
        let (rhs_rows, rhs_cols) = rhs.shape()?;
        if inner != rhs_rows {
            return Err(Error::ShapeMismatch {
                expected: inner,
                actual: rhs_rows,
            });
        }

        let mut data = Vec::with_capacity(rows * rhs_cols);

        for lhs_row in 0..rows {
            for rhs_col in 0..rhs_cols {
                let mut sum = T::default();
                for n in 0..inner {
                    sum += self[(lhs_row, n)] * rhs[(n, rhs_col)]
                }
                data.push(sum);
            }
        }

        Ok(Matrix {
            data,
            dim: (rows, rhs_cols),
        })
    }
}

/// Row vector times matrix: `result[j] = sum_i self[i] * rhs[(i, j)]`.
impl<'a, T> Dot<&Matrix<T>> for &'a Vector<T>
where
    T: Mul<Output = T> + Default + AddAssign + Copy,
{
    type Output = Vector<T>;
    fn dot(self, rhs: &Matrix<T>) -> Result<Self::Output> {
        let (rows, cols) = rhs.shape()?;
        if self.len() != rows {
            return Err(Error::ShapeMismatch {
                expected: rows,
                actual: self.len(),
            });
        }

        let mut data = vec![T::default(); cols];
        for (i, &x) in self.iter().enumerate() {
            for (j, sum) in data.iter_mut().enumerate() {
                *sum += x * rhs[(i, j)];
            }
        }

        Ok(Vector::from_vec(data))
    }
}

/// Inner product.
impl<'a, T> Dot<&Vector<T>> for &'a Vector<T>
where
    T: Mul<Output = T> + Default + AddAssign + Copy,
{
    type Output = T;
    fn dot(self, rhs: &Vector<T>) -> Result<Self::Output> {
        if self.len() != rhs.len() {
            return Err(Error::ShapeMismatch {
                expected: self.len(),
                actual: rhs.len(),
            });
        }

        let mut sum = T::default();
        for (&x, &y) in self.iter().zip(rhs.iter()) {
            sum += x * y;
        }

        Ok(sum)
    }
}
