use crate::prelude::*;
use std::ops::{AddAssign, Index, IndexMut};

pub mod ops;

/// Fixed-length sequence of elements. The length never changes after creation.
#[derive(Debug, PartialEq, Clone)]
pub struct Vector<T> {
    data: Vec<T>,
}

/// Row-major matrix stored in a flat buffer.
#[derive(Debug, PartialEq, Clone)]
pub struct Matrix<T> {
    data: Vec<T>,
    dim: (usize, usize),
}

impl<T: Default + Clone> Vector<T> {
    pub fn new(len: usize) -> Self {
        Self::filled(len, T::default())
    }
}

impl<T: Clone> Vector<T> {
    pub fn filled(len: usize, fill: T) -> Self {
        Self {
            data: vec![fill; len],
        }
    }

    /// Overwrites every element with the matching element of `from`.
    pub fn copy_from(&mut self, from: &Vector<T>) -> Result<()> {
        if self.len() != from.len() {
            return Err(Error::ShapeMismatch {
                expected: self.len(),
                actual: from.len(),
            });
        }
        self.data.clone_from_slice(&from.data);
        Ok(())
    }

    /// Returns a new vector with `value` in front of the current elements.
    pub fn prepend(&self, value: T) -> Vector<T> {
        let mut data = Vec::with_capacity(self.len() + 1);
        data.push(value);
        data.extend_from_slice(&self.data);
        Self { data }
    }

    pub fn concat(&self, other: &Vector<T>) -> Vector<T> {
        let mut data = Vec::with_capacity(self.len() + other.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Self { data }
    }
}

impl<T: AddAssign + Copy> Vector<T> {
    /// Accumulates `from` into this vector element-wise.
    pub fn add_from(&mut self, from: &Vector<T>) -> Result<()> {
        if self.len() != from.len() {
            return Err(Error::ShapeMismatch {
                expected: self.len(),
                actual: from.len(),
            });
        }
        for (x, &y) in self.data.iter_mut().zip(&from.data) {
            *x += y;
        }
        Ok(())
    }
}

impl<T> Vector<T> {
    pub fn from_array<const N: usize>(arr: [T; N]) -> Self {
        Self {
            data: Vec::from(arr),
        }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn to_vec(self) -> Vec<T> {
        self.data
    }

    /// Applies a function to every element, producing a new vector
    pub fn map<U, F: Fn(&T) -> U>(&self, f: F) -> Vector<U> {
        Vector {
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidShape(format!(
            "a matrix needs at least one row and one column, got {rows}x{cols}"
        )));
    }
    Ok(())
}

impl<T: Default + Clone> Matrix<T> {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, T::default())
    }

    pub fn zero(&mut self) {
        for x in &mut self.data {
            *x = T::default();
        }
    }
}

impl Matrix<f64> {
    pub fn ones(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, 1.0)
    }
}

impl<T: Clone> Matrix<T> {
    pub fn filled(rows: usize, cols: usize, fill: T) -> Result<Self> {
        check_dims(rows, cols)?;
        let len = rows.checked_mul(cols).ok_or_else(|| {
            Error::InvalidShape(format!("{rows}x{cols} elements overflow usize"))
        })?;
        Ok(Self {
            data: vec![fill; len],
            dim: (rows, cols),
        })
    }

    /// Copies a row out as a vector. Panics if `row` is out of range, like indexing.
    pub fn row(&self, row: usize) -> Vector<T> {
        let start = row * self.cols();
        Vector::from_vec(self.data[start..start + self.cols()].to_vec())
    }

    /// Row-major copy of every element.
    pub fn flatten(&self) -> Result<Vector<T>> {
        self.shape()?;
        Ok(Vector::from_vec(self.data.clone()))
    }

    /// Builds a `rows x cols` matrix from `rows * cols` consecutive elements
    /// of `vec`, starting at `offset`.
    pub fn reshape(vec: &Vector<T>, rows: usize, cols: usize, offset: usize) -> Result<Self> {
        check_dims(rows, cols)?;
        let needed = rows
            .checked_mul(cols)
            .and_then(|len| offset.checked_add(len))
            .unwrap_or(usize::MAX);
        if needed > vec.len() {
            return Err(Error::OutOfBounds {
                needed,
                available: vec.len(),
            });
        }

        Ok(Self {
            data: vec.as_slice()[offset..needed].to_vec(),
            dim: (rows, cols),
        })
    }

    /// Joins `right` onto the end of every row.
    pub fn hconcat(&self, right: &Matrix<T>) -> Result<Self> {
        let (rows, cols) = self.shape()?;
        let (right_rows, right_cols) = right.shape()?;
        if rows != right_rows {
            return Err(Error::ShapeMismatch {
                expected: rows,
                actual: right_rows,
            });
        }

        let mut data = Vec::with_capacity(rows * (cols + right_cols));
        for row in 0..rows {
            data.extend_from_slice(&self.data[row * cols..(row + 1) * cols]);
            data.extend_from_slice(&right.data[row * right_cols..(row + 1) * right_cols]);
        }

        Ok(Self {
            data,
            dim: (rows, cols + right_cols),
        })
    }

    /// Stacks the rows of `bottom` under the rows of this matrix.
    pub fn vconcat(&self, bottom: &Matrix<T>) -> Result<Self> {
        let (rows, cols) = self.shape()?;
        let (bottom_rows, bottom_cols) = bottom.shape()?;
        if cols != bottom_cols {
            return Err(Error::ShapeMismatch {
                expected: cols,
                actual: bottom_cols,
            });
        }

        let mut data = Vec::with_capacity((rows + bottom_rows) * cols);
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&bottom.data);

        Ok(Self {
            data,
            dim: (rows + bottom_rows, cols),
        })
    }

    pub fn column(&self, index: usize) -> Result<Vector<T>> {
        let (rows, cols) = self.shape()?;
        if index >= cols {
            return Err(Error::OutOfBounds {
                needed: index.saturating_add(1),
                available: cols,
            });
        }

        Ok(Vector::from_vec(
            (0..rows).map(|row| self[(row, index)].clone()).collect(),
        ))
    }

    /// Selects `count` contiguous columns beginning at `start`.
    /// A `count` of `None` takes every remaining column.
    pub fn columns(&self, start: usize, count: Option<usize>) -> Result<Self> {
        let (rows, cols) = self.shape()?;
        let count = count.unwrap_or_else(|| cols.saturating_sub(start));
        let end = start.checked_add(count).unwrap_or(usize::MAX);
        if end > cols {
            return Err(Error::OutOfBounds {
                needed: end,
                available: cols,
            });
        }
        check_dims(rows, count)?;

        let mut data = Vec::with_capacity(rows * count);
        for row in 0..rows {
            let begin = row * cols + start;
            data.extend_from_slice(&self.data[begin..begin + count]);
        }

        Ok(Self {
            data,
            dim: (rows, count),
        })
    }
}

impl<T> Matrix<T> {
    pub fn from_array<const R: usize, const C: usize>(arr: [[T; C]; R]) -> Self {
        let mut data = Vec::with_capacity(R * C);

        for row in arr {
            for x in row {
                data.push(x);
            }
        }

        Self { data, dim: (R, C) }
    }

    pub fn from_vec(vec: Vec<Vec<T>>) -> Result<Self> {
        let rows = vec.len();
        let cols = vec.first().map(|row| row.len()).unwrap_or(0);

        let mut data = Vec::with_capacity(rows * cols);
        for (i, row) in vec.into_iter().enumerate() {
            if cols != row.len() {
                return Err(Error::InvalidShape(format!(
                    "row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            data.extend(row);
        }

        Ok(Self {
            data,
            dim: (rows, cols),
        })
    }

    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    pub fn rows(&self) -> usize {
        self.dim.0
    }

    pub fn cols(&self) -> usize {
        self.dim.1
    }

    /// Row-major view of the elements.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns `(rows, cols)`, rejecting matrices without rows or columns.
    /// Every shape-dependent operation goes through this check first.
    pub fn shape(&self) -> Result<(usize, usize)> {
        let (rows, cols) = self.dim;
        check_dims(rows, cols)?;
        Ok((rows, cols))
    }

    pub fn to_vec(self) -> Vec<Vec<T>> {
        let (rows, cols) = self.dim;
        let mut res = Vec::with_capacity(rows);
        let mut data = self.data.into_iter();
        for _ in 0..rows {
            res.push(data.by_ref().take(cols).collect());
        }
        res
    }

    /// Applies a function to every element, producing a new matrix of the same shape
    pub fn map<U, F: Fn(&T) -> U>(&self, f: F) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            dim: self.dim,
        }
    }
}

impl<T> Matrix<T>
where
    T: Default,
{
    /// Applies a function to every element of the matrix
    pub fn apply<F: FnMut(T) -> T>(&mut self, mut f: F) {
        for x in &mut self.data {
            let old = std::mem::take(x);
            *x = f(old);
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i * self.cols() + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        let idx = i * self.cols() + j;
        &mut self.data[idx]
    }
}

impl From<Matrix<i32>> for Matrix<f64> {
    fn from(value: Matrix<i32>) -> Self {
        Self {
            dim: value.dim(),
            data: value.data.into_iter().map(f64::from).collect(),
        }
    }
}
