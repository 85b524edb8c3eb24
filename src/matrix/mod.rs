use std::fmt::Display;

use crate::field::Field;

///
/// Contains [`macaulay::MacaulayMatrix`], the coefficient matrix of a list of polynomials.
///
pub mod macaulay;

///
/// A row-major matrix that owns its elements.
///
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedMatrix<T> {
    data: Vec<T>,
    row_count: usize,
    col_count: usize
}

impl<T> OwnedMatrix<T> {

    ///
    /// Creates the `row_count x col_count` [`OwnedMatrix`] matrix, whose entries are
    /// taken from the given vector, interpreted as a row-major matrix.
    ///
    pub fn new(data: Vec<T>, row_count: usize, col_count: usize) -> Self {
        assert_eq!(row_count * col_count, data.len());
        Self { data, row_count, col_count }
    }

    ///
    /// Creates the `row_count x col_count` [`OwnedMatrix`] whose `(i, j)`-th entry
    /// is the output of the given function on `(i, j)`.
    ///
    pub fn from_fn<F>(row_count: usize, col_count: usize, mut f: F) -> Self
        where F: FnMut(usize, usize) -> T
    {
        let mut data = Vec::with_capacity(row_count * col_count);
        for i in 0..row_count {
            for j in 0..col_count {
                data.push(f(i, j));
            }
        }
        return Self::new(data, row_count, col_count);
    }

    ///
    /// Creates a matrix from a list of rows, which must all have length `col_count`.
    ///
    pub fn from_rows(rows: Vec<Vec<T>>, col_count: usize) -> Self {
        let row_count = rows.len();
        let mut data = Vec::with_capacity(row_count * col_count);
        for row in rows {
            assert_eq!(col_count, row.len());
            data.extend(row);
        }
        return Self::new(data, row_count, col_count);
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn at(&self, i: usize, j: usize) -> &T {
        assert!(i < self.row_count && j < self.col_count);
        &self.data[i * self.col_count + j]
    }

    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut T {
        assert!(i < self.row_count && j < self.col_count);
        &mut self.data[i * self.col_count + j]
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[(i * self.col_count)..((i + 1) * self.col_count)]
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for l in 0..self.col_count {
            self.data.swap(i * self.col_count + l, j * self.col_count + l);
        }
    }

    ///
    /// Returns the `src`-th row and a mutable reference to the `dst`-th row, which must
    /// be different.
    ///
    fn split_rows(&mut self, src: usize, dst: usize) -> (&[T], &mut [T]) {
        assert!(src != dst);
        let n = self.col_count;
        if src < dst {
            let (fst, snd) = self.data.split_at_mut(dst * n);
            (&fst[(src * n)..((src + 1) * n)], &mut snd[..n])
        } else {
            let (fst, snd) = self.data.split_at_mut(src * n);
            (&snd[..n], &mut fst[(dst * n)..((dst + 1) * n)])
        }
    }
}

impl<F: Field> OwnedMatrix<F> {

    ///
    /// Multiplies the `i`-th row by `factor`.
    ///
    pub fn scale_row(&mut self, i: usize, factor: &F) {
        for l in 0..self.col_count {
            let value = self.at(i, l).mul_ref(factor);
            *self.at_mut(i, l) = value;
        }
    }

    ///
    /// Subtracts `factor` times the `src`-th row from the `dst`-th row.
    ///
    pub fn sub_row(&mut self, src: usize, dst: usize, factor: &F) {
        let (src, dst) = self.split_rows(src, dst);
        for (s, d) in src.iter().zip(dst.iter_mut()) {
            if !s.is_zero() {
                *d = d.sub_ref(&s.mul_ref(factor));
            }
        }
    }
}

impl<T: Display> Display for OwnedMatrix<T> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strings = self.data.iter().map(|x| format!("{}", x)).collect::<Vec<_>>();
        let max_len = strings.iter().map(|s| s.chars().count()).chain([2].into_iter()).max().unwrap_or(2);
        let mut strings = strings.into_iter();
        for i in 0..self.row_count {
            write!(f, "|")?;
            for j in 0..self.col_count {
                if j > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{:>width$}", strings.next().unwrap_or_default(), width = max_len)?;
            }
            if i + 1 != self.row_count {
                writeln!(f, "|")?;
            } else {
                write!(f, "|")?;
            }
        }
        return Ok(());
    }
}

///
/// A trait for a "target" that can "consume" elementary row operations on matrices.
///
/// This is used during gaussian elimination, when additional data (e.g. the right-hand
/// side of a linear system) has to undergo the same transformations as the matrix.
///
pub trait TransformTarget<F: Field> {

    fn swap(&mut self, i: usize, j: usize);

    fn scale(&mut self, i: usize, factor: &F);

    ///
    /// The transformation corresponding to subtracting `factor` times the `src`-th row
    /// from the `dst`-th row.
    ///
    fn subtract(&mut self, src: usize, dst: usize, factor: &F);
}

impl<F: Field> TransformTarget<F> for () {

    fn swap(&mut self, _i: usize, _j: usize) {}

    fn scale(&mut self, _i: usize, _factor: &F) {}

    fn subtract(&mut self, _src: usize, _dst: usize, _factor: &F) {}
}

impl<F: Field> TransformTarget<F> for Vec<F> {

    fn swap(&mut self, i: usize, j: usize) {
        <[F]>::swap(self, i, j);
    }

    fn scale(&mut self, i: usize, factor: &F) {
        self[i] = self[i].mul_ref(factor);
    }

    fn subtract(&mut self, src: usize, dst: usize, factor: &F) {
        self[dst] = self[dst].sub_ref(&self[src].mul_ref(factor));
    }
}

#[cfg(test)]
use crate::rings::rational::Rational;

#[test]
fn test_row_operations() {
    let q = |x: i64| Rational::from_integer(x);
    let mut matrix = OwnedMatrix::from_rows(vec![vec![q(1), q(2)], vec![q(3), q(4)], vec![q(5), q(6)]], 2);
    matrix.swap_rows(0, 2);
    assert_eq!(&[q(5), q(6)], matrix.row(0));
    matrix.sub_row(2, 1, &q(3));
    assert_eq!(&[q(0), q(-2)], matrix.row(1));
    matrix.sub_row(1, 2, &q(1));
    assert_eq!(&[q(1), q(4)], matrix.row(2));
    matrix.scale_row(0, &Rational::from_fraction(1, 5));
    assert_eq!(&[q(1), Rational::from_fraction(6, 5)], matrix.row(0));
    assert_eq!("|  1,6/5|\n|  0, -2|\n|  1,  4|", format!("{}", matrix));
}

#[test]
fn test_empty_matrix() {
    let matrix = OwnedMatrix::<Rational>::from_rows(vec![Vec::new(), Vec::new()], 0);
    assert_eq!(2, matrix.row_count());
    assert_eq!(0, matrix.col_count());
    assert!(matrix.row(1).is_empty());
}
