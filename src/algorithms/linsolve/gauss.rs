use crate::field::Field;
use crate::matrix::{OwnedMatrix, TransformTarget};

///
/// Transforms `matrix` into reduced row echelon form, using gauss-jordan elimination.
/// All row operations are also applied to `target`.
///
/// The columns are processed from left to right. For each column, the first row at or
/// below the current pivot row with a nonzero entry in this column is swapped into the
/// pivot position, scaled to have leading entry one, and then used to clear the column
/// in all other rows.
///
/// Returns the pivot columns, i.e. the `i`-th returned value is the column of the leading
/// entry of the `i`-th row. All rows after the returned pivots are zero.
///
pub fn gauss_jordan<F, T>(matrix: &mut OwnedMatrix<F>, target: &mut T) -> Vec<usize>
    where F: Field,
        T: TransformTarget<F>
{
    let n = matrix.row_count();
    let m = matrix.col_count();
    let mut pivots = Vec::new();
    for j in 0..m {
        let i = pivots.len();
        if i >= n {
            break;
        }
        let pivot_row = match (i..n).filter(|k| !matrix.at(*k, j).is_zero()).next() {
            Some(k) => k,
            None => continue
        };
        matrix.swap_rows(i, pivot_row);
        target.swap(i, pivot_row);

        let inverse = matrix.at(i, j).inverse();
        matrix.scale_row(i, &inverse);
        target.scale(i, &inverse);

        for k in 0..n {
            if k != i && !matrix.at(k, j).is_zero() {
                let factor = matrix.at(k, j).clone();
                matrix.sub_row(i, k, &factor);
                target.subtract(i, k, &factor);
            }
        }
        pivots.push(j);
    }
    return pivots;
}

///
/// Solves the linear system `A x = b` over a field, if it has a unique solution.
///
/// # Example
/// ```
/// # use groebner::field::*;
/// # use groebner::matrix::*;
/// # use groebner::rings::rational::*;
/// # use groebner::algorithms::linsolve::gauss::*;
/// let q = |x: i64| Rational::from_integer(x);
/// // x + y = 3, x - y = 1
/// let a = OwnedMatrix::from_rows(vec![vec![q(1), q(1)], vec![q(1), q(-1)]], 2);
/// let solution = MatrixSolver::new(a, vec![q(3), q(1)]).solve();
/// assert_eq!(Some(vec![q(2), q(1)]), solution);
/// ```
///
pub struct MatrixSolver<F: Field> {
    matrix: OwnedMatrix<F>,
    values: Vec<F>
}

impl<F: Field> MatrixSolver<F> {

    pub fn new(matrix: OwnedMatrix<F>, values: Vec<F>) -> Self {
        assert_eq!(matrix.row_count(), values.len());
        MatrixSolver { matrix, values }
    }

    ///
    /// Returns the unique solution of the system, or `None` if the system has no solution
    /// or more than one.
    ///
    /// After elimination, the system has a unique solution if and only if every column
    /// contains exactly one nonzero entry (which is then one), in pairwise different rows,
    /// and all remaining rows have value zero.
    ///
    pub fn solve(mut self) -> Option<Vec<F>> {
        let pivots = gauss_jordan(&mut self.matrix, &mut self.values);
        if pivots.len() != self.matrix.col_count() {
            return None;
        }
        for (i, j) in pivots.iter().enumerate() {
            let column_is_unit = (0..self.matrix.row_count()).all(|k| if k == i {
                self.matrix.at(k, *j).is_one()
            } else {
                self.matrix.at(k, *j).is_zero()
            });
            if !column_is_unit {
                return None;
            }
        }
        if self.values[pivots.len()..].iter().any(|v| !v.is_zero()) {
            return None;
        }
        self.values.truncate(pivots.len());
        return Some(self.values);
    }
}

#[cfg(test)]
use crate::rings::rational::Rational;
#[cfg(test)]
use crate::rings::galois::GaloisFieldElement;

#[cfg(test)]
fn q(x: i64) -> Rational {
    Rational::from_integer(x)
}

#[test]
fn test_gauss_jordan() {
    let mut matrix = OwnedMatrix::from_rows(vec![
        vec![q(0), q(2), q(4)],
        vec![q(1), q(1), q(1)],
        vec![q(1), q(3), q(5)]
    ], 3);
    let pivots = gauss_jordan(&mut matrix, &mut ());
    assert_eq!(vec![0, 1], pivots);
    assert_eq!(&[q(1), q(0), q(-1)], matrix.row(0));
    assert_eq!(&[q(0), q(1), q(2)], matrix.row(1));
    assert_eq!(&[q(0), q(0), q(0)], matrix.row(2));
}

#[test]
fn test_solve_unique() {
    let gf = |x: i64| GaloisFieldElement::new(x, 7).unwrap();
    let matrix = OwnedMatrix::from_rows(vec![
        vec![gf(0), gf(1), gf(2)],
        vec![gf(1), gf(0), gf(0)],
        vec![gf(3), gf(1), gf(1)]
    ], 3);
    let solution = MatrixSolver::new(matrix.clone(), vec![gf(1), gf(2), gf(3)]).solve().unwrap();
    for i in 0..3 {
        let lhs = (0..3).fold(gf(0), |acc, j| acc.add_ref(&matrix.at(i, j).mul_ref(&solution[j])));
        assert_eq!([gf(1), gf(2), gf(3)][i], lhs);
    }
}

#[test]
fn test_solve_overdetermined() {
    // x = 2, 2x = 4, y = 1
    let matrix = OwnedMatrix::from_rows(vec![vec![q(1), q(0)], vec![q(2), q(0)], vec![q(0), q(1)]], 2);
    assert_eq!(Some(vec![q(2), q(1)]), MatrixSolver::new(matrix.clone(), vec![q(2), q(4), q(1)]).solve());
    // inconsistent
    assert_eq!(None, MatrixSolver::new(matrix, vec![q(2), q(5), q(1)]).solve());
}

#[test]
fn test_solve_no_unique_solution() {
    let singular = OwnedMatrix::from_rows(vec![vec![q(1), q(1)], vec![q(2), q(2)]], 2);
    assert_eq!(None, MatrixSolver::new(singular, vec![q(1), q(2)]).solve());

    let no_columns = OwnedMatrix::from_rows(vec![Vec::new()], 0);
    assert_eq!(None, MatrixSolver::new(no_columns.clone(), vec![q(1)]).solve());
    assert_eq!(Some(Vec::new()), MatrixSolver::new(no_columns, vec![q(0)]).solve());
}
