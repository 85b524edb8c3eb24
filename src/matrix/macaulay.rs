use std::collections::HashMap;
use std::fmt::Display;

use crate::algorithms::linsolve::gauss::gauss_jordan;
use crate::field::Field;
use crate::rings::multivariate::ordered::{MonomialOrder, MonomialOrdering};
use crate::rings::multivariate::polynomial::Polynomial;
use crate::rings::multivariate::{Exponent, Monomial};

///
/// The Macaulay matrix of a list of polynomials, i.e. the matrix whose rows are the
/// coefficient vectors of the polynomials w.r.t. all monomials occurring in any of them.
/// The columns are sorted descending w.r.t. the monomial ordering, so row reduction
/// computes polynomials with pairwise different leading monomials that span the same
/// vector space.
///
/// This is the main linear algebra step of [`crate::algorithms::f4::f4()`].
///
pub struct MacaulayMatrix<F: Field> {
    field_size: usize,
    ordering: MonomialOrdering,
    columns: Vec<Monomial<F>>,
    matrix: crate::matrix::OwnedMatrix<F>
}

impl<F: Field> MacaulayMatrix<F> {

    ///
    /// Creates the Macaulay matrix of the given polynomials, which must all belong to
    /// the same ring. There must be at least one polynomial.
    ///
    pub fn new(polynomials: &[Polynomial<F>]) -> Self {
        assert!(polynomials.len() > 0);
        let first = &polynomials[0];
        for p in polynomials {
            if let Err(e) = first.check_compatible(p) {
                panic!("{}", e);
            }
        }
        let ordering = first.ordering().clone();

        let mut columns = polynomials.iter()
            .flat_map(|p| p.terms())
            .map(|m| m.with_coefficient(m.coefficient().one()))
            .collect::<Vec<_>>();
        columns.sort_by(|l, r| ordering.compare(r, l));
        columns.dedup_by(|a, b| a.exponents_equal(b));

        let column_index = columns.iter().enumerate()
            .map(|(j, m)| (m.exponents().into_owned(), j))
            .collect::<HashMap<Vec<Exponent>, usize>>();

        let zero = match columns.first() {
            Some(m) => m.coefficient().zero(),
            None => return MacaulayMatrix {
                field_size: first.field_size(),
                ordering,
                columns,
                matrix: crate::matrix::OwnedMatrix::from_rows(vec![Vec::new(); polynomials.len()], 0)
            }
        };
        let rows = polynomials.iter().map(|p| {
            let mut row = vec![zero.clone(); columns.len()];
            for m in p.terms() {
                row[column_index[&*m.exponents()]] = m.coefficient().clone();
            }
            row
        }).collect::<Vec<_>>();

        MacaulayMatrix {
            field_size: first.field_size(),
            ordering,
            matrix: crate::matrix::OwnedMatrix::from_rows(rows, columns.len()),
            columns
        }
    }

    pub fn row_count(&self) -> usize {
        self.matrix.row_count()
    }

    pub fn col_count(&self) -> usize {
        self.matrix.col_count()
    }

    ///
    /// The monomials corresponding to the columns, with coefficient one, descending
    /// w.r.t. the ordering.
    ///
    pub fn columns(&self) -> &[Monomial<F>] {
        &self.columns
    }

    ///
    /// Brings the matrix into reduced row echelon form, see [`gauss_jordan()`].
    /// Returns the rank of the matrix.
    ///
    pub fn row_reduce(&mut self) -> usize {
        gauss_jordan(&mut self.matrix, &mut ()).len()
    }

    ///
    /// Converts the rows back into polynomials. Zero rows are skipped.
    ///
    pub fn polynomials(&self) -> Vec<Polynomial<F>> {
        (0..self.row_count()).map(|i| self.row_polynomial(i)).filter(|p| !p.is_zero()).collect()
    }

    fn row_polynomial(&self, i: usize) -> Polynomial<F> {
        let terms = self.matrix.row(i).iter().zip(self.columns.iter())
            .filter(|(c, _)| !c.is_zero())
            .map(|(c, m)| m.with_coefficient(c.clone()))
            .collect();
        Polynomial::new(self.field_size, self.ordering.clone(), terms)
    }

    ///
    /// The number of nonzero rows.
    ///
    pub fn rank(&self) -> usize {
        (0..self.row_count()).filter(|i| self.matrix.row(*i).iter().any(|c| !c.is_zero())).count()
    }
}

impl<F: Field> Display for MacaulayMatrix<F> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.matrix)
    }
}

#[cfg(test)]
use crate::rings::galois::GaloisFieldElement;
#[cfg(test)]
use crate::rings::multivariate::MonomialKind;

#[test]
fn test_macaulay_matrix() {
    let gf = |x: i64| GaloisFieldElement::new(x, 5).unwrap();
    let order = MonomialOrdering::DegRevLex;
    let p = |terms: &[(i64, [Exponent; 2])]| Polynomial::new(2, order.clone(), terms.iter().map(|(c, e)| Monomial::new(MonomialKind::Sparse, e, gf(*c))).collect());
    // x^2 + y, x^2 + xy, xy - y
    let polys = [p(&[(1, [2, 0]), (1, [0, 1])]), p(&[(1, [2, 0]), (1, [1, 1])]), p(&[(1, [1, 1]), (-1, [0, 1])])];
    let mut matrix = MacaulayMatrix::new(&polys);
    assert_eq!(3, matrix.row_count());
    assert_eq!(3, matrix.col_count());
    assert_eq!(vec![vec![2, 0], vec![1, 1], vec![0, 1]], matrix.columns().iter().map(|m| m.exponents().into_owned()).collect::<Vec<_>>());
    assert_eq!(3, matrix.rank());

    // the rows are linearly dependent: (x^2 + xy) - (x^2 + y) = xy - y
    assert_eq!(2, matrix.row_reduce());
    assert_eq!(2, matrix.rank());
    let result = matrix.polynomials();
    assert_eq!(vec![p(&[(1, [2, 0]), (1, [0, 1])]), p(&[(1, [1, 1]), (-1, [0, 1])])], result);
    assert!(result.iter().all(|f| f.leading_coefficient().unwrap().is_one()));
}

#[test]
fn test_macaulay_matrix_zero_rows() {
    let order = MonomialOrdering::Lex;
    let zero = Polynomial::<GaloisFieldElement>::zero(2, order.clone());
    let mut matrix = MacaulayMatrix::new(&[zero.clone(), zero]);
    assert_eq!(0, matrix.col_count());
    assert_eq!(0, matrix.row_reduce());
    assert!(matrix.polynomials().is_empty());
}
