use std::collections::BTreeSet;

use tracing::instrument;

use crate::algorithms::m4gb::m4gb;
use crate::computation::ComputationController;
use crate::error::AlgebraError;
use crate::field::Field;
use crate::rings::multivariate::ordered::MonomialOrdering;
use crate::rings::multivariate::polynomial::Polynomial;
use crate::rings::multivariate::{Exponent, Monomial, MonomialKind};

///
/// A simple undirected graph on the vertices `0, ..., vertex_count - 1`.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    vertex_count: usize,
    /// every edge `(u, v)` satisfies `u < v`
    edges: BTreeSet<(usize, usize)>
}

fn parse_number(token: Option<&str>, line: usize) -> Result<usize, AlgebraError> {
    match token.map(|t| t.parse::<usize>()) {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(AlgebraError::conversion(format!("line {}: {}", line, e))),
        None => Err(AlgebraError::conversion(format!("line {}: missing number", line)))
    }
}

impl Graph {

    pub fn new(vertex_count: usize) -> Self {
        Graph { vertex_count, edges: BTreeSet::new() }
    }

    ///
    /// Adds the edge between the (0-based) vertices `u` and `v`. Adding an edge twice has
    /// no effect.
    ///
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), AlgebraError> {
        if u >= self.vertex_count || v >= self.vertex_count {
            return Err(AlgebraError::conversion(format!("edge ({}, {}) is out of range for {} vertices", u, v, self.vertex_count)));
        }
        if u == v {
            return Err(AlgebraError::conversion(format!("self loop at vertex {}", u)));
        }
        self.edges.insert((u.min(v), u.max(v)));
        return Ok(());
    }

    ///
    /// Parses a graph in DIMACS format, i.e. comment lines starting with `c`, one problem line
    /// `p edge <vertices> <edges>` and edge lines `e <u> <v>` with 1-based vertex indices.
    ///
    /// # Example
    /// ```
    /// # use groebner::graph::Graph;
    /// let graph = Graph::parse_dimacs("c a path\np edge 3 2\ne 1 2\ne 2 3\n").unwrap();
    /// assert_eq!(3, graph.vertex_count());
    /// assert_eq!(2, graph.edges().count());
    /// ```
    ///
    pub fn parse_dimacs(input: &str) -> Result<Graph, AlgebraError> {
        let mut result: Option<Graph> = None;
        for (index, line) in input.lines().enumerate() {
            let line_number = index + 1;
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                None | Some("c") => {},
                Some("p") => {
                    if result.is_some() {
                        return Err(AlgebraError::conversion(format!("line {}: duplicate problem line", line_number)));
                    }
                    if tokens.next() != Some("edge") {
                        return Err(AlgebraError::conversion(format!("line {}: expected problem type edge", line_number)));
                    }
                    let vertex_count = parse_number(tokens.next(), line_number)?;
                    result = Some(Graph::new(vertex_count));
                },
                Some("e") => {
                    let graph = match result.as_mut() {
                        Some(graph) => graph,
                        None => return Err(AlgebraError::conversion(format!("line {}: edge before problem line", line_number)))
                    };
                    let u = parse_number(tokens.next(), line_number)?;
                    let v = parse_number(tokens.next(), line_number)?;
                    if u == 0 || v == 0 {
                        return Err(AlgebraError::conversion(format!("line {}: vertices are 1-based", line_number)));
                    }
                    graph.add_edge(u - 1, v - 1).map_err(|e| AlgebraError::conversion(format!("line {}: {}", line_number, e)))?;
                },
                Some(other) => return Err(AlgebraError::conversion(format!("line {}: unknown line type {}", line_number, other)))
            }
        }
        return result.ok_or_else(|| AlgebraError::conversion("missing problem line"));
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edges<'a>(&'a self) -> impl 'a + Iterator<Item = (usize, usize)> {
        self.edges.iter().copied()
    }

    ///
    /// Returns generators of the ideal whose variety consists of the proper colorings of
    /// this graph with `k` colors, where a color is a `k`-th root of unity.
    ///
    /// For every vertex `i`, this is `x_i^k - 1`, and for every edge `(u, v)` it is
    /// ```text
    ///   x_u^(k - 1) + x_u^(k - 2) x_v + ... + x_v^(k - 1)
    /// ```
    /// which is `(x_u^k - x_v^k) / (x_u - x_v)` and thus vanishes exactly when `x_u != x_v`.
    /// The polynomials use sparse monomials and [`MonomialOrdering::DegRevLex`].
    ///
    pub fn k_coloring_ideal_generators<F: Field>(&self, k: usize, one: &F) -> Vec<Polynomial<F>> {
        let n = self.vertex_count;
        let ordering = MonomialOrdering::DegRevLex;
        let monomial = |powers: &[(usize, usize)], coefficient: F| {
            let mut exponents = vec![0; n];
            for (i, e) in powers {
                exponents[*i] += *e as Exponent;
            }
            Monomial::new(MonomialKind::Sparse, &exponents, coefficient)
        };
        let mut result = Vec::with_capacity(n + self.edges.len());
        for i in 0..n {
            result.push(Polynomial::new(n, ordering.clone(), vec![monomial(&[(i, k)], one.clone()), monomial(&[], one.negate())]));
        }
        for (u, v) in self.edges() {
            let terms = (0..k).map(|i| monomial(&[(u, k - 1 - i), (v, i)], one.clone())).collect();
            result.push(Polynomial::new(n, ordering.clone(), terms));
        }
        return result;
    }

    ///
    /// Checks whether this graph has a proper coloring with `k` colors, by computing a
    /// Groebner basis of [`Graph::k_coloring_ideal_generators()`] with M4GB and checking
    /// that the ideal is not the unit ideal.
    ///
    /// Since the colorings are points over the algebraic closure, `one` should belong to
    /// a field of characteristic zero or coprime to `k`.
    ///
    #[instrument(skip_all, level = "trace")]
    pub fn is_k_colorable<F, Controller>(&self, k: usize, one: &F, controller: Controller) -> Result<bool, AlgebraError>
        where F: Field,
            Controller: ComputationController
    {
        if k == 0 {
            return Err(AlgebraError::conversion("number of colors must be positive"));
        }
        if k >= self.vertex_count {
            return Ok(true);
        }
        let basis = m4gb(self.k_coloring_ideal_generators(k, one), controller);
        let constant = Polynomial::from_monomial(Monomial::constant(MonomialKind::Sparse, self.vertex_count, one.clone()), MonomialOrdering::DegRevLex);
        return Ok(!constant.reduce(&basis).is_zero());
    }
}

#[cfg(test)]
use crate::computation::TEST_LOG_PROGRESS;
#[cfg(test)]
use crate::rings::galois::GaloisFieldElement;
#[cfg(test)]
use crate::rings::rational::Rational;
#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
fn complete_graph(n: usize) -> Graph {
    let mut result = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            result.add_edge(u, v).unwrap();
        }
    }
    return result;
}

#[test]
fn test_parse_dimacs() {
    let graph = Graph::parse_dimacs("c This is a comment\np edge 4 3\ne 1 2\ne 2 3\n\ne 4 1\ne 2 1\n").unwrap();
    assert_eq!(4, graph.vertex_count());
    assert_eq!(vec![(0, 1), (0, 3), (1, 2)], graph.edges().collect::<Vec<_>>());
}

#[test]
fn test_parse_dimacs_errors() {
    assert!(matches!(Graph::parse_dimacs("e 1 2\np edge 2 1\n"), Err(AlgebraError::Conversion(_))));
    assert!(matches!(Graph::parse_dimacs("p edge 2 1\ne 1 3\n"), Err(AlgebraError::Conversion(_))));
    assert!(matches!(Graph::parse_dimacs("p edge 2 1\ne 0 1\n"), Err(AlgebraError::Conversion(_))));
    assert!(matches!(Graph::parse_dimacs("p edge two 1\n"), Err(AlgebraError::Conversion(_))));
    assert!(matches!(Graph::parse_dimacs("p col 2 1\n"), Err(AlgebraError::Conversion(_))));
    assert!(matches!(Graph::parse_dimacs("c nothing\n"), Err(AlgebraError::Conversion(_))));
}

#[test]
fn test_k_coloring_ideal_generators() {
    let gf = |x: i64| GaloisFieldElement::new(x, 7).unwrap();
    let mut graph = Graph::new(2);
    graph.add_edge(1, 0).unwrap();
    let generators = graph.k_coloring_ideal_generators(3, &gf(1));
    assert_eq!(3, generators.len());
    assert_eq!(2, generators[0].len());
    assert_eq!(3, generators[0].degree());
    // x0^2 + x0 x1 + x1^2
    assert_eq!(3, generators[2].len());
    assert_eq!(2, generators[2].degree());
    assert!(generators.iter().all(|f| f.kind() == Some(MonomialKind::Sparse) && f.ordering() == &MonomialOrdering::DegRevLex));
}

#[test]
fn test_triangle_coloring() {
    LogAlgorithmSubscriber::init_test();
    let triangle = complete_graph(3);
    let one = Rational::one_el();
    assert!(triangle.is_k_colorable(3, &one, TEST_LOG_PROGRESS).unwrap());
    assert!(!triangle.is_k_colorable(2, &one, TEST_LOG_PROGRESS).unwrap());
    assert!(triangle.is_k_colorable(0, &one, TEST_LOG_PROGRESS).is_err());

    // 3 colors suffice trivially, but the ideal must also be proper
    let basis = m4gb(triangle.k_coloring_ideal_generators(3, &one), TEST_LOG_PROGRESS);
    assert!(basis.iter().all(|f| f.degree() > 0));
}

#[test]
fn test_cycle_coloring() {
    LogAlgorithmSubscriber::init_test();
    let square = Graph::parse_dimacs("p edge 4 4\ne 1 2\ne 2 3\ne 3 4\ne 4 1\n").unwrap();
    assert!(square.is_k_colorable(2, &Rational::one_el(), TEST_LOG_PROGRESS).unwrap());
    let pentagon = Graph::parse_dimacs("p edge 5 5\ne 1 2\ne 2 3\ne 3 4\ne 4 5\ne 5 1\n").unwrap();
    assert!(!pentagon.is_k_colorable(2, &Rational::one_el(), TEST_LOG_PROGRESS).unwrap());
}

#[test]
fn test_complete_graph_coloring() {
    LogAlgorithmSubscriber::init_test();
    // GF(7) contains the third roots of unity 1, 2, 4
    let one = GaloisFieldElement::new(1, 7).unwrap();
    assert!(!complete_graph(4).is_k_colorable(3, &one, TEST_LOG_PROGRESS).unwrap());
    let mut graph = Graph::new(4);
    for (u, v) in complete_graph(3).edges().chain([(2, 3)]) {
        graph.add_edge(u, v).unwrap();
    }
    assert!(graph.is_k_colorable(3, &one, TEST_LOG_PROGRESS).unwrap());
}
