///
/// Contains algorithms related to Gaussian elimination over fields, in particular
/// [`gauss::MatrixSolver`].
///
pub mod gauss;
