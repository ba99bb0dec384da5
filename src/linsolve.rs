use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinSolveError {
    #[error("matrix is singular")]
    Singular,
    #[error("matrix is {rows}x{cols} but the right-hand side has {len} entries")]
    Dimension { rows: usize, cols: usize, len: usize },
}

/// Solves the square system `A x = b`, overwriting `b` with `x`.
pub trait LinearSolver {
    fn solve(&self, a: DMatrix<f64>, b: &mut [f64]) -> Result<(), LinSolveError>;
}

/// Dense LU factorization with partial pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseLU;

impl LinearSolver for DenseLU {
    fn solve(&self, a: DMatrix<f64>, b: &mut [f64]) -> Result<(), LinSolveError> {
        let (rows, cols) = a.shape();
        if rows != cols || rows != b.len() {
            return Err(LinSolveError::Dimension {
                rows,
                cols,
                len: b.len(),
            });
        }
        if rows == 0 {
            return Ok(());
        }

        let rhs = DVector::from_column_slice(b);
        let x = a.lu().solve(&rhs).ok_or(LinSolveError::Singular)?;
        if x.iter().any(|x| !x.is_finite()) {
            return Err(LinSolveError::Singular);
        }
        b.copy_from_slice(x.as_slice());
        Ok(())
    }
}
