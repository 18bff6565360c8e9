//! The `Multiply` interface and strategy selection.

use std::fmt::{self, Debug};

use clap::ValueEnum;
use tracing::{debug, warn};

use crate::blocked::BlockedMultiply;
use crate::config::EngineConfig;
use crate::error::{MatmulError, Result};
use crate::matrix::Matrix;
use crate::matrix::naive_ijk::matmul_naive_ijk;
use crate::threaded::ParallelMultiply;

/// A square matrix multiplication strategy.
///
/// Every implementation returns a freshly allocated `C = A * B` and leaves
/// both operands untouched. All strategies produce identical results for
/// the same inputs; they differ only in how the work is scheduled.
pub trait Multiply: Send + Sync + Debug {
    /// Returns the name of this strategy (e.g. "naive", "blocked").
    fn name(&self) -> &str;

    /// Computes `A * B`.
    ///
    /// Fails with [`MatmulError::ShapeMismatch`] before doing any work if
    /// the operands have different dimensions.
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix>;
}

/// Returns the common dimension of `a` and `b`.
pub(crate) fn check_shapes(a: &Matrix, b: &Matrix) -> Result<usize> {
    if a.dim() != b.dim() {
        return Err(MatmulError::ShapeMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }
    Ok(a.dim())
}

/// Textbook i-j-k multiply. Single-threaded reference implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveMultiply;

impl NaiveMultiply {
    pub fn new() -> Self {
        NaiveMultiply
    }
}

impl Multiply for NaiveMultiply {
    fn name(&self) -> &str {
        "naive"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        let n = check_shapes(a, b)?;
        debug!(strategy = self.name(), n, "multiply");

        let mut c = Matrix::zeros(n);
        matmul_naive_ijk(a.as_slice(), b.as_slice(), c.as_mut_slice(), n);
        Ok(c)
    }
}

/// Strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    Naive,
    Blocked,
    Parallel,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Naive, Strategy::Blocked, Strategy::Parallel];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::Blocked => "blocked",
            Strategy::Parallel => "parallel",
        }
    }

    /// Builds the strategy with the given configuration.
    pub fn build(self, config: &EngineConfig) -> Result<Box<dyn Multiply>> {
        let strategy: Box<dyn Multiply> = match self {
            Strategy::Naive => Box::new(NaiveMultiply::new()),
            Strategy::Blocked => Box::new(BlockedMultiply::new(config.tile_size)?),
            Strategy::Parallel => Box::new(ParallelMultiply::from_config(config)?),
        };
        Ok(strategy)
    }

    /// Like [`Strategy::build`], but substitutes [`NaiveMultiply`] when the
    /// requested strategy fails with a recoverable error.
    pub fn build_with_fallback(self, config: &EngineConfig) -> Result<Box<dyn Multiply>> {
        naive_if_unavailable(self.name(), self.build(config))
    }
}

/// Replaces a recoverable build failure with [`NaiveMultiply`].
fn naive_if_unavailable(
    name: &str,
    built: Result<Box<dyn Multiply>>,
) -> Result<Box<dyn Multiply>> {
    match built {
        Err(e) if e.is_recoverable() => {
            warn!(strategy = name, error = %e, "falling back to naive multiply");
            Ok(Box::new(NaiveMultiply::new()))
        }
        other => other,
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `strategy`, retrying with [`NaiveMultiply`] if it fails with a
/// recoverable error. Other errors are returned unchanged.
pub fn multiply_with_fallback(strategy: &dyn Multiply, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    match strategy.multiply(a, b) {
        Err(e) if e.is_recoverable() => {
            warn!(strategy = strategy.name(), error = %e, "falling back to naive multiply");
            NaiveMultiply::new().multiply(a, b)
        }
        other => other,
    }
}
