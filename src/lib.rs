//! Square integer matrix multiplication with interchangeable strategies.
//!
//! Three ways to compute the same product: the textbook triple loop, a
//! cache-blocked loop, and the blocked loop split across threads. All of
//! them implement [`Multiply`] and return exactly the same matrix for the
//! same inputs.
//!
//! ## Usage
//!
//! ```
//! use matmul_engine::{Matrix, Multiply, NaiveMultiply};
//!
//! let a = Matrix::filled(3, 1);
//! let c = NaiveMultiply::new().multiply(&a, &a).unwrap();
//!
//! assert_eq!(c, Matrix::filled(3, 3));
//! ```
//!
//! Picking a strategy by name, with a fallback to the naive loop if the
//! thread pool can't be started:
//!
//! ```
//! use matmul_engine::{EngineConfig, Matrix, Multiply, Strategy};
//!
//! let a = Matrix::from_fn(64, |i, j| (i + j) as i64);
//! let b = Matrix::filled(64, 2);
//!
//! let config = EngineConfig::default().with_workers(4);
//! let parallel = Strategy::Parallel.build_with_fallback(&config).unwrap();
//! let blocked = Strategy::Blocked.build(&config).unwrap();
//!
//! assert_eq!(parallel.multiply(&a, &b).unwrap(), blocked.multiply(&a, &b).unwrap());
//! ```
//!
//! ## What's inside
//!
//! - Naive i-j-k loop, the correctness baseline
//! - Tiled loop over k/j blocks (default 16×16) for cache locality
//! - Row-band parallelism on a bounded rayon pool
//! - Plain-text matrix files (one row per line)

pub mod blocked;
pub mod config;
pub mod error;
pub mod matrix;
pub mod strategy;
pub mod threaded;

pub use blocked::BlockedMultiply;
pub use config::{DEFAULT_TILE_SIZE, EngineConfig};
pub use error::{MatmulError, Result};
pub use matrix::io::{load, read_matrix, save, write_matrix};
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::{Element, Matrix};
pub use strategy::{Multiply, NaiveMultiply, Strategy, multiply_with_fallback};
pub use threaded::ParallelMultiply;

/// Multiply with the named strategy and default configuration.
///
/// Falls back to the naive loop if the parallel runtime is unavailable.
pub fn multiply(strategy: Strategy, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let engine = strategy.build_with_fallback(&EngineConfig::default())?;
    multiply_with_fallback(engine.as_ref(), a, b)
}
