//! Cache-blocked multiply.
//!
//! Breaks the k and j dimensions into square tiles so the part of B being
//! read stays in L1 while the rows of A stream past it. The kernel in
//! [`tiled`] works on a band of output rows; [`BlockedMultiply`] runs it
//! over a single band covering the whole result, and the threaded strategy
//! runs it once per worker band.

pub mod tiled;

use tracing::debug;

use crate::config::{DEFAULT_TILE_SIZE, validate_tile_size};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::strategy::{Multiply, check_shapes};
use tiled::matmul_tiled;

/// Single-threaded tiled multiply.
#[derive(Debug, Clone, Copy)]
pub struct BlockedMultiply {
    tile: usize,
}

impl BlockedMultiply {
    /// Fails with `InvalidConfiguration` if `tile` is zero.
    pub fn new(tile: usize) -> Result<Self> {
        validate_tile_size(tile)?;
        Ok(BlockedMultiply { tile })
    }

    pub fn tile_size(&self) -> usize {
        self.tile
    }
}

impl Default for BlockedMultiply {
    fn default() -> Self {
        BlockedMultiply {
            tile: DEFAULT_TILE_SIZE,
        }
    }
}

impl Multiply for BlockedMultiply {
    fn name(&self) -> &str {
        "blocked"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        let n = check_shapes(a, b)?;
        debug!(strategy = self.name(), n, tile = self.tile, "multiply");

        let mut c = Matrix::zeros(n);
        matmul_tiled(a.as_slice(), b.as_slice(), c.as_mut_slice(), n, self.tile, 0);
        Ok(c)
    }
}
