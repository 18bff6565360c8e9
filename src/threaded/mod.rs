//! Multi-threaded multiply.
//!
//! Splits the rows of C into disjoint bands, one per worker, and runs the
//! tiled kernel on each band in a dedicated rayon pool. Every output cell
//! is written by exactly one worker, so the write path needs no locking.

pub mod row_bands;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::config::{EngineConfig, validate_tile_size, validate_workers};
use crate::error::{MatmulError, Result};
use crate::matrix::Matrix;
use crate::strategy::{Multiply, check_shapes};
use row_bands::matmul_row_bands;

/// Number of workers to use when none is configured.
pub fn available_workers() -> Result<usize> {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .map_err(|e| MatmulError::ConcurrencyUnavailable {
            reason: format!("cannot detect hardware parallelism: {}", e),
        })
}

/// Parallel multiply on a bounded thread pool.
///
/// The pool is built once, when the strategy is constructed, and reused for
/// every multiply.
#[derive(Debug)]
pub struct ParallelMultiply {
    pool: ThreadPool,
    workers: usize,
    tile: usize,
}

impl ParallelMultiply {
    /// A pool of `workers` threads with the default tile size.
    pub fn new(workers: usize) -> Result<Self> {
        Self::from_config(&EngineConfig::default().with_workers(workers))
    }

    /// Builds the pool described by `config`.
    ///
    /// A zero worker count or tile size is an `InvalidConfiguration`; a
    /// pool that cannot be started is `ConcurrencyUnavailable`.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        validate_tile_size(config.tile_size)?;
        let workers = match config.workers {
            Some(w) => {
                validate_workers(w)?;
                w
            }
            None => available_workers()?,
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("matmul-worker-{}", i))
            .build()
            .map_err(|e| MatmulError::ConcurrencyUnavailable {
                reason: format!("failed to start {} workers: {}", workers, e),
            })?;

        debug!(workers, tile = config.tile_size, "parallel pool ready");
        Ok(ParallelMultiply {
            pool,
            workers,
            tile: config.tile_size,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn tile_size(&self) -> usize {
        self.tile
    }
}

impl Multiply for ParallelMultiply {
    fn name(&self) -> &str {
        "parallel"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        let n = check_shapes(a, b)?;
        debug!(
            strategy = self.name(),
            n,
            workers = self.workers,
            tile = self.tile,
            "multiply"
        );

        let mut c = Matrix::zeros(n);
        let (a, b, out) = (a.as_slice(), b.as_slice(), c.as_mut_slice());
        self.pool
            .install(|| matmul_row_bands(a, b, out, n, self.tile, self.workers));
        Ok(c)
    }
}
