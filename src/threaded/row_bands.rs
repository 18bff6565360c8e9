//! Row-band parallel kernel.

use rayon::prelude::*;

use crate::blocked::tiled::matmul_tiled;
use crate::matrix::Element;

/// Rows of C handed to each band.
///
/// Never more bands than rows, and never more bands than workers.
pub fn rows_per_band(n: usize, workers: usize) -> usize {
    n.div_ceil(workers.max(1)).max(1)
}

/// Parallel matrix multiplication over disjoint row bands of C.
///
/// C is split into contiguous bands of [`rows_per_band`] rows before any
/// work starts. Each band is a separate `&mut` slice owned by one rayon
/// task, which runs the tiled kernel over it; A and B are shared read-only.
/// Returns once every band is done.
///
/// Runs on the current rayon pool; call it inside `ThreadPool::install`
/// to bound the worker count.
///
/// # Arguments
///
/// * `c` - Matrix C (n × n), row-major, accumulated into (C += A * B)
/// * `tile` - Tile side for the per-band kernel, must be > 0
/// * `workers` - Target number of bands
pub fn matmul_row_bands(
    a: &[Element],
    b: &[Element],
    c: &mut [Element],
    n: usize,
    tile: usize,
    workers: usize,
) {
    if n == 0 {
        return;
    }

    let band_rows = rows_per_band(n, workers);

    c.par_chunks_mut(band_rows * n)
        .enumerate()
        .for_each(|(band, c_band)| {
            matmul_tiled(a, b, c_band, n, tile, band * band_rows);
        });
}
