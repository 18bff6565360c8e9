//! Tiled (cache-blocked) kernel.

use crate::matrix::Element;

/// Cache-blocked matrix multiplication over a band of output rows.
///
/// Splits the k and j dimensions into `tile × tile` blocks so the slice of
/// B touched by one block stays resident in L1 while every row of the band
/// streams past it. Boundary tiles are clipped to `n`.
///
/// Each cell of `c_band` is its own accumulator: it is read, extended by
/// one k-tile of partial products and written back, so a cell is only
/// complete once every k-tile has been visited. The caller must hand in
/// `c_band` zeroed (or holding a value to accumulate onto).
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `b` - Matrix B (n × n), row-major
/// * `c_band` - Rows `row_start..row_start + c_band.len() / n` of C, accumulated into
/// * `n` - Dimension of A and B
/// * `tile` - Tile side, must be > 0
/// * `row_start` - Row of C that `c_band` begins at
pub fn matmul_tiled(
    a: &[Element],
    b: &[Element],
    c_band: &mut [Element],
    n: usize,
    tile: usize,
    row_start: usize,
) {
    debug_assert!(tile > 0, "tile size must be positive");
    debug_assert_eq!(c_band.len() % n.max(1), 0);

    if n == 0 {
        return;
    }

    for kk in (0..n).step_by(tile) {
        let k_end = (kk + tile).min(n);

        for jj in (0..n).step_by(tile) {
            let j_end = (jj + tile).min(n);

            for (r, c_row) in c_band.chunks_exact_mut(n).enumerate() {
                let i = row_start + r;
                let a_row = &a[i * n..(i + 1) * n];

                for j in jj..j_end {
                    let mut acc = c_row[j];
                    for k in kk..k_end {
                        acc += a_row[k] * b[k * n + j];
                    }
                    c_row[j] = acc;
                }
            }
        }
    }
}
