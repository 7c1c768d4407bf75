//! Row-wise iteration over raster storage.
//!
//! Per-pixel passes in this crate are written as row fills so they can run
//! on the rayon thread pool when the `parallel` feature is enabled. The
//! serial fallback iterates the same row chunks in order, so both builds
//! produce identical output.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fills `data` row by row, calling `fill(row_index, row_slice)` per row.
///
/// `cols` is the row stride. With the `parallel` feature the rows are
/// distributed across the thread pool.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<T, F>(data: &mut [T], cols: usize, fill: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    data.par_chunks_mut(cols)
        .enumerate()
        .for_each(|(r, row)| fill(r, row));
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<T, F>(data: &mut [T], cols: usize, fill: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    for (r, row) in data.chunks_mut(cols).enumerate() {
        fill(r, row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_cover_all_cells() {
        let mut data = vec![0u32; 12];
        for_each_row(&mut data, 4, |r, row| {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (r * 4 + c) as u32;
            }
        });
        assert_eq!(data, (0..12).collect::<Vec<u32>>());
    }
}
