// Property-based tests for the multiply strategies and text format
use matmul_engine::{
    BlockedMultiply, Element, Matrix, Multiply, NaiveMultiply, ParallelMultiply, read_matrix,
    write_matrix,
};
use proptest::prelude::*;

fn square(max_n: usize) -> impl Strategy<Value = Matrix> {
    (0..=max_n).prop_flat_map(|n| {
        prop::collection::vec(-1000i64..1000, n * n).prop_map(move |data| {
            Matrix::from_fn(n, |i, j| data[i * n + j])
        })
    })
}

fn pair(max_n: usize) -> impl Strategy<Value = (Matrix, Matrix)> {
    (0..=max_n).prop_flat_map(|n| {
        let cells = prop::collection::vec(-1000i64..1000, n * n);
        (cells.clone(), cells).prop_map(move |(a, b)| {
            (
                Matrix::from_fn(n, |i, j| a[i * n + j]),
                Matrix::from_fn(n, |i, j| b[i * n + j]),
            )
        })
    })
}

proptest! {
    #[test]
    fn test_blocked_matches_naive((a, b) in pair(24), tile in 1usize..=20) {
        let expected = NaiveMultiply::new().multiply(&a, &b).unwrap();
        let actual = BlockedMultiply::new(tile).unwrap().multiply(&a, &b).unwrap();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn test_parallel_matches_naive((a, b) in pair(24), workers in 1usize..=8) {
        let expected = NaiveMultiply::new().multiply(&a, &b).unwrap();
        let actual = ParallelMultiply::new(workers).unwrap().multiply(&a, &b).unwrap();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn test_text_round_trip(m in square(16)) {
        let mut buf = Vec::new();
        write_matrix(&m, &mut buf).unwrap();
        let parsed = read_matrix(&buf[..]).unwrap();
        prop_assert_eq!(parsed, m);
    }

    #[test]
    fn test_filled_product(n in 0usize..=12, x in -50i64..50, y in -50i64..50) {
        let c = NaiveMultiply::new()
            .multiply(&Matrix::filled(n, x), &Matrix::filled(n, y))
            .unwrap();
        prop_assert_eq!(c, Matrix::filled(n, x * y * n as Element));
    }
}
