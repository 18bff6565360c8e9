use std::fs;

use matmul_engine::{Matrix, MatmulError, Multiply, NaiveMultiply, load, save};
use tempfile::TempDir;

#[test]
fn test_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matrix.txt");

    let m = Matrix::from_fn(12, |i, j| i as i64 * 100 - j as i64);
    save(&m, &path).unwrap();
    assert_eq!(load(&path).unwrap(), m);
}

#[test]
fn test_generated_matrix_round_trip() {
    let dir = TempDir::new().unwrap();
    for (n, value) in [(0, 1), (1, -5), (10, 1), (33, 2)] {
        let path = dir.path().join(format!("gen_{}.txt", n));
        let m = Matrix::filled(n, value);
        save(&m, &path).unwrap();
        assert_eq!(load(&path).unwrap(), m, "n={}", n);
    }
}

#[test]
fn test_file_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ones.txt");
    save(&Matrix::filled(2, 1), &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1 1 \n1 1 \n");
}

#[test]
fn test_product_round_trip() {
    let dir = TempDir::new().unwrap();
    let a_path = dir.path().join("a.txt");
    let b_path = dir.path().join("b.txt");
    let c_path = dir.path().join("c.txt");

    save(&Matrix::filled(4, 1), &a_path).unwrap();
    save(&Matrix::filled(4, 2), &b_path).unwrap();

    let a = load(&a_path).unwrap();
    let b = load(&b_path).unwrap();
    let c = NaiveMultiply::new().multiply(&a, &b).unwrap();
    save(&c, &c_path).unwrap();

    assert_eq!(load(&c_path).unwrap(), Matrix::filled(4, 8));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, "1 2\n3 four\n").unwrap();

    match load(&path) {
        Err(MatmulError::Parse { line, reason }) => {
            assert_eq!(line, 2);
            assert!(reason.contains("four"), "{}", reason);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.txt");
    let err = load(&path).unwrap_err();
    assert!(matches!(err, MatmulError::Io { .. }));
    assert!(err.to_string().contains("missing.txt"), "{}", err);
}
