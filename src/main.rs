//! Generate square matrices, multiply them and write the results to disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use matmul_engine::{
    DEFAULT_TILE_SIZE, Element, EngineConfig, Matrix, Multiply, Strategy, load,
    multiply_with_fallback, save,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Generate a pair of square matrices, multiply them and save the results.
#[derive(Parser, Debug)]
#[command(name = "matmul-engine")]
#[command(version)]
#[command(about = "Generate square matrices, multiply them and save them to files")]
struct Cli {
    /// Size of the square matrices to generate
    #[arg(short, long, default_value_t = 1024)]
    size: usize,

    /// Fill value for the first matrix (the second is filled with value + 1)
    #[arg(short = 'v', long, default_value_t = 1, allow_negative_numbers = true)]
    value: Element,

    /// File to save the first matrix in
    #[arg(short, long)]
    filename: Option<PathBuf>,

    /// File to save the second matrix in (default: <filename>.2)
    #[arg(long)]
    filename2: Option<PathBuf>,

    /// File to save the result in (default: <filename>.result)
    #[arg(short, long)]
    result: Option<PathBuf>,

    /// Multiplication strategy
    #[arg(long, value_enum, default_value_t = Strategy::Parallel)]
    strategy: Strategy,

    /// Tile side for the blocked and parallel strategies
    #[arg(long, env = "MATMUL_TILE_SIZE", default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: usize,

    /// Worker threads for the parallel strategy (default: all cores)
    #[arg(long, env = "MATMUL_WORKERS")]
    workers: Option<usize>,

    /// Size of the upper-left corner printed for each matrix
    #[arg(long, default_value_t = 10)]
    preview: usize,

    /// Run every strategy, check they agree and print timings
    #[arg(long)]
    compare: bool,

    /// Verbosity level (repeat for more detail)
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig {
        tile_size: cli.tile_size,
        workers: cli.workers,
    };
    config.validate().context("invalid engine configuration")?;

    let first = Matrix::filled(cli.size, cli.value);
    let second = Matrix::filled(cli.size, second_fill(cli.value)?);

    if cli.compare {
        return compare(&first, &second, &config);
    }

    let Some(filename) = cli.filename.as_deref() else {
        print!("{}", first.preview(cli.preview));
        return Ok(());
    };
    let filename2 = cli
        .filename2
        .clone()
        .unwrap_or_else(|| with_suffix(filename, "2"));
    let result_file = cli
        .result
        .clone()
        .unwrap_or_else(|| with_suffix(filename, "result"));

    println!("Writing first matrix to {}", filename.display());
    save(&first, filename)?;
    println!("Writing second matrix to {}", filename2.display());
    save(&second, &filename2)?;

    let engine = cli
        .strategy
        .build_with_fallback(&config)
        .with_context(|| format!("cannot build {} strategy", cli.strategy))?;
    let start = Instant::now();
    let product = multiply_with_fallback(engine.as_ref(), &first, &second)?;
    info!(
        strategy = engine.name(),
        n = cli.size,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "multiplied"
    );

    println!("Writing result matrix to {}", result_file.display());
    save(&product, &result_file)?;

    println!("Testing files\n\nFirst matrix");
    print_file_preview(filename, cli.preview)?;
    println!("Second matrix");
    print_file_preview(&filename2, cli.preview)?;
    println!("Resulting matrix");
    print_file_preview(&result_file, cli.preview)?;

    Ok(())
}

/// Fill value of the second operand: one more than the first.
fn second_fill(value: Element) -> Result<Element> {
    match value.checked_add(1) {
        Some(v) => Ok(v),
        None => bail!("--value too large: {} + 1 overflows", value),
    }
}

/// `a.txt` + `2` -> `a.txt.2`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn print_file_preview(path: &Path, size: usize) -> Result<()> {
    let matrix = load(path).with_context(|| format!("reading back {}", path.display()))?;
    print!("{}", matrix.preview(size));
    Ok(())
}

/// Time one multiply. Returns the product and milliseconds taken.
fn bench_strategy(engine: &dyn Multiply, a: &Matrix, b: &Matrix) -> Result<(Matrix, f64)> {
    // Warmup
    engine.multiply(a, b)?;

    let start = Instant::now();
    let product = engine.multiply(a, b)?;
    Ok((product, start.elapsed().as_secs_f64() * 1000.0))
}

fn compare(a: &Matrix, b: &Matrix, config: &EngineConfig) -> Result<()> {
    let n = a.dim();
    println!("=== Matrix Multiplication Strategies ===\n");
    println!("Matrix: {}×{}", n, n);
    println!("{}", "-".repeat(50));

    let mut results: Vec<(&str, f64)> = Vec::new();
    let mut baseline: Option<Matrix> = None;

    for strategy in Strategy::ALL {
        let engine = strategy.build_with_fallback(config)?;
        let (product, time_ms) = bench_strategy(engine.as_ref(), a, b)?;

        if let Some(expected) = &baseline {
            if *expected != product {
                bail!("{} result differs from naive for {}×{}", strategy, n, n);
            }
        } else {
            baseline = Some(product);
        }
        results.push((strategy.name(), time_ms));
    }

    let baseline_time = results[0].1;
    for (i, (name, time_ms)) in results.iter().enumerate() {
        let speedup = baseline_time / time_ms;
        println!(
            "{}. {:10} {:10.2} ms  ({:.1}×)",
            i + 1,
            name,
            time_ms,
            speedup
        );
    }
    println!("\nAll strategies agree. Speedup relative to naive.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_suffix_default_names() {
        let first = Path::new("out/a.txt");
        assert_eq!(with_suffix(first, "2"), PathBuf::from("out/a.txt.2"));
        assert_eq!(with_suffix(first, "result"), PathBuf::from("out/a.txt.result"));
    }

    #[test]
    fn test_with_suffix_no_extension() {
        assert_eq!(with_suffix(Path::new("matrix"), "2"), PathBuf::from("matrix.2"));
    }

    #[test]
    fn test_second_fill() {
        assert_eq!(second_fill(1).unwrap(), 2);
        assert_eq!(second_fill(-1).unwrap(), 0);
        let err = second_fill(Element::MAX).unwrap_err();
        assert!(err.to_string().contains("--value too large"), "{}", err);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["matmul-engine", "-f", "a.txt"]).unwrap();
        assert_eq!(cli.size, 1024);
        assert_eq!(cli.value, 1);
        assert_eq!(cli.strategy, Strategy::Parallel);
        assert_eq!(cli.filename.as_deref(), Some(Path::new("a.txt")));
        assert!(cli.filename2.is_none());
        assert!(cli.result.is_none());
    }
}
