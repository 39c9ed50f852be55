use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use sortkit::common::io::{parse_records, read_input};
use sortkit::common::{init_logging, reset_sigpipe};
use sortkit::external::{CheckOutcome, DEFAULT_SPILL_PREFIX, ExternalSorter, check_sorted_file};
use sortkit::sort::{
    Elem, bucket_sort, create_rng, hybrid_sort, insertion_sort, iterative_merge_sort,
    randomized_quick_sort,
};
use sortkit::SortError;

#[derive(Parser)]
#[command(name = "fxsort", version, about = "Sort newline-delimited integer files")]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sort a file larger than memory by spilling sorted chunks and merging them
    External(ExternalArgs),
    /// Sort a file entirely in memory with a chosen algorithm
    Memory(MemoryArgs),
    /// Check whether a file is sorted ascending; exit 1 if not
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct ExternalArgs {
    /// Records held in memory per chunk (suffixes K, M, G multiply by 1024)
    #[arg(short = 'k', long = "chunk-size", value_name = "K")]
    chunk_size: String,

    /// Number of chunks to spill
    #[arg(short = 'm', long = "chunks", value_name = "M")]
    chunks: usize,

    /// Directory for spill files (default: a private temporary directory)
    #[arg(short = 'T', long = "temporary-directory", value_name = "DIR")]
    temp_dir: Option<PathBuf>,

    /// Spill file name prefix
    #[arg(long = "prefix", default_value = DEFAULT_SPILL_PREFIX)]
    prefix: String,

    /// Keep spill files after the merge
    #[arg(long = "keep-spills")]
    keep_spills: bool,

    /// Seed for pivot selection
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Input file
    input: PathBuf,

    /// Output file
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    Quick,
    Hybrid,
    Insertion,
    Merge,
    Bucket,
}

#[derive(clap::Args)]
struct MemoryArgs {
    /// Sorting algorithm
    #[arg(short = 'a', long = "algorithm", value_enum, default_value = "hybrid")]
    algorithm: Algorithm,

    /// Sort descending
    #[arg(short = 'r', long = "reverse")]
    reverse: bool,

    /// Seed for pivot selection
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Write result to FILE instead of standard output
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Input file ('-' for standard input)
    #[arg(default_value = "-")]
    input: String,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// File to check
    input: PathBuf,
}

/// Parse a record count like "4096", "4K", "1M".
fn parse_count(s: &str) -> Result<usize> {
    let s = s.trim();
    if s.is_empty() {
        bail!("empty count");
    }

    let (num_part, suffix) = if s.ends_with(|c: char| c.is_ascii_alphabetic()) {
        let (n, sfx) = s.split_at(s.len() - 1);
        (n, sfx.chars().next())
    } else {
        (s, None)
    };

    let base: usize = num_part
        .parse()
        .with_context(|| format!("invalid count '{}'", s))?;

    let multiplier: usize = match suffix {
        Some('K') | Some('k') => 1024,
        Some('M') | Some('m') => 1024 * 1024,
        Some('G') | Some('g') => 1024 * 1024 * 1024,
        Some(c) => bail!("invalid suffix '{}' in count '{}'", c, s),
        None => 1,
    };

    base.checked_mul(multiplier)
        .with_context(|| format!("count '{}' is too large", s))
}

fn run_external(args: &ExternalArgs) -> Result<()> {
    let chunk_size = parse_count(&args.chunk_size).context("invalid chunk size")?;

    let (scratch, spill_dir) = match &args.temp_dir {
        Some(dir) => (None, dir.clone()),
        None => {
            let tmp = tempfile::Builder::new()
                .prefix("fxsort")
                .tempdir()
                .context("cannot create temporary directory")?;
            let path = tmp.path().to_path_buf();
            (Some(tmp), path)
        }
    };

    let mut sorter = ExternalSorter::new(chunk_size, args.chunks)
        .spill_dir(&spill_dir)
        .spill_prefix(args.prefix.clone());
    if let Some(seed) = args.seed {
        sorter = sorter.seed(seed);
    }

    let stats = sorter.sort_file(&args.input, &args.output)?;

    if args.keep_spills {
        if let Some(tmp) = scratch {
            let kept = tmp.keep();
            info!("spill files kept in {}", kept.display());
        }
    } else {
        for path in &stats.spill_paths {
            std::fs::remove_file(path)
                .with_context(|| format!("cannot remove spill file {}", path.display()))?;
        }
    }
    Ok(())
}

fn sort_in_memory(values: &mut [i64], args: &MemoryArgs) -> Result<()> {
    let high = values.len().saturating_sub(1);
    let mut rng = create_rng(args.seed);
    let mut honours_reverse = false;

    match args.algorithm {
        Algorithm::Quick => randomized_quick_sort(values, 0, high, &mut rng)?,
        Algorithm::Hybrid => hybrid_sort(values, 0, high, &mut rng)?,
        Algorithm::Merge => iterative_merge_sort(values)?,
        Algorithm::Insertion => {
            insertion_sort(values, 0, high, args.reverse)?;
            honours_reverse = true;
        }
        Algorithm::Bucket => {
            let mut records = values
                .iter()
                .map(|&v| {
                    u64::try_from(v)
                        .map(|key| Elem::new(key, ()))
                        .map_err(|_| SortError::NegativeKey { value: v })
                })
                .collect::<sortkit::Result<Vec<_>>>()?;
            bucket_sort(&mut records, 0, high, args.reverse)?;
            for (slot, record) in values.iter_mut().zip(&records) {
                // Keys came from non-negative i64 values, so they fit.
                *slot = record.key as i64;
            }
            honours_reverse = true;
        }
    }

    if args.reverse && !honours_reverse {
        values.reverse();
    }
    Ok(())
}

fn run_memory(args: &MemoryArgs) -> Result<()> {
    let data = read_input(&args.input)?;
    let mut values = parse_records(&data, Path::new(&args.input))?;
    drop(data);

    sort_in_memory(&mut values, args)?;
    info!("sorted {} records in memory", values.len());

    let mut itoa_buf = itoa::Buffer::new();
    let mut write_all = |out: &mut dyn Write| -> io::Result<()> {
        for &v in &values {
            out.write_all(itoa_buf.format(v).as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_all(&mut BufWriter::new(file))
                .with_context(|| format!("write failed: {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            write_all(&mut BufWriter::new(stdout.lock())).context("write failed")?;
        }
    }
    Ok(())
}

fn run_check(args: &CheckArgs) -> Result<bool> {
    match check_sorted_file(&args.input)? {
        CheckOutcome::Sorted => Ok(true),
        CheckOutcome::Disorder { line, value } => {
            eprintln!(
                "fxsort: {}:{}: disorder: {}",
                args.input.display(),
                line,
                value
            );
            Ok(false)
        }
    }
}

fn main() {
    reset_sigpipe();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::External(args) => run_external(args).map(|()| true),
        Command::Memory(args) => run_memory(args).map(|()| true),
        Command::Check(args) => run_check(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("fxsort: {:#}", e);
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1024").unwrap(), 1024);
        assert_eq!(parse_count("4K").unwrap(), 4096);
        assert_eq!(parse_count("1m").unwrap(), 1024 * 1024);
        assert!(parse_count("").is_err());
        assert!(parse_count("12X").is_err());
        assert!(parse_count("abc").is_err());
    }
}
