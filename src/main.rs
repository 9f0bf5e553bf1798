//! uuidkit CLI
//!
//! A command-line tool for SHA-1 digests and RFC 4122 identifiers.
//!
//! # Commands
//!
//! - `generate` - Random (version 4) identifiers
//! - `named` - Name-based (version 5) identifier
//! - `inspect` - Parse an identifier and show its fields
//! - `sha1` - Digest of text, a file or stdin
//! - `benchmark` - Run performance benchmark
//!
//! Log output goes to stderr; set `UUIDKIT_LOG` (e.g. `debug`) to change the
//! filter.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuidkit::algorithm::{Case, DIGEST_SIZE};
use uuidkit::{Generator, Namespace, Sha1, Uuid, UuidReport};

#[derive(Parser)]
#[command(name = "uuidkit")]
#[command(author = "Cyberia")]
#[command(version = "0.2.0")]
#[command(about = "SHA-1 digests and RFC 4122 UUIDs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random (version 4) UUIDs
    Generate {
        /// Number of identifiers to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Print lowercase hex digits
        #[arg(long)]
        lower: bool,

        /// Print a JSON report per identifier
        #[arg(long)]
        json: bool,
    },

    /// Generate a name-based (version 5) UUID
    Named {
        /// dns, url, oid, x500 or a UUID
        #[arg(long)]
        namespace: Namespace,

        /// The name, hashed as UTF-8
        name: String,

        /// Print lowercase hex digits
        #[arg(long)]
        lower: bool,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Parse a UUID and show its fields
    Inspect {
        /// The identifier, in any accepted form
        text: String,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Print the SHA-1 digest of text, a file or stdin
    Sha1 {
        /// Text to hash (reads stdin when neither this nor --file is given)
        text: Option<String>,

        /// File to hash
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of identifiers to generate
        #[arg(short, long, default_value = "1000000")]
        count: u64,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { count, lower, json } => cmd_generate(count, case(lower), json),
        Commands::Named {
            namespace,
            name,
            lower,
            json,
        } => cmd_named(namespace, &name, case(lower), json),
        Commands::Inspect { text, json } => cmd_inspect(&text, json),
        Commands::Sha1 { text, file } => cmd_sha1(text, file),
        Commands::Benchmark { count, threads } => cmd_benchmark(count, threads),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("UUIDKIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn case(lower: bool) -> Case {
    if lower {
        Case::Lower
    } else {
        Case::Upper
    }
}

fn print_id(id: &Uuid, case: Case, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", UuidReport::new(id, case).to_json()?);
    } else {
        println!("{}", id.to_text(case));
    }
    Ok(())
}

fn cmd_generate(count: usize, case: Case, json: bool) -> anyhow::Result<()> {
    let generator = Generator::new();
    for id in generator.take(count) {
        print_id(&id, case, json)?;
    }
    Ok(())
}

fn cmd_named(namespace: Namespace, name: &str, case: Case, json: bool) -> anyhow::Result<()> {
    tracing::debug!(%namespace, name, "deriving name-based identifier");
    print_id(&namespace.derive(name), case, json)
}

fn cmd_inspect(text: &str, json: bool) -> anyhow::Result<()> {
    let id: Uuid = text
        .parse()
        .map_err(|e| anyhow::anyhow!("'{}' is not a UUID: {}", text, e))?;

    let report = UuidReport::new(&id, Case::Upper);
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

fn cmd_sha1(text: Option<String>, file: Option<PathBuf>) -> anyhow::Result<()> {
    let mut hasher = Sha1::new();

    match (text, file) {
        (Some(text), _) => {
            hasher.update_str(&text);
        }
        (None, Some(path)) => {
            let mut file = File::open(&path)
                .map_err(|e| anyhow::anyhow!("Cannot open {}: {}", path.display(), e))?;
            let bytes = io::copy(&mut file, &mut hasher)?;
            tracing::debug!(path = %path.display(), bytes, "hashed file");
        }
        (None, None) => {
            let mut input = Vec::new();
            io::stdin().read_to_end(&mut input)?;
            hasher.update(&input);
        }
    }

    println!("{}", hasher.finish());
    Ok(())
}

fn cmd_benchmark(count: u64, threads: Option<usize>) -> anyhow::Result<()> {
    let num_threads = threads.unwrap_or_else(num_cpus::get).max(1);
    println!(
        "Running benchmark with {} identifiers on {} threads...",
        count, num_threads
    );

    // SHA-1 throughput, single thread
    let block = vec![0x5Au8; 1 << 20];
    let rounds = 64;
    let start = Instant::now();
    let mut hasher = Sha1::new();
    for _ in 0..rounds {
        hasher.update(&block);
    }
    let digest = hasher.finish();
    let sha1_elapsed = start.elapsed();
    let mib_per_sec = rounds as f64 / sha1_elapsed.as_secs_f64();

    // Generation, one generator per thread
    let per_thread = count / num_threads as u64;
    let remainder = count % num_threads as u64;
    let start = Instant::now();
    std::thread::scope(|scope| {
        for i in 0..num_threads as u64 {
            let quota = per_thread + u64::from(i < remainder);
            scope.spawn(move || {
                let mut generator = Generator::new();
                for _ in 0..quota {
                    std::hint::black_box(generator.generate());
                }
            });
        }
    });
    let gen_elapsed = start.elapsed();
    let rate = count as f64 / gen_elapsed.as_secs_f64();

    println!("\nResults:");
    println!(
        "  SHA-1: {} MiB in {:.2}s ({:.2} MiB/s)",
        rounds,
        sha1_elapsed.as_secs_f64(),
        mib_per_sec
    );
    println!("  Digest: {}", digest);
    println!(
        "  Generated: {} in {:.2}s ({:.0} UUIDs/s)",
        count,
        gen_elapsed.as_secs_f64(),
        rate
    );
    println!("\nAlgorithm parameters:");
    println!("  Block size: {} bytes", uuidkit::algorithm::BLOCK_SIZE);
    println!("  Digest size: {} bytes", DIGEST_SIZE);
    println!("  UUID size: {} bytes", uuidkit::algorithm::UUID_SIZE);

    Ok(())
}
