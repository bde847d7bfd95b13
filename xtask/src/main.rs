use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride dispatch workspace",
    long_about = "A unified CLI for running the dispatch server, benchmarks,\n\
                  and CI checks in the ride dispatch workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dispatch server
    Serve {
        /// Port to listen on
        #[arg(long, env = "DISPATCH_PORT", default_value_t = 8000)]
        port: u16,
        /// Directory with static UI files
        #[arg(long)]
        static_dir: Option<String>,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks (fmt, clippy, tests, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run benchmarks
    Bench,
    /// Run check + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

/// Run cargo with `args`, exiting with its status code on failure.
fn run_cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    let status = match Command::new("cargo").args(args).status() {
        Ok(status) => status,
        Err(error) => {
            eprintln!("failed to execute cargo: {error}");
            exit(1);
        }
    };
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

const BENCH_ARGS: [&str; 5] = ["bench", "--package", "dispatch_core", "--bench", "assignment"];

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test dispatch_core");
    run_cargo(&["test", "-p", "dispatch_core"]);

    step("Test dispatch_server");
    run_cargo(&["test", "-p", "dispatch_server"]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&BENCH_ARGS);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            static_dir,
            release,
        } => {
            let port = port.to_string();
            let mut args = vec!["run", "-p", "dispatch_server"];
            if release {
                args.push("--release");
            }
            args.extend(["--", "--port", port.as_str()]);
            if let Some(dir) = static_dir.as_deref() {
                args.extend(["--static-dir", dir]);
            }
            run_cargo(&args);
        }
        Commands::Bench => run_cargo(&BENCH_ARGS),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
