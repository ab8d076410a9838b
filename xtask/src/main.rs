use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride-hailing fare workspace",
    long_about = "A unified CLI for running the quote demo, tests, benchmarks,\n\
                  and CI checks in the ride-hailing fare workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the quote demo (quote, tier prices, driver assignment)
    Demo {
        /// Log filter passed through RUST_LOG
        #[arg(long, env = "RUST_LOG", default_value = "ride_core=debug")]
        log: String,
    },
    /// Run the ride_core test suite
    Test,
    /// Run Criterion benchmarks, optionally saving or comparing a named baseline
    Bench {
        /// Save results under this baseline name
        #[arg(long, conflicts_with = "baseline")]
        save_baseline: Option<String>,
        /// Compare against a previously saved baseline
        #[arg(long)]
        baseline: Option<String>,
    },
    /// Run CI checks (fmt, clippy, tests, demo, benchmarks)
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
    /// Build and run the demo
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str], envs: &[(&str, &str)]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .envs(envs.iter().copied())
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    run_cargo_with_env(args, &[]);
}

fn run_cargo_with_env(args: &[&str], envs: &[(&str, &str)]) {
    let status = cargo(args, envs);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_demo(log: &str) {
    run_cargo_with_env(
        &["run", "-p", "ride_core", "--example", "quote_demo"],
        &[("RUST_LOG", log)],
    );
}

fn run_bench(extra: &[&str]) {
    let mut args = vec!["bench", "--package", "ride_core", "--bench", "performance"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
}

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

    step("Test ride_core");
    run_cargo(&["test", "-p", "ride_core"]);

    step("Test ride_core without test helpers");
    run_cargo(&["test", "-p", "ride_core", "--lib", "--no-default-features"]);
}

fn ci_examples() {
    step("Run quote_demo");
    run_demo("ride_core=info");
}

fn ci_bench() {
    step("Run benchmarks");
    run_bench(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { log } => run_demo(&log),
        Commands::Test => run_cargo(&["test", "-p", "ride_core"]),
        Commands::Bench {
            save_baseline,
            baseline,
        } => match (save_baseline, baseline) {
            (Some(name), _) => run_bench(&["--save-baseline", name.as_str()]),
            (None, Some(name)) => run_bench(&["--baseline", name.as_str()]),
            (None, None) => run_bench(&[]),
        },
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
