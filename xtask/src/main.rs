use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "product_catalog_lambda";
const LAMBDA_BINARIES: [&str; 3] = [
    "list_products_lambda",
    "create_product_lambda",
    "catalog_runtime",
];
const DIST_DIR: &str = "infra/product_catalog/dist";
const DEFAULT_TARGET: &str = "x86_64-unknown-linux-gnu";

#[derive(Parser)]
#[command(name = "xtask", about = "Task runner for the product catalog workspace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run unit and integration tests for every catalog crate
    Test,
    /// Run CI checks (fmt, clippy, tests, packaging)
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build the catalog Lambda binaries and zip each one as `bootstrap`
    ServerlessPackage {
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: String,
        /// Build without `--release`
        #[arg(long)]
        debug: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    Check,
    Package,
    All,
}

fn main() {
    let result = match Cli::parse().command {
        Commands::Test => run_tests(),
        Commands::Ci { job } => match job {
            CiJob::Check => ci_check(),
            CiJob::Package => package_lambdas(DEFAULT_TARGET, true),
            CiJob::All => ci_check().and_then(|()| package_lambdas(DEFAULT_TARGET, true)),
        },
        Commands::ServerlessPackage { target, debug } => package_lambdas(&target, debug),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        exit(1);
    }
}

fn run_cargo(args: &[&str]) -> Result<(), String> {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .map_err(|error| format!("failed to execute cargo: {error}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("`cargo {}` exited with {status}", args.join(" ")))
    }
}

fn run_tests() -> Result<(), String> {
    run_cargo(&["test", "-p", "product_catalog_core"])?;
    run_cargo(&["test", "-p", LAMBDA_PACKAGE])
}

fn ci_check() -> Result<(), String> {
    run_cargo(&["fmt", "--all", "--", "--check"])?;
    run_cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])?;
    run_tests()
}

fn build_args(target: &str, debug: bool) -> Vec<&str> {
    let mut args = vec!["build", "-p", LAMBDA_PACKAGE, "--target", target];
    for binary in LAMBDA_BINARIES {
        args.extend(["--bin", binary]);
    }
    if !debug {
        args.push("--release");
    }
    args
}

fn package_lambdas(target: &str, debug: bool) -> Result<(), String> {
    run_cargo(&build_args(target, debug))?;

    let profile_dir = if debug { "debug" } else { "release" };
    let target_dir = Path::new("target").join(target).join(profile_dir);
    let dist_dir = Path::new(DIST_DIR);
    fs::create_dir_all(dist_dir)
        .map_err(|error| format!("failed to create '{}': {error}", dist_dir.display()))?;

    for binary in LAMBDA_BINARIES {
        let zip_path = dist_dir.join(format!("{binary}.zip"));
        package_lambda_zip(&target_dir.join(binary), &zip_path)?;
        eprintln!("packaged {}", zip_path.display());
    }
    Ok(())
}

/// Custom runtimes expect the executable at the archive root, named `bootstrap`.
fn package_lambda_zip(binary_path: &Path, zip_path: &Path) -> Result<(), String> {
    let binary = fs::read(binary_path).map_err(|error| {
        format!("expected lambda binary at '{}': {error}", binary_path.display())
    })?;
    let file = fs::File::create(zip_path)
        .map_err(|error| format!("failed to create '{}': {error}", zip_path.display()))?;

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .map_err(|error| format!("failed to start bootstrap entry: {error}"))?;
    zip.write_all(&binary)
        .map_err(|error| format!("failed to write bootstrap entry: {error}"))?;
    zip.finish()
        .map_err(|error| format!("failed to finish '{}': {error}", zip_path.display()))?;
    Ok(())
}
