// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project automation
//!
//! `cargo xtask ci` runs the same checks as continuous integration: clippy,
//! formatting, docs, build, tests, and a smoke run of the `wrls` binary over
//! the demo review fixture.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{io, process::Output};

use cargo_metadata::{MetadataCommand, camino::Utf8PathBuf};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, bail, eyre},
};
use duct::cmd;
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const REVIEW_FIXTURE: &str = "demos/review_fixture.json";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, fixtures)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Run the wrls binary over the demo review fixture
    #[command(visible_alias = "cf")]
    CheckFixtures,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Lint formatting, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::CheckFixtures => check_fixtures(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
        }
    }
}

/// Run CI checks (lint, build, test, fixtures)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    check_fixtures()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint clippy, docs, and formatting
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without warnings for every default package
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all"])
}

/// Run lib tests, then doc tests
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?;
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib and binary tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run the `wrls` binary over the demo fixture.
///
/// Every review charge reference and each of its elements must render, and
/// a wrapping window must split a financial year into two periods.
fn check_fixtures() -> Result<()> {
    let root: Utf8PathBuf = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?
        .workspace_root;
    let fixture: Utf8PathBuf = root.join(REVIEW_FIXTURE);

    let json: String = std::fs::read_to_string(&fixture)
        .wrap_err_with(|| format!("failed to read {fixture}"))?;
    let records: Vec<Value> =
        serde_json::from_str(&json).wrap_err_with(|| format!("failed to parse {fixture}"))?;

    for record in &records {
        let reference: &str = record["id"]
            .as_str()
            .ok_or_else(|| eyre!("review record without an id in {fixture}"))?;
        let elements: usize = record["charge_elements"].as_array().map_or(0, Vec::len);

        run_wrls(&["review", "--fixture", fixture.as_str(), "--reference", reference])?;
        for element in 1..=elements {
            run_wrls(&[
                "review",
                "--fixture",
                fixture.as_str(),
                "--reference",
                reference,
                "--element",
                &element.to_string(),
            ])?;
        }
    }

    let periods: String = run_wrls(&[
        "periods",
        "--start",
        "2023-04-01",
        "--end",
        "2024-03-31",
        "--window",
        "1/10-30/4",
    ])?;
    let expected: &str = "1 April 2023 to 30 April 2023\n1 October 2023 to 31 March 2024";
    if periods.trim() != expected {
        bail!("unexpected abstraction periods:\n{periods}");
    }

    tracing::info!(records = records.len(), "fixtures rendered");
    Ok(())
}

/// Run the `wrls` binary and capture its standard output
fn run_wrls(args: &[&str]) -> Result<String> {
    let mut cargo_args: Vec<&str> = vec!["run", "--quiet", "--package", "wrls-cli", "--"];
    cargo_args.extend_from_slice(args);

    let expression = cmd("cargo", cargo_args).stdout_capture();
    let output: Output = expression.run_with_trace()?;
    String::from_utf8(output.stdout).wrap_err("wrls wrote invalid UTF-8")
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
