//! Development automation for the Carbonwise workspace.
//!
//! Run with: `cargo xtask <task>`. Output goes straight to the terminal with
//! `println!`; there is no subscriber in a build script helper.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write as _;
use std::path::Path;
use std::process::{Command, ExitCode};
use std::{env, fs};

use anyhow::{bail, Context};

mod features;

/// Where ts-rs writes bindings for `carbonwise-domain`
const BINDINGS_DIR: &str = "crates/domain/bindings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Ci,
    Fmt,
    Clippy,
    Test,
    Bench,
    Codegen,
    Features,
}

impl Task {
    const ALL: [Task; 7] = [
        Task::Ci,
        Task::Fmt,
        Task::Clippy,
        Task::Test,
        Task::Bench,
        Task::Codegen,
        Task::Features,
    ];

    /// Checks `ci` runs, in order
    const CI_STEPS: [Task; 4] = [Task::Fmt, Task::Clippy, Task::Features, Task::Test];

    fn name(self) -> &'static str {
        match self {
            Task::Ci => "ci",
            Task::Fmt => "fmt",
            Task::Clippy => "clippy",
            Task::Test => "test",
            Task::Bench => "bench",
            Task::Codegen => "codegen",
            Task::Features => "test-features",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Task::Ci => "fmt, clippy, test-features and test in sequence",
            Task::Fmt => "check formatting",
            Task::Clippy => "lint every target with warnings denied",
            Task::Test => "run the workspace test suite",
            Task::Bench => "run the estimator benchmarks",
            Task::Codegen => "export domain types to TypeScript",
            Task::Features => "compile each crate with ts-gen on and off",
        }
    }

    fn parse(arg: &str) -> Option<Task> {
        Task::ALL.into_iter().find(|task| task.name() == arg)
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Task::Ci => {
                let total = Task::CI_STEPS.len();
                for (step, task) in Task::CI_STEPS.into_iter().enumerate() {
                    println!("==> [{}/{total}] {}", step + 1, task.name());
                    task.run()?;
                }
                println!("\n✓ CI checks passed");
                Ok(())
            }
            Task::Fmt => cargo(&["fmt", "--all", "--", "--check"], "run `cargo fmt --all`"),
            Task::Clippy => cargo(
                &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
                "clippy reported problems",
            ),
            Task::Test => cargo(&["test", "--workspace"], "tests failed"),
            Task::Bench => cargo(&["bench", "-p", "carbonwise-core"], "benchmarks failed"),
            Task::Codegen => codegen(Path::new(BINDINGS_DIR)),
            Task::Features => features::check_all(),
        }
    }
}

fn main() -> ExitCode {
    let Some(arg) = env::args().nth(1).filter(|arg| arg != "help") else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    let Some(task) = Task::parse(&arg) else {
        eprintln!("unknown task `{arg}`\n");
        print_usage();
        return ExitCode::FAILURE;
    };

    match task.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("xtask {} failed: {err:#}", task.name());
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("usage: cargo xtask <task>\n");
    for task in Task::ALL {
        println!("    {:<14} {}", task.name(), task.summary());
    }
}

/// Run cargo with `args`; a non-zero exit becomes an error carrying `hint`.
fn cargo(args: &[&str], hint: &str) -> anyhow::Result<()> {
    let status = Command::new(env::var("CARGO").unwrap_or_else(|_| "cargo".into()))
        .args(args)
        .status()
        .with_context(|| format!("could not spawn `cargo {}`", args.join(" ")))?;

    if !status.success() {
        bail!("`cargo {}` exited with {status}: {hint}", args.join(" "));
    }
    Ok(())
}

/// ts-rs exports bindings while the `ts-gen` tests run; an index is written
/// afterwards so the frontend imports from one module.
fn codegen(bindings: &Path) -> anyhow::Result<()> {
    cargo(
        &["test", "-p", "carbonwise-domain", "--features", "ts-gen", "--lib"],
        "binding export tests failed",
    )?;

    if !bindings.is_dir() {
        bail!("no bindings were written to {}", bindings.display());
    }

    let count = write_index(bindings)?;
    println!("✓ {count} types exported to {}", bindings.display());
    Ok(())
}

fn write_index(bindings: &Path) -> anyhow::Result<usize> {
    let mut modules: Vec<String> = fs::read_dir(bindings)
        .with_context(|| format!("reading {}", bindings.display()))?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let stem = path.file_stem()?.to_str()?;
            (path.extension()? == "ts" && stem != "index").then(|| stem.to_string())
        })
        .collect();
    modules.sort();

    let mut index = String::from("// Generated by `cargo xtask codegen`. Do not edit.\n\n");
    for module in &modules {
        let _ = writeln!(index, "export type {{ {module} }} from './{module}';");
    }

    let path = bindings.join("index.ts");
    fs::write(&path, index).with_context(|| format!("writing {}", path.display()))?;
    Ok(modules.len())
}
