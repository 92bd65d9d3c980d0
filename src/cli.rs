//! Minimal CLI: load layout documents → (resolve | check)
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;

use crate::build::LayoutBuilder;
use crate::node::ExpectedKind;
use crate::outline::outline_opt;
use crate::registry::default_registry;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// build layout trees from JSON documents and print their outline, or batch-check documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// build each document and print the resolved outline
    Resolve(ResolveOut),
    /// validate documents in parallel and report per-file status
    Check(CheckReport),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /window/layout)
    #[arg(long)]
    json_pointer: Option<String>,

    /// expected kind of the root node
    #[arg(long, value_enum, default_value = "table")]
    expect: ExpectArg,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ExpectArg {
    Control,
    Row,
    Table,
}

#[derive(clap::Parser, Debug)]
struct ResolveOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckReport {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl From<ExpectArg> for ExpectedKind {
    fn from(arg: ExpectArg) -> Self {
        match arg {
            ExpectArg::Control => ExpectedKind::Control,
            ExpectArg::Row => ExpectedKind::Row,
            ExpectArg::Table => ExpectedKind::Table,
        }
    }
}

impl InputSettings {
    fn source_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        resolve_file_path_patterns(&self.input)
    }

    fn load_document(&self, source_path: &Path) -> anyhow::Result<serde_json::Value> {
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read {}", source_path.display()))?;
        let document = serde_json::from_str::<serde_json::Value>(&source)
            .with_context(|| format!("failed to parse {}", source_path.display()))?;
        match self.json_pointer.as_deref() {
            None => Ok(document),
            // a pointer selecting an explicit null is fine (absent node); a
            // pointer selecting nothing at all is not
            Some(pointer) => document.pointer(pointer).cloned().with_context(|| {
                format!(
                    "JSON pointer {pointer} selects nothing in {}",
                    source_path.display()
                )
            }),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Resolve(target) => run_resolve(target),
            Command::Check(target) => run_check(target),
        }
    }
}

fn run_resolve(target: &ResolveOut) -> anyhow::Result<()> {
    // debug path
    if target.no_op {
        eprintln!("{target:#?}");
        return Ok(());
    }

    let expected: ExpectedKind = target.input_settings.expect.into();
    let source_paths = target.input_settings.source_paths()?;

    // 1) build every document
    let mut outlines = Vec::new();
    for source_path in &source_paths {
        let document = target.input_settings.load_document(source_path)?;
        let node = LayoutBuilder::new(default_registry())
            .build(&document, expected)
            .with_context(|| format!("failed to resolve {}", source_path.display()))?;
        outlines.push(outline_opt(node.as_ref()));
    }

    // 2) a single input prints a bare outline, multiple print an array
    let view = match outlines.len() {
        1 => outlines.swap_remove(0),
        _ => serde_json::Value::Array(outlines),
    };
    let rendered = serde_json::to_string_pretty(&view)?;
    match target.out.as_ref() {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, &rendered)?;
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_check(target: &CheckReport) -> anyhow::Result<()> {
    let expected: ExpectedKind = target.input_settings.expect.into();
    let source_paths = target.input_settings.source_paths()?;

    // independent documents, checked in parallel
    let reports: Vec<(String, Result<&'static str, String>)> = source_paths
        .par_iter()
        .map(|source_path| {
            let name = source_path.display().to_string();
            let verdict = check_one(&target.input_settings, source_path, expected);
            (name, verdict)
        })
        .collect();

    let mut failures = 0usize;
    for (name, verdict) in &reports {
        match verdict {
            Ok(kind) => println!("{} {name}: {kind}", "ok".green()),
            Err(message) => {
                failures += 1;
                println!("{} {name}: {message}", "failed".red().bold());
            }
        }
    }
    let checked = reports.len();
    if failures > 0 {
        anyhow::bail!("{failures} of {checked} documents failed");
    }
    println!("{} {checked} documents", "passed".green().bold());
    Ok(())
}

fn check_one(
    settings: &InputSettings,
    source_path: &Path,
    expected: ExpectedKind,
) -> Result<&'static str, String> {
    let document = settings
        .load_document(source_path)
        .map_err(|error| format!("{error:#}"))?;
    match LayoutBuilder::new(default_registry()).build(&document, expected) {
        Ok(Some(node)) => Ok(node.kind().label()),
        Ok(None) => Ok("absent"),
        Err(error) => Err(error.to_string()),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // minimal detection for the `glob` crate syntax
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // an explicit glob matching nothing is surfaced as an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }
    Ok(out)
}
