//! asmdoc — generate API reference documents from assembly metadata exports.
//!
//! One JSON export per assembly in, one directory of rendered reference
//! documents per assembly out: a document per type plus one per overload
//! group of members. Formats: markdown (default), html.

mod badges;
mod comment;
mod generate;
mod index;
mod model;
mod paths;
mod render;
mod select;
mod signature;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "asmdoc",
    about = "Generate API reference documents from assembly metadata exports"
)]
struct Cli {
    /// Input metadata exports (glob patterns supported)
    #[arg(required = true)]
    files: Vec<String>,

    /// Output root directory
    #[arg(short = 'o', long, default_value = "./Generated")]
    output: PathBuf,

    /// Output format: markdown (default), html
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let input_files = expand_globs(&cli.files)?;
    if input_files.is_empty() {
        bail!("no input files matched");
    }

    let backend = render::create_backend(&cli.format)?;
    let paths = paths::PathResolver::new(&cli.output, backend.extension())?;

    // Assemblies are generated strictly sequentially; the first fatal
    // error aborts the whole run.
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file: model::MetadataFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        file.validate()
            .with_context(|| format!("invalid metadata export {}", path.display()))?;

        let index = index::DocIndex::new(&file.assembly);
        let generator = generate::Generator::new(&index, backend.as_ref(), &paths);
        let summary = generator
            .run()
            .with_context(|| format!("generation failed for {}", file.assembly.name))?;
        println!(
            "{}: {} types, {} member documents",
            file.assembly.name, summary.types, summary.member_docs
        );
    }

    Ok(())
}

/// Expand glob patterns into a list of real file paths. Bare directory
/// paths are scanned (non-recursively) for .json exports.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("json") {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic processing order
    files.sort();
    files.dedup();
    Ok(files)
}
