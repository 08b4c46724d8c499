//! protoc-gen-twirp_ruby - protoc plugin for Twirp Ruby services
//!
//! Modes:
//! - no arguments: plugin mode, `CodeGeneratorRequest` on stdin and
//!   `CodeGeneratorResponse` on stdout (this is how protoc invokes it)
//! - `--descriptor-set <path> --file <name>... --out <dir>`: generate from a
//!   serialized `FileDescriptorSet` straight into a directory
//!
//! Usage with protoc:
//!
//! ```bash
//! protoc --ruby_out=. --twirp_ruby_out=. --twirp_ruby_opt=skip_empty service.proto
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use prost::Message;
use prost_types::FileDescriptorSet;
use prost_types::compiler::CodeGeneratorRequest;
use std::io::{Read, Write};
use std::path::{Component, Path, PathBuf};
use twirp_ruby_codegen::{GeneratorConfig, LogLevel, SchemaSet, generate};

mod logging;
mod request;

#[derive(Parser)]
#[command(name = "protoc-gen-twirp_ruby")]
#[command(author, version, about = "protoc plugin generating Twirp services for Ruby", long_about = None)]
struct Cli {
    /// Serialized FileDescriptorSet to generate from instead of reading stdin
    #[arg(short, long, requires_all = ["file", "out"])]
    descriptor_set: Option<PathBuf>,

    /// File to generate, as named in the descriptor set (repeatable)
    #[arg(short, long)]
    file: Vec<String>,

    /// Output directory for generated files
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Generator options, same syntax as --twirp_ruby_opt
    #[arg(short, long, default_value = "")]
    parameter: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.descriptor_set {
        Some(descriptor_set) => {
            let out = cli.out.context("--out is required with --descriptor-set")?;
            run_offline(&descriptor_set, &cli.file, &out, &cli.parameter)
        }
        None => run_plugin(),
    }
}

/// Plugin mode: request on stdin, response on stdout
fn run_plugin() -> Result<()> {
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .context("Failed to read CodeGeneratorRequest from stdin")?;

    let req = CodeGeneratorRequest::decode(buf.as_slice()).context(
        "Failed to decode CodeGeneratorRequest, make sure this runs as a protoc plugin",
    )?;

    let response = match GeneratorConfig::from_parameter(req.parameter()) {
        Ok(config) => {
            logging::init_logging(config.log_level);
            request::respond(&req, &config)
        }
        Err(e) => {
            logging::init_logging(LogLevel::default());
            request::error_response(&e)
        }
    };

    let mut out = Vec::with_capacity(response.encoded_len());
    response
        .encode(&mut out)
        .context("Failed to encode CodeGeneratorResponse")?;
    std::io::stdout()
        .write_all(&out)
        .context("Failed to write CodeGeneratorResponse to stdout")?;

    Ok(())
}

/// Offline mode: descriptor set from disk, files written under `out`
fn run_offline(descriptor_set: &Path, files: &[String], out: &Path, parameter: &str) -> Result<()> {
    let config = GeneratorConfig::from_parameter(parameter)?;
    logging::init_logging(config.log_level);

    let bytes = std::fs::read(descriptor_set)
        .with_context(|| format!("Failed to read {descriptor_set:?}"))?;
    let set = FileDescriptorSet::decode(bytes.as_slice())
        .with_context(|| format!("Failed to decode FileDescriptorSet from {descriptor_set:?}"))?;

    let schema = SchemaSet::new(set.file.iter().map(request::schema_file).collect());
    let generated = generate(&schema, files, &config)?;

    for file in &generated {
        let path = output_path(out, &file.name)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }
        std::fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {path:?}"))?;
        println!("✓ {}", path.display());
    }

    Ok(())
}

/// Place a generated file under `out`, refusing names that would escape it
fn output_path(out: &Path, name: &str) -> Result<PathBuf> {
    let relative = Path::new(name);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        anyhow::bail!("Refusing to write {name:?} outside of {out:?}");
    }
    Ok(out.join(relative))
}
