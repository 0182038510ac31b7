//! Normalize the Sauce Labs platform catalog.
//!
//! Usage:
//!   sauce-browsers normalize --pretty
//!   sauce-browsers normalize --source file --file fixture.json
//!   sauce-browsers snapshot --fixture fixture.json --expected expected.json
//!   sauce-browsers validate --file expected.json

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sauce_browsers::sources::cache_path_from_env;
use sauce_browsers::{
    BrowserIndex, CachedSource, DEFAULT_PLATFORMS_URL, DescriptorSchema, FileSource, HttpSource,
    ManifestSource, SauceBrowsers, SourceKind, normalize,
};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{Read, stdin};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sauce-browsers")]
#[command(about = "Normalize the Sauce Labs platform catalog into browser descriptors")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print normalized descriptors as JSON.
    Normalize {
        /// Where raw manifests come from.
        #[arg(long, default_value = "live", value_parser = ["live", "file"])]
        source: String,
        /// Fixture path for `--source file`.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Catalog URL for `--source live`.
        #[arg(long, env = "SAUCE_PLATFORMS_URL", default_value = DEFAULT_PLATFORMS_URL)]
        url: String,
        /// Cache the live catalog at this path and reuse it when present.
        #[arg(long)]
        cache: Option<PathBuf>,
        /// Alternative browser name catalog (JSON).
        #[arg(long)]
        aliases: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Fetch the live catalog once and write fixture plus expected output.
    Snapshot {
        #[arg(long)]
        fixture: PathBuf,
        #[arg(long)]
        expected: PathBuf,
        #[arg(long, env = "SAUCE_PLATFORMS_URL", default_value = DEFAULT_PLATFORMS_URL)]
        url: String,
    },
    /// Validate a descriptor list against the descriptor schema.
    Validate {
        /// Input file; reads stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Schema path; the bundled schema is used when omitted.
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Normalize {
            source,
            file,
            url,
            cache,
            aliases,
            pretty,
        } => {
            let source = build_source(SourceKind::try_from(source.as_str())?, file, url, cache)?;
            let mut engine = SauceBrowsers::new(source);
            if let Some(path) = aliases {
                engine = engine.with_aliases(Arc::new(BrowserIndex::load(&path)?));
            }
            let descriptors = engine.load().await?;
            print_json(&descriptors, pretty)
        }
        Command::Snapshot {
            fixture,
            expected,
            url,
        } => {
            let manifests = HttpSource::new(url)?.fetch().await?;
            let descriptors = normalize(&manifests, &BrowserIndex::bundled());
            write_json(&fixture, &manifests)?;
            write_json(&expected, &descriptors)?;
            tracing::info!(
                manifests = manifests.len(),
                descriptors = descriptors.len(),
                "wrote snapshot"
            );
            Ok(())
        }
        Command::Validate { file, schema } => {
            let schema = match schema {
                Some(path) => DescriptorSchema::load(&path)?,
                None => DescriptorSchema::bundled()?,
            };
            schema.validate(&read_input(file)?)
        }
    }
}

fn build_source(
    kind: SourceKind,
    file: Option<PathBuf>,
    url: String,
    cache: Option<PathBuf>,
) -> Result<Box<dyn ManifestSource>> {
    let source: Box<dyn ManifestSource> = match kind {
        SourceKind::Live => {
            let http = HttpSource::new(url)?;
            match cache.or_else(cache_path_from_env) {
                Some(path) => Box::new(CachedSource::new(http, path)),
                None => Box::new(http),
            }
        }
        SourceKind::File => {
            let path = file.context("--source file requires --file")?;
            Box::new(FileSource::new(path))
        }
        SourceKind::Static => bail!("the static source is only available to library callers"),
    };
    Ok(source)
}

fn read_input(file: Option<PathBuf>) -> Result<Value> {
    let mut buf = String::new();
    if let Some(path) = file {
        buf = fs::read_to_string(&path)
            .with_context(|| format!("reading input file {}", path.display()))?;
    } else {
        stdin()
            .read_to_string(&mut buf)
            .context("reading stdin for input JSON")?;
    }
    serde_json::from_str(&buf).context("parsing input JSON")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}
