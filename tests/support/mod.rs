#![allow(dead_code)]

use anyhow::{Context, Result};
use sauce_browsers::{BrowserIndex, Descriptor, RawManifest, normalize, parse_manifest_list};
use std::fs;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn load_fixture() -> Result<Vec<RawManifest>> {
    let path = fixture_path("platforms.json");
    let data = fs::read_to_string(&path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    parse_manifest_list(&data)
}

pub fn normalized_fixture() -> Result<Vec<Descriptor>> {
    Ok(normalize(&load_fixture()?, &BrowserIndex::bundled()))
}

/// Descriptors whose `name` list equals `names`.
pub fn with_names<'a>(descriptors: &'a [Descriptor], names: &[&str]) -> Vec<&'a Descriptor> {
    descriptors
        .iter()
        .filter(|descriptor| descriptor.name == names)
        .collect()
}
