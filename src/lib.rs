//! Sauce Labs platform catalog normalization.
//!
//! The vendor catalog mixes Selenium and Appium platforms under inconsistent
//! names and versions. `normalize` turns it into tool-agnostic descriptors;
//! `SauceBrowsers` binds that to a `ManifestSource` that does the fetching.

pub mod catalog;
pub mod engine;
pub mod manifest;
pub mod normalize;
pub mod schema_loader;
pub mod sources;
pub mod version;

pub use catalog::{BrowserCatalog, BrowserEntry, BrowserIndex};
pub use engine::SauceBrowsers;
pub use manifest::{AutomationBackend, RawManifest};
pub use normalize::{
    AppiumCapabilities, Capabilities, Descriptor, LegacyCapabilities, PreferredOver, Rejection,
    W3cCapabilities, Wants, classify_and_normalize, expand, normalize, normalize_one,
};
pub use schema_loader::DescriptorSchema;
pub use sources::{
    CachedSource, DEFAULT_PLATFORMS_URL, FileSource, HttpSource, ManifestSource, SourceKind,
    StaticSource,
};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Parse raw manifests from JSON text.
///
/// Accepts the vendor's array form, a single object, or one object per line.
pub fn parse_manifest_list(input: &str) -> Result<Vec<RawManifest>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No manifest input provided");
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<_>, _>>()
                .context("Unable to parse JSON array of manifests"),
            Value::Object(_) => serde_json::from_value(value)
                .map(|manifest| vec![manifest])
                .context("Unable to parse manifest"),
            _ => bail!("Unsupported JSON input; expected object or array"),
        };
    }

    let mut manifests = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let manifest: RawManifest = serde_json::from_str(line)
            .with_context(|| format!("Unable to parse manifest from line {}", idx + 1))?;
        manifests.push(manifest);
    }

    Ok(manifests)
}

/// Parse a descriptor list previously emitted by `normalize`.
pub fn parse_descriptor_list(input: &str) -> Result<Vec<Descriptor>> {
    serde_json::from_str(input.trim()).context("Unable to parse JSON array of descriptors")
}
