//! Catalog normalization.
//!
//! Two stages: `expand` appends synthetic records for vendor quirks, then
//! `classify_and_normalize` turns every record into a descriptor or drops
//! it. Records are independent; output keeps input order with synthetic
//! records after all originals.

pub mod capabilities;
pub mod classify;
pub mod descriptor;
pub mod naming;
pub mod preference;
pub mod quirks;

pub use capabilities::{AppiumCapabilities, Capabilities, LegacyCapabilities, W3cCapabilities};
pub use classify::{Classified, DeviceFamily, Rejection, Target, classify};
pub use descriptor::{Descriptor, Wants};
pub use preference::PreferredOver;

use crate::catalog::BrowserIndex;
use crate::manifest::RawManifest;

/// Originals followed by quirk-correction records.
pub fn expand(manifests: &[RawManifest]) -> Vec<RawManifest> {
    manifests
        .iter()
        .cloned()
        .chain(quirks::corrections(manifests))
        .collect()
}

/// Normalize one record, reporting why it was dropped when it is.
pub fn normalize_one(manifest: &RawManifest, index: &BrowserIndex) -> Result<Descriptor, Rejection> {
    let classified = classify(manifest)?;
    let capabilities = capabilities::synthesize(manifest, &classified);
    Ok(descriptor::assemble(manifest, &classified, capabilities, index))
}

/// Normalize already-expanded records, silently dropping rejected ones.
pub fn classify_and_normalize(manifests: &[RawManifest], index: &BrowserIndex) -> Vec<Descriptor> {
    manifests
        .iter()
        .filter_map(|manifest| match normalize_one(manifest, index) {
            Ok(descriptor) => Some(descriptor),
            Err(rejection) => {
                tracing::debug!(
                    api_name = %manifest.api_name,
                    version = %manifest.short_version,
                    backend = %manifest.automation_backend,
                    %rejection,
                    "dropping manifest"
                );
                None
            }
        })
        .collect()
}

/// Full pipeline over a raw catalog.
pub fn normalize(manifests: &[RawManifest], index: &BrowserIndex) -> Vec<Descriptor> {
    let expanded = expand(manifests);
    let descriptors = classify_and_normalize(&expanded, index);
    tracing::info!(
        raw = manifests.len(),
        expanded = expanded.len(),
        emitted = descriptors.len(),
        "normalized platform catalog"
    );
    descriptors
}
