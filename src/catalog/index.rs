//! Indexed view of a browser name catalog.
//!
//! The index enforces the expected schema version and resolves any known
//! identifier (canonical name or alias, case-insensitive) to its canonical
//! entry. It is strict about duplicates so two catalogs cannot silently
//! disagree about what an identifier means.

use crate::catalog::{BROWSER_NAMES_SCHEMA_VERSION, BrowserCatalog, BrowserEntry, bundled_catalog};
use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

#[derive(Clone, Debug)]
/// Browser catalog plus a lookup keyed by lower-cased identifier.
pub struct BrowserIndex {
    entries: Vec<BrowserEntry>,
    by_identifier: BTreeMap<String, usize>,
}

impl BrowserIndex {
    /// Load and validate a catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let catalog =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::from_catalog(catalog)
    }

    /// Validate a parsed catalog and build the identifier lookup.
    pub fn from_catalog(catalog: BrowserCatalog) -> Result<Self> {
        if catalog.schema_version != BROWSER_NAMES_SCHEMA_VERSION {
            bail!(
                "schema_version '{}' not supported, expected {}",
                catalog.schema_version,
                BROWSER_NAMES_SCHEMA_VERSION
            );
        }
        let by_identifier = build_index(&catalog.browsers)?;
        Ok(Self {
            entries: catalog.browsers,
            by_identifier,
        })
    }

    /// Shared handle to the table compiled into the crate.
    ///
    /// Built on first use and reused for the rest of the process.
    pub fn bundled() -> Arc<BrowserIndex> {
        static BUNDLED: OnceLock<Arc<BrowserIndex>> = OnceLock::new();
        BUNDLED
            .get_or_init(|| {
                let catalog = bundled_catalog();
                let by_identifier = bundled_lookup(&catalog.browsers);
                Arc::new(BrowserIndex {
                    entries: catalog.browsers,
                    by_identifier,
                })
            })
            .clone()
    }

    /// Canonical short name for an identifier, if the catalog knows it.
    pub fn common(&self, identifier: &str) -> Option<&str> {
        self.entry(identifier).map(|entry| entry.name.as_str())
    }

    /// Display title for an identifier, if the catalog knows it.
    pub fn title(&self, identifier: &str) -> Option<&str> {
        self.entry(identifier).map(|entry| entry.title.as_str())
    }

    /// Canonical entries in catalog order.
    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    fn entry(&self, identifier: &str) -> Option<&BrowserEntry> {
        self.by_identifier
            .get(&identifier.to_lowercase())
            .map(|&idx| &self.entries[idx])
    }
}

impl Default for BrowserIndex {
    fn default() -> Self {
        BrowserIndex::bundled().as_ref().clone()
    }
}

/// Parse a browser name catalog from a JSON file.
pub fn load_catalog_from_path(path: &Path) -> Result<BrowserCatalog> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading browser catalog {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("parsing browser catalog {}", path.display()))
}

fn validate_identifier(kind: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{kind} must not be empty");
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | ' ' | '.' | '-'))
    {
        bail!("{kind} must match ^[a-z0-9_ .-]+$, got {value}");
    }
    Ok(())
}

/// Lookup for the compiled-in table; an invalid table logs and leaves every
/// identifier unresolved.
fn bundled_lookup(entries: &[BrowserEntry]) -> BTreeMap<String, usize> {
    match build_index(entries) {
        Ok(map) => map,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "bundled browser catalog is invalid");
            BTreeMap::new()
        }
    }
}

fn build_index(entries: &[BrowserEntry]) -> Result<BTreeMap<String, usize>> {
    if entries.is_empty() {
        bail!("browser catalog contains no entries");
    }

    let mut map = BTreeMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        validate_identifier("browser name", &entry.name)?;
        if entry.title.trim().is_empty() {
            bail!("browser {} has an empty title", entry.name);
        }
        for identifier in std::iter::once(&entry.name).chain(entry.aliases.iter()) {
            validate_identifier("browser alias", identifier)?;
            if let Some(&owner) = map.get(identifier.as_str()) {
                let owner: &BrowserEntry = &entries[owner];
                bail!(
                    "identifier '{}' claimed by both {} and {}",
                    identifier,
                    owner.name,
                    entry.name
                );
            }
            map.insert(identifier.clone(), idx);
        }
    }
    Ok(map)
}
