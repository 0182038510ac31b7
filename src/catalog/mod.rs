//! Browser name catalog.
//!
//! This module holds the alias/title table the normalizer uses to turn vendor
//! identifiers into canonical short names (`"internet explorer"` -> `"ie"`)
//! and display titles (`"ios_saf"` -> `"iOS Safari"`). The bundled table is
//! built once per process; alternative tables load from JSON through
//! `BrowserIndex::load` and are validated the same way.

pub mod index;

pub use index::{BrowserIndex, load_catalog_from_path};

use serde::{Deserialize, Serialize};

/// Schema marker for browser name catalogs on disk.
pub const BROWSER_NAMES_SCHEMA_VERSION: &str = "browser_names_v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One canonical browser and the identifiers that resolve to it.
pub struct BrowserEntry {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// On-disk shape of a browser name catalog.
pub struct BrowserCatalog {
    pub schema_version: String,
    pub browsers: Vec<BrowserEntry>,
}

const BUNDLED: &[(&str, &str, &[&str])] = &[
    ("chrome", "Chrome", &["googlechrome", "google chrome"]),
    ("and_chr", "Chrome for Android", &["chrome for android", "android chrome"]),
    ("firefox", "Firefox", &["ff", "mozilla firefox"]),
    ("and_ff", "Firefox for Android", &["firefox for android"]),
    ("safari", "Safari", &[]),
    ("ios_saf", "iOS Safari", &["ios safari", "mobile safari"]),
    ("ie", "Internet Explorer", &["internet explorer", "explorer"]),
    ("ie_mob", "IE Mobile", &["internet explorer mobile"]),
    ("edge", "Edge", &["microsoftedge", "microsoft edge"]),
    ("android", "Android Browser", &["android browser"]),
    ("opera", "Opera", &[]),
    ("op_mob", "Opera Mobile", &["opera mobile"]),
    ("samsung", "Samsung Internet", &["samsung internet"]),
];

/// The catalog compiled into the crate.
pub fn bundled_catalog() -> BrowserCatalog {
    BrowserCatalog {
        schema_version: BROWSER_NAMES_SCHEMA_VERSION.to_string(),
        browsers: BUNDLED
            .iter()
            .map(|(name, title, aliases)| BrowserEntry {
                name: name.to_string(),
                title: title.to_string(),
                aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            })
            .collect(),
    }
}
