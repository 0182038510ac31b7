//! Capability synthesis for classified manifests.
//!
//! Appium records get an `appium` object; legacy records get a Selenium 2/3
//! `legacy` object plus a `w3c` object for browser versions the vendor serves
//! over the W3C protocol.

use crate::manifest::RawManifest;
use crate::normalize::classify::{Classified, DeviceFamily, Target};
use crate::version::{clean_version, major_matches};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<LegacyCapabilities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w3c: Option<W3cCapabilities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appium: Option<AppiumCapabilities>,
}

impl Capabilities {
    pub fn is_empty(&self) -> bool {
        self.legacy.is_none() && self.w3c.is_none() && self.appium.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCapabilities {
    /// Original-case `api_name`; Selenium matches it case-sensitively.
    pub browser_name: String,
    pub version: String,
    pub platform: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct W3cCapabilities {
    pub browser_name: String,
    pub browser_version: String,
    pub platform_name: String,
    /// Chrome <= 74 only speaks W3C when asked through this marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w3c: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppiumCapabilities {
    pub browser_name: String,
    pub platform_name: String,
    pub platform_version: String,
    pub device_name: String,
}

struct W3cRule {
    browser: &'static str,
    supported: fn(i64) -> bool,
    needs_marker: fn(i64) -> bool,
}

const W3C_RULES: &[W3cRule] = &[
    W3cRule {
        browser: "firefox",
        supported: |major| major >= 53,
        needs_marker: |_| false,
    },
    W3cRule {
        browser: "chrome",
        supported: |major| major >= 61,
        needs_marker: |major| major <= 74,
    },
    W3cRule {
        browser: "internet explorer",
        supported: |major| major == 11,
        needs_marker: |_| false,
    },
];

/// Build the capability set for a classified manifest.
pub fn synthesize(manifest: &RawManifest, classified: &Classified) -> Capabilities {
    let version = clean_version(&manifest.short_version);
    match classified.target {
        Target::Appium(family) => Capabilities {
            appium: Some(appium_capabilities(manifest, family, version)),
            ..Capabilities::default()
        },
        Target::Legacy => Capabilities {
            legacy: Some(LegacyCapabilities {
                browser_name: manifest.api_name.clone(),
                version: version.to_string(),
                platform: manifest.os.clone(),
            }),
            w3c: w3c_capabilities(manifest, &classified.api_name, version),
            appium: None,
        },
    }
}

fn appium_capabilities(
    manifest: &RawManifest,
    family: DeviceFamily,
    version: &str,
) -> AppiumCapabilities {
    let (browser_name, platform_name) = match family {
        DeviceFamily::Ios => ("Safari".to_string(), "iOS"),
        DeviceFamily::Android => (android_browser(manifest, version), "Android"),
    };
    // Android cannot pin the Chrome version; only the platform version
    // tells devices apart.
    AppiumCapabilities {
        browser_name,
        platform_name: platform_name.to_string(),
        platform_version: version.to_string(),
        device_name: manifest.long_name.clone(),
    }
}

/// Android defaults to Chrome from 6 onward and to "Browser" before that.
fn android_browser(manifest: &RawManifest, version: &str) -> String {
    match &manifest.browser_name {
        Some(explicit) => explicit.clone(),
        None if major_matches(version, |major| major >= 6) => "Chrome".to_string(),
        None => "Browser".to_string(),
    }
}

fn w3c_capabilities(
    manifest: &RawManifest,
    api_name: &str,
    version: &str,
) -> Option<W3cCapabilities> {
    let rule = W3C_RULES.iter().find(|rule| rule.browser == api_name)?;
    if !major_matches(version, rule.supported) {
        return None;
    }
    Some(W3cCapabilities {
        browser_name: manifest.api_name.clone(),
        browser_version: version.to_string(),
        platform_name: manifest.os.clone(),
        w3c: major_matches(version, rule.needs_marker).then_some(true),
    })
}
