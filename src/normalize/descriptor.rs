//! The normalized descriptor and its assembly from the per-stage outputs.

use crate::catalog::BrowserIndex;
use crate::manifest::{AutomationBackend, RawManifest};
use crate::normalize::capabilities::Capabilities;
use crate::normalize::classify::Classified;
use crate::normalize::naming::{canonical_names, title};
use crate::normalize::preference::{PreferredOver, preferred_over};
use crate::version::clean_version;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Names that need the tunnel to reach the host's loopback interface.
/// Matched literally and through the alias table.
pub const LOOPBACK_NAMES: &[&str] = &["safari", "ios safari", "edge"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// Canonical names, primary first.
    pub name: Vec<String>,
    pub version: String,
    pub platform: String,
    pub title: String,
    pub wants: Wants,
    pub automation_backend: AutomationBackend,
    pub capabilities: Capabilities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_backend_version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_backend_versions: Option<Value>,
    #[serde(default, skip_serializing_if = "PreferredOver::is_empty")]
    pub preferred_over: PreferredOver,
}

impl Descriptor {
    pub fn primary_name(&self) -> &str {
        self.name.first().map(String::as_str).unwrap_or_default()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.iter().any(|candidate| candidate == name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wants {
    pub loopback: bool,
    #[serde(alias = "tunnel")]
    pub sauce_connect: bool,
}

/// Combine classifier, capability, naming and preference outputs.
pub fn assemble(
    manifest: &RawManifest,
    classified: &Classified,
    capabilities: Capabilities,
    index: &BrowserIndex,
) -> Descriptor {
    let name = canonical_names(classified, &capabilities, index);
    let title = title(&name, &capabilities, index);
    // Mobile records report the host OS; use the Appium platform instead.
    let platform = match &capabilities.appium {
        Some(appium) => appium.platform_name.to_lowercase(),
        None => manifest.os.to_lowercase(),
    };

    Descriptor {
        wants: Wants {
            loopback: wants_loopback(&name, index),
            sauce_connect: true,
        },
        version: clean_version(&manifest.short_version).to_string(),
        platform,
        title,
        automation_backend: manifest.automation_backend.clone(),
        recommended_backend_version: manifest.recommended_backend_version.clone(),
        supported_backend_versions: manifest.supported_backend_versions.clone(),
        preferred_over: preferred_over(&capabilities),
        capabilities,
        name,
    }
}

fn wants_loopback(names: &[String], index: &BrowserIndex) -> bool {
    names.iter().any(|name| {
        LOOPBACK_NAMES
            .iter()
            .any(|loopback| *loopback == name || index.common(loopback) == Some(name.as_str()))
    })
}
