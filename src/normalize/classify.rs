//! Backend classification.
//!
//! Each manifest either resolves to a target (legacy WebDriver or an Appium
//! device family) or is rejected. Rejection is a filtering outcome, not an
//! error: the record simply yields no descriptor.

use crate::manifest::{AutomationBackend, RawManifest};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceFamily {
    Ios,
    Android,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Legacy,
    Appium(DeviceFamily),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classified {
    pub target: Target,
    /// Lower-cased `api_name`.
    pub api_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Backend tag is neither `webdriver` nor `appium`.
    UnsupportedBackend(String),
    /// Device record tagged with the legacy backend.
    MislabeledDevice,
    /// Appium record whose identifier is not a known device family.
    UnknownDeviceFamily(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnsupportedBackend(tag) => write!(f, "unsupported automation backend '{tag}'"),
            Rejection::MislabeledDevice => f.write_str("device record with a webdriver backend"),
            Rejection::UnknownDeviceFamily(name) => write!(f, "unknown appium device family '{name}'"),
        }
    }
}

struct ClassifierRule {
    name: &'static str,
    check: fn(&RawManifest) -> Option<Rejection>,
}

const RULES: &[ClassifierRule] = &[
    ClassifierRule {
        name: "supported-backend",
        check: supported_backend,
    },
    ClassifierRule {
        name: "device-requires-appium",
        check: device_requires_appium,
    },
];

/// Run the classifier rules in order, then resolve the target.
pub fn classify(manifest: &RawManifest) -> Result<Classified, Rejection> {
    for rule in RULES {
        if let Some(rejection) = (rule.check)(manifest) {
            tracing::trace!(rule = rule.name, api_name = %manifest.api_name, "classifier rule rejected manifest");
            return Err(rejection);
        }
    }

    let api_name = manifest.api_name.to_lowercase();
    let target = match manifest.automation_backend {
        AutomationBackend::Appium => Target::Appium(
            device_family(&api_name)
                .ok_or_else(|| Rejection::UnknownDeviceFamily(api_name.clone()))?,
        ),
        _ => Target::Legacy,
    };
    Ok(Classified { target, api_name })
}

fn supported_backend(manifest: &RawManifest) -> Option<Rejection> {
    match &manifest.automation_backend {
        AutomationBackend::Other(tag) => Some(Rejection::UnsupportedBackend(tag.clone())),
        _ => None,
    }
}

// The vendor lists some mobile devices under the webdriver backend even though
// they run on Appium. Those records are never actionable.
fn device_requires_appium(manifest: &RawManifest) -> Option<Rejection> {
    let mobile = manifest.device || manifest.automation_backend == AutomationBackend::Appium;
    if mobile && manifest.automation_backend != AutomationBackend::Appium {
        return Some(Rejection::MislabeledDevice);
    }
    None
}

/// Device family for a lower-cased Appium identifier.
pub fn device_family(api_name: &str) -> Option<DeviceFamily> {
    match api_name {
        "ipad" | "iphone" => Some(DeviceFamily::Ios),
        "android" => Some(DeviceFamily::Android),
        _ => None,
    }
}
