//! Raw platform records as published by the Sauce Labs catalog.
//!
//! Types here mirror the vendor's JSON keys. They are read-only input to the
//! normalizer; the only derived record is the synthetic copy produced by the
//! quirk corrector.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Automation backend tag of a manifest.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AutomationBackend {
    /// Selenium 2/3 ("webdriver").
    Webdriver,
    Appium,
    Other(String),
}

impl AutomationBackend {
    pub fn as_str(&self) -> &str {
        match self {
            AutomationBackend::Webdriver => "webdriver",
            AutomationBackend::Appium => "appium",
            AutomationBackend::Other(value) => value.as_str(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, AutomationBackend::Other(_))
    }
}

impl From<String> for AutomationBackend {
    fn from(value: String) -> Self {
        match value.as_str() {
            "webdriver" => AutomationBackend::Webdriver,
            "appium" => AutomationBackend::Appium,
            _ => AutomationBackend::Other(value),
        }
    }
}

impl Default for AutomationBackend {
    fn default() -> Self {
        AutomationBackend::Other(String::new())
    }
}

impl From<&str> for AutomationBackend {
    fn from(value: &str) -> Self {
        AutomationBackend::from(value.to_string())
    }
}

impl From<AutomationBackend> for String {
    fn from(value: AutomationBackend) -> Self {
        match value {
            AutomationBackend::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AutomationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One platform/browser/device record from the vendor catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawManifest {
    /// Missing, null or non-string tags parse as `Other` and are dropped by
    /// the classifier rather than failing the whole list.
    #[serde(default, deserialize_with = "backend_tag")]
    pub automation_backend: AutomationBackend,
    /// API-facing identifier, e.g. `"chrome"`, `"internet explorer"`, `"iphone"`.
    pub api_name: String,
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_version: String,
    /// Owning OS, e.g. `"Windows 10"`. For mobile records this is the host OS
    /// running the emulator or simulator.
    #[serde(default)]
    pub os: String,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub browser_name: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub device: bool,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommended_backend_version: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub supported_backend_versions: Option<Value>,
}

impl RawManifest {
    /// Minimal manifest with the required fields; everything else absent.
    pub fn new(
        automation_backend: impl Into<AutomationBackend>,
        api_name: impl Into<String>,
        short_version: impl Into<String>,
        os: impl Into<String>,
        long_name: impl Into<String>,
    ) -> Self {
        Self {
            automation_backend: automation_backend.into(),
            api_name: api_name.into(),
            long_name: long_name.into(),
            short_version: short_version.into(),
            os: os.into(),
            browser_name: None,
            device: false,
            recommended_backend_version: None,
            supported_backend_versions: None,
        }
    }

    pub fn with_browser_name(mut self, browser_name: impl Into<String>) -> Self {
        self.browser_name = Some(browser_name.into());
        self
    }

    pub fn with_device(mut self, device: bool) -> Self {
        self.device = device;
        self
    }

    pub fn with_backend_versions(
        mut self,
        recommended: Option<Value>,
        supported: Option<Value>,
    ) -> Self {
        self.recommended_backend_version = recommended.filter(is_truthy);
        self.supported_backend_versions = supported.filter(is_truthy);
        self
    }
}

/// Vendor flags are loosely typed; anything "set" counts.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn backend_tag<'de, D>(deserializer: D) -> Result<AutomationBackend, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(tag) => AutomationBackend::from(tag),
        Value::Null => AutomationBackend::default(),
        other => AutomationBackend::Other(other.to_string()),
    })
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(value).filter(is_truthy))
}
