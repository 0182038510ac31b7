//! Canonical names and display titles.

use crate::catalog::BrowserIndex;
use crate::normalize::capabilities::Capabilities;
use crate::normalize::classify::{Classified, DeviceFamily, Target};

/// Canonical names for a record, most generic first.
///
/// Android keeps the generic `android` name next to the browser-specific one
/// so older consumers selecting by either still match.
pub fn canonical_names(
    classified: &Classified,
    capabilities: &Capabilities,
    index: &BrowserIndex,
) -> Vec<String> {
    if let (Target::Appium(family), Some(appium)) = (classified.target, &capabilities.appium) {
        match family {
            DeviceFamily::Android if appium.browser_name.eq_ignore_ascii_case("chrome") => {
                return vec!["android".to_string(), "and_chr".to_string()];
            }
            DeviceFamily::Android if appium.browser_name.eq_ignore_ascii_case("browser") => {
                return vec!["android".to_string(), "android browser".to_string()];
            }
            DeviceFamily::Ios => {
                return vec![classified.api_name.clone(), "ios_saf".to_string()];
            }
            DeviceFamily::Android => {}
        }
    }

    let name = index
        .common(&classified.api_name)
        .unwrap_or(classified.api_name.as_str())
        .to_string();
    vec![name]
}

/// Display title, e.g. `Sauce Labs Internet Explorer 11 on Windows 10`.
///
/// The browser part comes from the most specific canonical name.
pub fn title(names: &[String], capabilities: &Capabilities, index: &BrowserIndex) -> String {
    let catalog_title = names.last().and_then(|name| index.title(name));
    if let Some(appium) = &capabilities.appium {
        let browser = browser_title(catalog_title, &appium.browser_name);
        return format!(
            "Sauce Labs {browser} on {} {} on {}",
            appium.platform_name, appium.platform_version, appium.device_name
        );
    }
    match &capabilities.legacy {
        Some(legacy) => {
            let browser = browser_title(catalog_title, &legacy.browser_name);
            format!(
                "Sauce Labs {browser} {} on {}",
                legacy.version, legacy.platform
            )
        }
        None => String::new(),
    }
}

fn browser_title(catalog_title: Option<&str>, browser_name: &str) -> String {
    catalog_title
        .map(str::to_string)
        .unwrap_or_else(|| ucfirst(browser_name))
}

fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
