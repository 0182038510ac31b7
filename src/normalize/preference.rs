//! Tie-breaking between descriptors that share a canonical name.
//!
//! `android` and `ios_saf` each cover several device/browser pairings. A
//! consumer that only asks for the name gets the descriptor whose
//! `preferredOver` lists the competing values, most specific first and
//! `"any"` last.

use crate::normalize::capabilities::Capabilities;
use std::collections::BTreeMap;

pub const DEVICE_NAME_PATH: &str = "capabilities.appium.deviceName";
pub const BROWSER_NAME_PATH: &str = "capabilities.appium.browserName";

/// Map from capability path to the values this descriptor wins over.
pub type PreferredOver = BTreeMap<String, Vec<String>>;

const DEVICE_PREFERENCES: &[(&str, &[&str])] = &[
    ("Android GoogleAPI Emulator", &["Android Emulator", "any"]),
    ("Android Emulator", &["any"]),
    ("iPhone Simulator", &["iPad Simulator", "any"]),
    ("iPad Simulator", &["any"]),
];

/// Compute preference entries for an Appium capability set.
///
/// Legacy descriptors never carry preferences.
pub fn preferred_over(capabilities: &Capabilities) -> PreferredOver {
    let mut preferred = PreferredOver::new();
    let Some(appium) = &capabilities.appium else {
        return preferred;
    };

    if let Some((_, over)) = DEVICE_PREFERENCES
        .iter()
        .find(|(device, _)| *device == appium.device_name)
    {
        preferred.insert(DEVICE_NAME_PATH.to_string(), to_strings(over));
    }

    // Keeps Chrome as the default Android pairing even though the vendor
    // used to pair Android with the stock browser.
    if appium.platform_name.eq_ignore_ascii_case("android")
        && appium.browser_name.eq_ignore_ascii_case("chrome")
    {
        preferred.insert(BROWSER_NAME_PATH.to_string(), vec!["Browser".to_string()]);
    }

    preferred
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
