// End-to-end normalization guard rails over the bundled platform fixture.
mod support;

use anyhow::Result;
use pretty_assertions::assert_eq;
use sauce_browsers::{BrowserIndex, RawManifest, normalize};
use serde_json::{Value, json};

use support::{load_fixture, normalized_fixture, with_names};

#[test]
fn fixture_emits_expected_names_in_order() -> Result<()> {
    let descriptors = normalized_fixture()?;
    let names: Vec<Vec<String>> = descriptors.iter().map(|d| d.name.clone()).collect();
    let expected: Vec<Vec<&str>> = vec![
        vec!["chrome"],
        vec!["chrome"],
        vec!["chrome"],
        vec!["firefox"],
        vec!["ie"],
        vec!["edge"],
        vec!["safari"],
        vec!["android", "and_chr"],
        vec!["android", "android browser"],
        vec!["iphone", "ios_saf"],
        vec!["ipad", "ios_saf"],
        vec!["android", "android browser"],
    ];
    assert_eq!(names, expected);
    Ok(())
}

#[test]
fn unsupported_and_mislabeled_records_are_dropped() -> Result<()> {
    let descriptors = normalized_fixture()?;
    assert!(
        descriptors
            .iter()
            .all(|d| d.automation_backend.is_supported())
    );
    assert!(
        descriptors.iter().all(|d| d.version != "9.3"),
        "webdriver-tagged iPhone should not survive"
    );
    assert!(descriptors.iter().all(|d| !d.has_name("windows phone")));
    assert!(descriptors.iter().all(|d| !d.capabilities.is_empty()));
    Ok(())
}

#[test]
fn android_six_is_paired_with_both_browsers() -> Result<()> {
    let manifest: RawManifest = serde_json::from_value(json!({
        "automation_backend": "appium",
        "api_name": "android",
        "short_version": "6.0",
        "os": "Linux",
        "long_name": "Android Emulator"
    }))?;
    let descriptors = normalize(&[manifest], &BrowserIndex::bundled());
    assert_eq!(descriptors.len(), 2);

    let chrome = &descriptors[0];
    assert_eq!(chrome.name, vec!["android", "and_chr"]);
    assert_eq!(chrome.platform, "android");
    assert_eq!(
        chrome.capabilities.appium.as_ref().map(|c| c.browser_name.as_str()),
        Some("Chrome")
    );

    let stock = &descriptors[1];
    assert_eq!(stock.name, vec!["android", "android browser"]);
    assert_eq!(stock.platform, "android");
    assert_eq!(
        stock.capabilities.appium.as_ref().map(|c| c.browser_name.as_str()),
        Some("Browser")
    );
    Ok(())
}

#[test]
fn ie_version_drops_trailing_dot() -> Result<()> {
    let manifest: RawManifest = serde_json::from_value(json!({
        "automation_backend": "webdriver",
        "api_name": "Internet Explorer",
        "short_version": "11.",
        "os": "Windows 10"
    }))?;
    let descriptors = normalize(&[manifest], &BrowserIndex::bundled());
    assert_eq!(descriptors.len(), 1);
    let ie = &descriptors[0];
    assert_eq!(ie.version, "11");
    let w3c = ie.capabilities.w3c.as_ref().expect("w3c capabilities");
    assert_eq!(w3c.browser_version, "11");
    assert_eq!(w3c.browser_name, "Internet Explorer");
    assert_eq!(w3c.w3c, None);
    Ok(())
}

#[test]
fn chrome_w3c_marker_follows_version_band() -> Result<()> {
    let descriptors = normalized_fixture()?;
    let chrome = with_names(&descriptors, &["chrome"]);
    let by_version = |version: &str| {
        chrome
            .iter()
            .find(|d| d.version == version)
            .map(|d| d.capabilities.w3c.clone())
            .expect("chrome version present")
    };
    assert_eq!(by_version("75").map(|w| w.w3c), Some(None));
    assert_eq!(by_version("74").map(|w| w.w3c), Some(Some(true)));
    assert_eq!(by_version("60"), None);
    Ok(())
}

#[test]
fn android_without_override_defaults_to_chrome_from_six() -> Result<()> {
    for version in ["6.0", "7.1", "10.0"] {
        let manifest = RawManifest::new("appium", "android", version, "Linux", "Android Emulator");
        let descriptors = normalize(&[manifest], &BrowserIndex::bundled());
        let first = &descriptors[0];
        assert_eq!(first.name, vec!["android", "and_chr"]);
        assert_eq!(
            first.capabilities.appium.as_ref().map(|c| c.browser_name.as_str()),
            Some("Chrome")
        );
        let expected_len = if version == "6.0" { 2 } else { 1 };
        assert_eq!(descriptors.len(), expected_len, "version {version}");
    }
    Ok(())
}

#[test]
fn preferences_and_metadata_are_attached() -> Result<()> {
    let descriptors = normalized_fixture()?;
    let value = serde_json::to_value(&descriptors)?;

    assert_eq!(
        value.pointer("/7/preferredOver"),
        Some(&json!({
            "capabilities.appium.browserName": ["Browser"],
            "capabilities.appium.deviceName": ["any"]
        }))
    );
    assert_eq!(value.pointer("/7/recommendedBackendVersion"), Some(&json!("1.9.1")));
    assert_eq!(
        value.pointer("/7/supportedBackendVersions"),
        Some(&json!(["1.9.1", "1.8.1"]))
    );
    assert_eq!(
        value.pointer("/8/preferredOver"),
        Some(&json!({"capabilities.appium.deviceName": ["Android Emulator", "any"]}))
    );
    assert_eq!(
        value.pointer("/9/preferredOver"),
        Some(&json!({"capabilities.appium.deviceName": ["iPad Simulator", "any"]}))
    );
    assert_eq!(
        value.pointer("/11/preferredOver"),
        Some(&json!({"capabilities.appium.deviceName": ["any"]}))
    );
    assert_eq!(value.pointer("/11/recommendedBackendVersion"), Some(&json!("1.9.1")));
    assert_eq!(value.pointer("/0/preferredOver"), None);
    Ok(())
}

#[test]
fn loopback_and_tunnel_flags() -> Result<()> {
    let descriptors = normalized_fixture()?;
    let loopback: Vec<&str> = descriptors
        .iter()
        .filter(|d| d.wants.loopback)
        .map(|d| d.name.last().map(String::as_str).unwrap_or_default())
        .collect();
    assert_eq!(loopback, vec!["edge", "safari", "ios_saf", "ios_saf"]);
    assert!(descriptors.iter().all(|d| d.wants.sauce_connect));
    Ok(())
}

#[test]
fn titles_read_naturally() -> Result<()> {
    let descriptors = normalized_fixture()?;
    let titles: Vec<&str> = descriptors.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles[4], "Sauce Labs Internet Explorer 11 on Windows 10");
    assert_eq!(
        titles[7],
        "Sauce Labs Chrome for Android on Android 6.0 on Android Emulator"
    );
    assert_eq!(
        titles[9],
        "Sauce Labs iOS Safari on iOS 12.0 on iPhone Simulator"
    );
    assert_eq!(
        titles[11],
        "Sauce Labs Android Browser on Android 6.0 on Android Emulator"
    );
    Ok(())
}

#[test]
fn reserialized_input_normalizes_identically() -> Result<()> {
    let manifests = load_fixture()?;
    let first = serde_json::to_string(&normalize(&manifests, &BrowserIndex::bundled()))?;

    let reparsed: Vec<RawManifest> = serde_json::from_str(&serde_json::to_string(&manifests)?)?;
    let second = serde_json::to_string(&normalize(&reparsed, &BrowserIndex::bundled()))?;
    assert_eq!(first, second);

    let third = serde_json::to_string(&normalize(&manifests, &BrowserIndex::bundled()))?;
    assert_eq!(first, third);
    Ok(())
}

#[test]
fn descriptors_round_trip_through_json() -> Result<()> {
    let descriptors = normalized_fixture()?;
    let text = serde_json::to_string(&descriptors)?;
    let parsed = sauce_browsers::parse_descriptor_list(&text)?;
    assert_eq!(parsed, descriptors);

    let value: Value = serde_json::from_str(&text)?;
    let keys: Vec<&str> = value[0]
        .as_object()
        .map(|obj| obj.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert!(keys.contains(&"automationBackend"));
    Ok(())
}

#[test]
fn record_without_backend_tag_is_dropped_alone() -> Result<()> {
    let text = r#"[
        {"automation_backend": "webdriver", "api_name": "chrome", "short_version": "75", "os": "Windows 10"},
        {"automation_backend": null, "api_name": "chrome", "short_version": "74", "os": "Windows 10"},
        {"api_name": "firefox", "short_version": "60", "os": "Linux"}
    ]"#;
    let manifests = sauce_browsers::parse_manifest_list(text)?;
    assert_eq!(manifests.len(), 3);

    let descriptors = normalize(&manifests, &BrowserIndex::bundled());
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].version, "75");
    Ok(())
}
