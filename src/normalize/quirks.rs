//! Synthetic records for vendor behavior the catalog does not report.

use crate::manifest::{AutomationBackend, RawManifest};
use crate::version::major;

/// Browser override carried by the synthetic Android 6 record.
pub const ANDROID_STOCK_BROWSER: &str = "Browser";

/// Android 6 defaults to Chrome but can also be paired with the stock
/// browser. The catalog only lists the Chrome pairing.
pub fn needs_stock_browser_pairing(manifest: &RawManifest) -> bool {
    manifest.automation_backend == AutomationBackend::Appium
        && manifest.api_name.eq_ignore_ascii_case("android")
        && major(&manifest.short_version) == Some(6)
}

/// Correction records for `manifests`, in input order.
pub fn corrections(manifests: &[RawManifest]) -> impl Iterator<Item = RawManifest> + '_ {
    manifests
        .iter()
        .filter(|manifest| needs_stock_browser_pairing(manifest))
        .map(|manifest| manifest.clone().with_browser_name(ANDROID_STOCK_BROWSER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_android_six_on_appium_is_corrected() {
        let manifests = vec![
            RawManifest::new("appium", "Android", "6.0", "Linux", "Android Emulator"),
            RawManifest::new("appium", "android", "7.1", "Linux", "Android Emulator"),
            RawManifest::new("appium", "android", "5.1", "Linux", "Android Emulator"),
            RawManifest::new("webdriver", "android", "6.0", "Linux", "Android Emulator"),
            RawManifest::new("appium", "iphone", "6.0", "Mac 10.12", "iPhone Simulator"),
        ];
        let extra: Vec<_> = corrections(&manifests).collect();
        assert_eq!(extra.len(), 1);
        assert_eq!(extra[0].api_name, "Android");
        assert_eq!(extra[0].browser_name.as_deref(), Some("Browser"));
        assert_eq!(extra[0].long_name, "Android Emulator");
    }

    #[test]
    fn explicit_override_is_replaced() {
        let manifest = RawManifest::new("appium", "android", "6.0", "Linux", "Samsung Galaxy S7")
            .with_browser_name("Chrome");
        let extra: Vec<_> = corrections(std::slice::from_ref(&manifest)).collect();
        assert_eq!(extra[0].browser_name.as_deref(), Some("Browser"));
        assert_eq!(manifest.browser_name.as_deref(), Some("Chrome"));
    }
}
