//! Provider-bound normalizer.
//!
//! `SauceBrowsers` owns a `ManifestSource` and the alias table. Provider
//! errors pass through untouched; normalization itself only filters.

use crate::catalog::BrowserIndex;
use crate::manifest::RawManifest;
use crate::normalize::{Descriptor, normalize};
use crate::sources::{HttpSource, ManifestSource};
use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct SauceBrowsers {
    source: Arc<dyn ManifestSource>,
    index: Arc<BrowserIndex>,
}

impl SauceBrowsers {
    /// Bind a provider; names resolve through the bundled alias table.
    pub fn new(source: impl ManifestSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            index: BrowserIndex::bundled(),
        }
    }

    /// Engine backed by the live vendor catalog.
    pub fn live() -> Result<Self> {
        Ok(Self::new(HttpSource::from_env()?))
    }

    /// Same alias table, different provider.
    pub fn with_source(&self, source: impl ManifestSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            index: Arc::clone(&self.index),
        }
    }

    /// Rebind the provider in place.
    pub fn set_source(&mut self, source: impl ManifestSource + 'static) {
        self.source = Arc::new(source);
    }

    pub fn with_aliases(mut self, index: Arc<BrowserIndex>) -> Self {
        self.index = index;
        self
    }

    pub fn aliases(&self) -> &BrowserIndex {
        &self.index
    }

    /// Fetch from the provider and normalize.
    pub async fn load(&self) -> Result<Vec<Descriptor>> {
        let manifests = self.source.fetch().await?;
        Ok(self.normalize(&manifests))
    }

    /// Normalize a list the caller already holds.
    pub fn normalize(&self, manifests: &[RawManifest]) -> Vec<Descriptor> {
        normalize(manifests, &self.index)
    }

    /// Run `load` on the current tokio runtime and hand the result to
    /// `callback` from the spawned task, never from this call.
    pub fn spawn_with_callback<F>(&self, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<Descriptor>>) + Send + 'static,
    {
        let engine = self.clone();
        tokio::spawn(async move {
            let result = engine.load().await;
            callback(result);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StaticSource;
    use anyhow::bail;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Unreachable;

    #[async_trait]
    impl ManifestSource for Unreachable {
        async fn fetch(&self) -> Result<Vec<RawManifest>> {
            bail!("connection refused")
        }
    }

    fn android_six() -> RawManifest {
        RawManifest::new("appium", "android", "6.0", "Linux", "Android Emulator")
    }

    #[tokio::test]
    async fn load_normalizes_provider_output() -> Result<()> {
        let engine = SauceBrowsers::new(StaticSource::new(vec![android_six()]));
        let descriptors = engine.load().await?;
        assert_eq!(descriptors.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let engine = SauceBrowsers::new(Unreachable);
        let err = engine.load().await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn rebinding_swaps_provider() -> Result<()> {
        let mut engine = SauceBrowsers::new(Unreachable);
        assert!(engine.load().await.is_err());
        engine.set_source(StaticSource::new(vec![android_six()]));
        assert_eq!(engine.load().await?.len(), 2);
        let empty = engine.with_source(StaticSource::default());
        assert!(empty.load().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn callback_receives_result_later() -> Result<()> {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let engine = SauceBrowsers::new(StaticSource::new(vec![android_six()]));
        let handle = engine.spawn_with_callback(move |result| {
            let count = result.map(|descriptors| descriptors.len()).ok();
            *sink.lock().unwrap() = Some(count);
        });
        handle.await?;
        assert_eq!(*seen.lock().unwrap(), Some(Some(2)));
        Ok(())
    }

    #[tokio::test]
    async fn callback_receives_provider_error() -> Result<()> {
        let seen = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&seen);
        let handle = SauceBrowsers::new(Unreachable).spawn_with_callback(move |result| {
            if let Err(err) = result {
                *sink.lock().unwrap() = err.to_string();
            }
        });
        handle.await?;
        assert_eq!(*seen.lock().unwrap(), "connection refused");
        Ok(())
    }
}
