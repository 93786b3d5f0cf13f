//! Registry test utilities

use std::collections::HashMap;

use async_trait::async_trait;

use scriptapi_versions::version::error::RegistryError;
use scriptapi_versions::version::registry::Registry;

/// Mock registry for testing
#[derive(Default)]
pub struct MockRegistry {
    versions: HashMap<String, Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, module: &str, versions: Vec<&str>) -> Self {
        self.versions.insert(
            module.to_string(),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_versions(&self, module: &str) -> Result<Vec<String>, RegistryError> {
        match self.versions.get(module) {
            Some(versions) => Ok(versions.clone()),
            None => Err(RegistryError::NotFound(module.to_string())),
        }
    }
}
