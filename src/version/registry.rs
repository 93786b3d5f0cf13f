//! Registry trait for fetching raw module versions

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;

/// Source of the published version strings of a script module
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches every published version of `module`, in no particular order
    async fn fetch_versions(&self, module: &str) -> Result<Vec<String>, RegistryError>;
}
