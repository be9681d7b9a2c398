//! NuGet registry-backed dependency source.

use async_trait::async_trait;
use depgraph_nuget::NugetClient;

use super::DependencySource;
use crate::domain::PackageId;
use crate::error::Result;

/// Resolves dependencies from a NuGet v3 registry.
#[derive(Debug)]
pub struct RegistrySource {
    client: NugetClient,
}

impl RegistrySource {
    /// Create a source for the registry at `service_index_url`.
    pub fn new(service_index_url: impl Into<String>) -> Self {
        Self {
            client: NugetClient::new(service_index_url),
        }
    }

    /// Wrap an existing client.
    pub fn from_client(client: NugetClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DependencySource for RegistrySource {
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>> {
        tracing::debug!(
            package = %package,
            registry = self.client.service_index_url(),
            "Querying registry"
        );
        let declared = self
            .client
            .fetch_dependencies(&package.name, &package.version)
            .await?;
        Ok(declared
            .into_iter()
            .map(|d| PackageId::new(d.id, d.version))
            .collect())
    }
}
