//! HTTP access to a NuGet v3 registry.

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::error::{Error, Result};
use crate::nuspec::parse_nuspec;

/// Resource type of the flat-container endpoint in a v3 service index.
pub const PACKAGE_BASE_ADDRESS_TYPE: &str = "PackageBaseAddress/3.0.0";

/// Public nuget.org service index.
pub const NUGET_ORG_INDEX: &str = "https://api.nuget.org/v3/index.json";

/// A dependency as declared by a package manifest, with its version range
/// already reduced to the minimum version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredDependency {
    /// Package id as written in the manifest.
    pub id: String,
    /// Minimum version of the declared range.
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct ServiceIndex {
    #[serde(default)]
    resources: Vec<ServiceResource>,
}

#[derive(Debug, Deserialize)]
struct ServiceResource {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    kind: String,
}

/// Client for a single NuGet v3 registry.
///
/// The package base address is discovered lazily on first use and cached for
/// the lifetime of the client.
#[derive(Debug)]
pub struct NugetClient {
    http: reqwest::Client,
    service_index_url: String,
    base_address: OnceCell<String>,
}

impl NugetClient {
    /// Create a client for the registry behind `service_index_url`.
    pub fn new(service_index_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), service_index_url)
    }

    /// Create a client that reuses an existing HTTP client.
    pub fn with_http_client(http: reqwest::Client, service_index_url: impl Into<String>) -> Self {
        Self {
            http,
            service_index_url: service_index_url.into(),
            base_address: OnceCell::new(),
        }
    }

    /// The service index URL this client was created with.
    pub fn service_index_url(&self) -> &str {
        &self.service_index_url
    }

    /// Resolve (and cache) the flat-container base address, always ending in `/`.
    ///
    /// # Errors
    ///
    /// Fails if the service index cannot be fetched or decoded, or if it does
    /// not advertise a [`PACKAGE_BASE_ADDRESS_TYPE`] resource.
    pub async fn base_address(&self) -> Result<&str> {
        self.base_address
            .get_or_try_init(|| self.discover_base_address())
            .await
            .map(String::as_str)
    }

    async fn discover_base_address(&self) -> Result<String> {
        tracing::info!(url = %self.service_index_url, "Discovering package base address");

        let response = self
            .http
            .get(&self.service_index_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Status {
                url: self.service_index_url.clone(),
                status: response.status().as_u16(),
            });
        }

        let index: ServiceIndex = response.json().await?;
        let resource = index
            .resources
            .into_iter()
            .find(|r| r.kind == PACKAGE_BASE_ADDRESS_TYPE)
            .ok_or(Error::MissingBaseAddress)?;

        let mut base = resource.id;
        if !base.ends_with('/') {
            base.push('/');
        }
        tracing::info!(base = %base, "Package base address found");
        Ok(base)
    }

    /// Fetch the direct dependencies declared by `id` at `version`.
    ///
    /// A package the registry does not know (`404`) has no dependencies.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, unexpected status codes and malformed
    /// manifests.
    pub async fn fetch_dependencies(
        &self,
        id: &str,
        version: &str,
    ) -> Result<Vec<DeclaredDependency>> {
        let url = self.nuspec_url(id, version).await?;
        tracing::debug!(url = %url, "Downloading nuspec");

        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::info!(package = id, version, "Package not found in registry");
                Ok(Vec::new())
            }
            status if status.is_success() => {
                let body = response.text().await?;
                parse_nuspec(&body)
            }
            status => Err(Error::Status {
                url,
                status: status.as_u16(),
            }),
        }
    }

    /// URL of the `.nuspec` for a package version in the flat container.
    ///
    /// # Errors
    ///
    /// Fails if the base address cannot be discovered.
    pub async fn nuspec_url(&self, id: &str, version: &str) -> Result<String> {
        let base = self.base_address().await?;
        let id = id.to_lowercase();
        let version = version.to_lowercase();
        Ok(format!("{base}{id}/{version}/{id}.nuspec"))
    }
}
