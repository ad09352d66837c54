use super::{Provider, ProviderConfig};
use anyhow::{Result, bail};

/// S3-compatible service behind a custom endpoint (MinIO, Ceph, LocalStack, ...)
#[derive(Debug, Clone)]
pub struct CompatibleProvider {
    endpoint_url: String,
    region: Option<String>,
    anonymous: bool,
}

impl CompatibleProvider {
    pub fn new(endpoint_url: impl Into<String>, region: Option<String>, anonymous: bool) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            region,
            anonymous,
        }
    }
}

#[async_trait::async_trait]
impl Provider for CompatibleProvider {
    fn name(&self) -> &str {
        "compatible"
    }

    fn description(&self) -> &str {
        "S3-compatible service at a custom endpoint"
    }

    async fn build_config(&self) -> Result<ProviderConfig> {
        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://")
        {
            bail!(
                "endpoint URL must start with http:// or https://: {}",
                self.endpoint_url
            );
        }

        Ok(ProviderConfig {
            endpoint_url: Some(self.endpoint_url.clone()),
            force_path_style: true,
            anonymous: self.anonymous,
            // Most compatible services ignore the region but the SDK requires one
            region: Some(
                self.region
                    .clone()
                    .unwrap_or_else(|| "us-east-1".to_string()),
            ),
        })
    }
}
