mod aws;
mod compatible;

pub use aws::AwsProvider;
pub use compatible::CompatibleProvider;

use anyhow::Result;
use aws_sdk_s3::Client;

/// Configuration for creating an S3 client
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Optional custom endpoint URL
    pub endpoint_url: Option<String>,
    /// Whether to use path-style addressing (required for some S3-compatible services)
    pub force_path_style: bool,
    /// Whether to skip credentials (for anonymous/public access)
    pub anonymous: bool,
    /// Optional region override
    pub region: Option<String>,
}

/// Trait for S3 provider implementations
/// Providers supply configuration for creating S3 clients
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get provider description
    fn description(&self) -> &str;

    /// Build the provider configuration
    async fn build_config(&self) -> Result<ProviderConfig>;
}

/// Build an SDK client from provider configuration.
/// Credentials come from the default AWS chain unless `anonymous` is set.
pub async fn create_s3_client(config: ProviderConfig) -> Result<Client> {
    let mut sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest());

    // Handle anonymous access
    if config.anonymous {
        sdk_config = sdk_config.no_credentials();
    }

    if let Some(region) = config.region {
        sdk_config = sdk_config.region(aws_config::Region::new(region));
    }

    let base_config = sdk_config.load().await;

    // Build S3-specific config
    let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&base_config);

    if let Some(endpoint) = config.endpoint_url {
        s3_config_builder = s3_config_builder.endpoint_url(endpoint);
    }

    if config.force_path_style {
        s3_config_builder = s3_config_builder.force_path_style(true);
    }

    Ok(Client::from_conf(s3_config_builder.build()))
}
