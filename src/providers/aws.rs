use super::{Provider, ProviderConfig};
use anyhow::Result;

/// AWS S3 provider (default)
#[derive(Debug, Clone, Default)]
pub struct AwsProvider {
    region: Option<String>,
    anonymous: bool,
}

impl AwsProvider {
    pub fn new(region: Option<String>, anonymous: bool) -> Self {
        Self { region, anonymous }
    }
}

#[async_trait::async_trait]
impl Provider for AwsProvider {
    fn name(&self) -> &str {
        "aws"
    }

    fn description(&self) -> &str {
        "Amazon Web Services S3 (default)"
    }

    async fn build_config(&self) -> Result<ProviderConfig> {
        Ok(ProviderConfig {
            endpoint_url: None,
            force_path_style: false,
            anonymous: self.anonymous,
            region: self.region.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_aws_provider_config() {
        let provider = AwsProvider::default();
        assert_eq!(provider.name(), "aws");
        assert_eq!(provider.description(), "Amazon Web Services S3 (default)");

        let config = provider.build_config().await.unwrap();
        assert_eq!(config.endpoint_url, None);
        assert!(!config.anonymous);
        assert!(!config.force_path_style);
        assert_eq!(config.region, None);
    }

    #[tokio::test]
    async fn test_aws_provider_overrides() {
        let provider = AwsProvider::new(Some("eu-west-1".to_string()), true);
        let config = provider.build_config().await.unwrap();
        assert_eq!(config.region, Some("eu-west-1".to_string()));
        assert!(config.anonymous);
    }
}
