use std::net::SocketAddr;

use anyhow::{Result, bail};
use clap::Parser;

use crate::providers::{AwsProvider, CompatibleProvider, Provider};
use crate::vfs::ListingPolicy;

/// Bucket name used by `--memory` when none is given
pub const DEMO_BUCKET: &str = "demo";

/// Server settings, from flags or environment
#[derive(Parser, Debug, Clone)]
#[command(name = "s3web", version, about = "Browse an S3 bucket from a web browser")]
pub struct ServeConfig {
    /// Bucket to browse
    #[arg(long, env = "S3WEB_BUCKET")]
    pub bucket: Option<String>,

    /// Address to listen on
    #[arg(long, env = "S3WEB_BIND", default_value = "0.0.0.0:8050")]
    pub bind: SocketAddr,

    /// Custom S3-compatible endpoint (path-style addressing)
    #[arg(long, env = "AWS_S3_ENDPOINT")]
    pub endpoint_url: Option<String>,

    /// Region override
    #[arg(long, env = "AWS_REGION_NAME")]
    pub region: Option<String>,

    /// Send unsigned requests (public buckets)
    #[arg(long)]
    pub anonymous: bool,

    /// Serve an in-memory store instead of S3
    #[arg(long)]
    pub memory: bool,

    /// Hide 0-byte objects that are not folder markers
    #[arg(long)]
    pub skip_empty_objects: bool,

    /// Largest accepted upload, in MiB
    #[arg(long, default_value_t = 100)]
    pub max_upload_mb: usize,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "S3WEB_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServeConfig {
    /// Check settings that clap cannot express
    pub fn validate(&self) -> Result<()> {
        if !self.memory && self.bucket.as_deref().is_none_or(str::is_empty) {
            bail!("a bucket is required (--bucket or S3WEB_BUCKET)");
        }
        if self.max_upload_mb == 0 {
            bail!("--max-upload-mb must be at least 1");
        }
        Ok(())
    }

    /// Bucket to serve
    pub fn bucket_name(&self) -> String {
        match &self.bucket {
            Some(bucket) if !bucket.is_empty() => bucket.clone(),
            _ => DEMO_BUCKET.to_string(),
        }
    }

    /// Provider chosen by the endpoint setting
    pub fn provider(&self) -> Box<dyn Provider> {
        match &self.endpoint_url {
            Some(endpoint) => Box::new(CompatibleProvider::new(
                endpoint.clone(),
                self.region.clone(),
                self.anonymous,
            )),
            None => Box::new(AwsProvider::new(self.region.clone(), self.anonymous)),
        }
    }

    pub fn listing_policy(&self) -> ListingPolicy {
        ListingPolicy {
            skip_empty_objects: self.skip_empty_objects,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
