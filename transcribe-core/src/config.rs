//! AWS credentials and region from the environment or a dotenv file.

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::{Credentials, Region};
use std::path::Path;
use tracing::{debug, info};

pub const REGION_VAR: &str = "AWS_REGION";
pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY";
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Settings file read when `--env-file` isn't given.
pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error loading {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Load a dotenv file into the process environment.
///
/// Variables already set in the environment win. A missing file is only an
/// error when `required` is set, i.e. the user named it explicitly.
pub fn load_env_file(path: &Path, required: bool) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded settings file");
            Ok(())
        }
        Err(e) if e.not_found() && !required => {
            debug!(path = %path.display(), "No settings file, using process environment");
            Ok(())
        }
        Err(source) => Err(ConfigError::EnvFile {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Static credentials and region for the S3 and Transcribe clients.
#[derive(Clone)]
pub struct AwsSettings {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSettings")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

impl AwsSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        Ok(Self {
            region: require(REGION_VAR)?,
            access_key_id: require(ACCESS_KEY_VAR)?,
            secret_access_key: require(SECRET_KEY_VAR)?,
        })
    }

    /// Shared SDK configuration with an explicit region and static keys.
    pub async fn sdk_config(&self) -> SdkConfig {
        info!(region = %self.region, "Configuring AWS clients");
        let credentials = Credentials::new(
            &self.access_key_id,
            &self.secret_access_key,
            None,
            None,
            "dotenv",
        );
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await
    }
}
