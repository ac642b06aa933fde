use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::notify::OneSignalConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Secret used to sign admin session tokens.
    pub jwt_secret: String,
    /// Redis connection URL. Without one, reference data is cached in process.
    pub redis_url: Option<String>,
    /// Push provider settings. Without them, notifications are only logged.
    pub onesignal: Option<OneSignalConfig>,
}

/// Server settings as they appear in a TOML file or on the command line.
/// Every field is optional so layers can be merged before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub jwt_secret: Option<String>,
    pub redis_url: Option<String>,
    pub onesignal_app_id: Option<String>,
    pub onesignal_api_key: Option<String>,
    pub onesignal_timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Fields set in `self` win over those in `base`.
    #[must_use]
    pub fn or(self, base: ConfigFile) -> ConfigFile {
        ConfigFile {
            host: self.host.or(base.host),
            port: self.port.or(base.port),
            data_dir: self.data_dir.or(base.data_dir),
            jwt_secret: self.jwt_secret.or(base.jwt_secret),
            redis_url: self.redis_url.or(base.redis_url),
            onesignal_app_id: self.onesignal_app_id.or(base.onesignal_app_id),
            onesignal_api_key: self.onesignal_api_key.or(base.onesignal_api_key),
            onesignal_timeout_secs: self.onesignal_timeout_secs.or(base.onesignal_timeout_secs),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<ConfigFile> for ServerConfig {
    type Error = Error;

    fn try_from(file: ConfigFile) -> Result<Self> {
        let jwt_secret = non_empty(file.jwt_secret)
            .ok_or_else(|| Error::Config("a JWT secret is required".to_string()))?;

        let onesignal = match (
            non_empty(file.onesignal_app_id),
            non_empty(file.onesignal_api_key),
        ) {
            (Some(app_id), Some(api_key)) => Some(OneSignalConfig {
                app_id,
                api_key,
                endpoint: crate::notify::DEFAULT_ONESIGNAL_ENDPOINT.to_string(),
                timeout_secs: file
                    .onesignal_timeout_secs
                    .unwrap_or(DEFAULT_NOTIFY_TIMEOUT_SECS),
            }),
            (None, None) => None,
            _ => {
                return Err(Error::Config(
                    "OneSignal needs both an app id and an api key".to_string(),
                ));
            }
        };

        Ok(Self {
            host: file.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: file.port.unwrap_or(DEFAULT_PORT),
            data_dir: file
                .data_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            jwt_secret,
            redis_url: non_empty(file.redis_url),
            onesignal,
        })
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("mentorboard.db")
    }
}
