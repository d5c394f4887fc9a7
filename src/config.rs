use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Directory uploaded post images are served from.
    pub media_root: PathBuf,
    /// Public prefix for post images: a path such as `/media/` or an absolute
    /// URL when images live on another host.
    pub media_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/blog.db".to_string(),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            media_root: PathBuf::from("media"),
            media_url: "/media/".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidHost(String),
    InvalidPort(String),
    InvalidMediaUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHost(v) => write!(f, "HOST is not an IP address: {v}"),
            ConfigError::InvalidPort(v) => write!(f, "PORT must be a number: {v}"),
            ConfigError::InvalidMediaUrl(v) => {
                write!(f, "MEDIA_URL must be an absolute URL or start with '/': {v}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Read settings from the process environment. Call `dotenvy::dotenv()`
    /// first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidHost(v))?,
            None => defaults.host,
        };
        let port = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidPort(v))?,
            None => defaults.port,
        };
        let media_url = match lookup("MEDIA_URL") {
            Some(v) if v.starts_with('/') || Url::parse(&v).is_ok() => v,
            Some(v) => return Err(ConfigError::InvalidMediaUrl(v)),
            None => defaults.media_url,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host,
            port,
            media_root: lookup("MEDIA_ROOT").map(PathBuf::from).unwrap_or(defaults.media_root),
            media_url,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, "sqlite:data/blog.db");
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.media_url, "/media/");
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("MEDIA_URL", "https://cdn.example.com/blog/"),
            ("MEDIA_ROOT", "/srv/media"),
        ]))
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.media_url, "https://cdn.example.com/blog/");
        assert_eq!(config.media_root, PathBuf::from("/srv/media"));
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn rejects_relative_media_url() {
        let err = Config::from_lookup(lookup(&[("MEDIA_URL", "media")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMediaUrl(_)));
    }
}
