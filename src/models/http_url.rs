//! Absolute http(s) URLs

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};
use url::Url;

/// An absolute `http` or `https` URL with a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpUrl(Url);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidUrl {
    #[error("input is not a valid URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("URL scheme should be 'http' or 'https', got '{0}'")]
    Scheme(String),

    #[error("URL is missing a host")]
    MissingHost,
}

impl HttpUrl {
    pub fn parse(input: &str) -> Result<Self, InvalidUrl> {
        let url = Url::parse(input.trim())?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidUrl::Scheme(url.scheme().to_string()));
        }
        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(Self(url)),
            _ => Err(InvalidUrl::MissingHost),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }
}

impl FromStr for HttpUrl {
    type Err = InvalidUrl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HttpUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HttpUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        HttpUrl::parse(&raw).map_err(de::Error::custom)
    }
}
