use std::io;
use std::path::PathBuf;
use thiserror::Error;

// 代理配置错误
#[derive(Debug, Error)]
#[error("Invalid proxy configuration: {0}")]
pub struct InvalidProxyConfig(pub String);

// HTTP客户端错误
#[derive(Debug, Error)]
#[error("HTTP client error: {0}")]
pub struct HttpClientError(pub String);

// Unified error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP middleware error: {0}")]
    HttpMiddleware(String),

    #[error("Subscription fetch error: {0}")]
    Fetch(String),

    #[error("Subscription parse error: {0}")]
    SubscriptionParse(#[source] serde_yaml::Error),

    #[error("Failed to read rule set '{name}' from {path:?}: {source}")]
    RuleSetRead {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Base template error: {0}")]
    BaseTemplate(String),

    #[error("YAML serialization error: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Failed to write target {path:?}: {source}")]
    WriteTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(#[from] InvalidProxyConfig),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] HttpClientError),
}

impl From<reqwest_middleware::Error> for AppError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => Self::Http(e),
            _ => Self::HttpMiddleware(err.to_string()),
        }
    }
}

// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadError(#[from] io::Error),

    #[error("YAML parsing error: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid exclude pattern: {0}")]
    InvalidExcludePattern(#[from] regex::Error),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
