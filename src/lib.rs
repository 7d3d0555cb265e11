pub mod args;
pub mod config;
pub mod r#const;
pub mod document;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod group;
pub mod proto;
pub mod ruleset;
pub mod subscription;

// 重导出常用组件
pub use args::Args;
pub use config::AppConfig;
pub use document::BaseDocument;
pub use error::{AppError, ConfigError};
pub use fetch::{HttpFetcher, SubscriptionFetcher};
pub use generator::{GenerateOutput, Generator};
pub use proto::{Proxy, ProxyGroup};
pub use subscription::ProxyAggregator;
