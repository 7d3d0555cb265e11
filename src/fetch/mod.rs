// 声明子模块
mod http;
mod http_client;

pub use http::HttpFetcher;
pub use http_client::HttpClient;

use crate::config::SubscriptionConfig;
use crate::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;

/// 订阅拉取接口
///
/// 给定订阅描述返回原始内容。实现不需要关心解析，也不需要保证顺序，
/// 合并顺序由聚合器负责。
#[async_trait]
pub trait SubscriptionFetcher: Send + Sync {
    async fn fetch(&self, subscription: &SubscriptionConfig) -> Result<Bytes, AppError>;
}
