use crate::config::{HttpClientConfig, SubscriptionConfig};
use crate::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::http_client::HttpClient;
use super::SubscriptionFetcher;

/// 基于 reqwest 的订阅拉取器
///
/// 每个订阅可以声明自己的代理和重试策略，所以客户端按订阅创建。
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    config: HttpClientConfig,
}

impl HttpFetcher {
    pub fn new(config: HttpClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SubscriptionFetcher for HttpFetcher {
    async fn fetch(&self, subscription: &SubscriptionConfig) -> Result<Bytes, AppError> {
        debug!("Pulling subscription: {}", subscription.url);

        let client = HttpClient::create(
            &self.config,
            subscription.proxy.as_deref(),
            subscription.retry.as_ref(),
        )?;

        let request = client
            .get(&subscription.url)
            .headers(HttpClient::header_map(&subscription.headers)?);

        HttpClient::send_request(request, subscription.max_size).await
    }
}
