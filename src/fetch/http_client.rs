use crate::config::{HttpClientConfig, RetryConfig};
use crate::error::{AppError, HttpClientError, InvalidProxyConfig};
use crate::r#const::retry_limits;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use retry_policies::Jitter;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

pub struct HttpClient;

impl HttpClient {
    // 创建HTTP客户端
    pub fn create(
        config: &HttpClientConfig,
        proxy: Option<&str>,
        retry_config: Option<&RetryConfig>,
    ) -> Result<ClientWithMiddleware, AppError> {
        debug!(
            "Creating HTTP client for subscription, config: {:?}, proxy: {:?}, retry_config: {:?}",
            config, proxy, retry_config
        );

        // 创建客户端构建器
        let mut client_builder = reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .timeout(Duration::from_secs(config.request_timeout));

        // 配置TCP keepalive
        if let Some(keepalive) = config.keepalive {
            client_builder = client_builder.tcp_keepalive(Duration::from_secs(keepalive as u64));
        }

        // 配置空闲连接超时
        if let Some(idle_timeout) = config.idle_timeout {
            client_builder = client_builder.pool_idle_timeout(Duration::from_secs(idle_timeout));
        }

        // 配置用户代理
        if let Some(ref agent) = config.agent {
            client_builder = client_builder.user_agent(agent);
        }

        // 配置代理
        if let Some(proxy_url) = proxy {
            client_builder = client_builder.proxy(reqwest::Proxy::all(proxy_url).map_err(|e| {
                AppError::InvalidProxy(InvalidProxyConfig(format!(
                    "Proxy configuration error: {}",
                    e
                )))
            })?);
        }

        // 创建基础HTTP客户端
        let client = client_builder.build().map_err(|e| {
            AppError::HttpError(HttpClientError(format!(
                "Failed to create HTTP client: {}",
                e
            )))
        })?;

        // 配置重试策略
        let middleware_client = if let Some(retry) = retry_config {
            let retry_policy = ExponentialBackoff::builder()
                // 设置重试时间间隔的上下限
                .retry_bounds(
                    Duration::from_secs(retry.delay as u64),
                    Duration::from_secs(retry_limits::MAX_DELAY as u64),
                )
                // 指数退避的基数必须大于 1，否则间隔不会增长
                .base(2)
                // 使用有界抖动来避免多个客户端同时重试
                .jitter(Jitter::Bounded)
                // 配置最大重试次数
                .build_with_max_retries(retry.attempts);

            ClientBuilder::new(client)
                .with(RetryTransientMiddleware::new_with_policy(retry_policy))
                .build()
        } else {
            // 不进行重试
            ClientBuilder::new(client).build()
        };

        Ok(middleware_client)
    }

    // 把订阅中声明的请求头转换为 HeaderMap
    pub fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, AppError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                AppError::HttpError(HttpClientError(format!("Invalid header name {}: {}", key, e)))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                AppError::HttpError(HttpClientError(format!(
                    "Invalid value for header {}: {}",
                    key, e
                )))
            })?;
            map.insert(name, value);
        }
        Ok(map)
    }

    // 发送middleware请求并读取响应体
    pub async fn send_request(
        request: RequestBuilder,
        max_size: usize,
    ) -> Result<bytes::Bytes, AppError> {
        // 发送请求
        let response = request.send().await?;

        // 检查状态码
        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "Subscription server returned error: {}",
                response.status()
            )));
        }

        // 读取响应体
        let response_data = response.bytes().await?;

        // 检查订阅大小
        if response_data.len() > max_size {
            return Err(AppError::Fetch(format!(
                "Subscription size ({} bytes) exceeds configured limit ({} bytes)",
                response_data.len(),
                max_size
            )));
        }

        Ok(response_data)
    }
}
