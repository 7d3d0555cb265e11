use crate::r#const::subscription_limits;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use super::common::RetryConfig;

/// 订阅级别的 UDP 覆盖设置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UdpOverride {
    // 沿用节点自身的设置
    Inherit,
    // 强制开启
    ForceOn,
    // 强制关闭
    ForceOff,
}

impl From<Option<bool>> for UdpOverride {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Inherit,
            Some(true) => Self::ForceOn,
            Some(false) => Self::ForceOff,
        }
    }
}

// 默认最大订阅大小
fn default_max_size() -> usize {
    subscription_limits::DEFAULT_MAX_SIZE
}

// 订阅配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct SubscriptionConfig {
    // 订阅URL
    #[validate(url(message = "Subscription URL must be a valid URL"))]
    pub url: String,
    // 请求头，原样发送
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    // UDP 覆盖（可选）
    #[serde(default, alias = "udpEnable")]
    pub udp_enable: Option<bool>,
    // 节点名前缀标签（可选）
    #[serde(default)]
    pub name: Option<String>,
    // 重试配置（可选）
    #[serde(default)]
    #[validate(nested)]
    pub retry: Option<RetryConfig>,
    // 代理（可选）
    #[serde(default)]
    pub proxy: Option<String>,
    // 最大订阅大小（字节，默认10MB）
    #[serde(default = "default_max_size")]
    #[validate(range(
        min = subscription_limits::MIN_SIZE,
        max = subscription_limits::MAX_SIZE,
        message = "Subscription max size out of range"
    ))]
    pub max_size: usize,
}

impl SubscriptionConfig {
    // 创建一个只有URL的订阅配置
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            udp_enable: None,
            name: None,
            retry: None,
            proxy: None,
            max_size: default_max_size(),
        }
    }

    pub fn udp_override(&self) -> UdpOverride {
        UdpOverride::from(self.udp_enable)
    }

    // 空标签等同于没有标签
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
