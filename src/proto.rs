use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// 代理节点
///
/// 只解析合并过程需要的字段，其余协议相关字段原样保存在 `extra` 中，
/// 输出时按原顺序写回。
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Proxy {
    // 节点名称（去重、加前缀时会被修改）
    pub name: String,
    // 服务器地址（direct 等类型没有）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    // 服务器端口
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    // 是否启用 UDP
    #[serde(default)]
    pub udp: bool,
    // 未识别的字段
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Proxy {
    // 创建一个没有附加字段的代理节点
    pub fn new(name: impl Into<String>, server: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            server: Some(server.into()),
            port: Some(port),
            udp: false,
            extra: Mapping::new(),
        }
    }
}

/// 代理组
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProxyGroup {
    // 组名称
    pub name: String,
    // 组类型（select / url-test / fallback ...）
    #[serde(rename = "type")]
    pub r#type: String,
    // 成员列表，可包含通配符 "*"
    #[serde(default)]
    pub proxies: Vec<String>,
    // 未识别的字段
    #[serde(flatten)]
    pub extra: Mapping,
}

// 订阅文档，只关心其中的 proxies
#[derive(Debug, Deserialize, Default)]
pub struct SubscriptionDocument {
    #[serde(default)]
    pub proxies: Vec<Proxy>,
}

impl SubscriptionDocument {
    // 从订阅原始内容解析
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_yaml::Error> {
        // 空订阅视为没有节点
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_yaml::from_slice(data)
    }
}

// 收集所有代理名称，保持顺序
pub fn proxy_names(proxies: &[Proxy]) -> Vec<String> {
    proxies.iter().map(|p| p.name.clone()).collect()
}
