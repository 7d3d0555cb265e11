// 应用常量定义

//
// 配置参数限制常量
//

// HTTP客户端配置限制
pub mod http_client_limits {
    // 默认连接超时（秒）
    pub const DEFAULT_CONNECT_TIMEOUT: u64 = 5;
    // 最小连接超时（秒）
    pub const MIN_CONNECT_TIMEOUT: u64 = 1;
    // 最大连接超时（秒）
    pub const MAX_CONNECT_TIMEOUT: u64 = 120;
    // 默认请求超时（秒）
    pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;
    // 最小请求超时（秒）
    pub const MIN_REQUEST_TIMEOUT: u64 = 1;
    // 最大请求超时（秒）
    pub const MAX_REQUEST_TIMEOUT: u64 = 1200;
    // 默认空闲超时（秒）
    pub const DEFAULT_IDLE_TIMEOUT: u64 = 10;
    // 最小空闲超时（秒）
    pub const MIN_IDLE_TIMEOUT: u64 = 5;
    // 最大空闲超时（秒）
    pub const MAX_IDLE_TIMEOUT: u64 = 1800;
    // 默认keepalive时间（秒）
    pub const DEFAULT_KEEPALIVE: u32 = 30;
    // 最小keepalive时间（秒）
    pub const MIN_KEEPALIVE: u32 = 5;
    // 最大keepalive时间（秒）
    pub const MAX_KEEPALIVE: u32 = 600;
}

// 重试配置限制
pub mod retry_limits {
    // 最小重试次数
    pub const MIN_ATTEMPTS: u32 = 1;
    // 最大重试次数
    pub const MAX_ATTEMPTS: u32 = 100;
    // 最小重试延迟（秒）
    pub const MIN_DELAY: u32 = 1;
    // 最大重试延迟（秒）
    pub const MAX_DELAY: u32 = 120;
}

// 订阅内容大小限制
pub mod subscription_limits {
    // 默认最大订阅大小（字节）- 10MB
    pub const DEFAULT_MAX_SIZE: usize = 10 * 1024 * 1024;
    // 最小订阅大小（字节）- 1KB
    pub const MIN_SIZE: usize = 1024;
    // 最大订阅大小（字节）- 50MB
    pub const MAX_SIZE: usize = 50 * 1024 * 1024;
}

// 代理组常量
pub mod proxy_group {
    // 表示“全部代理”的通配符
    pub const WILDCARD: &str = "*";
}

// 规则集常量
pub mod ruleset {
    // 注释前缀
    pub const COMMENT_PREFIX: char = '#';
    // 字段分隔符
    pub const FIELD_SEPARATOR: char = ',';
    // 规则集名称插入的位置（第三个字段）
    pub const NAME_FIELD_INDEX: usize = 2;
}

// 输出文档常量
pub mod document_keys {
    // 代理列表
    pub const PROXIES: &str = "proxies";
    // 代理组列表
    pub const PROXY_GROUPS: &str = "proxy-groups";
    // 规则列表
    pub const RULES: &str = "rules";
}

// 输出文件头
pub mod output_header {
    // 生成器标识
    pub const GENERATOR_LINE: &str = "# Generated by clashconv.";
    // 时间戳格式
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

// 命令行默认值
pub mod cli_defaults {
    // 默认配置文件路径
    pub const CONFIG_PATH: &str = "./config.yaml";
}
