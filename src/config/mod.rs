use crate::error::ConfigError;
use crate::proto::{Proxy, ProxyGroup};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path, path::PathBuf};
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

pub mod common;
pub mod core;
pub mod ruleset;
pub mod subscription;

pub use common::*;
pub use core::*;
pub use ruleset::*;
pub use subscription::*;

// 配置结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// 自定义验证函数 - 验证代理组名称唯一性
pub fn validate_unique_group_names(config: &AppConfig) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    for group in &config.proxy_groups {
        if !names.insert(group.name.as_str()) {
            return Err(ValidationError::new("duplicate_group_name"));
        }
    }
    Ok(())
}

// 自定义验证函数 - 验证输入输出路径不为空
pub fn validate_paths(config: &AppConfig) -> Result<(), ValidationError> {
    if config.base_file.as_os_str().is_empty() {
        return Err(ValidationError::new("missing_base_file"));
    }
    if config.target.as_os_str().is_empty() {
        return Err(ValidationError::new("missing_target"));
    }
    Ok(())
}

// 应用配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
#[validate(schema(
    function = "validate_unique_group_names",
    message = "Proxy group names must be unique"
))]
#[validate(schema(
    function = "validate_paths",
    message = "base-file and target must not be empty"
))]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    // 基础模板路径
    pub base_file: PathBuf,
    // 输出路径
    pub target: PathBuf,
    // 排除节点的正则表达式（可选）
    #[serde(default)]
    pub exclude: Option<String>,
    // HTTP客户端配置（可选）
    #[serde(default)]
    #[validate(nested)]
    pub http_client: Option<HttpClientConfig>,
    // 订阅列表
    #[serde(default, rename = "sub-links")]
    #[validate(nested)]
    pub subscriptions: Vec<SubscriptionConfig>,
    // 规则集列表
    #[serde(default, rename = "ruleset")]
    #[validate(nested)]
    pub rule_sets: Vec<RuleSetConfig>,
    // 预置节点，排在所有订阅节点之前
    #[serde(default)]
    pub proxies: Vec<Proxy>,
    // 代理组
    #[serde(default)]
    pub proxy_groups: Vec<ProxyGroup>,
}

impl AppConfig {
    // 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        debug!("Loading configuration file: {:?}", path.as_ref());
        let content = fs::read_to_string(path).map_err(ConfigError::LoadError)?;
        Self::from_yaml(&content)
    }

    // 从 YAML 文本加载配置
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: AppConfig = serde_yaml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    // 验证配置有效性
    pub fn validate(&self) -> ConfigResult<()> {
        // 使用 validator 库进行验证
        if let Err(errors) = Validate::validate(self) {
            return Err(ConfigError::ValidationError(format_validation_errors(
                &errors,
            )));
        }
        // 正则表达式必须能编译
        self.exclude_regex()?;
        Ok(())
    }

    // 编译排除正则，空字符串视为未配置
    pub fn exclude_regex(&self) -> ConfigResult<Option<Regex>> {
        match self.exclude.as_deref() {
            Some(pattern) if !pattern.is_empty() => Ok(Some(Regex::new(pattern)?)),
            _ => Ok(None),
        }
    }

    // HTTP客户端配置，未提供时使用默认值
    pub fn http_client_config(&self) -> HttpClientConfig {
        self.http_client.clone().unwrap_or_default()
    }
}

// 将 ValidationErrors 转换为友好的错误信息
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    // 格式化字段错误
    for (field, error_kind) in errors.errors() {
        match error_kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    messages.push(format!("Field '{}': {}", field, message));
                }
            }
            validator::ValidationErrorsKind::Struct(struct_errors) => {
                messages.push(format!(
                    "Struct '{}' validation failed: {}",
                    field,
                    format_validation_errors(struct_errors)
                ));
            }
            validator::ValidationErrorsKind::List(list_errors) => {
                for (index, err) in list_errors {
                    messages.push(format!(
                        "List '{}' at index {}: {}",
                        field,
                        index,
                        format_validation_errors(err)
                    ));
                }
            }
        }
    }

    if messages.is_empty() {
        "Unknown validation error".to_string()
    } else {
        messages.join("\n")
    }
}
