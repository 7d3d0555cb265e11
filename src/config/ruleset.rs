use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

// 自定义验证函数 - location 与 value 必须且只能提供一个
fn validate_rule_source(rule_set: &RuleSetConfig) -> Result<(), ValidationError> {
    let has_value = rule_set.value.as_deref().is_some_and(|v| !v.is_empty());
    let has_location = rule_set
        .location
        .as_deref()
        .is_some_and(|p| !p.as_os_str().is_empty());
    if has_value == has_location {
        return Err(ValidationError::new("rule_set_requires_location_or_value"));
    }
    Ok(())
}

/// 规则来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource<'a> {
    // 单条内联规则
    Inline(&'a str),
    // 本地规则文件
    File(&'a Path),
}

// 规则集配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[validate(schema(
    function = "validate_rule_source",
    message = "Rule set requires exactly one of location or value"
))]
#[serde(rename_all = "kebab-case")]
pub struct RuleSetConfig {
    // 规则集名称，会写入每条规则
    #[validate(length(min = 1, message = "Rule set name must not be empty"))]
    pub name: String,
    // 规则文件路径（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
    // 内联规则（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RuleSetConfig {
    // 创建内联规则集
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            value: Some(value.into()),
        }
    }

    // 创建文件规则集
    pub fn file(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location: Some(location.into()),
            value: None,
        }
    }

    /// 解析规则来源，内联值优先
    ///
    /// 两者都为空时返回 `None`，通过 [`Validate`] 的配置不会出现这种情况。
    pub fn source(&self) -> Option<RuleSource<'_>> {
        match (&self.value, &self.location) {
            (Some(value), _) if !value.is_empty() => Some(RuleSource::Inline(value)),
            (_, Some(location)) if !location.as_os_str().is_empty() => {
                Some(RuleSource::File(location))
            }
            _ => None,
        }
    }
}
