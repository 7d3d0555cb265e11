use crate::error::AppError;
use crate::proto::{Proxy, ProxyGroup};
use crate::r#const::{document_keys, output_header};
use chrono::{DateTime, Local};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// 基础模板
///
/// 以有序映射保存，合并时只覆盖 `proxies`、`proxy-groups`、`rules` 三个字段，
/// 其余字段（包括未知字段）保持原位置与原值。
#[derive(Debug, Clone, PartialEq)]
pub struct BaseDocument {
    root: Mapping,
}

impl BaseDocument {
    // 从文件读取基础模板
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        debug!("Loading base template: {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::BaseTemplate(format!("failed to read {:?}: {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    // 从 YAML 文本解析基础模板
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        let value: Value = serde_yaml::from_str(content)
            .map_err(|e| AppError::BaseTemplate(format!("failed to parse: {}", e)))?;
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            // 空模板视为空映射
            Value::Null => Ok(Self {
                root: Mapping::new(),
            }),
            other => Err(AppError::BaseTemplate(format!(
                "root must be a mapping, found {}",
                value_kind(&other)
            ))),
        }
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    /// 把计算结果写入模板
    ///
    /// 已存在的键保持原位置，不存在的键依次追加。
    pub fn assemble(
        self,
        proxies: &[Proxy],
        groups: &[ProxyGroup],
        rules: &[String],
    ) -> Result<Mapping, AppError> {
        let mut root = self.root;
        root.insert(
            Value::from(document_keys::PROXIES),
            serde_yaml::to_value(proxies).map_err(AppError::Serialize)?,
        );
        root.insert(
            Value::from(document_keys::PROXY_GROUPS),
            serde_yaml::to_value(groups).map_err(AppError::Serialize)?,
        );
        root.insert(
            Value::from(document_keys::RULES),
            serde_yaml::to_value(rules).map_err(AppError::Serialize)?,
        );
        Ok(root)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

// 渲染输出文档，带生成时间头
pub fn render(document: &Mapping, generated_at: DateTime<Local>) -> Result<String, AppError> {
    let body = serde_yaml::to_string(document).map_err(AppError::Serialize)?;
    Ok(format!(
        "{}\n# {}\n{}",
        output_header::GENERATOR_LINE,
        generated_at.format(output_header::TIMESTAMP_FORMAT),
        body
    ))
}

// 写入目标文件（创建或覆盖）
pub fn write_target<P: AsRef<Path>>(path: P, content: &str) -> Result<(), AppError> {
    let path = path.as_ref();
    fs::write(path, content).map_err(|e| AppError::WriteTarget {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Wrote generated configuration to {:?}", path);
    Ok(())
}
