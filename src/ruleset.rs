use crate::config::{RuleSetConfig, RuleSource};
use crate::error::AppError;
use crate::r#const::ruleset::{COMMENT_PREFIX, FIELD_SEPARATOR, NAME_FIELD_INDEX};
use std::fs;
use tracing::{debug, info, warn};

/// 把所有规则集展开为一条有序规则列表
///
/// 每条规则都会带上所属规则集的名称：内联规则追加在末尾，文件规则插入到第三个字段。
/// 规则文件是本地必需的输入，读取失败会中止整个运行。
pub fn flatten(rule_sets: &[RuleSetConfig]) -> Result<Vec<String>, AppError> {
    let mut rules = Vec::new();

    for rule_set in rule_sets {
        match rule_set.source() {
            Some(RuleSource::Inline(value)) => {
                rules.push(tag_inline_rule(value, &rule_set.name));
            }
            Some(RuleSource::File(path)) => {
                let data = fs::read(path).map_err(|e| AppError::RuleSetRead {
                    name: rule_set.name.clone(),
                    path: path.to_path_buf(),
                    source: e,
                })?;
                // 非 UTF-8 字节替换为占位符，不中止运行
                let content = String::from_utf8_lossy(&data);
                let before = rules.len();
                rules.extend(parse_rule_lines(&content, &rule_set.name));
                debug!(
                    "Rule set {} loaded {} rules from {:?}",
                    rule_set.name,
                    rules.len() - before,
                    path
                );
            }
            None => {
                warn!("Rule set {} has neither location nor value, skipped", rule_set.name);
            }
        }
    }

    info!("Success parse rules, total {}.", rules.len());
    Ok(rules)
}

// 内联规则：<value>,<name>
pub fn tag_inline_rule(value: &str, name: &str) -> String {
    format!("{}{}{}", value, FIELD_SEPARATOR, name)
}

// 把规则集名称插入到单条规则的第三个字段
pub fn tag_file_rule(line: &str, name: &str) -> String {
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    // 字段不足时追加到末尾
    let index = NAME_FIELD_INDEX.min(fields.len());
    fields.insert(index, name);
    let separator = FIELD_SEPARATOR.to_string();
    fields.join(separator.as_str())
}

// 解析规则文件内容，跳过空行与注释
pub fn parse_rule_lines<'a>(content: &'a str, name: &'a str) -> impl Iterator<Item = String> + 'a {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(move |line| tag_file_rule(line, name))
}
