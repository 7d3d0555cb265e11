use crate::proto::Proxy;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::info;

// 常见 Emoji 区块：表情、符号与图形、交通地图、杂项符号、装饰符号、补充符号、扩展符号、区域指示符（国旗）
static EMOJI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\x{1F600}-\x{1F64F}]|[\x{1F300}-\x{1F5FF}]|[\x{1F680}-\x{1F6FF}]|",
        r"[\x{2600}-\x{26FF}]|[\x{2700}-\x{27BF}]|[\x{1F900}-\x{1F9FF}]|",
        r"[\x{1FA70}-\x{1FAFF}]|[\x{1F1E6}-\x{1F1FF}]"
    ))
    .expect("emoji pattern is a valid regex")
});

// 移除名称中的 Emoji 字符
pub fn strip_emojis(input: &str) -> String {
    EMOJI_REGEX.replace_all(input, "").into_owned()
}

/// 已占用的节点名称集合
///
/// 冲突时追加 `[n]`，n 从 1 开始递增，直到与当前集合中的所有名称都不同。
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    // 占用一个名称，返回实际使用的（可能带后缀的）名称
    pub fn claim(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut count = 1;
        while self.names.contains(&candidate) {
            candidate = format!("{}[{}]", name, count);
            count += 1;
        }
        self.names.insert(candidate.clone());
        candidate
    }
}

// 按顺序为每个节点分配唯一名称
pub fn dedup_names(proxies: &mut [Proxy], registry: &mut NameRegistry) {
    for proxy in proxies.iter_mut() {
        let unique = registry.claim(&proxy.name);
        proxy.name = unique;
    }
}

// 移除名称匹配排除规则的节点，返回幸存节点的新列表
pub fn filter_excluded(proxies: Vec<Proxy>, exclude: Option<&Regex>) -> Vec<Proxy> {
    let Some(exclude) = exclude else {
        return proxies;
    };

    proxies
        .into_iter()
        .filter(|proxy| {
            if exclude.is_match(&proxy.name) {
                info!("Proxy {} matches exclude pattern, dropped", proxy.name);
                false
            } else {
                true
            }
        })
        .collect()
}
