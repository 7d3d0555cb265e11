use crate::proto::ProxyGroup;
use crate::r#const::proxy_group::WILDCARD;
use tracing::info;

/// 展开代理组中的通配符
///
/// 只替换每个组中从左到右遇到的第一个 `*`，之后的 `*` 原样保留。
/// 必须在节点去重和过滤完成之后调用。
pub fn expand(groups: &[ProxyGroup], all_proxy_names: &[String]) -> Vec<ProxyGroup> {
    let expanded: Vec<ProxyGroup> = groups
        .iter()
        .map(|group| expand_group(group, all_proxy_names))
        .collect();
    info!("Success parse proxy groups, total {}.", expanded.len());
    expanded
}

// 展开单个代理组
pub fn expand_group(group: &ProxyGroup, all_proxy_names: &[String]) -> ProxyGroup {
    let Some(index) = group.proxies.iter().position(|member| member == WILDCARD) else {
        return group.clone();
    };

    let mut members = Vec::with_capacity(group.proxies.len() - 1 + all_proxy_names.len());
    members.extend_from_slice(&group.proxies[..index]);
    members.extend_from_slice(all_proxy_names);
    members.extend_from_slice(&group.proxies[index + 1..]);

    ProxyGroup {
        proxies: members,
        ..group.clone()
    }
}
