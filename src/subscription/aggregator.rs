use crate::config::{SubscriptionConfig, UdpOverride};
use crate::error::AppError;
use crate::fetch::SubscriptionFetcher;
use crate::proto::{proxy_names, Proxy, SubscriptionDocument};
use futures_util::future::join_all;
use regex::Regex;
use tracing::{debug, info, warn};

use super::naming::{dedup_names, filter_excluded, strip_emojis, NameRegistry};

/// 单次合并的上下文
///
/// 名称集合与排除规则只属于一次运行，由单线程的合并步骤独占。
#[derive(Debug)]
pub struct AggregationContext<'a> {
    exclude: Option<&'a Regex>,
    registry: NameRegistry,
}

impl<'a> AggregationContext<'a> {
    pub fn new(exclude: Option<&'a Regex>) -> Self {
        Self {
            exclude,
            registry: NameRegistry::new(),
        }
    }

    // 先去重，再按排除规则过滤
    pub fn finish(mut self, mut proxies: Vec<Proxy>) -> Vec<Proxy> {
        dedup_names(&mut proxies, &mut self.registry);
        filter_excluded(proxies, self.exclude)
    }
}

/// 订阅节点聚合器
pub struct ProxyAggregator<F> {
    fetcher: F,
}

impl<F: SubscriptionFetcher> ProxyAggregator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// 合并预置节点与所有订阅节点
    ///
    /// 订阅并发拉取，但合并严格按声明顺序进行；拉取或解析失败的订阅只记录警告，
    /// 不影响其他订阅。
    pub async fn aggregate(
        &self,
        preloaded: &[Proxy],
        sources: &[SubscriptionConfig],
        exclude: Option<&Regex>,
    ) -> Vec<Proxy> {
        // join_all 的结果与输入位置一一对应，与完成先后无关
        let results = join_all(sources.iter().map(|source| self.fetcher.fetch(source))).await;

        let mut merged = Vec::with_capacity(preloaded.len());
        merged.extend_from_slice(preloaded);

        for (source, result) in sources.iter().zip(results) {
            let proxies = match result.and_then(|data| parse_subscription(source, &data)) {
                Ok(proxies) => proxies,
                Err(e) => {
                    warn!("Error pulling subscription {}: {}", source.url, e);
                    continue;
                }
            };
            debug!(
                "Subscription {} contributed {} proxies",
                source.url,
                proxies.len()
            );
            merged.extend(proxies);
        }

        info!("Pull all subscriptions successfully.");

        let proxies = AggregationContext::new(exclude).finish(merged);
        info!(
            "Parse subscription success: {}",
            proxy_names(&proxies).join(",")
        );
        proxies
    }
}

// 解析单个订阅并应用订阅级别的设置
pub fn parse_subscription(
    source: &SubscriptionConfig,
    data: &[u8],
) -> Result<Vec<Proxy>, AppError> {
    let document = SubscriptionDocument::from_slice(data).map_err(AppError::SubscriptionParse)?;
    let mut proxies = document.proxies;
    apply_source_overrides(&mut proxies, source);
    info!("Successfully pull subscription: {}", source.url);
    Ok(proxies)
}

// 依次应用 UDP 覆盖、去除 Emoji、添加标签前缀
pub fn apply_source_overrides(proxies: &mut [Proxy], source: &SubscriptionConfig) {
    let udp_override = source.udp_override();
    let label = source.label();

    for proxy in proxies.iter_mut() {
        match udp_override {
            UdpOverride::Inherit => {}
            UdpOverride::ForceOn => proxy.udp = true,
            UdpOverride::ForceOff => proxy.udp = false,
        }

        proxy.name = strip_emojis(&proxy.name);

        // [label]name
        if let Some(label) = label {
            proxy.name = format!("[{}]{}", label, proxy.name);
        }
    }
}
