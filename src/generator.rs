use crate::config::AppConfig;
use crate::document::{self, BaseDocument};
use crate::error::AppError;
use crate::fetch::SubscriptionFetcher;
use crate::group;
use crate::proto::proxy_names;
use crate::ruleset;
use crate::subscription::ProxyAggregator;
use chrono::Local;
use serde_yaml::Mapping;
use std::path::{Path, PathBuf};
use tracing::info;

// 一次生成的结果
#[derive(Debug, Clone)]
pub struct GenerateOutput {
    // 合并后的文档
    pub document: Mapping,
    // 节点数量
    pub proxy_count: usize,
    // 代理组数量
    pub group_count: usize,
    // 规则数量
    pub rule_count: usize,
}

/// 配置生成器
///
/// 每次运行都从输入重新计算，不保留任何状态。
pub struct Generator<F> {
    config: AppConfig,
    aggregator: ProxyAggregator<F>,
}

impl<F: SubscriptionFetcher> Generator<F> {
    pub fn new(config: AppConfig, fetcher: F) -> Self {
        Self {
            config,
            aggregator: ProxyAggregator::new(fetcher),
        }
    }

    // 聚合节点、展开代理组、展开规则，并合并到基础模板
    pub async fn run(&self) -> Result<GenerateOutput, AppError> {
        let exclude = self.config.exclude_regex()?;

        let proxies = self
            .aggregator
            .aggregate(
                &self.config.proxies,
                &self.config.subscriptions,
                exclude.as_ref(),
            )
            .await;

        let groups = group::expand(&self.config.proxy_groups, &proxy_names(&proxies));
        let rules = ruleset::flatten(&self.config.rule_sets)?;

        let base = BaseDocument::from_file(&self.config.base_file)?;
        let document = base.assemble(&proxies, &groups, &rules)?;

        Ok(GenerateOutput {
            document,
            proxy_count: proxies.len(),
            group_count: groups.len(),
            rule_count: rules.len(),
        })
    }

    // 生成并写入目标文件，output 为空时使用配置中的 target
    pub async fn run_and_write(&self, output: Option<&Path>) -> Result<GenerateOutput, AppError> {
        let result = self.run().await?;
        let target: PathBuf = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.target.clone());

        let content = document::render(&result.document, Local::now())?;
        document::write_target(&target, &content)?;

        info!(
            "Generate target success: {} proxies, {} proxy groups, {} rules",
            result.proxy_count, result.group_count, result.rule_count
        );
        Ok(result)
    }
}
