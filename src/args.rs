use crate::error::{AppError, ConfigError};
use crate::r#const::cli_defaults;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

// Clash 订阅合并工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "clashconv",
    author,
    version,
    about = "Merge Clash subscriptions, rule sets and a base template into one configuration\n\n\
             Key Features:\n\
             - Subscriptions: Concurrent pulling, per-source UDP override and name label, emoji stripping\n\
             - Proxies: Deterministic merge order, duplicate name suffixing, regex exclusion\n\
             - Proxy Groups: '*' member expands to every aggregated proxy\n\
             - Rules: Inline values and local rule files tagged with their rule-set name\n\
             - Base Template: Every unrelated field is carried over unchanged"
)]
pub struct Args {
    // 配置文件路径
    #[arg(short, long, default_value = cli_defaults::CONFIG_PATH)]
    pub config: PathBuf,

    // 输出文件路径（覆盖配置中的 target）
    #[arg(
        short = 'o',
        long = "output",
        help = "Write the generated configuration here instead of the configured target"
    )]
    pub output: Option<PathBuf>,

    // 测试配置
    #[arg(
        short = 't',
        long = "test",
        action = ArgAction::SetTrue,
        help = "Test configuration file for validity and exit"
    )]
    pub test_config: bool,

    // 启用调试日志
    #[arg(
        short = 'd',
        long = "debug",
        action = ArgAction::SetTrue,
        help = "Enable debug level logging for detailed output"
    )]
    pub debug: bool,
}

impl Args {
    // 解析命令行参数
    pub fn parse_args() -> Self {
        Args::parse()
    }

    // 验证参数
    pub fn validation(&self) -> Result<(), AppError> {
        if self.config.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Configuration path must not be empty".to_string(),
            )
            .into());
        }
        if let Some(output) = &self.output {
            if output.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Output path must not be empty".to_string(),
                )
                .into());
            }
        }
        Ok(())
    }
}
