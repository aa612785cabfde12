//! 日志基础设施

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 安装全局 fmt 订阅者，只能调用一次
    pub fn init(config: &LoggingConfig) {
        tracing_subscriber::fmt()
            .with_env_filter(Self::filter(&config.level))
            .with_target(false)
            .init();
    }

    /// 无法解析的过滤表达式回退为 `info`
    pub fn filter(level: &str) -> EnvFilter {
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}
