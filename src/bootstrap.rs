//! Application bootstrap
//!
//! 进程级状态：加载配置与账号、安装日志订阅器。
//! 必须在构造任何 [`Publisher`](crate::publisher::Publisher) 之前调用一次；
//! 库的其余部分不会产生全局副作用

use crate::core::{load_accounts, AccountConfig, ConfigSource, JsonSettings, PublishError};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// 日志订阅器只安装一次
static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// 把配置中的级别字符串转换为 tracing 级别（未知值按 INFO 处理）
pub fn parse_level(level: &str) -> tracing::Level {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" | "CRITICAL" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

/// Initialize tracing for logging
/// 初始化 tracing 用于日志输出（重复调用无效果）
pub fn init_tracing(level: tracing::Level) {
    TRACING_INIT.get_or_init(|| {
        // 宿主程序可能已经安装了订阅器，此时保留宿主的
        let installed = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_thread_ids(true)
            .with_target(false)
            .try_init()
            .is_ok();
        if installed {
            tracing::info!("[App] 日志已初始化，级别 {}", level);
        }
    });
}

/// 应用上下文
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<JsonSettings>,
    pub accounts: Vec<Arc<AccountConfig>>,
}

impl AppContext {
    /// 加载配置和账号并初始化日志
    ///
    /// 配置文件缺失只会得到空配置；账号文件缺失或格式错误则返回错误
    pub fn init(settings_file: impl AsRef<Path>, accounts_file: impl AsRef<Path>) -> Result<Self, PublishError> {
        let settings = JsonSettings::load(settings_file);
        init_tracing(parse_level(&settings.logging_level()));

        let accounts = load_accounts(accounts_file)?
            .into_iter()
            .map(Arc::new)
            .collect();

        Ok(Self {
            settings: Arc::new(settings),
            accounts,
        })
    }

    /// 启用中的账号
    pub fn active_accounts(&self) -> impl Iterator<Item = &Arc<AccountConfig>> {
        self.accounts.iter().filter(|a| a.is_active)
    }

    /// 按账号ID查找
    pub fn account(&self, account_id: &str) -> Option<Arc<AccountConfig>> {
        self.accounts
            .iter()
            .find(|a| a.account_id == account_id)
            .cloned()
    }

    /// 以 trait 对象形式提供配置，供发布器使用
    pub fn config_source(&self) -> Arc<dyn ConfigSource> {
        self.settings.clone()
    }
}
