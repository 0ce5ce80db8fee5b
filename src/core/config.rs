// Config module - read-only settings lookup
// 配置模块 - 只读配置查询（settings.json / accounts.json）

use super::{AccountConfig, PublishError};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// 媒体目录未配置时的默认值
pub const DEFAULT_MEDIA_DIRECTORY: &str = "media_files";

/// 自动化相关设置所在的配置块
const AUTOMATION_SECTION: &str = "twitter_automation";

/// Read-only configuration source
/// 只读配置源
///
/// 实现方只需提供按点分路径查询，其余方法均有默认实现
pub trait ConfigSource: Send + Sync {
    /// 按点分路径查询，例如 `logging.level`
    fn get(&self, path: &str) -> Option<Value>;

    /// 相对路径的解析根目录
    fn project_root(&self) -> PathBuf;

    /// 查询字符串值（空白字符串视为未配置）
    fn get_str(&self, path: &str) -> Option<String> {
        self.get(path)
            .and_then(|v| v.as_str().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
    }

    /// 预置社区文案文件路径
    fn community_replies_file(&self) -> Option<String> {
        self.get_str(&format!("{}.community_replies_file", AUTOMATION_SECTION))
    }

    /// 媒体下载目录
    fn media_directory(&self) -> String {
        self.get_str(&format!("{}.media_directory", AUTOMATION_SECTION))
            .unwrap_or_else(|| DEFAULT_MEDIA_DIRECTORY.to_string())
    }

    /// 日志级别
    fn logging_level(&self) -> String {
        self.get_str("logging.level").unwrap_or_else(|| "INFO".to_string())
    }
}

/// Settings loaded from a JSON file
/// 从 JSON 文件加载的配置
#[derive(Debug, Clone)]
pub struct JsonSettings {
    settings: Value,
    project_root: PathBuf,
}

impl JsonSettings {
    /// 加载配置文件
    ///
    /// 文件不存在或格式错误时记录日志并使用空配置，不会失败。
    /// 项目根目录取配置文件所在目录的上一级（`config/settings.json` 约定）。
    pub fn load(settings_file: impl AsRef<Path>) -> Self {
        let settings_file = settings_file.as_ref();
        let settings = match std::fs::read_to_string(settings_file) {
            Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) if value.is_object() => {
                    tracing::debug!("[Config] 已加载配置: {}", settings_file.display());
                    value
                }
                Ok(_) => {
                    tracing::error!("[Config] 配置文件顶层不是对象: {}", settings_file.display());
                    Value::Object(Default::default())
                }
                Err(e) => {
                    tracing::error!("[Config] 无法解析 {}: {}", settings_file.display(), e);
                    Value::Object(Default::default())
                }
            },
            Err(e) => {
                tracing::warn!("[Config] 配置文件 {} 读取失败: {}，使用空配置", settings_file.display(), e);
                Value::Object(Default::default())
            }
        };

        let project_root = settings_file
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."));

        Self { settings, project_root }
    }

    /// 直接由 JSON 值构造（测试及嵌入场景）
    pub fn from_value(settings: Value, project_root: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            project_root: project_root.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.settings.as_object().map_or(true, |m| m.is_empty())
    }
}

impl ConfigSource for JsonSettings {
    fn get(&self, path: &str) -> Option<Value> {
        let mut current = &self.settings;
        for key in path.split('.') {
            match current {
                Value::Object(map) => current = map.get(key)?,
                _ => {
                    tracing::warn!("[Config] 路径 '{}' 在 '{}' 处不是对象", path, key);
                    return None;
                }
            }
        }
        Some(current.clone())
    }

    fn project_root(&self) -> PathBuf {
        self.project_root.clone()
    }
}

/// 加载账号配置列表（accounts.json）
pub fn load_accounts(accounts_file: impl AsRef<Path>) -> Result<Vec<AccountConfig>, PublishError> {
    let accounts_file = accounts_file.as_ref();
    let raw = std::fs::read_to_string(accounts_file).map_err(|e| {
        PublishError::Config(format!("读取账号文件 {} 失败: {}", accounts_file.display(), e))
    })?;
    let accounts: Vec<AccountConfig> = serde_json::from_str(&raw)?;
    tracing::info!("[Config] 已加载 {} 个账号", accounts.len());
    Ok(accounts)
}
