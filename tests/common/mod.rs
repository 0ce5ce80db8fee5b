// Shared mock collaborators for integration tests
#![allow(dead_code)]

use serde_json::json;
use social_publisher::core::JsonSettings;
use social_publisher::{
    AccountConfig, AutomationDriver, FileService, GenerationSettings, PublishError,
    ResolvedMediaSet, ScrapedItem, TextGenerator,
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use url::Url;

/// 驱动收到的调用
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    Post {
        text: String,
        media: Vec<PathBuf>,
        account_id: String,
    },
    Reply {
        item_id: String,
        text: String,
    },
    Repost {
        item_id: String,
        quote: Option<String>,
    },
}

/// 记录调用的自动化驱动
pub struct RecordingDriver {
    pub calls: Mutex<Vec<DriverCall>>,
    pub outcome: bool,
    pub unreachable: bool,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: true,
            unreachable: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: false,
            ..Self::new()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: DriverCall) -> Result<bool, PublishError> {
        if self.unreachable {
            return Err(PublishError::Automation("driver session lost".into()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(self.outcome)
    }
}

#[async_trait::async_trait]
impl AutomationDriver for RecordingDriver {
    async fn post_text(
        &self,
        text: &str,
        media: &ResolvedMediaSet,
        account: &AccountConfig,
    ) -> Result<bool, PublishError> {
        self.record(DriverCall::Post {
            text: text.to_string(),
            media: media.paths().to_vec(),
            account_id: account.account_id.clone(),
        })
    }

    async fn reply(&self, target: &ScrapedItem, text: &str) -> Result<bool, PublishError> {
        self.record(DriverCall::Reply {
            item_id: target.item_id.clone(),
            text: text.to_string(),
        })
    }

    async fn repost_or_quote(
        &self,
        target: &ScrapedItem,
        quote_text: Option<&str>,
    ) -> Result<bool, PublishError> {
        self.record(DriverCall::Repost {
            item_id: target.item_id.clone(),
            quote: quote_text.map(str::to_string),
        })
    }
}

/// 返回 `generated-<输入>` 的生成服务
#[derive(Default)]
pub struct PrefixGenerator {
    pub calls: Mutex<Vec<(String, Option<GenerationSettings>)>>,
    pub fail: bool,
    pub empty: bool,
}

impl PrefixGenerator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }
}

#[async_trait::async_trait]
impl TextGenerator for PrefixGenerator {
    async fn generate_if_needed(
        &self,
        text: &str,
        settings: Option<&GenerationSettings>,
    ) -> Result<String, PublishError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), settings.cloned()));
        if self.fail {
            return Err(PublishError::Generation("model unavailable".into()));
        }
        if self.empty {
            return Ok(String::new());
        }
        Ok(format!("generated-{}", text))
    }
}

/// 内存中的文件服务
#[derive(Default)]
pub struct FakeFiles {
    /// 路径 → 行
    pub lines: HashMap<PathBuf, Vec<String>>,
    /// 下载失败的URL
    pub failing_urls: HashSet<String>,
    pub line_reads: Mutex<Vec<PathBuf>>,
    pub downloads: Mutex<Vec<String>>,
}

impl FakeFiles {
    pub fn with_lines(mut self, path: impl Into<PathBuf>, lines: &[&str]) -> Self {
        self.lines
            .insert(path.into(), lines.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing_urls.insert(url.to_string());
        self
    }

    pub fn line_reads(&self) -> Vec<PathBuf> {
        self.line_reads.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FileService for FakeFiles {
    async fn read_lines(&self, path: &Path) -> Result<Vec<String>, PublishError> {
        self.line_reads.lock().unwrap().push(path.to_path_buf());
        self.lines.get(path).cloned().ok_or_else(|| {
            PublishError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }

    async fn download(&self, url: &Url, dest_dir: &Path) -> Result<PathBuf, PublishError> {
        self.downloads.lock().unwrap().push(url.to_string());
        if self.failing_urls.contains(url.as_str()) {
            return Err(PublishError::Download {
                url: url.to_string(),
                reason: "HTTP 503".into(),
            });
        }
        let name = url
            .path_segments()
            .and_then(|mut s| s.next_back())
            .unwrap_or("media.bin");
        Ok(dest_dir.join(name))
    }
}

pub const PROJECT_ROOT: &str = "/srv/publisher";

/// 配置：可选的预置文案文件
pub fn settings(community_file: Option<&str>) -> Arc<JsonSettings> {
    let mut automation = json!({});
    if let Some(file) = community_file {
        automation["community_replies_file"] = json!(file);
    }
    Arc::new(JsonSettings::from_value(
        json!({ "twitter_automation": automation }),
        PROJECT_ROOT,
    ))
}

pub fn community_account() -> Arc<AccountConfig> {
    let mut account = AccountConfig::new("community-acct");
    account.post_to_community = true;
    Arc::new(account)
}

pub fn plain_account() -> Arc<AccountConfig> {
    Arc::new(AccountConfig::new("plain-acct"))
}
