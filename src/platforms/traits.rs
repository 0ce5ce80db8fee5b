//! 协作方 traits 定义
//!
//! 发布编排只通过这三个窄接口与外部系统交互：
//! 浏览器自动化驱动、文案生成服务、文件/下载服务

use crate::core::{AccountConfig, GenerationSettings, PublishError, ResolvedMediaSet, ScrapedItem};
use std::path::{Path, PathBuf};
use url::Url;

/// UI 自动化驱动
///
/// 负责真正把内容发到平台上。返回 `Ok(true)` 表示成功，`Ok(false)` 表示驱动
/// 判定失败；无法连接等故障以 `Err` 返回
#[async_trait::async_trait]
pub trait AutomationDriver: Send + Sync {
    /// 发布新帖子
    ///
    /// # 参数
    ///
    /// * `text` - 最终文案（可能为空，仅发媒体）
    /// * `media` - 已在本地就绪的媒体路径
    /// * `account` - 账号配置（社区发布等）
    async fn post_text(
        &self,
        text: &str,
        media: &ResolvedMediaSet,
        account: &AccountConfig,
    ) -> Result<bool, PublishError>;

    /// 回复已有帖子
    async fn reply(&self, target: &ScrapedItem, text: &str) -> Result<bool, PublishError>;

    /// 转发，`quote_text` 为 `Some` 时为引用转发
    async fn repost_or_quote(
        &self,
        target: &ScrapedItem,
        quote_text: Option<&str>,
    ) -> Result<bool, PublishError>;
}

/// 文案生成服务
///
/// "按需生成"：由实现方决定输入是提示词还是可直接使用的文案
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_if_needed(
        &self,
        text: &str,
        settings: Option<&GenerationSettings>,
    ) -> Result<String, PublishError>;

    /// 引用转发文案，`None` 表示改为纯转发
    ///
    /// 引用文案的判定规则比新帖更严格；默认沿用 `generate_if_needed`，空结果视为 `None`
    async fn generate_quote_if_needed(
        &self,
        text: &str,
        settings: Option<&GenerationSettings>,
    ) -> Result<Option<String>, PublishError> {
        let quote = self.generate_if_needed(text, settings).await?;
        Ok(if quote.is_empty() { None } else { Some(quote) })
    }
}

/// 文件/下载服务
#[async_trait::async_trait]
pub trait FileService: Send + Sync {
    /// 读取文本文件的所有行（可能为空）
    async fn read_lines(&self, path: &Path) -> Result<Vec<String>, PublishError>;

    /// 下载远程媒体到目标目录，返回本地路径
    async fn download(&self, url: &Url, dest_dir: &Path) -> Result<PathBuf, PublishError>;
}
