// 帖子发布器
// Post Publisher
//
// 本模块负责发布流程的编排，把文案解析、媒体解析和自动化驱动串成完整流程：
//
// 发新帖：   文案解析 → 媒体解析 → 驱动发布
// 回复：     直接交给驱动（回复文案已是最终文案）
// 转发/引用：引用文案解析 → 驱动转发
//
// 发布器本身没有按调用变化的状态；同一实例上的并发调用是否安全取决于驱动

mod media_resolver;
mod quote_resolver;
mod text_resolver;

pub use media_resolver::MediaResolver;
pub use quote_resolver::QuoteResolver;
pub use text_resolver::{
    CannedTextStrategy, GeneratedTextStrategy, PassthroughStrategy, TextContext, TextResolver,
    TextStrategy,
};

use crate::core::{
    resolve_against, AccountConfig, ConfigSource, ContentPayload, GenerationSettings, PublishError,
    ScrapedItem,
};
use crate::platforms::{AutomationDriver, FileService, TextGenerator};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// 发布器
// ============================================================================

/// 发布编排门面
pub struct Publisher {
    /// 自动化驱动
    driver: Arc<dyn AutomationDriver>,
    /// 账号配置
    account: Arc<AccountConfig>,
    /// 媒体下载目录
    media_dir: PathBuf,
    text_resolver: TextResolver,
    media_resolver: MediaResolver,
    quote_resolver: QuoteResolver,
}

impl Publisher {
    /// 创建新的发布器
    ///
    /// 媒体目录取自配置 `twitter_automation.media_directory`（默认 `media_files`），
    /// 相对路径解析到项目根目录；目录在首次下载前才会创建
    pub fn new(
        driver: Arc<dyn AutomationDriver>,
        generator: Arc<dyn TextGenerator>,
        files: Arc<dyn FileService>,
        config: Arc<dyn ConfigSource>,
        account: Arc<AccountConfig>,
    ) -> Self {
        let media_dir = resolve_against(
            &config.project_root(),
            Path::new(&config.media_directory()),
        );

        Self {
            driver,
            account,
            media_dir,
            text_resolver: TextResolver::new(config, files.clone(), generator.clone()),
            media_resolver: MediaResolver::new(files),
            quote_resolver: QuoteResolver::new(generator),
        }
    }

    /// 替换文案策略链
    pub fn with_text_resolver(mut self, text_resolver: TextResolver) -> Self {
        self.text_resolver = text_resolver;
        self
    }

    /// 指定媒体目录
    pub fn with_media_dir(mut self, media_dir: impl Into<PathBuf>) -> Self {
        self.media_dir = media_dir.into();
        self
    }

    pub fn account(&self) -> &AccountConfig {
        &self.account
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// 发布新帖子
    ///
    /// # 发布流程
    /// 1. 解析文案（预置 → 生成 → 透传）
    /// 2. 解析媒体（下载远程媒体，合并本地路径）
    /// 3. 交给驱动发布
    ///
    /// # 返回
    /// 驱动给出的成功标志；文案为空不是错误，照常发布（纯媒体帖子）
    pub async fn post_new(
        &self,
        content: &ContentPayload,
        settings: Option<&GenerationSettings>,
    ) -> Result<bool, PublishError> {
        tracing::info!("[Publisher] ====== 步骤1: 解析文案 ======");
        let ctx = TextContext {
            content,
            account: &self.account,
            settings,
        };
        let text = self.text_resolver.resolve(&ctx).await?;

        tracing::info!("[Publisher] ====== 步骤2: 解析媒体 ======");
        let media = self.media_resolver.resolve(&content.media, &self.media_dir).await?;

        tracing::info!(
            "[Publisher] ====== 步骤3: 发布 (账号 {}, 文案 {} 字符, 媒体 {} 个) ======",
            self.account.account_id,
            text.chars().count(),
            media.len()
        );
        let posted = self.driver.post_text(&text, &media, &self.account).await?;
        if !posted {
            tracing::warn!("[Publisher] 驱动报告发布失败");
        }
        Ok(posted)
    }

    /// 回复已有帖子，回复文案不做任何生成
    pub async fn reply_to(
        &self,
        original: &ScrapedItem,
        reply_text: &str,
    ) -> Result<bool, PublishError> {
        tracing::info!("[Publisher] 回复帖子 {}", original.item_id);
        self.driver.reply(original, reply_text).await
    }

    /// 转发或引用转发
    ///
    /// `quote_prompt_or_text` 缺省时为纯转发
    pub async fn repost_or_quote(
        &self,
        original: &ScrapedItem,
        quote_prompt_or_text: Option<&str>,
        settings: Option<&GenerationSettings>,
    ) -> Result<bool, PublishError> {
        let quote = self
            .quote_resolver
            .resolve(quote_prompt_or_text, settings)
            .await?;

        match &quote {
            Some(_) => tracing::info!("[Publisher] 引用转发帖子 {}", original.item_id),
            None => tracing::info!("[Publisher] 转发帖子 {}", original.item_id),
        }
        self.driver.repost_or_quote(original, quote.as_deref()).await
    }
}
