//! 新帖子文案解析
//!
//! 按固定优先级依次尝试各个策略，第一个给出文案的策略胜出：
//!
//! 1. **预置文案** - 社区账号从配置的文案文件中随机挑选一行
//! 2. **生成文案** - 字面文案非空时交给生成服务"按需生成"
//! 3. **原样透传** - 以上都没有结果时使用字面文案（可能为空串）
//!
//! 预置文案是可选功能，它的任何失败都只会让解析落到下一个策略，
//! 其余策略的错误照常向上传递

use crate::core::text::{clamp_text, truncate_chars};
use crate::core::{
    resolve_against, AccountConfig, ConfigSource, ContentPayload, GenerationSettings, PublishError,
    MAX_POST_CHARS,
};
use crate::platforms::{FileService, TextGenerator};
use rand::seq::SliceRandom;
use std::path::Path;
use std::sync::Arc;

/// 单次解析的输入
#[derive(Debug, Clone, Copy)]
pub struct TextContext<'a> {
    pub content: &'a ContentPayload,
    pub account: &'a AccountConfig,
    pub settings: Option<&'a GenerationSettings>,
}

/// 文案策略
///
/// 返回 `Ok(None)` 表示本策略不适用，交给下一个策略
#[async_trait::async_trait]
pub trait TextStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve(&self, ctx: &TextContext<'_>) -> Result<Option<String>, PublishError>;
}

/// 有序的文案策略链
pub struct TextResolver {
    strategies: Vec<Box<dyn TextStrategy>>,
}

impl TextResolver {
    /// 默认策略链：预置文案 → 生成文案 → 原样透传
    pub fn new(
        config: Arc<dyn ConfigSource>,
        files: Arc<dyn FileService>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self::with_strategies(vec![
            Box::new(CannedTextStrategy::new(config, files)),
            Box::new(GeneratedTextStrategy::new(generator)),
            Box::new(PassthroughStrategy),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn TextStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// 解析最终文案，没有可发的文案时返回空串
    pub async fn resolve(&self, ctx: &TextContext<'_>) -> Result<String, PublishError> {
        for strategy in &self.strategies {
            if let Some(text) = strategy.resolve(ctx).await? {
                tracing::info!(
                    "[TextResolver] 使用策略 {} 得到文案 ({} 字符)",
                    strategy.name(),
                    text.chars().count()
                );
                return Ok(text);
            }
            tracing::debug!("[TextResolver] 策略 {} 无结果", strategy.name());
        }
        Ok(String::new())
    }
}

// ============================================================================
// 预置文案
// ============================================================================

/// 预置文案被跳过的原因（仅在本策略内部使用，不会向外传递）
#[derive(Debug)]
enum Skip {
    NotCommunity,
    Unconfigured,
    NoCandidates,
    Failed(PublishError),
}

/// 社区账号的预置文案策略
pub struct CannedTextStrategy {
    config: Arc<dyn ConfigSource>,
    files: Arc<dyn FileService>,
}

impl CannedTextStrategy {
    pub fn new(config: Arc<dyn ConfigSource>, files: Arc<dyn FileService>) -> Self {
        Self { config, files }
    }

    async fn pick(&self, ctx: &TextContext<'_>) -> Result<String, Skip> {
        if !ctx.account.post_to_community {
            return Err(Skip::NotCommunity);
        }
        let configured = self.config.community_replies_file().ok_or(Skip::Unconfigured)?;
        // 相对路径在读取前统一解析到项目根目录
        let path = resolve_against(&self.config.project_root(), Path::new(&configured));

        let lines = self.files.read_lines(&path).await.map_err(Skip::Failed)?;
        let line = lines
            .choose(&mut rand::thread_rng())
            .ok_or(Skip::NoCandidates)?;

        let text = truncate_chars(line, MAX_POST_CHARS);
        if text.is_empty() {
            return Err(Skip::NoCandidates);
        }
        Ok(text.to_string())
    }
}

#[async_trait::async_trait]
impl TextStrategy for CannedTextStrategy {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn resolve(&self, ctx: &TextContext<'_>) -> Result<Option<String>, PublishError> {
        match self.pick(ctx).await {
            Ok(text) => Ok(Some(text)),
            Err(Skip::Failed(e)) => {
                tracing::warn!("[TextResolver] 预置文案读取失败，改用生成流程: {}", e);
                Ok(None)
            }
            Err(skip) => {
                tracing::debug!("[TextResolver] 跳过预置文案: {:?}", skip);
                Ok(None)
            }
        }
    }
}

// ============================================================================
// 生成文案
// ============================================================================

/// 交给生成服务按需生成
pub struct GeneratedTextStrategy {
    generator: Arc<dyn TextGenerator>,
}

impl GeneratedTextStrategy {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait::async_trait]
impl TextStrategy for GeneratedTextStrategy {
    fn name(&self) -> &'static str {
        "generated"
    }

    async fn resolve(&self, ctx: &TextContext<'_>) -> Result<Option<String>, PublishError> {
        let literal = ctx.content.literal_text();
        if literal.is_empty() {
            return Ok(None);
        }
        let generated = self.generator.generate_if_needed(literal, ctx.settings).await?;
        if generated.is_empty() {
            tracing::warn!("[TextResolver] 生成服务返回空文案");
            return Ok(None);
        }
        Ok(Some(clamp_text(&generated, MAX_POST_CHARS)))
    }
}

// ============================================================================
// 原样透传
// ============================================================================

/// 使用字面文案，没有则为空串
pub struct PassthroughStrategy;

#[async_trait::async_trait]
impl TextStrategy for PassthroughStrategy {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    async fn resolve(&self, ctx: &TextContext<'_>) -> Result<Option<String>, PublishError> {
        Ok(Some(clamp_text(ctx.content.literal_text(), MAX_POST_CHARS)))
    }
}
