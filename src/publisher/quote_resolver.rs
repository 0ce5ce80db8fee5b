//! 引用转发文案解析

use crate::core::text::clamp_text;
use crate::core::{GenerationSettings, PublishError, MAX_POST_CHARS};
use crate::platforms::TextGenerator;
use std::sync::Arc;

/// 引用文案解析器
///
/// 没有输入时为纯转发，不会调用生成服务；
/// 有输入时由生成服务决定当作提示词还是直接使用
pub struct QuoteResolver {
    generator: Arc<dyn TextGenerator>,
}

impl QuoteResolver {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn resolve(
        &self,
        prompt_or_text: Option<&str>,
        settings: Option<&GenerationSettings>,
    ) -> Result<Option<String>, PublishError> {
        // 空串与缺省同样视为纯转发
        let input = match prompt_or_text.filter(|s| !s.trim().is_empty()) {
            Some(input) => input,
            None => return Ok(None),
        };

        match self.generator.generate_quote_if_needed(input, settings).await? {
            Some(quote) if !quote.is_empty() => Ok(Some(clamp_text(&quote, MAX_POST_CHARS))),
            _ => {
                tracing::warn!("[QuoteResolver] 生成服务返回空文案，改为纯转发");
                Ok(None)
            }
        }
    }
}
