//! 提示词文案生成器
//!
//! 在具体的 LLM 客户端之上实现"按需生成"：
//! 输入看起来像提示词时才调用模型，否则原样（限长后）返回

use crate::core::text::clamp_text;
use crate::core::{GenerationSettings, PublishError, MAX_POST_CHARS};
use crate::platforms::TextGenerator;
use serde::Deserialize;
use serde_json::{json, Value};

/// 触发生成的关键词（不区分大小写）
const TRIGGER_KEYWORDS: [&str; 3] = ["generate", "write", "post"];

/// 引用文案只认这些明确的指令，其余一律当作现成文案
const QUOTE_TRIGGERS: [&str; 2] = ["generate quote for", "write a quote about"];

/// 结构化生成时的最低温度
const MIN_STRUCTURED_TEMPERATURE: f32 = 0.3;

/// 最多附带的话题数
const MAX_HASHTAGS: usize = 4;

/// LLM 客户端
///
/// 具体服务（gemini / openai / azure）的选择与调用由实现方负责
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// 按 JSON Schema 生成结构化结果
    async fn generate_structured(
        &self,
        task: &str,
        schema: &Value,
        settings: &GenerationSettings,
        hard_char_limit: usize,
    ) -> Result<Value, PublishError>;

    /// 生成纯文本，没有结果时返回 `None`
    async fn generate_text(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<Option<String>, PublishError>;
}

/// 结构化生成的返回结构
#[derive(Debug, Deserialize)]
struct StructuredPost {
    text: String,
    #[serde(default)]
    hashtags: Vec<String>,
    #[serde(default)]
    safety: Option<SafetyReview>,
}

#[derive(Debug, Deserialize)]
struct SafetyReview {
    #[serde(default)]
    needs_review: bool,
    #[serde(default)]
    reasons: Vec<String>,
}

/// 提示词生成器
#[derive(Debug, Clone)]
pub struct PromptGenerator<C> {
    client: C,
}

impl<C: LlmClient> PromptGenerator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 结构化生成，任何失败都返回 `None` 以便回退到纯文本生成
    async fn generate_structured_post(&self, prompt: &str, settings: &GenerationSettings) -> Option<String> {
        let task = format!(
            "Generate an engaging X (Twitter) post per the prompt: {}. \
             Return JSON strictly matching the schema.",
            prompt
        );
        let mut structured_settings = settings.clone();
        structured_settings.temperature = Some(
            settings
                .temperature
                .unwrap_or(0.7)
                .max(MIN_STRUCTURED_TEMPERATURE),
        );

        let raw = match self
            .client
            .generate_structured(&task, &post_schema(), &structured_settings, MAX_POST_CHARS)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::info!("[Generator] 结构化生成失败 ({})，回退到纯文本生成", e);
                return None;
            }
        };

        let post: StructuredPost = match serde_json::from_value(raw) {
            Ok(post) => post,
            Err(e) => {
                tracing::info!("[Generator] 结构化结果无法解析 ({})，回退到纯文本生成", e);
                return None;
            }
        };
        if post.text.trim().is_empty() {
            tracing::info!("[Generator] 结构化结果没有文案，回退到纯文本生成");
            return None;
        }

        if let Some(safety) = post.safety.as_ref().filter(|s| s.needs_review) {
            tracing::warn!("[Generator] 模型标记内容需要审核: {:?}", safety.reasons);
        }
        tracing::info!("[Generator] 结构化文案生成成功");
        Some(compose_post(&post.text, &post.hashtags))
    }
}

#[async_trait::async_trait]
impl<C: LlmClient> TextGenerator for PromptGenerator<C> {
    async fn generate_if_needed(
        &self,
        text: &str,
        settings: Option<&GenerationSettings>,
    ) -> Result<String, PublishError> {
        let settings = match settings {
            Some(settings) if looks_like_prompt(text) => settings,
            _ => return Ok(clamp_text(text, MAX_POST_CHARS)),
        };

        tracing::info!("[Generator] 按提示词生成文案");
        if let Some(post) = self.generate_structured_post(text, settings).await {
            return Ok(post);
        }

        let constrained = format!(
            "{}\n\nConstraints: Reply with a single, concise post under {} characters. \
             No hashtags in the text; you may include them only if the prompt explicitly asks.",
            text, MAX_POST_CHARS
        );
        match self.client.generate_text(&constrained, settings).await? {
            Some(generated) if !generated.trim().is_empty() => {
                Ok(clamp_text(generated.trim(), MAX_POST_CHARS))
            }
            _ => {
                tracing::error!("[Generator] 生成失败，使用原文案");
                Ok(clamp_text(text, MAX_POST_CHARS))
            }
        }
    }

    /// 引用文案：只有明确的指令才生成，纯文本生成、不加话题
    async fn generate_quote_if_needed(
        &self,
        text: &str,
        settings: Option<&GenerationSettings>,
    ) -> Result<Option<String>, PublishError> {
        let settings = match settings {
            Some(settings) if looks_like_quote_prompt(text) => settings,
            _ => return Ok(Some(clamp_text(text, MAX_POST_CHARS))),
        };

        tracing::info!("[Generator] 按提示词生成引用文案");
        let constrained = format!(
            "{}\n\nConstraints: Keep it under {} characters, concise, and natural. \
             Avoid hashtags unless explicitly requested.",
            text, MAX_POST_CHARS
        );
        match self.client.generate_text(&constrained, settings).await? {
            Some(generated) if !generated.trim().is_empty() => {
                Ok(Some(clamp_text(generated.trim(), MAX_POST_CHARS)))
            }
            _ => {
                tracing::error!("[Generator] 引用文案生成失败");
                Ok(None)
            }
        }
    }
}

/// 是否看起来像提示词
fn looks_like_prompt(text: &str) -> bool {
    let lowered = text.to_lowercase();
    TRIGGER_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// 是否是引用文案的生成指令
fn looks_like_quote_prompt(text: &str) -> bool {
    let lowered = text.to_lowercase();
    QUOTE_TRIGGERS.iter().any(|k| lowered.contains(k))
}

/// 拼接正文和话题，整体不超过最大长度
fn compose_post(text: &str, hashtags: &[String]) -> String {
    let tags: Vec<String> = hashtags
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .take(MAX_HASHTAGS)
        .map(|h| if h.starts_with('#') { h.to_string() } else { format!("#{}", h) })
        .collect();
    let suffix = if tags.is_empty() {
        String::new()
    } else {
        format!(" {}", tags.join(" "))
    };

    let available = MAX_POST_CHARS.saturating_sub(suffix.chars().count());
    let body = clamp_text(text.trim(), available);
    let composed = format!("{}{}", body, suffix);
    clamp_text(composed.trim(), MAX_POST_CHARS)
}

fn post_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "text": {
                "type": "string",
                "description": format!("Final post text under {} characters. Avoid trailing hashtags.", MAX_POST_CHARS)
            },
            "hashtags": {
                "type": "array",
                "items": {"type": "string"},
                "description": "1-4 concise hashtags (include #)."
            },
            "mentions": {"type": "array", "items": {"type": "string"}},
            "safety": {
                "type": "object",
                "properties": {
                    "needs_review": {"type": "boolean"},
                    "reasons": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["needs_review"]
            }
        },
        "required": ["text", "hashtags", "safety"]
    })
}
