// Core modules
// 核心模块
pub mod bootstrap;
pub mod core;
pub mod platforms;
pub mod publisher;

// Re-export the types callers need most
// 重新导出常用类型
pub use crate::bootstrap::{init_tracing, AppContext};
pub use crate::core::{
    AccountConfig, ConfigSource, ContentPayload, GenerationSettings, JsonSettings, MediaRef,
    PublishError, ResolvedMediaSet, ScrapedItem, MAX_POST_CHARS,
};
pub use crate::platforms::{AutomationDriver, FileService, TextGenerator};
pub use crate::publisher::Publisher;
