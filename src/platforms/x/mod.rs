// X platform collaborators
// X 平台协作方实现
//
// - downloader: 带会话凭证的媒体下载与文本按行读取
// - generator: 基于 LLM 客户端的"按需生成"文案

pub mod downloader;
pub mod generator;

pub use downloader::{DownloadOptions, HttpFileService, SessionCredentials};
pub use generator::{LlmClient, PromptGenerator};
