// Platforms module
// 平台模块
//
// 定义发布编排依赖的协作方接口，并提供 X 平台的具体实现
//
// # 模块结构
//
// - [traits](traits/index.html) - 自动化驱动、生成服务、文件服务接口
// - [x](x/index.html) - X 平台的下载服务和提示词生成器

pub mod traits;
pub mod x;

pub use traits::{AutomationDriver, FileService, TextGenerator};
