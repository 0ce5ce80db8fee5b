//! 媒体路径解析
//!
//! 把混合的媒体引用（远程URL、本地路径）整理成有序的本地路径列表：
//! 远程媒体并发下载到目标目录，本地路径原样保留。
//! 单个下载失败只会让该项缺席，不影响其余项

use crate::core::{MediaRef, PublishError, ResolvedMediaSet};
use crate::platforms::FileService;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct MediaResolver {
    files: Arc<dyn FileService>,
}

impl MediaResolver {
    pub fn new(files: Arc<dyn FileService>) -> Self {
        Self { files }
    }

    /// 解析媒体列表，结果保持输入顺序
    pub async fn resolve(
        &self,
        media: &[MediaRef],
        dest_dir: &Path,
    ) -> Result<ResolvedMediaSet, PublishError> {
        if media.is_empty() {
            return Ok(ResolvedMediaSet::default());
        }

        let remote_count = media.iter().filter(|m| m.is_remote()).count();
        // 目录建不出来时远程项会逐个下载失败并被跳过，本地项照常保留
        if remote_count > 0 {
            if let Err(e) = tokio::fs::create_dir_all(dest_dir).await {
                tracing::warn!("[Media] 无法创建媒体目录 {}: {}", dest_dir.display(), e);
            }
        }

        let results = join_all(media.iter().map(|item| self.resolve_one(item, dest_dir))).await;
        let resolved: ResolvedMediaSet = results.into_iter().flatten().collect();

        tracing::info!(
            "[Media] 媒体解析完成: 输入 {} 项（远程 {}），可用 {} 项",
            media.len(),
            remote_count,
            resolved.len()
        );
        Ok(resolved)
    }

    async fn resolve_one(&self, item: &MediaRef, dest_dir: &Path) -> Option<PathBuf> {
        match item {
            MediaRef::Local(path) => {
                if !matches!(tokio::fs::try_exists(path).await, Ok(true)) {
                    tracing::warn!("[Media] 本地媒体不存在: {}", path.display());
                }
                Some(path.clone())
            }
            MediaRef::Remote(url) => match self.files.download(url, dest_dir).await {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("[Media] 下载失败，跳过 {}: {}", url, e);
                    None
                }
            },
        }
    }
}
