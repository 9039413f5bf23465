//! 图片上传基础设施

use async_trait::async_trait;
use axum::body::Bytes;
use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::CoreError;

/// 默认图片大小上限 5 MiB
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// 允许上传的图片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageKind::Jpeg),
            "image/png" => Some(ImageKind::Png),
            "image/gif" => Some(ImageKind::Gif),
            "image/webp" => Some(ImageKind::Webp),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            "gif" => Some(ImageKind::Gif),
            "webp" => Some(ImageKind::Webp),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::Gif => "gif",
            ImageKind::Webp => "webp",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
            ImageKind::Webp => "image/webp",
        }
    }
}

/// 请求中携带的上传文件
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// 上传校验规则
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_IMAGE_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// 校验文件大小、MIME 类型和扩展名
    pub fn check(&self, upload: &ImageUpload) -> Result<ImageKind, CoreError> {
        if upload.bytes.is_empty() {
            return Err(CoreError::invalid("上传的文件为空"));
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(CoreError::invalid(format!(
                "图片大小不能超过 {} 字节",
                self.max_bytes
            )));
        }

        let ext = upload
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str());
        let ext_kind = match ext {
            Some(ext) => Some(ImageKind::from_extension(ext).ok_or_else(|| {
                CoreError::UnsupportedMediaType(format!("不支持的文件扩展名: .{}", ext))
            })?),
            None => None,
        };

        let declared = upload
            .content_type
            .as_deref()
            .filter(|ct| !ct.starts_with("application/octet-stream"));
        match declared {
            Some(ct) => ImageKind::from_mime(ct).ok_or_else(|| {
                CoreError::UnsupportedMediaType(format!("不支持的文件类型: {}", ct))
            }),
            None => ext_kind.ok_or_else(|| {
                CoreError::UnsupportedMediaType("无法识别的文件类型".to_string())
            }),
        }
    }
}

/// 图片存储接口
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 保存图片，返回可访问的路径
    async fn store(&self, bytes: Bytes, content_type: &str) -> Result<String, CoreError>;
}

fn generated_name(content_type: &str) -> Result<String, CoreError> {
    let kind = ImageKind::from_mime(content_type).ok_or_else(|| {
        CoreError::UnsupportedMediaType(format!("不支持的文件类型: {}", content_type))
    })?;
    Ok(format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        kind.extension()
    ))
}

fn public_path(prefix: &str, name: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), name)
}

/// 磁盘图片存储
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    dir: PathBuf,
    public_prefix: String,
}

impl DiskImageStore {
    /// 目录不存在时创建
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), "上传目录就绪");
        Ok(Self {
            dir,
            public_prefix: public_prefix.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn store(&self, bytes: Bytes, content_type: &str) -> Result<String, CoreError> {
        let name = generated_name(content_type)?;
        let target = self.dir.join(&name);
        tokio::fs::write(&target, &bytes).await?;
        debug!(path = %target.display(), size = bytes.len(), "图片已保存");
        Ok(public_path(&self.public_prefix, &name))
    }
}

/// 内存图片存储，用于测试
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    public_prefix: String,
    files: Mutex<Vec<(String, Bytes)>>,
}

impl MemoryImageStore {
    pub fn new(public_prefix: impl Into<String>) -> Self {
        Self {
            public_prefix: public_prefix.into(),
            files: Mutex::new(Vec::new()),
        }
    }

    /// 已保存的 (路径, 内容)
    pub fn files(&self) -> Vec<(String, Bytes)> {
        self.files
            .lock()
            .map(|files| files.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn store(&self, bytes: Bytes, content_type: &str) -> Result<String, CoreError> {
        let path = public_path(&self.public_prefix, &generated_name(content_type)?);
        self.files
            .lock()
            .map_err(|_| CoreError::Internal("图片存储锁已中毒".to_string()))?
            .push((path.clone(), bytes));
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: Option<&str>, ct: Option<&str>, len: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.map(str::to_string),
            content_type: ct.map(str::to_string),
            bytes: Bytes::from(vec![7u8; len]),
        }
    }

    #[test]
    fn test_policy_accepts_images() {
        let policy = UploadPolicy::default();
        let kind = policy
            .check(&upload(Some("tea.PNG"), Some("image/png"), 10))
            .unwrap();
        assert_eq!(kind, ImageKind::Png);

        let kind = policy
            .check(&upload(Some("photo.jpeg"), Some("application/octet-stream"), 10))
            .unwrap();
        assert_eq!(kind, ImageKind::Jpeg);
    }

    #[test]
    fn test_policy_rejects_wrong_type() {
        let policy = UploadPolicy::default();
        let err = policy
            .check(&upload(Some("notes.txt"), Some("text/plain"), 10))
            .unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedMediaType(_)));

        let err = policy
            .check(&upload(Some("evil.png"), Some("application/pdf"), 10))
            .unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedMediaType(_)));

        let err = policy.check(&upload(None, None, 10)).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedMediaType(_)));
    }

    #[test]
    fn test_policy_size_ceiling() {
        let policy = UploadPolicy::default();
        assert!(policy
            .check(&upload(Some("a.gif"), Some("image/gif"), MAX_IMAGE_BYTES))
            .is_ok());

        let err = policy
            .check(&upload(Some("a.gif"), Some("image/gif"), MAX_IMAGE_BYTES + 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));

        let err = policy
            .check(&upload(Some("a.gif"), Some("image/gif"), 0))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_disk_store_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("uploads");
        let store = DiskImageStore::new(&dir, "/uploads/").unwrap();
        assert!(dir.is_dir());

        let first = store
            .store(Bytes::from_static(b"png-bytes"), "image/png")
            .await
            .unwrap();
        let second = store
            .store(Bytes::from_static(b"png-bytes"), "image/png")
            .await
            .unwrap();

        assert!(first.starts_with("/uploads/"));
        assert!(first.ends_with(".png"));
        assert_ne!(first, second);

        let name = first.trim_start_matches("/uploads/");
        let saved = std::fs::read(dir.join(name)).unwrap();
        assert_eq!(saved, b"png-bytes");
    }

    #[tokio::test]
    async fn test_memory_store_records_files() {
        let store = MemoryImageStore::new("/uploads");
        let path = store
            .store(Bytes::from_static(b"x"), "image/webp")
            .await
            .unwrap();
        assert!(path.ends_with(".webp"));
        assert_eq!(store.files().len(), 1);

        let err = store
            .store(Bytes::from_static(b"x"), "text/plain")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedMediaType(_)));
    }
}
