//! 应用层：商品与用户两个资源

pub mod docs;
pub mod goods;
pub mod users;

use std::sync::Arc;

use crate::config::Config;
use crate::core::{CoreError, ItemId};
use crate::infrastructure::uploads::{DiskImageStore, ImageStore, UploadPolicy};

use self::{goods::GoodService, users::UserService};

/// 请求处理器共享的状态
#[derive(Clone)]
pub struct AppState {
    pub goods: GoodService,
    pub users: UserService,
    pub images: Arc<dyn ImageStore>,
    pub upload_policy: UploadPolicy,
}

impl AppState {
    /// 空目录
    pub fn new(images: Arc<dyn ImageStore>, upload_policy: UploadPolicy) -> Self {
        Self {
            goods: GoodService::new(),
            users: UserService::new(),
            images,
            upload_policy,
        }
    }

    /// 按配置创建上传目录并按需写入示例数据
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        let images = DiskImageStore::new(&config.uploads.dir, &config.uploads.public_prefix)?;
        let state = Self::new(
            Arc::new(images),
            UploadPolicy::new(config.uploads.max_bytes),
        );
        if config.catalog.seed_sample_data {
            state.goods.seed_samples()?;
            state.users.seed_samples()?;
        }
        Ok(state)
    }
}

/// 路径中的 ID 不是整数时按不存在处理
pub fn parse_id(entity: &str, raw: &str) -> Result<ItemId, CoreError> {
    raw.parse()
        .map_err(|_| CoreError::not_found(entity, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("商品", "17").unwrap(), ItemId(17));
        assert!(matches!(
            parse_id("商品", "abc"),
            Err(CoreError::NotFound(_))
        ));
    }
}
