//! 商品处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::debug;

use super::{
    model::{Good, GoodPatch, NewGood},
    payload::GoodSubmission,
};
use crate::app::{parse_id, AppState};
use crate::core::CoreError;
use crate::infrastructure::uploads::ImageUpload;

/// 校验并保存图片，返回访问路径
async fn store_image(state: &AppState, upload: ImageUpload) -> Result<String, CoreError> {
    let kind = state.upload_policy.check(&upload)?;
    debug!(
        file_name = ?upload.file_name,
        size = upload.bytes.len(),
        "保存上传图片"
    );
    state.images.store(upload.bytes, kind.mime()).await
}

pub async fn list_goods(State(state): State<AppState>) -> Result<Json<Vec<Good>>, CoreError> {
    Ok(Json(state.goods.list()?))
}

pub async fn get_good(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Good>, CoreError> {
    let id = parse_id("商品", &id)?;
    Ok(Json(state.goods.get(id)?))
}

pub async fn create_good(
    State(state): State<AppState>,
    submission: GoodSubmission,
) -> Result<(StatusCode, Json<Good>), CoreError> {
    // 先校验字段，避免为无效请求落盘图片
    let mut new = NewGood::try_from(submission.fields)?;
    if let Some(upload) = submission.image {
        new.image = Some(store_image(&state, upload).await?);
    }
    let good = state.goods.create(new)?;
    Ok((StatusCode::CREATED, Json(good)))
}

pub async fn update_good(
    State(state): State<AppState>,
    Path(id): Path<String>,
    submission: GoodSubmission,
) -> Result<Json<Good>, CoreError> {
    let id = parse_id("商品", &id)?;
    // 先确认商品存在，再校验字段与保存图片
    state.goods.get(id)?;
    let mut patch = GoodPatch::try_from(submission.fields)?;
    if let Some(upload) = submission.image {
        patch.image = Some(store_image(&state, upload).await?);
    }
    Ok(Json(state.goods.update(id, patch)?))
}

pub async fn delete_good(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    let id = parse_id("商品", &id)?;
    state.goods.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
