//! 商品请求体：JSON、表单或带图片的 multipart

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use serde_json::{Map, Value};

use super::model::GoodFields;
use crate::core::{
    payload::{BodyKind, Payload},
    CoreError,
};
use crate::infrastructure::uploads::ImageUpload;

/// multipart 中图片字段名
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default)]
pub struct GoodSubmission {
    pub fields: GoodFields,
    pub image: Option<ImageUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for GoodSubmission
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if BodyKind::of(req.headers()) != BodyKind::Multipart {
            let Payload(fields) = Payload::<GoodFields>::from_request(req, state).await?;
            return Ok(GoodSubmission {
                fields,
                image: None,
            });
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| CoreError::invalid(e.body_text()))?;
        read_multipart(multipart).await
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<GoodSubmission, CoreError> {
    let mut text = Map::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CoreError::invalid(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| CoreError::invalid(e.body_text()))?;
            // 浏览器未选择文件时会提交一个空的文件字段
            if bytes.is_empty() && file_name.as_deref().unwrap_or("").is_empty() {
                continue;
            }
            image = Some(ImageUpload {
                file_name,
                content_type,
                bytes,
            });
        } else if !name.is_empty() {
            let value = field
                .text()
                .await
                .map_err(|e| CoreError::invalid(e.body_text()))?;
            text.insert(name, Value::String(value));
        }
    }

    let fields = serde_json::from_value(Value::Object(text))
        .map_err(|e| CoreError::invalid(format!("表单字段错误: {}", e)))?;
    Ok(GoodSubmission { fields, image })
}
