//! 服务端 API 客户端

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::{debug, instrument};

use super::error::ClientError;
use crate::app::goods::Good;
use crate::core::ItemId;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// 待上传的图片文件
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 提交给服务端的商品字段
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoodDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
}

/// 新建或更新请求；带图片时以 multipart 发送
#[derive(Debug, Clone, PartialEq)]
pub struct GoodRequest {
    pub draft: GoodDraft,
    pub image: Option<ImageFile>,
}

impl GoodRequest {
    pub fn is_multipart(&self) -> bool {
        self.image.is_some()
    }
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_goods(&self) -> Result<Vec<Good>, ClientError>;
    async fn get_good(&self, id: ItemId) -> Result<Good, ClientError>;
    async fn create_good(&self, request: GoodRequest) -> Result<Good, ClientError>;
    async fn update_good(&self, id: ItemId, request: GoodRequest) -> Result<Good, ClientError>;
    async fn delete_good(&self, id: ItemId) -> Result<(), ClientError>;
}

/// 基于 reqwest 的客户端
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for HttpCatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpCatalogClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 非 2xx 响应转换为 `ClientError::Api`，优先使用响应体中的 `error` 字段
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn multipart(draft: &GoodDraft, image: ImageFile) -> Result<Form, ClientError> {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        Ok(Form::new()
            .text("name", draft.name.clone())
            .text("category", draft.category.clone())
            .text("description", draft.description.clone())
            .text("price", draft.price.to_string())
            .text("stock", draft.stock.to_string())
            .part("image", part))
    }

    async fn send_good(
        &self,
        builder: reqwest::RequestBuilder,
        request: GoodRequest,
    ) -> Result<Good, ClientError> {
        let builder = match request.image {
            Some(image) => builder.multipart(Self::multipart(&request.draft, image)?),
            None => builder.json(&request.draft),
        };
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn list_goods(&self) -> Result<Vec<Good>, ClientError> {
        let response = Self::check(self.http.get(self.url("/goods")).send().await?).await?;
        let goods: Vec<Good> = response.json().await?;
        debug!(count = goods.len(), "商品列表已获取");
        Ok(goods)
    }

    #[instrument(skip(self))]
    async fn get_good(&self, id: ItemId) -> Result<Good, ClientError> {
        let response = self.http.get(self.url(&format!("/goods/{}", id))).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self, request), fields(multipart = request.is_multipart()))]
    async fn create_good(&self, request: GoodRequest) -> Result<Good, ClientError> {
        let builder = self.http.post(self.url("/goods"));
        self.send_good(builder, request).await
    }

    #[instrument(skip(self, request), fields(multipart = request.is_multipart()))]
    async fn update_good(&self, id: ItemId, request: GoodRequest) -> Result<Good, ClientError> {
        let builder = self.http.patch(self.url(&format!("/goods/{}", id)));
        self.send_good(builder, request).await
    }

    #[instrument(skip(self))]
    async fn delete_good(&self, id: ItemId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/goods/{}", id)))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpCatalogClient::new();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_custom_base_url() {
        let client = HttpCatalogClient::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(client.url("/goods"), "http://127.0.0.1:9000/goods");
    }

    #[test]
    fn test_multipart_requires_valid_mime() {
        let draft = GoodDraft::default();
        let image = ImageFile {
            file_name: "a.png".to_string(),
            content_type: "not a mime".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(HttpCatalogClient::multipart(&draft, image).is_err());
    }
}
