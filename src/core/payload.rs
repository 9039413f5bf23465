//! 请求体提取器
//!
//! 同时接受 JSON 与 `application/x-www-form-urlencoded`，空请求体视为 `{}`。

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
    Form,
};
use serde::de::DeserializeOwned;

use super::error::CoreError;

/// 请求体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Form,
    Multipart,
}

impl BodyKind {
    /// 根据 Content-Type 判断；缺省按 JSON 处理
    pub fn of(headers: &HeaderMap) -> Self {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            BodyKind::Multipart
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            BodyKind::Form
        } else {
            BodyKind::Json
        }
    }
}

/// 解析 JSON 字节，空请求体返回默认值
pub fn parse_json<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, CoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|e| CoreError::invalid(format!("请求体格式错误: {}", e)))
}

/// JSON 或表单请求体
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyKind::of(req.headers()) {
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| CoreError::invalid(e.body_text()))?;
                Ok(Payload(value))
            }
            BodyKind::Multipart => Err(CoreError::UnsupportedMediaType(
                "该接口不接受 multipart 请求体".to_string(),
            )),
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| CoreError::invalid(e.body_text()))?;
                parse_json(&bytes).map(Payload)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        name: Option<String>,
    }

    #[test]
    fn test_body_kind() {
        let mut headers = HeaderMap::new();
        assert_eq!(BodyKind::of(&headers), BodyKind::Json);

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=abc"),
        );
        assert_eq!(BodyKind::of(&headers), BodyKind::Multipart);

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        assert_eq!(BodyKind::of(&headers), BodyKind::Form);
    }

    #[test]
    fn test_parse_json_empty_is_default() {
        let sample: Sample = parse_json(b"").unwrap();
        assert_eq!(sample, Sample::default());
        let sample: Sample = parse_json(b"  \n").unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_parse_json_malformed() {
        let err = parse_json::<Sample>(b"{name:").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
