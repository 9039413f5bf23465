//! # 商品目录服务
//!
//! 内存中的商品/用户 CRUD REST API，支持图片上传与 OpenAPI 文档，
//! 并提供一个基于类型化 HTTP 客户端的前端模型。
//!
//! - `core`：错误类型、ID、输入解析、中间件
//! - `infrastructure`：内存存储、图片上传、日志
//! - `app`：商品与用户资源
//! - `client`：前端页面状态与 HTTP 客户端

pub mod app;
pub mod client;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod routes;

pub use app::AppState;
pub use config::{load_config, Config, ConfigError, ConfigSource};
pub use crate::core::CoreError;
pub use routes::build_router;
