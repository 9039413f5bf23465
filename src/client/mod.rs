//! 前端模型
//!
//! 商品列表页的状态机、弹窗表单以及访问服务端的 HTTP 客户端。

pub mod api;
pub mod error;
pub mod form;
pub mod page;

pub use api::{CatalogApi, GoodDraft, GoodRequest, HttpCatalogClient, ImageFile, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use form::{FormError, GoodForm};
pub use page::{GoodsPage, Modal, ModalMode};
