//! 商品目录

pub mod handler;
pub mod model;
pub mod payload;
pub mod service;

pub use model::{Good, GoodFields, GoodPatch, NewGood, DEFAULT_CATEGORY};
pub use service::GoodService;
