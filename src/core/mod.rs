//! 核心层：错误、标识、输入解析与中间件

pub mod error;
pub mod id;
pub mod input;
pub mod middleware;
pub mod payload;

pub use error::CoreError;
pub use id::{IdGenerator, ItemId};
