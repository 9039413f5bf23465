//! 基础设施层：存储、上传、日志

pub mod logger;
pub mod memory_store;
pub mod uploads;

pub use memory_store::{MemoryStore, Record};
