//! 用户目录

pub mod handler;
pub mod model;
pub mod service;

pub use model::{NewUser, User, UserFields, UserPatch};
pub use service::UserService;
