use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::infrastructure::uploads::MAX_IMAGE_BYTES;

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "GOODS_CATALOG_CONFIG";

/// 未指定环境变量时依次查找的配置文件
const DEFAULT_LOCATIONS: [&str; 2] = ["config.toml", "./config/config.toml"];

/// 服务配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub uploads: UploadConfig,
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 绑定地址
    pub bind_address: String,
    /// 端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub request_timeout_secs: u64,
}

/// 图片上传配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// 保存目录
    pub dir: PathBuf,
    /// 对外访问前缀
    pub public_prefix: String,
    /// 单个文件大小上限（字节）
    pub max_bytes: usize,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// 启动时写入示例商品和用户
    pub seed_sample_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public/uploads"),
            public_prefix: "/uploads".to_string(),
            max_bytes: MAX_IMAGE_BYTES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
        }
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileRead(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("端口号不能为0".to_string()));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }
        if self.uploads.max_bytes == 0 {
            return Err(ConfigError::Validation("上传大小上限必须大于0".to_string()));
        }
        if !self.uploads.public_prefix.starts_with('/') || self.uploads.public_prefix == "/" {
            return Err(ConfigError::Validation(format!(
                "上传访问前缀必须以 / 开头且不能是根路径: {}",
                self.uploads.public_prefix
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// 环境变量指定的文件
    Env(PathBuf),
    /// 默认位置找到的文件
    File(PathBuf),
    /// 内置默认值
    Default,
}

impl ConfigSource {
    /// 环境变量优先，其次是默认位置，都没有时使用默认值
    pub fn locate(env_path: Option<String>) -> Self {
        if let Some(path) = env_path {
            return ConfigSource::Env(PathBuf::from(path));
        }
        DEFAULT_LOCATIONS
            .into_iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| ConfigSource::File(path.to_path_buf()))
            .unwrap_or(ConfigSource::Default)
    }

    /// 读取并校验
    pub fn load(&self) -> Result<Config, ConfigError> {
        let config = match self {
            ConfigSource::Env(path) | ConfigSource::File(path) => Config::load_from_file(path)?,
            ConfigSource::Default => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Env(path) => write!(f, "{} 指定的配置文件 {}", CONFIG_ENV, path.display()),
            ConfigSource::File(path) => write!(f, "配置文件 {}", path.display()),
            ConfigSource::Default => write!(f, "默认配置"),
        }
    }
}

/// 从环境变量指定的文件、默认位置或默认值加载并校验配置，同时返回来源
pub fn load_config() -> Result<(Config, ConfigSource), ConfigError> {
    let source = ConfigSource::locate(std::env::var(CONFIG_ENV).ok());
    let config = source.load()?;
    Ok((config, source))
}
