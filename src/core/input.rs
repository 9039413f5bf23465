//! 输入字段的宽松解析
//!
//! JSON 请求中数字字段既可能是数字也可能是字符串，表单和 multipart
//! 请求中则一律是字符串。这里统一转换，非法值返回 `InvalidInput`。

use serde::Deserialize;

use super::error::CoreError;

/// 数字或数字字符串
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl NumericInput {
    fn to_f64(&self, field: &str) -> Result<f64, CoreError> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CoreError::invalid(format!("{} 必须是数字", field)))?,
        };
        if !value.is_finite() {
            return Err(CoreError::invalid(format!("{} 必须是有限数字", field)));
        }
        Ok(value)
    }

    /// 非负实数，例如价格
    pub fn non_negative(&self, field: &str) -> Result<f64, CoreError> {
        let value = self.to_f64(field)?;
        if value < 0.0 {
            return Err(CoreError::invalid(format!("{} 不能为负数", field)));
        }
        Ok(value)
    }

    /// 表单中留空的字段
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericInput::Text(s) if s.trim().is_empty())
    }

    /// 非负整数，例如库存、年龄
    pub fn count(&self, field: &str) -> Result<u32, CoreError> {
        let value = self.non_negative(field)?;
        if value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(CoreError::invalid(format!("{} 必须是非负整数", field)));
        }
        Ok(value as u32)
    }
}

/// 可选的非负整数，缺省或留空均视为未提供
pub fn optional_count(value: Option<&NumericInput>, field: &str) -> Result<Option<u32>, CoreError> {
    value
        .filter(|v| !v.is_blank())
        .map(|v| v.count(field))
        .transpose()
}

/// 去掉首尾空白后不能为空
pub fn required_text(value: &str, field: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid(format!("{} 不能为空", field)));
    }
    Ok(trimmed.to_string())
}
