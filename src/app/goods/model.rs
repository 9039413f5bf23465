//! 商品数据模型

use serde::{Deserialize, Serialize};

use crate::core::{
    input::{optional_count, required_text, NumericInput},
    CoreError, ItemId,
};
use crate::infrastructure::Record;

/// 未提供分类时使用的值
pub const DEFAULT_CATEGORY: &str = "未分类";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Good {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub image: Option<String>,
}

impl Record for Good {
    fn id(&self) -> ItemId {
        self.id
    }
}

/// 请求中的原始字段，全部可缺省
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoodFields {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<NumericInput>,
    pub stock: Option<NumericInput>,
}

/// 校验后的新建请求
#[derive(Debug, Clone, PartialEq)]
pub struct NewGood {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub image: Option<String>,
}

impl NewGood {
    pub fn into_good(self, id: ItemId) -> Good {
        Good {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image: self.image,
        }
    }
}

fn category_or_default(category: Option<String>) -> String {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

impl TryFrom<GoodFields> for NewGood {
    type Error = CoreError;

    fn try_from(fields: GoodFields) -> Result<Self, Self::Error> {
        let (name, price) = match (&fields.name, &fields.price) {
            (Some(name), Some(price)) => (name, price),
            _ => return Err(CoreError::invalid("名称和价格为必填项")),
        };

        Ok(NewGood {
            name: required_text(name, "name")?,
            price: price.non_negative("price")?,
            stock: optional_count(fields.stock.as_ref(), "stock")?.unwrap_or(0),
            category: category_or_default(fields.category),
            description: fields
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            image: None,
        })
    }
}

/// 校验后的部分更新，`None` 表示保持原值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoodPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub image: Option<String>,
}

impl TryFrom<GoodFields> for GoodPatch {
    type Error = CoreError;

    fn try_from(fields: GoodFields) -> Result<Self, Self::Error> {
        Ok(GoodPatch {
            name: fields
                .name
                .as_deref()
                .map(|n| required_text(n, "name"))
                .transpose()?,
            category: fields.category.map(|c| category_or_default(Some(c))),
            description: fields.description.map(|d| d.trim().to_string()),
            price: fields
                .price
                .as_ref()
                .map(|p| p.non_negative("price"))
                .transpose()?,
            stock: optional_count(fields.stock.as_ref(), "stock")?,
            image: None,
        })
    }
}

impl Good {
    /// 只覆盖补丁中出现的字段
    pub fn apply(&mut self, patch: GoodPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
    }
}
