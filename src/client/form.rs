//! 商品弹窗表单

use thiserror::Error;

use super::api::{GoodDraft, GoodRequest, ImageFile};
use crate::app::goods::Good;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("请输入商品名称")]
    EmptyName,
    #[error("请输入正确的价格")]
    InvalidPrice,
    #[error("请输入正确的库存数量")]
    InvalidStock,
}

/// 表单输入，保持用户键入的原始文本
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoodForm {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub image: Option<ImageFile>,
    /// 当前图片：已有商品的图片路径或新选文件的文件名
    pub preview: Option<String>,
}

impl GoodForm {
    /// 新建时的空表单
    pub fn blank() -> Self {
        Self::default()
    }

    /// 编辑时以商品当前值预填
    pub fn from_good(good: &Good) -> Self {
        Self {
            name: good.name.clone(),
            category: good.category.clone(),
            description: good.description.clone(),
            price: good.price.to_string(),
            stock: good.stock.to_string(),
            image: None,
            preview: good.image.clone(),
        }
    }

    pub fn choose_image(&mut self, file: ImageFile) {
        self.preview = Some(file.file_name.clone());
        self.image = Some(file);
    }

    /// 名称非空、价格为非负数、库存为非负整数（留空视为 0）
    pub fn validate(&self) -> Result<GoodRequest, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidPrice)?;
        if !price.is_finite() || price < 0.0 {
            return Err(FormError::InvalidPrice);
        }

        let stock = match self.stock.trim() {
            "" => 0,
            raw => {
                let value: f64 = raw.parse().map_err(|_| FormError::InvalidStock)?;
                if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64
                {
                    return Err(FormError::InvalidStock);
                }
                value as u32
            }
        };

        Ok(GoodRequest {
            draft: GoodDraft {
                name: name.to_string(),
                category: self.category.trim().to_string(),
                description: self.description.trim().to_string(),
                price,
                stock,
            },
            image: self.image.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ItemId;

    fn filled() -> GoodForm {
        GoodForm {
            name: " Tea ".to_string(),
            price: "150".to_string(),
            ..GoodForm::blank()
        }
    }

    #[test]
    fn test_validate_builds_json_request() {
        let request = filled().validate().unwrap();
        assert_eq!(request.draft.name, "Tea");
        assert_eq!(request.draft.price, 150.0);
        assert_eq!(request.draft.stock, 0);
        assert!(!request.is_multipart());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let mut form = filled();
        form.name = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::EmptyName));

        let mut form = filled();
        form.price = "abc".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidPrice));

        let mut form = filled();
        form.price = "-5".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidPrice));

        let mut form = filled();
        form.price = String::new();
        assert_eq!(form.validate(), Err(FormError::InvalidPrice));

        let mut form = filled();
        form.stock = "2.5".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidStock));
    }

    #[test]
    fn test_image_switches_to_multipart() {
        let mut form = filled();
        form.choose_image(ImageFile {
            file_name: "tea.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1],
        });
        assert_eq!(form.preview.as_deref(), Some("tea.png"));
        assert!(form.validate().unwrap().is_multipart());
    }

    #[test]
    fn test_from_good_prefills() {
        let good = Good {
            id: ItemId(1),
            name: "Coffee".to_string(),
            category: "Drinks".to_string(),
            description: "ground".to_string(),
            price: 400.0,
            stock: 7,
            image: Some("/uploads/c.png".to_string()),
        };
        let form = GoodForm::from_good(&good);
        assert_eq!(form.price, "400");
        assert_eq!(form.stock, "7");
        assert_eq!(form.preview.as_deref(), Some("/uploads/c.png"));

        let request = form.validate().unwrap();
        assert_eq!(request.draft.category, "Drinks");
        assert_eq!(request.draft.price, 400.0);
    }
}
