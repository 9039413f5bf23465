//! 商品业务服务

use std::sync::Arc;
use tracing::info;

use super::model::{Good, GoodPatch, NewGood};
use crate::core::{CoreError, ItemId};
use crate::infrastructure::MemoryStore;

const ENTITY: &str = "商品";

#[derive(Clone, Default)]
pub struct GoodService {
    store: Arc<MemoryStore<Good>>,
}

impl GoodService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Result<Vec<Good>, CoreError> {
        self.store.list()
    }

    pub fn get(&self, id: ItemId) -> Result<Good, CoreError> {
        self.store
            .find(id)?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    pub fn create(&self, new: NewGood) -> Result<Good, CoreError> {
        let good = self.store.insert_with(|id| new.into_good(id))?;
        info!(id = %good.id, name = %good.name, "商品已创建");
        Ok(good)
    }

    pub fn update(&self, id: ItemId, patch: GoodPatch) -> Result<Good, CoreError> {
        let good = self
            .store
            .update(id, |good| good.apply(patch))?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))?;
        info!(id = %good.id, "商品已更新");
        Ok(good)
    }

    pub fn delete(&self, id: ItemId) -> Result<(), CoreError> {
        if !self.store.remove(id)? {
            return Err(CoreError::not_found(ENTITY, id));
        }
        info!(id = %id, "商品已删除");
        Ok(())
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        self.store.len()
    }

    /// 写入示例数据
    pub fn seed_samples(&self) -> Result<(), CoreError> {
        let samples = [
            ("红茶", "饮品", "散装红茶", 150.0, 40),
            ("研磨咖啡", "饮品", "中度烘焙阿拉比卡", 400.0, 25),
        ];
        for (name, category, description, price, stock) in samples {
            self.create(NewGood {
                name: name.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                price,
                stock,
                image: None,
            })?;
        }
        info!("已初始化 {} 个示例商品", self.count()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::goods::model::GoodFields;
    use crate::core::input::NumericInput;
    use std::collections::HashSet;

    impl GoodService {
        fn create_from_fields(&self, fields: GoodFields) -> Result<Good, CoreError> {
            self.create(NewGood::try_from(fields)?)
        }

        fn update_from_fields(&self, id: ItemId, fields: GoodFields) -> Result<Good, CoreError> {
            self.get(id)?;
            self.update(id, GoodPatch::try_from(fields)?)
        }
    }

    fn tea() -> GoodFields {
        GoodFields {
            name: Some("Tea".to_string()),
            price: Some(NumericInput::Number(150.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_unique_and_stable() {
        let service = GoodService::new();
        let created: Vec<Good> = (0..20)
            .map(|_| service.create_from_fields(tea()).unwrap())
            .collect();

        let ids: HashSet<ItemId> = created.iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), created.len());

        for good in &created {
            assert_eq!(service.get(good.id).unwrap().id, good.id);
            let updated = service
                .update_from_fields(good.id, GoodFields::default())
                .unwrap();
            assert_eq!(updated.id, good.id);
        }
    }

    #[test]
    fn test_empty_update_is_noop() {
        let service = GoodService::new();
        let good = service.create_from_fields(tea()).unwrap();
        let updated = service
            .update_from_fields(good.id, GoodFields::default())
            .unwrap();
        assert_eq!(updated, good);
    }

    #[test]
    fn test_updates_compose() {
        let service = GoodService::new();
        let mut fields = tea();
        fields.description = Some("black".to_string());
        let good = service.create_from_fields(fields).unwrap();

        service
            .update_from_fields(
                good.id,
                GoodFields {
                    price: Some("200".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        let updated = service
            .update_from_fields(
                good.id,
                GoodFields {
                    stock: Some(NumericInput::Number(5.0)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, 200.0);
        assert_eq!(updated.stock, 5);
        assert_eq!(updated.name, "Tea");
        assert_eq!(updated.description, "black");
    }

    #[test]
    fn test_delete_then_get_not_found() {
        let service = GoodService::new();
        let good = service.create_from_fields(tea()).unwrap();
        service.delete(good.id).unwrap();

        assert!(matches!(service.get(good.id), Err(CoreError::NotFound(_))));
        assert!(matches!(service.delete(good.id), Err(CoreError::NotFound(_))));
        assert!(matches!(
            service.update_from_fields(good.id, GoodFields::default()),
            Err(CoreError::NotFound(_))
        ));

        let next = service.create_from_fields(tea()).unwrap();
        assert!(next.id > good.id);
    }

    #[test]
    fn test_invalid_create_keeps_length() {
        let service = GoodService::new();
        service.create_from_fields(tea()).unwrap();

        let mut no_name = tea();
        no_name.name = None;
        let mut no_price = tea();
        no_price.price = None;
        let mut bad_price = tea();
        bad_price.price = Some("abc".into());

        for fields in [no_name, no_price, bad_price] {
            assert!(matches!(
                service.create_from_fields(fields),
                Err(CoreError::InvalidInput(_))
            ));
        }
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_seed_samples() {
        let service = GoodService::new();
        service.seed_samples().unwrap();
        let goods = service.list().unwrap();
        assert_eq!(goods.len(), 2);
        assert!(goods[0].id < goods[1].id);
    }
}
