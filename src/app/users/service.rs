//! 用户业务服务

use std::sync::Arc;
use tracing::info;

use super::model::{NewUser, User, UserPatch};
use crate::core::{CoreError, ItemId};
use crate::infrastructure::MemoryStore;

const ENTITY: &str = "用户";

#[derive(Clone, Default)]
pub struct UserService {
    store: Arc<MemoryStore<User>>,
}

impl UserService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Result<Vec<User>, CoreError> {
        self.store.list()
    }

    pub fn get(&self, id: ItemId) -> Result<User, CoreError> {
        self.store
            .find(id)?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    pub fn create(&self, new: NewUser) -> Result<User, CoreError> {
        let user = self.store.insert_with(|id| User {
            id,
            name: new.name,
            age: new.age,
        })?;
        info!(id = %user.id, "用户已创建");
        Ok(user)
    }

    pub fn update(&self, id: ItemId, patch: UserPatch) -> Result<User, CoreError> {
        self.store
            .update(id, |user| user.apply(patch))?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    pub fn delete(&self, id: ItemId) -> Result<(), CoreError> {
        if !self.store.remove(id)? {
            return Err(CoreError::not_found(ENTITY, id));
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        self.store.len()
    }

    pub fn seed_samples(&self) -> Result<(), CoreError> {
        for (name, age) in [("张三", 19), ("李四", 20), ("王五", 18)] {
            self.create(NewUser {
                name: name.to_string(),
                age: Some(age),
            })?;
        }
        info!("已初始化 {} 个示例用户", self.count()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            age: None,
        }
    }

    #[test]
    fn test_crud_cycle() {
        let service = UserService::new();
        let user = service.create(new_user("张三")).unwrap();
        assert_eq!(service.get(user.id).unwrap(), user);

        let updated = service
            .update(
                user.id,
                UserPatch {
                    age: Some(30),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "张三");
        assert_eq!(updated.age, Some(30));

        service.delete(user.id).unwrap();
        assert!(matches!(service.get(user.id), Err(CoreError::NotFound(_))));
        assert!(matches!(service.delete(user.id), Err(CoreError::NotFound(_))));
    }

    #[test]
    fn test_list_in_insertion_order() {
        let service = UserService::new();
        service.seed_samples().unwrap();
        let names: Vec<String> = service.list().unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["张三", "李四", "王五"]);
    }
}
