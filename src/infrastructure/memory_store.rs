//! 内存存储基础设施
//!
//! 按插入顺序保存条目的有序集合，进程退出即丢失。

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::{CoreError, IdGenerator, ItemId};

/// 可被存储的条目
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> ItemId;
}

/// 内存存储
#[derive(Debug)]
pub struct MemoryStore<T> {
    items: RwLock<Vec<T>>,
    ids: IdGenerator,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            ids: IdGenerator::new(),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, CoreError> {
        self.items
            .read()
            .map_err(|_| CoreError::Internal("存储读锁已中毒".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, CoreError> {
        self.items
            .write()
            .map_err(|_| CoreError::Internal("存储写锁已中毒".to_string()))
    }

    /// 按插入顺序返回全部条目
    pub fn list(&self) -> Result<Vec<T>, CoreError> {
        Ok(self.read()?.clone())
    }

    pub fn find(&self, id: ItemId) -> Result<Option<T>, CoreError> {
        Ok(self.read()?.iter().find(|item| item.id() == id).cloned())
    }

    /// 分配新 ID，构造条目并追加到末尾
    pub fn insert_with<F>(&self, build: F) -> Result<T, CoreError>
    where
        F: FnOnce(ItemId) -> T,
    {
        let mut items = self.write()?;
        let item = build(self.ids.next_id());
        items.push(item.clone());
        Ok(item)
    }

    /// 原地修改条目；不存在时返回 `None`
    pub fn update<F>(&self, id: ItemId, apply: F) -> Result<Option<T>, CoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.write()?;
        Ok(items.iter_mut().find(|item| item.id() == id).map(|item| {
            apply(item);
            item.clone()
        }))
    }

    /// 删除条目，返回是否存在
    pub fn remove(&self, id: ItemId) -> Result<bool, CoreError> {
        let mut items = self.write()?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        Ok(items.len() != before)
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.read()?.is_empty())
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: ItemId,
        text: String,
    }

    impl Record for Note {
        fn id(&self) -> ItemId {
            self.id
        }
    }

    fn note(store: &MemoryStore<Note>, text: &str) -> Note {
        store
            .insert_with(|id| Note {
                id,
                text: text.to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_insert_preserves_order() {
        let store = MemoryStore::new();
        let a = note(&store, "a");
        let b = note(&store, "b");
        let c = note(&store, "c");

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![a, b, c]);
    }

    #[test]
    fn test_update_in_place() {
        let store = MemoryStore::new();
        let a = note(&store, "a");

        let updated = store.update(a.id, |n| n.text = "z".to_string()).unwrap();
        assert_eq!(updated.unwrap().text, "z");
        assert_eq!(store.find(a.id).unwrap().unwrap().text, "z");

        assert!(store.update(ItemId(1), |_| {}).unwrap().is_none());
    }

    #[test]
    fn test_remove_and_never_reuse_id() {
        let store = MemoryStore::new();
        let a = note(&store, "a");
        let b = note(&store, "b");

        assert!(store.remove(b.id).unwrap());
        assert!(!store.remove(b.id).unwrap());
        assert!(store.find(b.id).unwrap().is_none());

        let c = note(&store, "c");
        assert!(c.id > b.id);
        assert_ne!(c.id, a.id);
        assert_eq!(store.len().unwrap(), 2);
    }
}
