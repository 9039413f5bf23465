//! 用户数据模型

use serde::{Deserialize, Serialize};

use crate::core::{
    input::{optional_count, required_text, NumericInput},
    CoreError, ItemId,
};
use crate::infrastructure::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: ItemId,
    pub name: String,
    pub age: Option<u32>,
}

impl Record for User {
    fn id(&self) -> ItemId {
        self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFields {
    pub name: Option<String>,
    pub age: Option<NumericInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub age: Option<u32>,
}

impl TryFrom<UserFields> for NewUser {
    type Error = CoreError;

    fn try_from(fields: UserFields) -> Result<Self, Self::Error> {
        let name = fields
            .name
            .as_deref()
            .ok_or_else(|| CoreError::invalid("用户名为必填项"))?;
        Ok(NewUser {
            name: required_text(name, "name")?,
            age: optional_count(fields.age.as_ref(), "age")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
}

impl TryFrom<UserFields> for UserPatch {
    type Error = CoreError;

    fn try_from(fields: UserFields) -> Result<Self, Self::Error> {
        Ok(UserPatch {
            name: fields
                .name
                .as_deref()
                .map(|n| required_text(n, "name"))
                .transpose()?,
            age: optional_count(fields.age.as_ref(), "age")?,
        })
    }
}

impl User {
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = NewUser::try_from(UserFields {
            name: Some("张三".into()),
            age: Some("20".into()),
        })
        .unwrap();
        assert_eq!(user.age, Some(20));

        let no_age = NewUser::try_from(UserFields {
            name: Some("李四".into()),
            age: None,
        })
        .unwrap();
        assert_eq!(no_age.age, None);
    }

    #[test]
    fn test_new_user_rejects_bad_input() {
        assert!(NewUser::try_from(UserFields::default()).is_err());
        assert!(NewUser::try_from(UserFields {
            name: Some("x".into()),
            age: Some("nineteen".into()),
        })
        .is_err());
    }

    #[test]
    fn test_blank_age_is_absent() {
        let user = NewUser::try_from(UserFields {
            name: Some("李四".into()),
            age: Some("".into()),
        })
        .unwrap();
        assert_eq!(user.age, None);

        let patch = UserPatch::try_from(UserFields {
            age: Some(" ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch, UserPatch::default());
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let mut user = User {
            id: ItemId(1),
            name: "王五".into(),
            age: Some(19),
        };
        user.apply(
            UserPatch::try_from(UserFields {
                age: Some(20.0.into()),
                ..Default::default()
            })
            .unwrap(),
        );
        assert_eq!(user.name, "王五");
        assert_eq!(user.age, Some(20));
    }
}
