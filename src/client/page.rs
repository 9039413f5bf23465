//! 商品列表页状态

use tracing::warn;

use super::{api::CatalogApi, error::ClientError, form::GoodForm};
use crate::app::goods::Good;
use crate::core::ItemId;

pub const LOAD_FAILED: &str = "无法加载商品列表";
pub const SAVE_FAILED: &str = "无法保存商品";
pub const DELETE_FAILED: &str = "无法删除商品";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(ItemId),
}

/// 打开中的新建/编辑弹窗
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub mode: ModalMode,
    pub form: GoodForm,
}

pub struct GoodsPage<A> {
    api: A,
    goods: Vec<Good>,
    loading: bool,
    modal: Option<Modal>,
    notice: Option<String>,
}

impl<A: CatalogApi> GoodsPage<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            goods: Vec::new(),
            loading: false,
            modal: None,
            notice: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn goods(&self) -> &[Good] {
        &self.goods
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// 供界面修改表单输入
    pub fn form_mut(&mut self) -> Option<&mut GoodForm> {
        self.modal.as_mut().map(|modal| &mut modal.form)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// 拉取列表；失败时保留原有数据并给出提示
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.api.list_goods().await;
        self.loading = false;

        match result {
            Ok(goods) => {
                self.goods = goods;
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "加载商品列表失败");
                self.notice = Some(LOAD_FAILED.to_string());
                Err(err)
            }
        }
    }

    pub fn open_create(&mut self) {
        self.modal = Some(Modal {
            mode: ModalMode::Create,
            form: GoodForm::blank(),
        });
    }

    /// 列表中没有该商品时返回 false
    pub fn open_edit(&mut self, id: ItemId) -> bool {
        match self.goods.iter().find(|g| g.id == id) {
            Some(good) => {
                self.modal = Some(Modal {
                    mode: ModalMode::Edit(id),
                    form: GoodForm::from_good(good),
                });
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// 校验并提交弹窗表单，成功后就地更新列表并关闭弹窗
    ///
    /// 没有打开的弹窗时返回 `Ok(None)`。
    pub async fn submit(&mut self) -> Result<Option<Good>, ClientError> {
        let Some(modal) = self.modal.as_ref() else {
            return Ok(None);
        };

        let request = match modal.form.validate() {
            Ok(request) => request,
            Err(err) => {
                self.notice = Some(err.to_string());
                return Err(err.into());
            }
        };

        let mode = modal.mode;
        let result = match mode {
            ModalMode::Create => self.api.create_good(request).await,
            ModalMode::Edit(id) => self.api.update_good(id, request).await,
        };

        match result {
            Ok(good) => {
                match mode {
                    ModalMode::Create => self.goods.push(good.clone()),
                    ModalMode::Edit(id) => {
                        if let Some(slot) = self.goods.iter_mut().find(|g| g.id == id) {
                            *slot = good.clone();
                        }
                    }
                }
                self.modal = None;
                self.notice = None;
                Ok(Some(good))
            }
            Err(err) => {
                warn!(error = %err, "保存商品失败");
                self.notice = Some(SAVE_FAILED.to_string());
                Err(err)
            }
        }
    }

    /// 经确认后删除；未确认或列表中不存在时返回 `Ok(false)`
    pub async fn delete<F>(&mut self, id: ItemId, confirm: F) -> Result<bool, ClientError>
    where
        F: FnOnce(&Good) -> bool,
    {
        let Some(good) = self.goods.iter().find(|g| g.id == id) else {
            return Ok(false);
        };
        if !confirm(good) {
            return Ok(false);
        }

        match self.api.delete_good(id).await {
            Ok(()) => {
                self.goods.retain(|g| g.id != id);
                self.notice = None;
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "删除商品失败");
                self.notice = Some(DELETE_FAILED.to_string());
                Err(err)
            }
        }
    }
}
