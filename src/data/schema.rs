use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::Deserialize;
use uuid::Uuid;

use crate::inventory::components::Item;

/// 物品种类（静态表条目）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemKind {
    pub id:   String,
    pub name: String,
    #[serde(default)] pub stackable: bool,
}

impl ItemKind {
    pub fn new(id: &str, name: &str, stackable: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stackable,
        }
    }

    /// 生成一个新的物品实例，每次调用身份都不同
    pub fn spawn(&self) -> Item {
        Item::new(self.name.clone(), self.stackable)
    }

    /// 用固定 namespace + id 字节生成版本 5 UUID，保证可重复得到同一值
    pub fn uuid(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, self.id.as_bytes())
    }
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemKind>,
}
