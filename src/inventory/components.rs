use bevy::prelude::*;
use serde_derive::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// 运行时物品实例；相等性只看实例 id，同名物品也是不同的物品
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    id: Uuid,
    name: String,
    stackable: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, stackable: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            stackable,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_stackable(&self) -> bool {
        self.stackable
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BagError {
    #[error("背包容量必须大于 0")]
    ZeroCapacity,
}

/// 定长格子背包，空格为 None；格子下标即界面上的格子位置
#[derive(Debug, Clone, Serialize)]
pub struct Bag {
    slots: Vec<Option<Item>>,
}

impl Bag {
    pub fn new(capacity: usize) -> Result<Self, BagError> {
        if capacity == 0 {
            return Err(BagError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![None; capacity],
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 已占用格子数
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// 放进第一个空格；背包已满返回 false，不做任何修改
    pub fn add(&mut self, item: Item) -> bool {
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(item);
                true
            }
            None => false,
        }
    }

    /// 放进指定格子；下标越界或格子已被占用返回 false
    pub fn insert_at(&mut self, slot: usize, item: Item) -> bool {
        match self.slots.get_mut(slot) {
            Some(s) if s.is_none() => {
                *s = Some(item);
                true
            }
            _ => false,
        }
    }

    /// 移除第一个身份相同的物品；不存在时什么都不做
    pub fn remove(&mut self, item: &Item) {
        if let Some(slot) = self.slot_of(item) {
            self.slots[slot] = None;
        }
    }

    pub fn remove_at(&mut self, slot: usize) -> Option<Item> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn slot_of(&self, item: &Item) -> Option<usize> {
        self.slots.iter().position(|s| s.as_ref() == Some(item))
    }

    #[cfg(test)]
    pub fn contains(&self, item: &Item) -> bool {
        self.slot_of(item).is_some()
    }

    #[cfg(test)]
    pub fn count_named(&self, name: &str) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|item| item.name() == name)
            .count()
    }

    /// 按格子顺序复制出所有物品，之后修改背包不影响返回值
    pub fn snapshot(&self) -> Vec<Item> {
        self.slots.iter().flatten().cloned().collect()
    }

    /// 含空格的副本，界面按它逐格重建
    pub fn slot_snapshot(&self) -> Vec<Option<Item>> {
        self.slots.clone()
    }
}

/// 主背包 / 宝箱
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BagId {
    Inventory,
    Chest,
}

impl BagId {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "inventory" | "inv" | "i" => Some(BagId::Inventory),
            "chest" | "c" => Some(BagId::Chest),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            BagId::Inventory => "Inventory",
            BagId::Chest => "Chest",
        }
    }
}

impl fmt::Display for BagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

pub const INVENTORY_CAPACITY: usize = 12;
pub const CHEST_CAPACITY: usize = 3;

/// 两个背包都挂在同一个 Resource 上，转移时可以同时拿到可变引用
#[derive(Resource, Debug, Clone, Serialize)]
pub struct Bags {
    pub inventory: Bag,
    pub chest: Bag,
}

impl Default for Bags {
    fn default() -> Self {
        Self {
            inventory: Bag {
                slots: vec![None; INVENTORY_CAPACITY],
            },
            chest: Bag {
                slots: vec![None; CHEST_CAPACITY],
            },
        }
    }
}

impl Bags {
    pub fn new(inventory_capacity: usize, chest_capacity: usize) -> Result<Self, BagError> {
        Ok(Self {
            inventory: Bag::new(inventory_capacity)?,
            chest: Bag::new(chest_capacity)?,
        })
    }

    pub fn get(&self, id: BagId) -> &Bag {
        match id {
            BagId::Inventory => &self.inventory,
            BagId::Chest => &self.chest,
        }
    }

    pub fn get_mut(&mut self, id: BagId) -> &mut Bag {
        match id {
            BagId::Inventory => &mut self.inventory,
            BagId::Chest => &mut self.chest,
        }
    }

    /// 两个不同背包的可变引用，顺序与参数一致
    pub fn pair_mut(&mut self, first: BagId) -> (&mut Bag, &mut Bag) {
        match first {
            BagId::Inventory => (&mut self.inventory, &mut self.chest),
            BagId::Chest => (&mut self.chest, &mut self.inventory),
        }
    }

    /// 所有背包的物品总数
    pub fn total(&self) -> usize {
        self.inventory.len() + self.chest.len()
    }
}
