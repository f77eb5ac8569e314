//! 物品转移：拖放与双击最终都落到 `try_move`
//!
//! 顺序固定为先放入目标、确认成功后再从来源移除，
//! 任何一步失败两个背包都保持原样。

use bevy::prelude::*;
use thiserror::Error;

use super::components::{Bag, BagId, Bags, Item};

/// 某个背包里的某一格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRef {
    pub bag: BagId,
    pub slot: usize,
}

impl SlotRef {
    pub fn new(bag: BagId, slot: usize) -> Self {
        Self { bag, slot }
    }
}

/// 拖拽中携带的物品及其来源格
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    pub from: SlotRef,
    pub item: Item,
}

/// 当前进行中的拖拽，同一时刻最多一个
#[derive(Resource, Default, Debug)]
pub struct DragState {
    pub current: Option<Drag>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureError {
    #[error("{bag} 没有第 {slot} 格（容量 {capacity}）")]
    SlotOutOfRange {
        bag: BagId,
        slot: usize,
        capacity: usize,
    },
    #[error("{bag} 第 {slot} 格为空")]
    EmptySlot { bag: BagId, slot: usize },
    #[error("{bag} 第 {slot} 格已有物品")]
    SlotOccupied { bag: BagId, slot: usize },
    #[error("没有正在拖拽的物品")]
    NoPayload,
    #[error("拖拽的 {0} 已不在原来的格子")]
    StalePayload(String),
}

/// 双击的结果
#[derive(Debug, Clone, PartialEq)]
pub enum DoubleClick {
    /// 宝箱物品移入主背包
    Moved(Item),
    /// 主背包物品直接丢弃
    Discarded(Item),
    /// 主背包已满，什么都没发生
    Refused(Item),
}

/// 把 `item` 从 `source` 移到 `target`。
///
/// `target_slot` 为 None 时放进目标的第一个空格。两个背包相同时是同一背包内换格。
/// 返回 false 时两个背包都未被修改。
pub fn try_move(
    bags: &mut Bags,
    item: &Item,
    source: BagId,
    target: BagId,
    target_slot: Option<usize>,
) -> bool {
    if source == target {
        return relocate(bags.get_mut(source), item, target_slot);
    }
    let (from, to) = bags.pair_mut(source);
    move_between(item, from, to, target_slot)
}

/// 两个不同背包之间转移
pub fn move_between(item: &Item, source: &mut Bag, target: &mut Bag, target_slot: Option<usize>) -> bool {
    let Some(from_slot) = source.slot_of(item) else {
        return false;
    };
    if !place(target, item.clone(), target_slot) {
        return false;
    }
    source.remove_at(from_slot);
    true
}

/// 同一背包内换格；目标格必须为空
pub fn relocate(bag: &mut Bag, item: &Item, target_slot: Option<usize>) -> bool {
    let Some(from_slot) = bag.slot_of(item) else {
        return false;
    };
    // 放入的一定是空格，所以 from_slot 仍指向原物品
    if !place(bag, item.clone(), target_slot) {
        return false;
    }
    bag.remove_at(from_slot);
    true
}

fn place(bag: &mut Bag, item: Item, slot: Option<usize>) -> bool {
    match slot {
        Some(slot) => bag.insert_at(slot, item),
        None => bag.add(item),
    }
}

fn check_slot(bags: &Bags, at: SlotRef) -> Result<Option<&Item>, GestureError> {
    let bag = bags.get(at.bag);
    if at.slot >= bag.capacity() {
        return Err(GestureError::SlotOutOfRange {
            bag: at.bag,
            slot: at.slot,
            capacity: bag.capacity(),
        });
    }
    Ok(bag.get(at.slot))
}

/// 在某格按下开始拖拽，捕获其中的物品
pub fn begin_drag(bags: &Bags, at: SlotRef) -> Result<Drag, GestureError> {
    match check_slot(bags, at)? {
        Some(item) => Ok(Drag {
            from: at,
            item: item.clone(),
        }),
        None => Err(GestureError::EmptySlot {
            bag: at.bag,
            slot: at.slot,
        }),
    }
}

/// 把拖拽中的物品放到某格。目标格必须为空，来源格必须仍是这件物品。
pub fn drop_on(bags: &mut Bags, drag: &Drag, at: SlotRef) -> Result<bool, GestureError> {
    if check_slot(bags, at)?.is_some() {
        return Err(GestureError::SlotOccupied {
            bag: at.bag,
            slot: at.slot,
        });
    }
    if bags.get(drag.from.bag).get(drag.from.slot) != Some(&drag.item) {
        return Err(GestureError::StalePayload(drag.item.name().to_string()));
    }
    Ok(try_move(bags, &drag.item, drag.from.bag, at.bag, Some(at.slot)))
}

/// 双击：宝箱里的物品移入主背包，主背包里的物品直接丢弃
pub fn double_click(bags: &mut Bags, at: SlotRef) -> Result<DoubleClick, GestureError> {
    let item = check_slot(bags, at)?
        .cloned()
        .ok_or(GestureError::EmptySlot {
            bag: at.bag,
            slot: at.slot,
        })?;

    match at.bag {
        BagId::Inventory => {
            bags.inventory.remove(&item);
            Ok(DoubleClick::Discarded(item))
        }
        BagId::Chest => {
            if try_move(bags, &item, BagId::Chest, BagId::Inventory, None) {
                Ok(DoubleClick::Moved(item))
            } else {
                Ok(DoubleClick::Refused(item))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bags_with(inventory: &[&str], chest: &[&str]) -> Bags {
        let mut bags = Bags::new(4, 3).unwrap();
        for name in inventory {
            bags.inventory.add(Item::new(*name, false));
        }
        for name in chest {
            bags.chest.add(Item::new(*name, false));
        }
        bags
    }

    fn names(bag: &Bag) -> Vec<String> {
        bag.snapshot().iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn move_into_empty_slot() {
        let mut bags = bags_with(&["Sword"], &["Hat", "Cloak"]);
        let hat = bags.chest.get(0).cloned().unwrap();

        assert!(try_move(&mut bags, &hat, BagId::Chest, BagId::Inventory, Some(3)));
        assert_eq!(bags.inventory.get(3), Some(&hat));
        assert!(!bags.chest.contains(&hat));
        assert_eq!((bags.inventory.len(), bags.chest.len()), (2, 1));
    }

    #[test]
    fn full_target_leaves_both_unchanged() {
        let mut bags = bags_with(&["Sword", "Hat", "Cloak", "Boots"], &["Mana Potion"]);
        let potion = bags.chest.get(0).cloned().unwrap();
        let inv_before = bags.inventory.slot_snapshot();
        let chest_before = bags.chest.slot_snapshot();

        assert!(!try_move(&mut bags, &potion, BagId::Chest, BagId::Inventory, None));
        assert_eq!(bags.inventory.slot_snapshot(), inv_before);
        assert_eq!(bags.chest.slot_snapshot(), chest_before);
    }

    #[test]
    fn item_not_in_source_is_refused() {
        let mut bags = bags_with(&[], &["Hat"]);
        let stray = Item::new("Hat", false);
        assert!(!try_move(&mut bags, &stray, BagId::Chest, BagId::Inventory, None));
        assert_eq!(bags.total(), 1);
        assert!(bags.inventory.is_empty());
    }

    #[test]
    fn relocate_within_one_bag() {
        let mut bags = bags_with(&["Sword", "Hat"], &[]);
        let sword = bags.inventory.get(0).cloned().unwrap();

        assert!(try_move(&mut bags, &sword, BagId::Inventory, BagId::Inventory, Some(3)));
        assert_eq!(bags.inventory.slot_of(&sword), Some(3));
        assert_eq!(bags.inventory.get(0), None);
        assert_eq!(bags.inventory.len(), 2);
    }

    #[test]
    fn moves_never_duplicate_or_lose() {
        let mut bags = bags_with(&["Sword", "Hat", "Cloak"], &["Boots", "Mana Potion"]);
        let total = bags.total();
        let moves = [
            (BagId::Chest, BagId::Inventory),
            (BagId::Chest, BagId::Inventory),
            (BagId::Inventory, BagId::Chest),
            (BagId::Inventory, BagId::Chest),
            (BagId::Inventory, BagId::Chest),
            (BagId::Inventory, BagId::Chest),
        ];
        for (from, to) in moves {
            let Some(item) = bags.get(from).snapshot().first().cloned() else {
                continue;
            };
            let (src_before, dst_before) = (bags.get(from).len(), bags.get(to).len());
            if try_move(&mut bags, &item, from, to, None) {
                assert_eq!(bags.get(from).len(), src_before - 1);
                assert_eq!(bags.get(to).len(), dst_before + 1);
                assert!(bags.get(to).contains(&item));
            } else {
                assert_eq!(bags.get(from).len(), src_before);
                assert_eq!(bags.get(to).len(), dst_before);
            }
            assert_eq!(bags.total(), total);
        }
        // 宝箱只有 3 格
        assert_eq!(bags.chest.len(), 3);
    }

    #[test]
    fn drag_and_drop_moves_item() {
        let mut bags = bags_with(&["Sword"], &["Hat", "Cloak"]);
        let drag = begin_drag(&bags, SlotRef::new(BagId::Chest, 1)).unwrap();
        assert_eq!(drag.item.name(), "Cloak");

        assert_eq!(drop_on(&mut bags, &drag, SlotRef::new(BagId::Inventory, 2)), Ok(true));
        assert_eq!(names(&bags.inventory), ["Sword", "Cloak"]);
        assert_eq!(names(&bags.chest), ["Hat"]);
    }

    #[test]
    fn drag_from_empty_slot_is_rejected() {
        let bags = bags_with(&["Sword"], &[]);
        assert_eq!(
            begin_drag(&bags, SlotRef::new(BagId::Inventory, 1)),
            Err(GestureError::EmptySlot {
                bag: BagId::Inventory,
                slot: 1
            })
        );
        assert!(matches!(
            begin_drag(&bags, SlotRef::new(BagId::Chest, 9)),
            Err(GestureError::SlotOutOfRange { capacity: 3, .. })
        ));
    }

    #[test]
    fn drop_on_occupied_slot_is_refused() {
        let mut bags = bags_with(&["Sword"], &["Hat"]);
        let drag = begin_drag(&bags, SlotRef::new(BagId::Chest, 0)).unwrap();

        assert_eq!(
            drop_on(&mut bags, &drag, SlotRef::new(BagId::Inventory, 0)),
            Err(GestureError::SlotOccupied {
                bag: BagId::Inventory,
                slot: 0
            })
        );
        assert_eq!(names(&bags.inventory), ["Sword"]);
        assert_eq!(names(&bags.chest), ["Hat"]);
    }

    #[test]
    fn stale_drag_is_refused() {
        let mut bags = bags_with(&[], &["Hat"]);
        let drag = begin_drag(&bags, SlotRef::new(BagId::Chest, 0)).unwrap();
        bags.chest.clear();

        assert_eq!(
            drop_on(&mut bags, &drag, SlotRef::new(BagId::Inventory, 0)),
            Err(GestureError::StalePayload("Hat".into()))
        );
        assert_eq!(bags.total(), 0);
    }

    #[test]
    fn double_click_chest_moves_to_inventory() {
        let mut bags = bags_with(&["Sword"], &["Hat", "Cloak"]);
        let outcome = double_click(&mut bags, SlotRef::new(BagId::Chest, 0)).unwrap();

        assert!(matches!(outcome, DoubleClick::Moved(ref item) if item.name() == "Hat"));
        assert_eq!(bags.inventory.len(), 2);
        assert_eq!(bags.chest.len(), 1);
    }

    #[test]
    fn double_click_chest_with_full_inventory_refuses() {
        let mut bags = bags_with(&["Sword", "Hat", "Cloak", "Boots"], &["Mana Potion"]);
        let outcome = double_click(&mut bags, SlotRef::new(BagId::Chest, 0)).unwrap();

        assert!(matches!(outcome, DoubleClick::Refused(_)));
        assert_eq!((bags.inventory.len(), bags.chest.len()), (4, 1));
    }

    #[test]
    fn double_click_inventory_discards() {
        let mut bags = bags_with(&["Sword", "Hat"], &["Cloak"]);
        let total = bags.total();
        let outcome = double_click(&mut bags, SlotRef::new(BagId::Inventory, 1)).unwrap();

        assert!(matches!(outcome, DoubleClick::Discarded(ref item) if item.name() == "Hat"));
        assert_eq!(bags.inventory.len(), 1);
        assert_eq!(bags.chest.len(), 1);
        assert_eq!(bags.total(), total - 1);
    }

    #[test]
    fn double_click_empty_slot_is_error() {
        let mut bags = bags_with(&[], &[]);
        assert!(matches!(
            double_click(&mut bags, SlotRef::new(BagId::Chest, 0)),
            Err(GestureError::EmptySlot { .. })
        ));
    }
}
