use super::{components::*, events::*, refill::*, transfer::*};
use crate::core::events::LogEvent;
use crate::core::resources::GameConfig;
use crate::data::Catalog;
use bevy::prelude::*;

/// 按到达顺序处理所有操作，同一帧里的拖放、双击、按钮不会互相越序
pub fn handle_gestures(
    mut ev_gesture: EventReader<GestureEvent>,
    mut bags: ResMut<Bags>,
    mut drag: ResMut<DragState>,
    mut rng: ResMut<ChestRng>,
    catalog: Res<Catalog>,
    mut show: EventWriter<ShowBagsEvent>,
    mut log: EventWriter<LogEvent>,
) {
    for gesture in ev_gesture.read() {
        let changed = match *gesture {
            GestureEvent::Open => open_chest(&mut bags, &catalog, &mut rng, &mut log),
            GestureEvent::Clear => clear_inventory(&mut bags, &mut log),
            GestureEvent::DragStart(at) => start_drag(&bags, &mut drag, at),
            GestureEvent::Drop(at) => finish_drop(&mut bags, &mut drag, at, &mut log),
            GestureEvent::Cancel => cancel_drag(&mut drag),
            GestureEvent::DoubleClick(at) => handle_double_click(&mut bags, at, &mut log),
        };
        if changed {
            show.write(ShowBagsEvent);
        }
    }
}

/// "Open Chest"：重新随机填充宝箱
fn open_chest(
    bags: &mut Bags,
    catalog: &Catalog,
    rng: &mut ChestRng,
    log: &mut EventWriter<LogEvent>,
) -> bool {
    refill_chest(&mut bags.chest, catalog, &mut rng.0);
    let loot = bags.chest.snapshot();
    let stackable = loot.iter().filter(|i| i.is_stackable()).count();
    info!("宝箱刷新: {:?}", loot.iter().map(Item::name).collect::<Vec<_>>());
    log.write(LogEvent(format!(
        "打开宝箱，获得 {} 件物品（可堆叠 {} 件）",
        loot.len(),
        stackable
    )));
    true
}

/// "Clear Inventory"：清空主背包
fn clear_inventory(bags: &mut Bags, log: &mut EventWriter<LogEvent>) -> bool {
    bags.inventory.clear();
    log.write(LogEvent("背包已清空".into()));
    true
}

/// 按下：捕获格中物品，开始拖拽
fn start_drag(bags: &Bags, drag: &mut DragState, at: SlotRef) -> bool {
    match begin_drag(bags, at) {
        Ok(d) => {
            debug!("开始拖拽 {} [{}] ({} #{})", d.item.name(), d.item.id(), at.bag, at.slot);
            drag.current = Some(d);
        }
        // 空格上按下不算拖拽
        Err(GestureError::EmptySlot { .. }) => {}
        Err(err) => warn!("无法拖拽: {err}"),
    }
    false
}

/// 松开：目标格接收物品后才从来源移除
fn finish_drop(
    bags: &mut Bags,
    drag: &mut DragState,
    at: SlotRef,
    log: &mut EventWriter<LogEvent>,
) -> bool {
    let result = match drag.current.take() {
        Some(d) => drop_on(bags, &d, at).map(|moved| (d, moved)),
        None => Err(GestureError::NoPayload),
    };
    match result {
        Ok((d, true)) => {
            log.write(LogEvent(format!(
                "{} → {} #{}",
                d.item.name(),
                at.bag,
                at.slot
            )));
        }
        Ok((d, false)) => {
            log.write(LogEvent(format!("{} 已满，{} 留在原处", at.bag, d.item.name())));
        }
        Err(err) => warn!("放置被拒绝: {err}"),
    }
    // 拖放结束后界面总要重绘，失败时看起来也没有变化
    true
}

fn cancel_drag(drag: &mut DragState) -> bool {
    if let Some(d) = drag.current.take() {
        debug!("取消拖拽 {}", d.item.name());
    }
    false
}

/// 双击：宝箱 → 背包；背包里的直接丢弃
fn handle_double_click(bags: &mut Bags, at: SlotRef, log: &mut EventWriter<LogEvent>) -> bool {
    match double_click(bags, at) {
        Ok(DoubleClick::Moved(item)) => {
            log.write(LogEvent(format!("{} 放入背包", item.name())));
            true
        }
        Ok(DoubleClick::Discarded(item)) => {
            log.write(LogEvent(format!("丢弃 {}", item.name())));
            true
        }
        Ok(DoubleClick::Refused(item)) => {
            log.write(LogEvent(format!("背包已满，无法拿取 {}", item.name())));
            false
        }
        Err(GestureError::EmptySlot { .. }) => false,
        Err(err) => {
            warn!("双击无效: {err}");
            false
        }
    }
}

/// 打印两个背包的格子
pub fn print_bags(
    mut ev_show: EventReader<ShowBagsEvent>,
    bags: Res<Bags>,
    config: Res<GameConfig>,
) {
    if ev_show.is_empty() {
        return;
    }
    ev_show.clear();

    for id in [BagId::Inventory, BagId::Chest] {
        println!("{}", render_grid(bags.get(id), id, config.grid_columns));
    }
    println!("共 {} 件物品", bags.total());
}

pub fn request_show(mut show: EventWriter<ShowBagsEvent>) {
    show.write(ShowBagsEvent);
}

/// 把背包画成文字网格，每格显示下标与物品名，空格显示 "-"
pub fn render_grid(bag: &Bag, id: BagId, columns: usize) -> String {
    let columns = columns.max(1);
    let mut out = format!("== {} {}/{} ==", id.title(), bag.len(), bag.capacity());
    if bag.is_empty() {
        out.push_str("  (empty)");
    }

    let cells: Vec<String> = bag
        .slot_snapshot()
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let name = slot.as_ref().map_or("-", |item| item.name());
            format!("[{idx:>2}] {name:<14}")
        })
        .collect();

    for row in cells.chunks(columns) {
        out.push('\n');
        out.push_str(row.join(" ").trim_end());
    }
    out
}
