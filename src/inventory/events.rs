use bevy::prelude::*;

use super::transfer::SlotRef;

/// 玩家在界面上的一次操作；同一帧内按写入顺序逐个处理
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// "Open Chest" 按钮
    Open,
    /// "Clear Inventory" 按钮
    Clear,
    /// 在某格按下并开始拖拽
    DragStart(SlotRef),
    /// 在某格松开
    Drop(SlotRef),
    Cancel,
    DoubleClick(SlotRef),
}

/// 请求重绘两个背包
#[derive(Event)]
pub struct ShowBagsEvent;
