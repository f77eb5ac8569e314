use bevy::prelude::*;

/// 面向玩家的一行提示，由 main 中的系统打印
#[derive(Event)]
pub struct LogEvent(pub String);

pub fn greet(mut writer: EventWriter<LogEvent>) {
    writer.write(LogEvent("Hero Bag 已启动，输入 help 查看命令".into()));
}
