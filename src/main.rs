use bevy::prelude::*;
use bevy::window::WindowResolution;

mod core;
mod data;
mod interface;
mod inventory;

use crate::core::CorePlugin;
use crate::core::resources::{CONFIG_PATH, GameConfig};
use interface::debug_cli::DebugCliPlugin;
use inventory::InventoryPlugin;
use crate::core::states;

fn main() -> AppExit {
    // 日志插件尚未启动，这里直接写 stderr
    let config = GameConfig::load(CONFIG_PATH).unwrap_or_else(|err| {
        eprintln!("⚠ {err:#}，使用默认配置");
        GameConfig::default()
    });

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hero Bag".into(),
                resolution: WindowResolution::new(400.0, 300.0),
                ..default()
            }), // 关闭窗口即正常退出
            ..default()
        }))
        // 必须在 InventoryPlugin 之前插入，背包尺寸从这里读
        .insert_resource(config)
        .add_plugins(CorePlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins(InventoryPlugin)
        .add_plugins(DebugCliPlugin)
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run()
}

fn forward_log_event(mut reader: EventReader<crate::core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
