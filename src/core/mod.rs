use bevy::prelude::*;

pub mod states;
pub mod events;
pub mod resources;

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        // 配置可能已由 main 预先插入，这里不覆盖
        if !app.world().contains_resource::<resources::GameConfig>() {
            app.init_resource::<resources::GameConfig>();
        }

        app
            .init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .add_systems(Startup, events::greet);
    }
}
