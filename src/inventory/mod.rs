pub mod components;
pub mod events;
pub mod refill;
pub mod transfer;
mod systems;

use bevy::prelude::*;
use crate::core::resources::GameConfig;
use crate::core::states::AppState;
use components::*;
use events::*;
use refill::ChestRng;
use systems::*;
use transfer::DragState;

/// 背包相关的系统；输入来源（CLI 等）排在它之前，当帧写入的操作当帧生效
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InventorySystems;

pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();

        let bags = Bags::new(config.inventory_capacity, config.chest_capacity)
            .unwrap_or_else(|err| {
                warn!("{err}，使用默认背包尺寸");
                Bags::default()
            });

        app
            .insert_resource(bags)
            .insert_resource(ChestRng::from_seed(config.chest_seed))
            .init_resource::<DragState>()
            .add_event::<GestureEvent>()
            .add_event::<ShowBagsEvent>()
            .add_systems(OnEnter(AppState::InGame), request_show)
            .add_systems(
                Update,
                (handle_gestures, print_bags)
                    .chain()
                    .in_set(InventorySystems)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
