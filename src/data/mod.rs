pub mod schema;
pub mod loader;

use bevy::asset::LoadState;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use schema::{ItemKind, ItemList};
use crate::core::states::AppState;

/// 内置物品表；数据文件加载失败时继续使用
static BUILTIN_KINDS: Lazy<Vec<ItemKind>> = Lazy::new(|| {
    vec![
        ItemKind::new("sword", "Sword", false),
        ItemKind::new("hat", "Hat", false),
        ItemKind::new("cloak", "Cloak", false),
        ItemKind::new("boots", "Boots", false),
        ItemKind::new("mana_potion", "Mana Potion", true),
        ItemKind::new("health_potion", "Health Potion", true),
    ]
});

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    handle: Option<Handle<ItemList>>,
}

/// 宝箱抽取用的物品表，游戏过程中只读
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Catalog {
    kinds: Vec<ItemKind>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(BUILTIN_KINDS.clone())
    }
}

impl From<&ItemList> for Catalog {
    fn from(list: &ItemList) -> Self {
        Self::new(list.items.clone())
    }
}

impl Catalog {
    pub fn new(kinds: Vec<ItemKind>) -> Self {
        Self { kinds }
    }

    pub fn kinds(&self) -> &[ItemKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// 按 id / 名称 / uuid 查询，忽略大小写
    pub fn find(&self, token: &str) -> Option<&ItemKind> {
        let token = token.to_lowercase();
        self.kinds.iter().find(|k| {
            k.id.eq_ignore_ascii_case(&token)
                || k.name.eq_ignore_ascii_case(&token)
                || k.uuid().to_string() == token
        })
    }
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemList>()
            .register_asset_loader(loader::RonItemLoader)
            .init_resource::<ItemAssets>()
            .init_resource::<Catalog>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                check_loaded.run_if(in_state(AppState::Loading)),
            );
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut item_assets: ResMut<ItemAssets>,
    asset_server: Res<AssetServer>,
) {
    let handle: Handle<ItemList> = asset_server.load("data/items.ron");
    item_assets.handle = Some(handle);
}

fn check_loaded(
    mut commands: Commands,
    mut next: ResMut<NextState<AppState>>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
    asset_server: Res<AssetServer>,
) {
    let Some(h) = &item_assets.handle else {
        return;
    };

    if let Some(list) = lists.get(h) {
        if list.items.is_empty() {
            warn!("物品表为空，沿用内置物品表");
        } else {
            info!("✔ Items loaded: {}", list.items.len());
            commands.insert_resource(Catalog::from(list));
        }
        next.set(AppState::InGame);
    } else if let LoadState::Failed(err) = asset_server.load_state(h.id()) {
        warn!("物品表加载失败（{err}），沿用内置物品表");
        next.set(AppState::InGame);
    }
}
