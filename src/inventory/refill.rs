use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::components::Bag;
use crate::data::Catalog;

/// 宝箱抽取用的随机源，可以用固定种子替换
#[derive(Resource)]
pub struct ChestRng(pub StdRng);

impl ChestRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_os_rng()),
        }
    }
}

/// 清空宝箱，从物品表中不放回地随机抽取，直到宝箱满或表被抽空。
///
/// 可堆叠的物品会紧接着再放一件同种物品；宝箱已满时这一件被丢弃。
/// 堆叠不计数，多出来的一件单独占一格。
pub fn refill_chest<R: Rng + ?Sized>(chest: &mut Bag, catalog: &Catalog, rng: &mut R) {
    chest.clear();
    let mut remaining = catalog.kinds().to_vec();

    while !chest.is_full() && !remaining.is_empty() {
        let kind = remaining.swap_remove(rng.random_range(0..remaining.len()));
        chest.add(kind.spawn());
        if kind.stackable && !chest.add(kind.spawn()) {
            debug!("宝箱已满，{} 只放入一件", kind.name);
        }
    }
}
