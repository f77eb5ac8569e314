use anyhow::{Context, ensure};
use bevy::prelude::Resource;
use serde_derive::Deserialize;
use std::path::Path;

use crate::inventory::components::{CHEST_CAPACITY, INVENTORY_CAPACITY};

/// 默认配置文件，放在工作目录下，可选
pub const CONFIG_PATH: &str = "hero_bag.toml";

/// 全局配置（背包尺寸、网格列数、宝箱随机种子）
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub inventory_capacity: usize,
    pub chest_capacity: usize,
    pub grid_columns: usize,
    /// None = 每次启动用系统熵播种
    pub chest_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            inventory_capacity: INVENTORY_CAPACITY,
            chest_capacity: CHEST_CAPACITY,
            grid_columns: 3,
            chest_seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml(src: &str) -> anyhow::Result<Self> {
        let config: GameConfig = toml::from_str(src).context("配置格式错误")?;
        config.validate()?;
        Ok(config)
    }

    /// 读取配置文件；文件不存在时返回默认值
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置 {}", path.display()))?;
        Self::from_toml(&src).with_context(|| format!("无法解析配置 {}", path.display()))
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.inventory_capacity > 0, "inventory_capacity 必须大于 0");
        ensure!(self.chest_capacity > 0, "chest_capacity 必须大于 0");
        ensure!(self.grid_columns > 0, "grid_columns 必须大于 0");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = GameConfig::from_toml("chest_capacity = 5\nchest_seed = 7").unwrap();
        assert_eq!(config.chest_capacity, 5);
        assert_eq!(config.chest_seed, Some(7));
        assert_eq!(config.inventory_capacity, 12);
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(GameConfig::from_toml("inventory_capacity = 0").is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(GameConfig::from_toml("backpack = 30").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = GameConfig::load("definitely/not/here/hero_bag.toml").unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
