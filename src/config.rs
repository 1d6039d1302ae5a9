use crate::editor::{BridgeConfig, ImageFormat};
use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// bridge程序路径的环境变量（优先于配置文件）
pub const BRIDGE_ENV: &str = "SHIFT_ROSTER_BRIDGE";

/// 应用设置
///
/// 只读取，程序不会写回（每次运行的路径不保存）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub bridge: BridgeConfig,
    pub output_format: ImageFormat,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)?
        } else {
            Self::default()
        };

        if let Ok(program) = std::env::var(BRIDGE_ENV) {
            if !program.trim().is_empty() {
                config.bridge.program = PathBuf::from(program);
            }
        }

        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RosterError::Config("找不到用户目录".into()))?;
        Ok(home.join(".config").join("shift-roster").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if let ImageFormat::Jpeg { quality } = self.output_format {
            if !(1..=100).contains(&quality) {
                return Err(RosterError::Config(format!(
                    "JPEG质量必须在1〜100之间: {quality}"
                )));
            }
        }
        if self.bridge.program.as_os_str().is_empty() {
            return Err(RosterError::Config("bridge程序路径为空".into()));
        }
        Ok(())
    }
}
