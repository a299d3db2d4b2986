//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read the TOML configuration file / 读取 TOML 配置文件
//! - ✅ Map it onto `PairingConfig` / 映射为 `PairingConfig`
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! Missing keys fall back to the documented ceilings; a missing
//! `storage.state_dir` falls back to the platform data directory.

use anyhow::Context;
use std::path::{Path, PathBuf};

use sl_core::PairingConfig;
use sl_infra::default_state_dir;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// 在以下情况下返回错误：
/// - 无法读取文件（I/O 错误）
/// - 内容不是有效的 TOML（解析错误）
pub fn load_config(config_path: &Path) -> anyhow::Result<PairingConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    Ok(PairingConfig::from_toml(&toml_value, default_state_dir()))
}

/// Load the config if present, otherwise use defaults.
/// 配置文件不存在时使用默认值。
pub fn load_config_or_default(config_path: Option<PathBuf>) -> anyhow::Result<PairingConfig> {
    match config_path {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(PairingConfig::with_state_dir(default_state_dir())),
    }
}
