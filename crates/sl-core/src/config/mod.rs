//! # Pure Data Module / 纯数据模块
//!
//! Pairing configuration DTO and its TOML mapping.
//!
//! No validation happens here: whatever the file says is taken as a fact,
//! and missing keys fall back to the documented defaults.
//! 此模块只做 TOML → DTO 映射，不做任何验证。

use std::path::PathBuf;

use crate::timer::TimerKind;

/// Pairing configuration DTO.
/// 配对配置 DTO。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingConfig {
    /// QR validity countdown ceiling (seconds).
    pub qr_ttl_secs: u32,

    /// Password entry countdown ceiling (seconds).
    pub password_ttl_secs: u32,

    /// Directory holding the wallet status and old identity files
    /// (path info only, no existence check).
    /// 状态文件目录（仅路径信息，不检查是否存在）。
    pub state_dir: PathBuf,
}

impl PairingConfig {
    /// Build a config with default ceilings rooted at `state_dir`.
    pub fn with_state_dir(state_dir: PathBuf) -> Self {
        Self {
            qr_ttl_secs: TimerKind::PairingQr.default_ceiling_secs(),
            password_ttl_secs: TimerKind::PasswordEntry.default_ceiling_secs(),
            state_dir,
        }
    }

    /// Create PairingConfig from a TOML value.
    /// 从 TOML 值创建 PairingConfig。
    ///
    /// ```toml
    /// [pairing]
    /// qr_ttl_secs = 30
    /// password_ttl_secs = 60
    ///
    /// [storage]
    /// state_dir = "/var/lib/shardlink"
    /// ```
    pub fn from_toml(toml_value: &toml::Value, default_state_dir: PathBuf) -> Self {
        let pairing = toml_value.get("pairing");
        let read_secs = |key: &str, fallback: u32| {
            pairing
                .and_then(|p| p.get(key))
                .and_then(|v| v.as_integer())
                .map(|v| v.clamp(0, u32::MAX as i64) as u32)
                .unwrap_or(fallback)
        };

        Self {
            qr_ttl_secs: read_secs(
                "qr_ttl_secs",
                TimerKind::PairingQr.default_ceiling_secs(),
            ),
            password_ttl_secs: read_secs(
                "password_ttl_secs",
                TimerKind::PasswordEntry.default_ceiling_secs(),
            ),
            state_dir: toml_value
                .get("storage")
                .and_then(|s| s.get("state_dir"))
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or(default_state_dir),
        }
    }

    pub fn ceiling_secs(&self, kind: TimerKind) -> u32 {
        match kind {
            TimerKind::PairingQr => self.qr_ttl_secs,
            TimerKind::PasswordEntry => self.password_ttl_secs,
        }
    }
}
