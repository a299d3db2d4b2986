//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create the file-backed stores and countdowns / 创建文件存储与倒计时
//! - ✅ Inject them, with the embedder's ports, into the use cases / 注入用例
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide where a status sends the user
//! - 不判断状态对应的跳转
//!
//! > **This is the only place allowed to depend on sl-infra and sl-app simultaneously.**
//! > **这是唯一允许同时依赖 sl-infra 和 sl-app 的地方。**

use std::path::PathBuf;
use std::sync::Arc;

use sl_app::{
    ApplyWalletStatus, EntryRoute, LeavePairing, PairingContext, PairingControllerDeps,
    PairingSessionController, RecoveryControllerDeps, RecoverySessionController, ResetPairing,
    ResolveEntryRoute, SessionResolver,
};
use sl_core::ports::{
    CountdownPort, OldIdentityPort, PairingEstablisherPort, PairingEventPort, PasswordPromptPort,
    WalletStatusPort,
};
use sl_core::{PairingConfig, PairingFlow, TimerKind, WalletStatusError};
use sl_infra::{FileOldIdentityStore, FileWalletStatusRepository, TickingCountdown};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("State directory initialization failed: {path}: {source}")]
    StateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ports the embedding application implements.
/// 由宿主应用实现的端口。
pub struct ExternalPorts {
    pub establisher: Arc<dyn PairingEstablisherPort>,
    pub prompt: Arc<dyn PasswordPromptPort>,
    pub events: Arc<dyn PairingEventPort>,
}

/// Everything one pairing page needs, for one flow.
pub struct PairingPage {
    pub flow: PairingFlow,
    pub resolver: Arc<SessionResolver>,
    pub leave: Arc<LeavePairing>,
    pub entry_route: Arc<ResolveEntryRoute>,
    pub reset: Arc<ResetPairing>,
    pub apply_status: Arc<ApplyWalletStatus>,
}

impl PairingPage {
    /// Entry guard for this page's flow.
    pub async fn enter(&self) -> Result<EntryRoute, WalletStatusError> {
        self.entry_route.execute(self.flow).await
    }
}

/// Assemble a pairing page.
/// 组装配对页面。
///
/// # Errors / 错误
///
/// Returns `WiringError::StateDir` if the state directory cannot be created.
pub fn wire_pairing_page(
    flow: PairingFlow,
    config: &PairingConfig,
    external: ExternalPorts,
) -> WiringResult<PairingPage> {
    // Step 1: state directory / 步骤 1：状态目录
    std::fs::create_dir_all(&config.state_dir).map_err(|source| WiringError::StateDir {
        path: config.state_dir.clone(),
        source,
    })?;

    // Step 2: infra adapters / 步骤 2：基础设施适配器
    let wallet_status: Arc<dyn WalletStatusPort> = Arc::new(
        FileWalletStatusRepository::with_defaults(config.state_dir.clone()),
    );
    let old_identity: Arc<dyn OldIdentityPort> =
        Arc::new(FileOldIdentityStore::with_defaults(config.state_dir.clone()));
    let qr_timer: Arc<dyn CountdownPort> =
        Arc::new(TickingCountdown::from_config(TimerKind::PairingQr, config));
    let password_timer: Arc<dyn CountdownPort> =
        Arc::new(TickingCountdown::from_config(TimerKind::PasswordEntry, config));

    // Step 3: use cases / 步骤 3：用例
    let apply_status = Arc::new(ApplyWalletStatus::new(wallet_status.clone()));
    let context = PairingContext::new().arc();

    let pairing = PairingSessionController::from_deps(
        flow,
        config.clone(),
        context.clone(),
        PairingControllerDeps {
            establisher: external.establisher.clone(),
            apply_status: apply_status.clone(),
            qr_timer,
            password_timer: password_timer.clone(),
            events: external.events,
        },
    );
    let recovery = RecoverySessionController::from_deps(
        flow,
        context.clone(),
        RecoveryControllerDeps {
            establisher: external.establisher,
            apply_status: apply_status.clone(),
            old_identity: old_identity.clone(),
            prompt: external.prompt,
            password_timer,
        },
    );

    Ok(PairingPage {
        flow,
        resolver: Arc::new(SessionResolver::new(Arc::new(pairing), Arc::new(recovery))),
        leave: Arc::new(LeavePairing::new(flow, context, old_identity.clone())),
        entry_route: Arc::new(ResolveEntryRoute::new(apply_status.clone())),
        reset: Arc::new(ResetPairing::new(wallet_status, old_identity)),
        apply_status,
    })
}
