//! In-memory fakes for the ports driven by the use cases.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex, Once};

use async_trait::async_trait;
use tokio::sync::{oneshot, watch, Notify};

use sl_core::config::PairingConfig;
use sl_core::ids::PairingId;
use sl_core::navigation::PairingFlow;
use sl_core::pairing::{BackupData, PairingSession, PairingView, QrPayload};
use sl_core::ports::{
    CountdownPort, EstablisherError, KeygenError, OldIdentityPort, PairingEstablisherPort,
    PairingEventPort, PasswordPromptPort, RecoveryError, WalletStatusPort,
};
use sl_core::recovery::Identity;
use sl_core::security::SecretString;
use sl_core::timer::Countdown;
use sl_core::wallet::WalletStatus;

use crate::usecases::pairing::{PairingContext, PairingControllerDeps, PairingSessionController};
use crate::usecases::recovery::{RecoveryControllerDeps, RecoverySessionController};
use crate::usecases::session::SessionResolver;
use crate::usecases::wallet::ApplyWalletStatus;

static TRACE_INIT: Once = Once::new();

/// Route use-case logs to the test writer; `RUST_LOG` selects the level.
pub fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct MemoryWalletStatus {
    status: StdMutex<WalletStatus>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryWalletStatus {
    pub fn new(status: WalletStatus) -> Self {
        Self {
            status: StdMutex::new(status),
            writes: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> WalletStatus {
        *self.status.lock().unwrap()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletStatusPort for MemoryWalletStatus {
    async fn get_status(&self) -> anyhow::Result<WalletStatus> {
        Ok(self.snapshot())
    }

    async fn set_status(&self, status: WalletStatus) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        *self.status.lock().unwrap() = status;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear_status(&self) -> anyhow::Result<()> {
        *self.status.lock().unwrap() = WalletStatus::Unpaired;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryOldIdentity {
    identity: StdMutex<Option<Identity>>,
}

#[async_trait]
impl OldIdentityPort for MemoryOldIdentity {
    async fn get_old_identity(&self) -> anyhow::Result<Option<Identity>> {
        Ok(self.identity.lock().unwrap().clone())
    }

    async fn set_old_identity(&self, identity: &Identity) -> anyhow::Result<()> {
        *self.identity.lock().unwrap() = Some(identity.clone());
        Ok(())
    }

    async fn clear_old_identity(&self) -> anyhow::Result<()> {
        *self.identity.lock().unwrap() = None;
        Ok(())
    }
}

mockall::mock! {
    pub OldIdentity {}

    #[async_trait]
    impl OldIdentityPort for OldIdentity {
        async fn get_old_identity(&self) -> anyhow::Result<Option<Identity>>;
        async fn set_old_identity(&self, identity: &Identity) -> anyhow::Result<()>;
        async fn clear_old_identity(&self) -> anyhow::Result<()>;
    }
}

pub type Confirmation = Result<PairingSession, EstablisherError>;

/// Scripted establisher. Each `await_session_confirmation` call takes the
/// next queued confirmation and never resolves when the queue is empty.
#[derive(Default)]
pub struct FakeEstablisher {
    issued: AtomicUsize,
    initiate_error: StdMutex<Option<EstablisherError>>,
    confirmations: StdMutex<VecDeque<oneshot::Receiver<Confirmation>>>,
    confirmation_requested: Notify,
    keygen_error: StdMutex<Option<KeygenError>>,
    keygen_gate: StdMutex<Option<oneshot::Receiver<Result<(), KeygenError>>>>,
    keygen_requested: Notify,
    recovery_result: StdMutex<Option<Result<Identity, RecoveryError>>>,
    recovery_gate: StdMutex<Option<oneshot::Receiver<Result<Identity, RecoveryError>>>>,
    recovery_requested: Notify,
    recovery_calls: StdMutex<Vec<(Option<Identity>, String)>>,
    calls: StdMutex<Vec<&'static str>>,
}

impl FakeEstablisher {
    pub fn queue_confirmation(&self) -> oneshot::Sender<Confirmation> {
        let (tx, rx) = oneshot::channel();
        self.confirmations.lock().unwrap().push_back(rx);
        tx
    }

    pub fn confirm_with(&self, session: PairingSession) {
        let _ = self.queue_confirmation().send(Ok(session));
    }

    pub fn fail_initiate(&self, err: EstablisherError) {
        *self.initiate_error.lock().unwrap() = Some(err);
    }

    pub fn fail_keygen(&self, err: KeygenError) {
        *self.keygen_error.lock().unwrap() = Some(err);
    }

    pub fn recover_as(&self, result: Result<Identity, RecoveryError>) {
        *self.recovery_result.lock().unwrap() = Some(result);
    }

    /// The next `run_keygen` call resolves with whatever is sent here.
    pub fn hold_keygen(&self) -> oneshot::Sender<Result<(), KeygenError>> {
        let (tx, rx) = oneshot::channel();
        *self.keygen_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// The next `complete_recovery_session` call resolves with whatever is
    /// sent here.
    pub fn hold_recovery(&self) -> oneshot::Sender<Result<Identity, RecoveryError>> {
        let (tx, rx) = oneshot::channel();
        *self.recovery_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub async fn wait_for_keygen(&self) {
        self.keygen_requested.notified().await;
    }

    pub async fn wait_for_recovery(&self) {
        self.recovery_requested.notified().await;
    }

    /// Resolves once some attempt is blocked on its confirmation.
    pub async fn wait_for_pending_confirmation(&self) {
        self.confirmation_requested.notified().await;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn recovery_calls(&self) -> Vec<(Option<Identity>, String)> {
        self.recovery_calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PairingEstablisherPort for FakeEstablisher {
    async fn initiate_pairing(&self) -> Result<QrPayload, EstablisherError> {
        self.record("initiate_pairing");
        if let Some(err) = self.initiate_error.lock().unwrap().clone() {
            return Err(err);
        }
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(QrPayload::new(format!("qr-{n}")))
    }

    async fn await_session_confirmation(&self) -> Result<PairingSession, EstablisherError> {
        self.record("await_session_confirmation");
        let next = self.confirmations.lock().unwrap().pop_front();
        self.confirmation_requested.notify_one();
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(EstablisherError::Relay("confirmation dropped".into()))),
            None => std::future::pending().await,
        }
    }

    async fn complete_fresh_pairing(&self, _session: &PairingSession) -> Result<(), EstablisherError> {
        self.record("complete_fresh_pairing");
        Ok(())
    }

    async fn run_keygen(&self) -> Result<(), KeygenError> {
        self.record("run_keygen");
        let gate = self.keygen_gate.lock().unwrap().take();
        self.keygen_requested.notify_one();
        if let Some(rx) = gate {
            return rx
                .await
                .unwrap_or_else(|_| Err(KeygenError::Failed("keygen dropped".into())));
        }
        match self.keygen_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn complete_recovery_session(
        &self,
        _session: &PairingSession,
        old_identity: Option<&Identity>,
        password: &SecretString,
    ) -> Result<Identity, RecoveryError> {
        self.record("complete_recovery_session");
        self.recovery_calls
            .lock()
            .unwrap()
            .push((old_identity.cloned(), password.expose().to_string()));
        let gate = self.recovery_gate.lock().unwrap().take();
        self.recovery_requested.notify_one();
        if let Some(rx) = gate {
            return rx
                .await
                .unwrap_or_else(|_| Err(RecoveryError::Rejected("recovery dropped".into())));
        }
        self.recovery_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(RecoveryError::Rejected("no scripted result".into())))
    }
}

/// Countdown driven by the test instead of a clock.
pub struct ManualCountdown {
    state: watch::Sender<Countdown>,
    starts: AtomicUsize,
    last_ceiling: StdMutex<Option<u32>>,
}

impl ManualCountdown {
    pub fn new(ceiling_secs: u32) -> Self {
        let (state, _) = watch::channel(Countdown::new(ceiling_secs));
        Self {
            state,
            starts: AtomicUsize::new(0),
            last_ceiling: StdMutex::new(None),
        }
    }

    /// Tick a running countdown down to zero.
    pub fn expire(&self) {
        self.state.send_modify(|countdown| {
            while countdown.is_running() {
                countdown.tick();
            }
        });
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn last_ceiling(&self) -> Option<u32> {
        *self.last_ceiling.lock().unwrap()
    }
}

#[async_trait]
impl CountdownPort for ManualCountdown {
    async fn start(&self, ceiling_secs: u32) -> anyhow::Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        *self.last_ceiling.lock().unwrap() = Some(ceiling_secs);
        self.state.send_modify(|countdown| countdown.start(ceiling_secs));
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.state.send_modify(|countdown| countdown.stop());
        Ok(())
    }

    fn snapshot(&self) -> Countdown {
        *self.state.borrow()
    }

    async fn expired(&self) {
        let mut rx = self.state.subscribe();
        loop {
            if rx.borrow_and_update().is_expired() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

pub enum PromptScript {
    Submit(&'static str),
    Cancel,
    Hang,
}

#[derive(Default)]
pub struct ScriptedPrompt {
    script: StdMutex<VecDeque<PromptScript>>,
    opened: Notify,
}

impl ScriptedPrompt {
    pub fn push(&self, step: PromptScript) {
        self.script.lock().unwrap().push_back(step);
    }

    pub async fn wait_until_opened(&self) {
        self.opened.notified().await;
    }
}

#[async_trait]
impl PasswordPromptPort for ScriptedPrompt {
    async fn request_password(&self) -> Option<SecretString> {
        let next = self.script.lock().unwrap().pop_front();
        self.opened.notify_one();
        match next {
            Some(PromptScript::Submit(password)) => Some(SecretString::from(password)),
            Some(PromptScript::Cancel) => None,
            Some(PromptScript::Hang) | None => std::future::pending().await,
        }
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    views: StdMutex<Vec<PairingView>>,
}

impl RecordingEvents {
    pub fn views(&self) -> Vec<PairingView> {
        self.views.lock().unwrap().clone()
    }
}

#[async_trait]
impl PairingEventPort for RecordingEvents {
    async fn emit_pairing_changed(&self, view: PairingView) {
        self.views.lock().unwrap().push(view);
    }
}

/// All fakes wired around one shared pairing context.
pub struct Harness {
    pub flow: PairingFlow,
    pub config: PairingConfig,
    pub context: Arc<PairingContext>,
    pub establisher: Arc<FakeEstablisher>,
    pub status: Arc<MemoryWalletStatus>,
    pub old_identity: Arc<MemoryOldIdentity>,
    pub apply_status: Arc<ApplyWalletStatus>,
    pub qr_timer: Arc<ManualCountdown>,
    pub password_timer: Arc<ManualCountdown>,
    pub prompt: Arc<ScriptedPrompt>,
    pub events: Arc<RecordingEvents>,
}

impl Harness {
    pub fn new(flow: PairingFlow, status: WalletStatus) -> Self {
        init_tracing();
        let config = PairingConfig::with_state_dir(PathBuf::new());
        let status = Arc::new(MemoryWalletStatus::new(status));
        Self {
            flow,
            context: PairingContext::new().arc(),
            establisher: Arc::new(FakeEstablisher::default()),
            apply_status: Arc::new(ApplyWalletStatus::new(status.clone())),
            status,
            old_identity: Arc::new(MemoryOldIdentity::default()),
            qr_timer: Arc::new(ManualCountdown::new(config.qr_ttl_secs)),
            password_timer: Arc::new(ManualCountdown::new(config.password_ttl_secs)),
            prompt: Arc::new(ScriptedPrompt::default()),
            events: Arc::new(RecordingEvents::default()),
            config,
        }
    }

    pub fn with_old_identity(self, address: &str) -> Self {
        *self.old_identity.identity.lock().unwrap() = Some(Identity::from(address));
        self
    }

    pub fn fresh_session() -> PairingSession {
        PairingSession::new(PairingId::random(), QrPayload::new("qr-1"), None)
    }

    pub fn backup_session() -> PairingSession {
        PairingSession::new(
            PairingId::random(),
            QrPayload::new("qr-1"),
            Some(BackupData::new("encrypted-backup")),
        )
    }

    pub fn pairing(&self) -> PairingSessionController {
        PairingSessionController::from_deps(
            self.flow,
            self.config.clone(),
            self.context.clone(),
            PairingControllerDeps {
                establisher: self.establisher.clone(),
                apply_status: self.apply_status.clone(),
                qr_timer: self.qr_timer.clone(),
                password_timer: self.password_timer.clone(),
                events: self.events.clone(),
            },
        )
    }

    pub fn recovery_deps(&self) -> RecoveryControllerDeps {
        RecoveryControllerDeps {
            establisher: self.establisher.clone(),
            apply_status: self.apply_status.clone(),
            old_identity: self.old_identity.clone(),
            prompt: self.prompt.clone(),
            password_timer: self.password_timer.clone(),
        }
    }

    pub fn recovery(&self) -> RecoverySessionController {
        RecoverySessionController::from_deps(self.flow, self.context.clone(), self.recovery_deps())
    }

    pub fn resolver(&self) -> SessionResolver {
        SessionResolver::new(Arc::new(self.pairing()), Arc::new(self.recovery()))
    }
}
