// ============================================================================
// RefreshController : rafraîchissement périodique et journal d'activité
// ============================================================================
// Possède l'heure du dernier rafraîchissement et l'historique borné des logs.
// Deux déclencheurs indépendants modifient cet état :
// - un timer périodique (toutes les 60s par défaut)
// - une action manuelle (touche 'r' dans le dashboard)
//
// CONCEPTS RUST :
// 1. Arc<Mutex<T>> : état partagé entre le contrôleur et la tâche du timer
// 2. tokio::spawn + interval_at : timer asynchrone annulable
// 3. Trait objects (Arc<dyn Fn>) : callbacks fournis par l'appelant
// 4. Drop : le timer est annulé quand le contrôleur est détruit
//
// MODÈLE DE CONCURRENCE :
// - Chaque déclencheur applique son lot d'entrées sous un seul verrou
//   → les lots (3 entrées périodiques, 2 manuelles) ne s'entrelacent jamais
// - L'ordre relatif entre un tick et un refresh manuel dépend de l'horloge
// - Chaque timer a une "gate" : un tick la garde verrouillée du début à la fin,
//   stop() la ferme sous le même verrou → aucun tick ne tombe après stop()
// ============================================================================

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::RefreshConfig;
use crate::error::{RefreshError, Result};
use crate::models::{LogEntry, LogHistory, LogKind, TIMESTAMP_FORMAT};

// ============================================================================
// Messages du journal
// ============================================================================

const SEED_INITIALIZING: (&str, LogKind, &str) =
    ("10:30:01", LogKind::Info, "Initializing dashboard...");
const SEED_CONNECTED: (&str, LogKind, &str) =
    ("10:30:02", LogKind::Success, "Connected to market data feed");

const MSG_PRICE_UPDATED: &str = "Price data updated";
const MSG_SENTIMENT_COMPLETE: &str = "Sentiment analysis complete";
const MSG_MANUAL_TRIGGERED: &str = "Manual refresh triggered";
const MSG_MANUAL_DONE: &str = "Data refreshed successfully";

/// Lot d'entrées d'un tick périodique (le ticker est lu au moment du tick)
fn periodic_batch(subject: &str) -> [(LogKind, String); 3] {
    [
        (LogKind::Info, format!("Fetching latest data for {}...", subject)),
        (LogKind::Success, MSG_PRICE_UPDATED.to_string()),
        (LogKind::Success, MSG_SENTIMENT_COMPLETE.to_string()),
    ]
}

/// Lot d'entrées d'un rafraîchissement manuel
fn manual_batch() -> [(LogKind, String); 2] {
    [
        (LogKind::Info, MSG_MANUAL_TRIGGERED.to_string()),
        (LogKind::Success, MSG_MANUAL_DONE.to_string()),
    ]
}

// ============================================================================
// Types publics
// ============================================================================

/// Retourne le ticker courant (lu à chaque tick, jamais mis en cache)
pub type SubjectProvider = Arc<dyn Fn() -> String + Send + Sync>;

/// Observateur appelé après chaque tick périodique avec l'état mis à jour
///
/// Ne doit pas appeler stop()/shutdown() sur le même contrôleur.
pub type TickObserver = Arc<dyn Fn(&RefreshSnapshot) + Send + Sync>;

/// Source de l'heure courante (injectable pour les tests)
pub type Clock = fn() -> DateTime<Local>;

/// État du cycle de vie du timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// Aucun timer actif
    Idle,
    /// Timer périodique actif
    Running,
}

/// Identifiant du timer retourné par start(), à passer à stop()
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshHandle {
    id: u64,
}

impl RefreshHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Copie immuable de l'état, destinée au rendu
///
/// CONCEPT RUST : Ownership
/// - Le snapshot possède ses données (Vec cloné)
/// - Le modifier n'a aucun effet sur le contrôleur
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshSnapshot {
    /// Heure du dernier rafraîchissement (manuel ou automatique)
    pub last_update: DateTime<Local>,

    /// Entrées du journal, de la plus ancienne à la plus récente
    pub history: Vec<LogEntry>,

    /// Dernier ticker lu par le timer (None avant le premier tick)
    pub subject: Option<String>,
}

impl RefreshSnapshot {
    /// "Last updated" formaté HH:MM:SS
    pub fn last_update_display(&self) -> String {
        self.last_update.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Callbacks fournis à start()
///
/// CONCEPT : Builder pattern
/// - RefreshHooks::new().subject(...).on_tick(...)
/// - Le fournisseur de ticker est obligatoire, vérifié par start()
#[derive(Clone, Default)]
pub struct RefreshHooks {
    subject: Option<SubjectProvider>,
    on_tick: Option<TickObserver>,
}

impl RefreshHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Définit le fournisseur de ticker à partir d'une closure
    pub fn subject<F>(self, provider: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.subject_provider(Arc::new(provider))
    }

    /// Définit un fournisseur de ticker déjà partagé
    pub fn subject_provider(mut self, provider: SubjectProvider) -> Self {
        self.subject = Some(provider);
        self
    }

    /// Définit l'observateur appelé après chaque tick
    pub fn on_tick<F>(mut self, observer: F) -> Self
    where
        F: Fn(&RefreshSnapshot) + Send + Sync + 'static,
    {
        self.on_tick = Some(Arc::new(observer));
        self
    }
}

impl fmt::Debug for RefreshHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshHooks")
            .field("subject", &self.subject.is_some())
            .field("on_tick", &self.on_tick.is_some())
            .finish()
    }
}

// ============================================================================
// État interne
// ============================================================================

#[derive(Debug)]
struct RefreshState {
    last_update: DateTime<Local>,
    history: LogHistory,
    subject: Option<String>,
}

impl RefreshState {
    /// État initial avec les deux entrées de démarrage
    fn seeded(now: DateTime<Local>, capacity: usize) -> Self {
        let mut history = LogHistory::with_capacity(capacity);
        history.extend(
            [SEED_INITIALIZING, SEED_CONNECTED]
                .into_iter()
                .map(|(timestamp, kind, message)| LogEntry::new(timestamp, kind, message)),
        );

        Self {
            last_update: now,
            history,
            subject: None,
        }
    }

    /// Ajoute un lot horodaté à `now` et met à jour last_update
    fn record<I>(&mut self, now: DateTime<Local>, batch: I)
    where
        I: IntoIterator<Item = (LogKind, String)>,
    {
        let entries = batch
            .into_iter()
            .map(|(kind, message)| LogEntry::at(&now, kind, message));
        self.history.extend(entries);
        self.last_update = now;
    }

    fn snapshot(&self) -> RefreshSnapshot {
        RefreshSnapshot {
            last_update: self.last_update,
            history: self.history.to_vec(),
            subject: self.subject.clone(),
        }
    }
}

/// Récupère le verrou même si un autre thread a paniqué en le tenant
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Tâche du timer
// ============================================================================

/// Timer en cours d'exécution
struct ActiveTimer {
    handle: RefreshHandle,
    /// true tant que le timer peut encore livrer des ticks
    gate: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

impl ActiveTimer {
    /// Ferme la gate puis annule la tâche
    ///
    /// lock(gate) attend la fin d'un tick en cours : au retour,
    /// plus aucun tick ne peut modifier l'état.
    fn cancel(self) {
        *lock(&self.gate) = false;
        self.task.abort();
    }
}

/// Tout ce dont la tâche du timer a besoin (déplacé dans la tâche)
struct TimerContext {
    state: Arc<Mutex<RefreshState>>,
    gate: Arc<Mutex<bool>>,
    subject: SubjectProvider,
    on_tick: Option<TickObserver>,
    clock: Clock,
    timer_id: u64,
}

impl TimerContext {
    /// Applique un tick ; retourne false si le timer a été arrêté
    fn fire(&self) -> bool {
        let live = lock(&self.gate);
        if !*live {
            return false;
        }

        let subject = (self.subject)();
        let now = (self.clock)();

        let snapshot = {
            let mut state = lock(&self.state);
            state.record(now, periodic_batch(&subject));
            state.subject = Some(subject.clone());
            state.snapshot()
        };

        info!(
            timer = self.timer_id,
            ticker = %subject,
            entries = snapshot.history.len(),
            "Periodic refresh applied"
        );

        if let Some(observer) = &self.on_tick {
            observer(&snapshot);
        }

        // `live` est relâché ici, après l'observateur
        true
    }
}

/// Boucle du timer : premier tick une période après le démarrage
async fn run_timer(context: TimerContext, first_tick: Instant, period: Duration) {
    let mut ticker = time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !context.fire() {
            debug!(timer = context.timer_id, "Refresh timer gate closed, exiting");
            break;
        }
    }
}

// ============================================================================
// RefreshController
// ============================================================================

/// Contrôleur de rafraîchissement du dashboard
///
/// Cycle de vie : `Idle → Running` avec start(), `Running → Idle` avec stop().
/// manual_refresh() est utilisable dans les deux états.
pub struct RefreshController {
    config: RefreshConfig,
    state: Arc<Mutex<RefreshState>>,
    clock: Clock,
    timer: Option<ActiveTimer>,
    next_timer_id: u64,
}

impl RefreshController {
    /// Crée un contrôleur avec la configuration par défaut (60s, 10 entrées)
    pub fn new() -> Self {
        Self::build(RefreshConfig::default(), Local::now)
    }

    /// Crée un contrôleur avec une configuration validée
    pub fn with_config(config: RefreshConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, Local::now))
    }

    /// Remplace la source de l'heure courante (réinitialise l'état)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.shutdown();
        self.clock = clock;
        self.state = Arc::new(Mutex::new(RefreshState::seeded(
            clock(),
            self.config.history_capacity,
        )));
        self
    }

    fn build(config: RefreshConfig, clock: Clock) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(RefreshState::seeded(clock(), config.history_capacity))),
            clock,
            timer: None,
            next_timer_id: 0,
        }
    }

    pub fn status(&self) -> RefreshStatus {
        if self.timer.is_some() {
            RefreshStatus::Running
        } else {
            RefreshStatus::Idle
        }
    }

    /// Démarre le timer périodique
    ///
    /// # Erreurs
    /// - `InvalidConfiguration` si aucun fournisseur de ticker n'est fourni
    /// - `AlreadyStarted` si un timer tourne déjà (il n'est pas remplacé)
    /// - `RuntimeUnavailable` si appelé hors d'un runtime tokio
    pub fn start(&mut self, hooks: RefreshHooks) -> Result<RefreshHandle> {
        if let Some(active) = &self.timer {
            warn!(timer = active.handle.id, "Refresh timer already running, start rejected");
            return Err(RefreshError::AlreadyStarted);
        }

        let subject = hooks.subject.ok_or_else(|| {
            RefreshError::InvalidConfiguration(
                "a subject provider is required to start the refresh timer".to_string(),
            )
        })?;

        let runtime = Handle::try_current().map_err(|_| RefreshError::RuntimeUnavailable)?;

        self.next_timer_id += 1;
        let handle = RefreshHandle {
            id: self.next_timer_id,
        };
        let gate = Arc::new(Mutex::new(true));

        let context = TimerContext {
            state: Arc::clone(&self.state),
            gate: Arc::clone(&gate),
            subject,
            on_tick: hooks.on_tick,
            clock: self.clock,
            timer_id: handle.id,
        };

        // Calculé ici (et non dans la tâche) pour que la période parte de start()
        let period = self.config.interval;
        let first_tick = Instant::now() + period;
        let task = runtime.spawn(run_timer(context, first_tick, period));

        self.timer = Some(ActiveTimer { handle, gate, task });

        info!(
            timer = handle.id,
            interval_secs = period.as_secs(),
            "Refresh timer started"
        );
        Ok(handle)
    }

    /// Arrête le timer identifié par `handle`
    ///
    /// Idempotent : un handle déjà arrêté, périmé ou un contrôleur jamais
    /// démarré ne provoque rien.
    pub fn stop(&mut self, handle: RefreshHandle) {
        let matches = self
            .timer
            .as_ref()
            .is_some_and(|active| active.handle == handle);

        if !matches {
            debug!(timer = handle.id, "Stop ignored, timer not running");
            return;
        }

        if let Some(active) = self.timer.take() {
            active.cancel();
            info!(timer = handle.id, "Refresh timer stopped");
        }
    }

    /// Arrête le timer actif, quel qu'il soit
    pub fn shutdown(&mut self) {
        if let Some(active) = self.timer.take() {
            let id = active.handle.id;
            active.cancel();
            info!(timer = id, "Refresh timer shut down");
        }
    }

    /// Rafraîchissement manuel : ajoute 2 entrées et met à jour last_update
    pub fn manual_refresh(&self) {
        let now = (self.clock)();
        let entries = {
            let mut state = lock(&self.state);
            state.record(now, manual_batch());
            state.history.len()
        };
        info!(entries, "Manual refresh applied");
    }

    /// Copie de l'état courant pour le rendu
    pub fn current_state(&self) -> RefreshSnapshot {
        lock(&self.state).snapshot()
    }
}

impl Default for RefreshController {
    fn default() -> Self {
        Self::new()
    }
}

// CONCEPT RUST : RAII
// - Le timer vit tant que le contrôleur vit
// - Détruire le contrôleur annule la tâche tokio
impl Drop for RefreshController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for RefreshController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshController")
            .field("config", &self.config)
            .field("status", &self.status())
            .finish()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
// CONCEPT : Horloge tokio en pause (start_paused)
// - sleep() avance l'horloge virtuelle instantanément
// - Le timer de 60s se déclenche sans attendre réellement
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const INTERVAL: Duration = Duration::from_secs(60);

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).single().unwrap()
    }

    fn messages(snapshot: &RefreshSnapshot) -> Vec<&str> {
        snapshot.history.iter().map(|e| e.message.as_str()).collect()
    }

    fn fixed_subject(ticker: &'static str) -> RefreshHooks {
        RefreshHooks::new().subject(move || ticker.to_string())
    }

    /// Attend un peu plus d'une période pour laisser tomber exactement un tick
    async fn wait_one_tick() {
        time::sleep(INTERVAL + Duration::from_secs(1)).await;
    }

    #[test]
    fn test_seed_state() {
        let controller = RefreshController::new();
        let state = controller.current_state();

        assert_eq!(controller.status(), RefreshStatus::Idle);
        assert_eq!(
            state.history,
            vec![
                LogEntry::info("10:30:01", "Initializing dashboard..."),
                LogEntry::success("10:30:02", "Connected to market data feed"),
            ]
        );
        assert_eq!(state.subject, None);
    }

    #[test]
    fn test_single_manual_refresh() {
        let controller = RefreshController::new().with_clock(noon);
        controller.manual_refresh();

        let state = controller.current_state();
        assert_eq!(state.history.len(), 4);
        assert_eq!(
            state.history[2..],
            [
                LogEntry::info("12:00:00", "Manual refresh triggered"),
                LogEntry::success("12:00:00", "Data refreshed successfully"),
            ]
        );
        assert_eq!(state.last_update, noon());
        assert_eq!(state.last_update_display(), "12:00:00");
    }

    #[test]
    fn test_manual_refresh_respects_bound() {
        let controller = RefreshController::new();
        for _ in 0..20 {
            controller.manual_refresh();
            assert!(controller.current_state().history.len() <= 10);
        }

        // Fenêtre glissante : uniquement des paires manuelles complètes
        let state = controller.current_state();
        assert_eq!(state.history.len(), 10);
        assert_eq!(state.history[0].message, "Manual refresh triggered");
        assert_eq!(state.history[9].message, "Data refreshed successfully");
    }

    #[test]
    fn test_snapshot_does_not_alias_state() {
        let controller = RefreshController::new();
        let mut snapshot = controller.current_state();
        snapshot.history.clear();
        snapshot.history.push(LogEntry::new("00:00:00", LogKind::Error, "tampered"));

        let fresh = controller.current_state();
        assert_eq!(fresh.history.len(), 2);
        assert_eq!(fresh.history[0].message, "Initializing dashboard...");
    }

    #[test]
    fn test_start_outside_runtime_fails() {
        let mut controller = RefreshController::new();
        let result = controller.start(fixed_subject("RELIANCE"));
        assert_eq!(result, Err(RefreshError::RuntimeUnavailable));
        assert_eq!(controller.status(), RefreshStatus::Idle);
    }

    #[test]
    fn test_stop_never_started_is_noop() {
        let mut controller = RefreshController::new();
        let before = controller.current_state();

        controller.stop(RefreshHandle { id: 7 });
        controller.stop(RefreshHandle { id: 7 });
        controller.shutdown();

        assert_eq!(controller.status(), RefreshStatus::Idle);
        assert_eq!(controller.current_state(), before);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RefreshConfig {
            interval: Duration::ZERO,
            history_capacity: 10,
        };
        assert!(matches!(
            RefreshController::with_config(config),
            Err(RefreshError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_without_subject_fails_fast() {
        let mut controller = RefreshController::new();
        let result = controller.start(RefreshHooks::new().on_tick(|_| {}));

        assert!(matches!(result, Err(RefreshError::InvalidConfiguration(_))));
        assert_eq!(controller.status(), RefreshStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_is_rejected() {
        let mut controller = RefreshController::new();
        let handle = controller.start(fixed_subject("RELIANCE")).unwrap();

        let second = controller.start(fixed_subject("TCS"));
        assert_eq!(second, Err(RefreshError::AlreadyStarted));
        assert_eq!(controller.status(), RefreshStatus::Running);

        // Le premier timer continue avec son propre ticker
        wait_one_tick().await;
        let state = controller.current_state();
        assert_eq!(state.history[2].message, "Fetching latest data for RELIANCE...");

        controller.stop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_before_first_interval() {
        let mut controller = RefreshController::new();
        let handle = controller.start(fixed_subject("RELIANCE")).unwrap();

        time::sleep(INTERVAL - Duration::from_secs(1)).await;
        assert_eq!(controller.current_state().history.len(), 2);

        controller.stop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_tick_appends_three_entries() {
        let mut controller = RefreshController::new().with_clock(noon);
        let handle = controller.start(fixed_subject("RELIANCE")).unwrap();

        wait_one_tick().await;

        let state = controller.current_state();
        assert_eq!(
            messages(&state)[2..],
            [
                "Fetching latest data for RELIANCE...",
                "Price data updated",
                "Sentiment analysis complete",
            ]
        );
        let kinds: Vec<LogKind> = state.history[2..].iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![LogKind::Info, LogKind::Success, LogKind::Success]);

        // Même horodatage pour tout le lot, égal à last_update
        assert!(state.history[2..].iter().all(|e| e.timestamp == "12:00:00"));
        assert_eq!(state.last_update, noon());
        assert_eq!(state.subject.as_deref(), Some("RELIANCE"));

        controller.stop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overflow_keeps_newest_ten() {
        let mut controller = RefreshController::new();
        for _ in 0..4 {
            controller.manual_refresh();
        }
        let before = controller.current_state();
        assert_eq!(before.history.len(), 10);

        let handle = controller.start(fixed_subject("INFY")).unwrap();
        wait_one_tick().await;

        let after = controller.current_state();
        assert_eq!(after.history.len(), 10);
        assert_eq!(after.history[..7], before.history[3..]);
        assert_eq!(
            messages(&after)[7..],
            [
                "Fetching latest data for INFY...",
                "Price data updated",
                "Sentiment analysis complete",
            ]
        );

        controller.stop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subject_is_read_fresh_on_each_tick() {
        let current = Arc::new(Mutex::new("RELIANCE".to_string()));
        let reader = Arc::clone(&current);

        let mut controller = RefreshController::new();
        let handle = controller
            .start(RefreshHooks::new().subject(move || reader.lock().unwrap().clone()))
            .unwrap();

        wait_one_tick().await;
        *current.lock().unwrap() = "WIPRO".to_string();
        time::sleep(INTERVAL).await;

        let state = controller.current_state();
        let fetches: Vec<&str> = messages(&state)
            .into_iter()
            .filter(|m| m.starts_with("Fetching"))
            .collect();
        assert_eq!(
            fetches,
            vec![
                "Fetching latest data for RELIANCE...",
                "Fetching latest data for WIPRO...",
            ]
        );
        assert_eq!(state.subject.as_deref(), Some("WIPRO"));

        controller.stop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_then_no_more_ticks() {
        let mut controller = RefreshController::new();
        let handle = controller.start(fixed_subject("TCS")).unwrap();

        wait_one_tick().await;
        assert_eq!(controller.current_state().history.len(), 5);

        controller.stop(handle);
        assert_eq!(controller.status(), RefreshStatus::Idle);
        let stopped = controller.current_state();

        time::sleep(INTERVAL * 2).await;
        assert_eq!(controller.current_state(), stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_twice_matches_stop_once() {
        let mut controller = RefreshController::new();
        let handle = controller.start(fixed_subject("HDFC")).unwrap();
        wait_one_tick().await;

        controller.stop(handle);
        let once = controller.current_state();
        controller.stop(handle);

        assert_eq!(controller.current_state(), once);
        assert_eq!(controller.status(), RefreshStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_handle_does_not_stop_new_timer() {
        let mut controller = RefreshController::new();
        let first = controller.start(fixed_subject("AAPL")).unwrap();
        controller.stop(first);

        let second = controller.start(fixed_subject("MSFT")).unwrap();
        assert_ne!(first, second);

        controller.stop(first);
        assert_eq!(controller.status(), RefreshStatus::Running);

        wait_one_tick().await;
        let state = controller.current_state();
        assert_eq!(state.subject.as_deref(), Some("MSFT"));

        controller.stop(second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_tick_receives_updated_snapshot() {
        let seen: Arc<Mutex<Vec<RefreshSnapshot>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut controller = RefreshController::new();
        let hooks = fixed_subject("GOOGL").on_tick(move |snapshot| {
            sink.lock().unwrap().push(snapshot.clone());
        });
        let handle = controller.start(hooks).unwrap();

        wait_one_tick().await;
        time::sleep(INTERVAL).await;
        controller.stop(handle);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].history.len(), 5);
        assert_eq!(seen[1].history.len(), 8);
        assert_eq!(seen[1], controller.current_state());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_and_periodic_batches_interleave_in_order() {
        let mut controller = RefreshController::new();
        let handle = controller.start(fixed_subject("AMZN")).unwrap();

        controller.manual_refresh();
        wait_one_tick().await;
        controller.manual_refresh();

        let state = controller.current_state();
        assert_eq!(
            messages(&state),
            vec![
                "Initializing dashboard...",
                "Connected to market data feed",
                "Manual refresh triggered",
                "Data refreshed successfully",
                "Fetching latest data for AMZN...",
                "Price data updated",
                "Sentiment analysis complete",
                "Manual refresh triggered",
                "Data refreshed successfully",
            ]
        );

        controller.stop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bound_holds_across_mixed_triggers() {
        let mut controller = RefreshController::new();
        let handle = controller.start(fixed_subject("TSLA")).unwrap();

        for round in 0..6 {
            if round % 2 == 0 {
                controller.manual_refresh();
            }
            wait_one_tick().await;
            assert!(controller.current_state().history.len() <= 10);
        }

        controller.stop(handle);
        assert_eq!(controller.current_state().history.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let observed = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&observed);

        let mut controller = RefreshController::new();
        controller
            .start(fixed_subject("RELIANCE").on_tick(move |_| *counter.lock().unwrap() += 1))
            .unwrap();

        wait_one_tick().await;
        drop(controller);
        time::sleep(INTERVAL * 3).await;

        assert_eq!(*observed.lock().unwrap(), 1);
    }
}
