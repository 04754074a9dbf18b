// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global du dashboard TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Arc<RwLock<String>> : le ticker est partagé avec le timer de rafraîchissement
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use crate::config::{DEFAULT_MARKET, DEFAULT_TICKER, NOTICE_DURATION};
use crate::error::Result;
use crate::models::{Market, MarketSnapshot, PredictionPeriod, TimeRange};
use crate::refresh::{RefreshController, RefreshHandle, RefreshHooks, RefreshSnapshot, SubjectProvider};

// ============================================================================
// Enums : View et InputMode
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Une seule vue active à la fois
// - Le mode de saisie est orthogonal à la vue (la vue reste affichée derrière)
// ============================================================================

/// Vues du dashboard (Tab pour passer à la suivante)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Métriques, cotation, sentiment, titres, journal d'activité
    Overview,
    /// Courbe de prix, distribution du sentiment, chandeliers, volumes
    Charts,
    /// Tableau des prix historiques
    History,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Charts => "Charts",
            View::History => "History",
        }
    }

    pub fn all() -> [View; 3] {
        [View::Overview, View::Charts, View::History]
    }

    pub fn next(&self) -> View {
        match self {
            View::Overview => View::Charts,
            View::Charts => View::History,
            View::History => View::Overview,
        }
    }
}

/// Mode de saisie clavier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Raccourcis actifs
    Normal,
    /// Saisie d'un ticker libre (Enter valide, ESC annule)
    Search,
}

/// Notification temporaire (ex: avertissement de prédiction)
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// ============================================================================
// SharedTicker : ticker lisible depuis le timer
// ============================================================================
// CONCEPT : Accesseur explicite
// - Le timer ne capture pas la valeur du ticker au démarrage
// - Il appelle le provider à chaque tick → toujours la valeur courante
// ============================================================================

/// Ticker courant partagé entre l'UI et le timer de rafraîchissement
#[derive(Debug, Clone)]
pub struct SharedTicker(Arc<RwLock<String>>);

impl SharedTicker {
    pub fn new(ticker: &str) -> Self {
        Self(Arc::new(RwLock::new(ticker.to_string())))
    }

    pub fn get(&self) -> String {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, ticker: &str) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = ticker.to_string();
    }

    /// Provider à passer au contrôleur de rafraîchissement
    pub fn provider(&self) -> SubjectProvider {
        let cell = Arc::clone(&self.0);
        Arc::new(move || cell.read().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Première pression de 'q' reçue, en attente de confirmation
    pub confirm_quit: bool,

    /// Marché sélectionné
    pub market: Market,

    /// Ticker sélectionné (partagé avec le timer)
    ticker: SharedTicker,

    /// Vue affichée
    pub current_view: View,

    /// Mode de saisie
    pub input_mode: InputMode,

    /// Buffer de saisie pour la recherche de ticker
    pub input_buffer: String,

    /// Plage de temps des graphiques
    pub time_range: TimeRange,

    /// Notification en cours d'affichage
    pub notice: Option<Notice>,

    /// Données affichées pour le ticker courant
    pub snapshot: MarketSnapshot,

    /// Contrôleur de rafraîchissement et journal d'activité
    pub refresh: RefreshController,

    /// Handle du timer démarré par start_auto_refresh()
    refresh_handle: Option<RefreshHandle>,
}

impl App {
    /// Crée l'état initial : marché indien, RELIANCE, vue Overview
    pub fn new() -> Self {
        Self::with_controller(RefreshController::new())
    }

    /// Crée l'état avec un contrôleur déjà configuré
    pub fn with_controller(refresh: RefreshController) -> Self {
        Self {
            running: true,
            confirm_quit: false,
            market: DEFAULT_MARKET,
            ticker: SharedTicker::new(DEFAULT_TICKER),
            current_view: View::Overview,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            time_range: TimeRange::default(),
            notice: None,
            snapshot: MarketSnapshot::mock(DEFAULT_TICKER),
            refresh,
            refresh_handle: None,
        }
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Appelé à chaque itération de la boucle : expire la notification
    pub fn tick(&mut self) {
        self.expire_notice(Instant::now());
    }

    fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    // ========================================================================
    // Rafraîchissement
    // ========================================================================

    /// Démarre le timer automatique en lisant le ticker courant à chaque tick
    ///
    /// `on_tick` reçoit l'état mis à jour (ex: pour logger)
    pub fn start_auto_refresh<F>(&mut self, on_tick: F) -> Result<RefreshHandle>
    where
        F: Fn(&RefreshSnapshot) + Send + Sync + 'static,
    {
        let hooks = RefreshHooks::new()
            .subject_provider(self.ticker.provider())
            .on_tick(on_tick);
        let handle = self.refresh.start(hooks)?;
        self.refresh_handle = Some(handle);
        Ok(handle)
    }

    /// Arrête le timer automatique (sans effet s'il ne tourne pas)
    pub fn stop_auto_refresh(&mut self) {
        if let Some(handle) = self.refresh_handle.take() {
            self.refresh.stop(handle);
        }
    }

    /// Bouton "Refresh"
    pub fn manual_refresh(&mut self) {
        self.refresh.manual_refresh();
    }

    pub fn refresh_state(&self) -> RefreshSnapshot {
        self.refresh.current_state()
    }

    // ========================================================================
    // Sélection du marché et du ticker
    // ========================================================================

    pub fn ticker(&self) -> String {
        self.ticker.get()
    }

    /// Change le ticker et recharge le snapshot
    pub fn set_ticker(&mut self, ticker: &str) {
        self.ticker.set(ticker);
        self.snapshot = MarketSnapshot::mock(ticker);
    }

    /// Bascule de marché et sélectionne son premier ticker
    pub fn toggle_market(&mut self) {
        self.market = self.market.toggle();
        let ticker = self.market.default_ticker();
        self.set_ticker(ticker);
    }

    pub fn next_ticker(&mut self) {
        let ticker = self.market.next_ticker(&self.ticker());
        self.set_ticker(ticker);
    }

    pub fn previous_ticker(&mut self) {
        let ticker = self.market.previous_ticker(&self.ticker());
        self.set_ticker(ticker);
    }

    // ========================================================================
    // Vues et plage de temps
    // ========================================================================

    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    pub fn next_time_range(&mut self) {
        self.time_range = self.time_range.next();
    }

    pub fn previous_time_range(&mut self) {
        self.time_range = self.time_range.previous();
    }

    /// Affiche l'avertissement de prédiction pendant NOTICE_DURATION
    pub fn predict(&mut self, period: PredictionPeriod) {
        self.notice = Some(Notice {
            title: "⚠️ Prediction Disclaimer".to_string(),
            message: period.disclaimer(),
            expires_at: Instant::now() + NOTICE_DURATION,
        });
    }

    // ========================================================================
    // Recherche de ticker
    // ========================================================================

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.input_buffer.clear();
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// Valide la saisie : ticker en majuscules, saisie vide ignorée
    ///
    /// Retourne le nouveau ticker s'il a changé.
    pub fn submit_search(&mut self) -> Option<String> {
        let symbol = self.input_buffer.trim().to_uppercase();
        self.cancel_search();

        if symbol.is_empty() {
            return None;
        }
        self.set_ticker(&symbol);
        Some(symbol)
    }

    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn is_searching(&self) -> bool {
        self.input_mode == InputMode::Search
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
