// ============================================================================
// Configuration
// ============================================================================
// Constantes de l'application et configuration du rafraîchissement
//
// Pas de fichier de config ni de flags CLI : seule la variable RUST_LOG
// influence le logging (voir main.rs).
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{RefreshError, Result};
use crate::models::{Market, LOG_HISTORY_CAPACITY};

/// Intervalle entre deux rafraîchissements automatiques
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Durée d'affichage d'une notification (disclaimer de prédiction)
pub const NOTICE_DURATION: Duration = Duration::from_millis(6000);

/// Marché sélectionné au démarrage
pub const DEFAULT_MARKET: Market = Market::Indian;

/// Ticker sélectionné au démarrage
pub const DEFAULT_TICKER: &str = "RELIANCE";

/// Filtre de logs par défaut si RUST_LOG n'est pas défini
pub const DEFAULT_LOG_FILTER: &str = "rifetrade=debug,info";

/// Nom de base du fichier de logs (suffixé par la date à la rotation)
pub const LOG_FILE_NAME: &str = "rifetrade.log";

/// Paramètres du contrôleur de rafraîchissement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Période du timer automatique
    pub interval: Duration,

    /// Nombre maximum d'entrées dans l'historique de logs
    pub history_capacity: usize,
}

impl RefreshConfig {
    /// Vérifie que la configuration est utilisable
    ///
    /// Un intervalle nul ferait paniquer tokio::time::interval,
    /// une capacité nulle viderait l'historique à chaque ajout.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(RefreshError::InvalidConfiguration(
                "refresh interval must be greater than zero".to_string(),
            ));
        }
        if self.history_capacity == 0 {
            return Err(RefreshError::InvalidConfiguration(
                "history capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            history_capacity: LOG_HISTORY_CAPACITY,
        }
    }
}

/// Répertoire des fichiers de logs
///
/// - Linux/WSL : ~/.local/share/rifetrade/logs
/// - macOS : ~/Library/Application Support/rifetrade/logs
/// - Windows : C:\Users\<user>\AppData\Local\rifetrade\logs
///
/// Repli sur ./logs si le répertoire de données est introuvable.
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("rifetrade").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
