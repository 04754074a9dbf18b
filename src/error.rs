// ============================================================================
// Erreurs de la bibliothèque
// ============================================================================
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] génère Display
// - Le binaire les convertit en anyhow::Error avec `?`
// ============================================================================

use thiserror::Error;

/// Erreurs du contrôleur de rafraîchissement
///
/// Aucune opération sur l'état ne peut échouer (pas d'I/O) : ces erreurs
/// signalent uniquement une mauvaise configuration ou un mauvais cycle de vie.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    /// Configuration invalide (fournisseur de ticker absent, intervalle nul...)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// start() appelé alors qu'un timer tourne déjà
    #[error("Refresh timer already started")]
    AlreadyStarted,

    /// start() appelé hors d'un runtime tokio
    #[error("No tokio runtime available to drive the refresh timer")]
    RuntimeUnavailable,
}

/// Result spécialisé pour le contrôleur
pub type Result<T> = std::result::Result<T, RefreshError>;
