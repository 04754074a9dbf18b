// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
// ============================================================================

pub mod log_entry; // Journal d'activité borné
pub mod market;    // Marchés, plages de temps, prédictions
pub mod quote;     // Cotation, sentiment, titres, métriques
pub mod ohlc;      // Chandeliers, volumes, séries de prix
pub mod mock;      // Jeu de données statique

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use rifetrade::models::log_entry::LogEntry;
// On peut faire : use rifetrade::models::LogEntry;
pub use log_entry::{LogEntry, LogHistory, LogKind, LOG_HISTORY_CAPACITY, TIMESTAMP_FORMAT};
pub use market::{Market, PredictionPeriod, TimeRange};
pub use mock::MarketSnapshot;
pub use ohlc::{price_bounds, Candle, PricePoint, PriceRow, TradeSide, VolumeBar};
pub use quote::{Headline, Metric, PriceQuote, Sentiment, SentimentCount, SentimentKind};
