// ============================================================================
// Marchés, plages de temps et périodes de prédiction
// ============================================================================
// Sélecteurs de la barre de contrôle du dashboard
//
// CONCEPT RUST : Enums pour des ensembles fermés de valeurs
// - Le compilateur force à gérer tous les cas (exhaustivité)
// - Cycles next()/previous() comme pour un sélecteur
// ============================================================================

use serde::{Deserialize, Serialize};

/// Marché dont on affiche les tickers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Market {
    /// NSE : RELIANCE, TCS, ...
    Indian,
    /// US : AAPL, MSFT, ...
    Global,
}

impl Market {
    /// Tickers proposés pour ce marché
    pub fn tickers(&self) -> &'static [&'static str] {
        match self {
            Market::Indian => &["RELIANCE", "TCS", "INFY", "HDFC", "WIPRO"],
            Market::Global => &["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Market::Indian => "Indian",
            Market::Global => "Global",
        }
    }

    /// Symbole monétaire pour l'affichage des prix
    pub fn currency(&self) -> &'static str {
        match self {
            Market::Indian => "₹",
            Market::Global => "$",
        }
    }

    /// Bascule vers l'autre marché
    pub fn toggle(&self) -> Market {
        match self {
            Market::Indian => Market::Global,
            Market::Global => Market::Indian,
        }
    }

    /// Premier ticker de la liste (sélection par défaut après bascule)
    pub fn default_ticker(&self) -> &'static str {
        self.tickers()[0]
    }

    /// Ticker suivant dans la liste (cycle)
    ///
    /// Un ticker hors liste (recherche libre) repart du début.
    pub fn next_ticker(&self, current: &str) -> &'static str {
        let tickers = self.tickers();
        match tickers.iter().position(|t| *t == current) {
            Some(i) => tickers[(i + 1) % tickers.len()],
            None => tickers[0],
        }
    }

    /// Ticker précédent dans la liste (cycle)
    pub fn previous_ticker(&self, current: &str) -> &'static str {
        let tickers = self.tickers();
        match tickers.iter().position(|t| *t == current) {
            Some(i) => tickers[(i + tickers.len() - 1) % tickers.len()],
            None => tickers[tickers.len() - 1],
        }
    }
}

/// Plage de temps affichée dans les graphiques
///
/// CONCEPT : Même rôle que le sélecteur 1W/1M/1Y/5Y/10Y du front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    OneWeek,
    OneMonth,
    OneYear,
    FiveYears,
    TenYears,
}

impl TimeRange {
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneWeek => "1W",
            TimeRange::OneMonth => "1M",
            TimeRange::OneYear => "1Y",
            TimeRange::FiveYears => "5Y",
            TimeRange::TenYears => "10Y",
        }
    }

    pub fn all() -> [TimeRange; 5] {
        [
            TimeRange::OneWeek,
            TimeRange::OneMonth,
            TimeRange::OneYear,
            TimeRange::FiveYears,
            TimeRange::TenYears,
        ]
    }

    pub fn next(&self) -> TimeRange {
        match self {
            TimeRange::OneWeek => TimeRange::OneMonth,
            TimeRange::OneMonth => TimeRange::OneYear,
            TimeRange::OneYear => TimeRange::FiveYears,
            TimeRange::FiveYears => TimeRange::TenYears,
            TimeRange::TenYears => TimeRange::OneWeek, // Boucle
        }
    }

    pub fn previous(&self) -> TimeRange {
        match self {
            TimeRange::OneWeek => TimeRange::TenYears, // Boucle
            TimeRange::OneMonth => TimeRange::OneWeek,
            TimeRange::OneYear => TimeRange::OneMonth,
            TimeRange::FiveYears => TimeRange::OneYear,
            TimeRange::TenYears => TimeRange::FiveYears,
        }
    }
}

impl Default for TimeRange {
    /// 1 mois par défaut
    fn default() -> Self {
        TimeRange::OneMonth
    }
}

/// Horizon d'une prédiction (boutons "Predict Week/Month/Year")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionPeriod {
    Week,
    Month,
    Year,
}

impl PredictionPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            PredictionPeriod::Week => "week",
            PredictionPeriod::Month => "month",
            PredictionPeriod::Year => "year",
        }
    }

    /// Texte d'avertissement affiché avec une prédiction
    pub fn disclaimer(&self) -> String {
        format!(
            "This is a predicted value for the next {}. Market predictions are based on \
             historical data and sentiment analysis. They may not always be accurate. \
             Please do your own research before making any investment decisions.",
            self.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_toggle() {
        assert_eq!(Market::Indian.toggle(), Market::Global);
        assert_eq!(Market::Global.toggle().toggle(), Market::Global);
        assert_eq!(Market::Global.default_ticker(), "AAPL");
    }

    #[test]
    fn test_ticker_cycle_wraps() {
        assert_eq!(Market::Indian.next_ticker("RELIANCE"), "TCS");
        assert_eq!(Market::Indian.next_ticker("WIPRO"), "RELIANCE");
        assert_eq!(Market::Indian.previous_ticker("RELIANCE"), "WIPRO");
    }

    #[test]
    fn test_ticker_cycle_from_custom_symbol() {
        assert_eq!(Market::Global.next_ticker("NVDA"), "AAPL");
        assert_eq!(Market::Global.previous_ticker("NVDA"), "TSLA");
    }

    #[test]
    fn test_time_range_cycle() {
        assert_eq!(TimeRange::default().label(), "1M");
        assert_eq!(TimeRange::TenYears.next(), TimeRange::OneWeek);
        assert_eq!(TimeRange::OneWeek.previous(), TimeRange::TenYears);
        for range in TimeRange::all() {
            assert_eq!(range.next().previous(), range);
        }
    }

    #[test]
    fn test_disclaimer_mentions_period() {
        assert!(PredictionPeriod::Year.disclaimer().contains("next year"));
    }
}
