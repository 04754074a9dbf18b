// ============================================================================
// Rife-Trade - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod config;    // Constantes et configuration du rafraîchissement
pub mod error;     // Erreurs typées (RefreshError)
pub mod models;    // Structures de données
pub mod refresh;   // RefreshController : timer, historique borné
pub mod app;       // État de l'application
pub mod ui;        // Interface utilisateur
