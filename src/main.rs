// ============================================================================
// Rife-Trade - Dashboard de marché en terminal
// ============================================================================
// Programme TUI : cotation, sentiment, graphiques et journal d'activité
// rafraîchi automatiquement toutes les 60 secondes
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Async dans sync : le timer de rafraîchissement tourne sur un runtime tokio
//    pendant que la boucle d'affichage reste synchrone
// 4. RAII : le guard du runtime et le Drop du contrôleur arrêtent le timer
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use rifetrade::app::App;
use rifetrade::config::{log_directory, DEFAULT_LOG_FILTER, LOG_FILE_NAME};
use rifetrade::ui::events::Event;
use rifetrade::ui::{render, EventHandler};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier avec rotation quotidienne
// ============================================================================

/// Initialise le logging vers fichier
///
/// Les logs sont écrits dans :
/// - Linux/WSL : ~/.local/share/rifetrade/logs/rifetrade.log
/// - macOS : ~/Library/Application Support/rifetrade/logs/rifetrade.log
/// - Windows : C:\Users\<user>\AppData\Local\rifetrade\logs\rifetrade.log
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/rifetrade/logs/rifetrade.log
/// RUST_LOG=rifetrade=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true) // Le timer tourne sur un worker tokio
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(?log_dir, "Logging initialized");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("Rife-Trade starting up");

    // CONCEPT RUST : Runtime tokio dans un main synchrone
    // - enter() rend le runtime "courant" pour ce thread
    // - RefreshController::start() y spawn son timer
    // - Le guard doit vivre jusqu'à la fin de main()
    let runtime = tokio::runtime::Runtime::new().context("Failed to build tokio runtime")?;
    let _guard = runtime.enter();

    let mut app = App::new();
    let handle = app
        .start_auto_refresh(|state| {
            debug!(
                subject = ?state.subject,
                entries = state.history.len(),
                last_update = %state.last_update_display(),
                "Auto refresh tick"
            );
        })
        .context("Failed to start auto refresh")?;
    info!(handle = handle.id(), "Auto refresh started");

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Arrête le timer avant de rendre le terminal
    app.stop_auto_refresh();
    app.refresh.shutdown();

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event loop
// ============================================================================
// CONCEPT : Render → Input → Update
// - Pas de Mutex autour de App : seul le thread principal la modifie
// - Le timer n'écrit que dans l'état du RefreshController, lu à chaque rendu
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        // 1. RENDER
        terminal.draw(|frame| render(frame, &*app))?;

        // 2. INPUT
        match events.next() {
            Ok(event) => handle_event(app, event),
            Err(e) => error!(error = ?e, "Failed to read terminal event"),
        }

        // 3. UPDATE
        app.tick();
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Le mode recherche capture toutes les touches
/// - La confirmation de quit capture la touche suivante
/// - Sinon, chaque raccourci a sa propre branche
fn handle_event(app: &mut App, event: Event) {
    use rifetrade::ui::events::{
        get_char_from_event, is_backspace_event, is_down_event, is_enter_event,
        is_escape_event, is_market_event, is_next_range_event, is_previous_range_event,
        is_quit_event, is_refresh_event, is_search_event, is_tab_event, is_ticker_char_event,
        is_up_event, prediction_from_event,
    };

    if matches!(event, Event::Tick) {
        return;
    }

    // ========================================
    // Mode recherche
    // ========================================
    if app.is_searching() {
        if is_escape_event(&event) {
            debug!("Search cancelled");
            app.cancel_search();
        } else if is_enter_event(&event) {
            match app.submit_search() {
                Some(ticker) => info!(%ticker, "Ticker selected from search"),
                None => debug!("Empty search ignored"),
            }
        } else if is_backspace_event(&event) {
            app.backspace();
        } else if is_ticker_char_event(&event) {
            if let Some(c) = get_char_from_event(&event) {
                app.append_char(c);
            }
        }
        return;
    }

    // ========================================
    // Confirmation de quit two-step
    // ========================================
    if is_quit_event(&event) {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return;
    }
    if app.is_awaiting_quit_confirmation() {
        debug!("Quit cancelled");
        app.cancel_quit();
        return;
    }

    // ========================================
    // Raccourcis
    // ========================================
    if is_refresh_event(&event) {
        info!("Manual refresh requested");
        app.manual_refresh();
    } else if is_market_event(&event) {
        app.toggle_market();
        info!(market = app.market.label(), ticker = %app.ticker(), "Market toggled");
    } else if is_up_event(&event) {
        app.previous_ticker();
        debug!(ticker = %app.ticker(), "Previous ticker");
    } else if is_down_event(&event) {
        app.next_ticker();
        debug!(ticker = %app.ticker(), "Next ticker");
    } else if is_search_event(&event) {
        app.start_search();
    } else if is_tab_event(&event) {
        app.next_view();
        debug!(view = app.current_view.title(), "View changed");
    } else if is_next_range_event(&event) {
        app.next_time_range();
    } else if is_previous_range_event(&event) {
        app.previous_time_range();
    } else if is_escape_event(&event) {
        app.notice = None;
    } else if let Some(period) = prediction_from_event(&event) {
        info!(period = period.label(), ticker = %app.ticker(), "Prediction requested");
        app.predict(period);
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal (appelé même en cas d'erreur)
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
