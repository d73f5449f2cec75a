use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut request: Option<NetworkRequest> = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => request = guard.update_tab(MenuItem::Matches),
        (_, Char('2'), _) => request = guard.update_tab(MenuItem::Model),
        (_, Char('?'), _) => request = guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Matchweek navigation — a change hands back the recompute request
        // for the freshly filtered subset.
        (MenuItem::Matches, Char('h') | KeyCode::Left, _) => {
            request = guard.previous_matchweek();
        }
        (MenuItem::Matches, Char('l') | KeyCode::Right, _) => {
            request = guard.next_matchweek();
        }

        // Model tab scrolling
        (MenuItem::Model, Char('j') | KeyCode::Down, _) => guard.model_scroll_down(),
        (MenuItem::Model, Char('k') | KeyCode::Up, _) => guard.model_scroll_up(),
        (MenuItem::Model, KeyCode::Esc, _) => {
            guard.update_tab(MenuItem::Matches);
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if let Some(request) = request {
        drop(guard);
        let _ = network_requests.send(request).await;
    }
}
