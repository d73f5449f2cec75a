use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use epl_predictor_api::{Evaluation, Fixture, Leaderboard, ModelExplanation, Prediction};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Matches,
    Model,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self { state: AppState::default(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_matchweek_loaded(&mut self, matchweek: u32) {
        self.state.board.set_selected_matchweek(matchweek);
    }

    pub fn on_season_loaded(&mut self, fixtures: Vec<Fixture>, predictions: Vec<Prediction>) {
        self.state.board.set_fixtures_and_predictions(fixtures, predictions);
    }

    pub fn on_season_points_loaded(&mut self, points: i64) {
        self.state.board.set_season_points(points);
    }

    pub fn on_leaderboard_loaded(&mut self, leaderboard: Leaderboard) {
        self.state.board.set_leaderboard(leaderboard);
    }

    pub fn on_baseline_loaded(&mut self, evaluation: Evaluation) {
        self.state.model.baseline = evaluation;
    }

    pub fn on_season_evaluation_loaded(&mut self, evaluation: Evaluation) {
        self.state.board.set_season_evaluation(evaluation);
    }

    /// Returns false when the response was for a matchweek the user has
    /// already left (stale generation) and nothing was stored.
    pub fn on_week_recomputed(
        &mut self,
        generation: u64,
        points: i64,
        evaluation: Evaluation,
    ) -> bool {
        self.state.board.set_week_aggregates(generation, points, evaluation)
    }

    pub fn on_model_explanation_loaded(&mut self, explanation: ModelExplanation) {
        self.state.model.explanation = Some(explanation);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    /// Switch tabs. Opening the Model tab for the first time hands back the
    /// request for its static content.
    pub fn update_tab(&mut self, next: MenuItem) -> Option<NetworkRequest> {
        if self.state.active_tab == next {
            return None;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if self.state.active_tab == MenuItem::Model && !self.state.model.requested {
            self.state.model.requested = true;
            return Some(NetworkRequest::LoadModelExplanation);
        }
        None
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Matchweek navigation — pure state transitions; the network request for
    // the new subset is handed back to the caller, never issued from here.
    // -----------------------------------------------------------------------

    pub fn previous_matchweek(&mut self) -> Option<NetworkRequest> {
        if self.state.board.go_to_previous() {
            self.week_recompute_request()
        } else {
            None
        }
    }

    pub fn next_matchweek(&mut self) -> Option<NetworkRequest> {
        if self.state.board.go_to_next() {
            self.week_recompute_request()
        } else {
            None
        }
    }

    /// Recompute request for the currently selected week, with the subset and
    /// generation captured at this moment. None until predictions are loaded.
    pub fn week_recompute_request(&self) -> Option<NetworkRequest> {
        let (generation, matchweek, predictions) = self.state.board.week_snapshot()?;
        Some(NetworkRequest::RecomputeWeek { generation, matchweek, predictions })
    }

    // -----------------------------------------------------------------------
    // Model tab scrolling
    // -----------------------------------------------------------------------

    pub fn model_scroll_down(&mut self) {
        self.state.model.scroll_offset = self.state.model.scroll_offset.saturating_add(1);
    }

    pub fn model_scroll_up(&mut self) {
        self.state.model.scroll_offset = self.state.model.scroll_offset.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(wk: u32, home: &str) -> Prediction {
        Prediction {
            wk,
            home_team: home.into(),
            ..Prediction::default()
        }
    }

    fn app_with_predictions() -> App {
        let mut app = App::new();
        app.state.board.set_fixtures_and_predictions(
            Vec::new(),
            vec![
                prediction(10, "Arsenal"),
                prediction(11, "Chelsea"),
                prediction(12, "Liverpool"),
                prediction(12, "Spurs"),
            ],
        );
        app.state.board.set_selected_matchweek(10);
        app
    }

    #[test]
    fn navigation_hands_back_request_for_new_subset() {
        let mut app = app_with_predictions();
        let request = app.next_matchweek().expect("week changed");
        match request {
            NetworkRequest::RecomputeWeek { matchweek, predictions, .. } => {
                assert_eq!(matchweek, 11);
                assert_eq!(predictions.len(), 1);
                assert_eq!(predictions[0].home_team, "Chelsea");
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn rapid_double_next_keeps_only_latest_generation() {
        let mut app = app_with_predictions();

        let first = app.next_matchweek().expect("10 -> 11");
        let second = app.next_matchweek().expect("11 -> 12");
        let (NetworkRequest::RecomputeWeek { generation: gen_11, .. },
             NetworkRequest::RecomputeWeek { generation: gen_12, predictions, .. }) =
            (first, second)
        else {
            panic!("expected recompute requests");
        };
        assert_eq!(predictions.len(), 2);

        // Responses arrive out of order: week 12 first, then stale week 11.
        let eval: Evaluation = Evaluation::default();
        assert!(app.on_week_recomputed(gen_12, 7, eval.clone()));
        assert!(!app.on_week_recomputed(gen_11, 99, eval));
        assert_eq!(app.state.board.week_points, 7);
    }

    #[test]
    fn navigation_without_predictions_sends_nothing() {
        let mut app = App::new();
        app.state.board.set_selected_matchweek(10);
        assert!(app.next_matchweek().is_none());
        assert_eq!(app.state.board.selected_matchweek, 11);
    }

    #[test]
    fn model_tab_requests_content_only_once() {
        let mut app = App::new();
        assert!(matches!(
            app.update_tab(MenuItem::Model),
            Some(NetworkRequest::LoadModelExplanation)
        ));
        assert!(app.update_tab(MenuItem::Matches).is_none());
        assert!(app.update_tab(MenuItem::Model).is_none());
    }
}
