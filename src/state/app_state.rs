use crate::app::MenuItem;
use epl_predictor_api::{Evaluation, Fixture, Leaderboard, ModelExplanation, Prediction};

pub const FIRST_MATCHWEEK: u32 = 1;
pub const LAST_MATCHWEEK: u32 = 38;

// ---------------------------------------------------------------------------
// Prediction board — season collections and everything derived from them
// ---------------------------------------------------------------------------

/// The season-wide store. Holds the canonical fixture/prediction collections
/// and the scalar aggregates derived from them, at season scope and at the
/// selected matchweek's scope.
///
/// This is the only mutable shared state in the app. Nothing outside this
/// module touches the fields directly on the write side; mutation goes
/// through the methods below (network-response handlers and the two
/// navigation operations).
#[derive(Debug)]
pub struct PredictionBoard {
    /// The one piece of user-driven state. Always within [1, 38].
    pub selected_matchweek: u32,
    /// Full season fixture list. Never refetched once loaded.
    pub fixtures: Vec<Fixture>,
    /// One prediction per fixture, in fixture order. Never refetched.
    pub predictions: Vec<Prediction>,
    pub season_points: i64,
    pub season_evaluation: Evaluation,
    /// Points for the selected matchweek's subset. 0 until computed, and the
    /// explicit fallback when scoring fails.
    pub week_points: i64,
    /// Metrics for the selected matchweek's subset. Empty mapping until
    /// computed, and the explicit fallback when evaluation fails.
    pub week_evaluation: Evaluation,
    pub leaderboard: Option<Leaderboard>,
    /// Bumped on every matchweek change. Week aggregates are only absorbed
    /// when their request generation still matches, so a slow response for a
    /// week the user has already left can never overwrite fresher state.
    generation: u64,
}

impl Default for PredictionBoard {
    fn default() -> Self {
        Self {
            selected_matchweek: FIRST_MATCHWEEK,
            fixtures: Vec::new(),
            predictions: Vec::new(),
            season_points: 0,
            season_evaluation: Evaluation::default(),
            week_points: 0,
            week_evaluation: Evaluation::default(),
            leaderboard: None,
            generation: 0,
        }
    }
}

impl PredictionBoard {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Jump to a matchweek (clamped). Used when the service reports the
    /// current week at session start. Returns true when the week changed.
    pub fn set_selected_matchweek(&mut self, matchweek: u32) -> bool {
        let clamped = matchweek.clamp(FIRST_MATCHWEEK, LAST_MATCHWEEK);
        if clamped == self.selected_matchweek {
            return false;
        }
        self.selected_matchweek = clamped;
        self.generation += 1;
        true
    }

    /// Step back one matchweek. No-op at matchweek 1.
    pub fn go_to_previous(&mut self) -> bool {
        if self.selected_matchweek > FIRST_MATCHWEEK {
            self.selected_matchweek -= 1;
            self.generation += 1;
            true
        } else {
            false
        }
    }

    /// Step forward one matchweek. No-op at matchweek 38.
    pub fn go_to_next(&mut self) -> bool {
        if self.selected_matchweek < LAST_MATCHWEEK {
            self.selected_matchweek += 1;
            self.generation += 1;
            true
        } else {
            false
        }
    }

    /// Replace the season-level collections. Does not touch any aggregate;
    /// those arrive from their own compute calls.
    pub fn set_fixtures_and_predictions(
        &mut self,
        fixtures: Vec<Fixture>,
        predictions: Vec<Prediction>,
    ) {
        self.fixtures = fixtures;
        self.predictions = predictions;
    }

    pub fn set_season_points(&mut self, points: i64) {
        self.season_points = points;
    }

    pub fn set_season_evaluation(&mut self, evaluation: Evaluation) {
        self.season_evaluation = evaluation;
    }

    pub fn set_leaderboard(&mut self, leaderboard: Leaderboard) {
        self.leaderboard = Some(leaderboard);
    }

    /// Replace both week-scope values — whole replacement, never a merge.
    /// A response whose generation no longer matches the current one belongs
    /// to a matchweek the user has already left; it is discarded and the
    /// method returns false.
    pub fn set_week_aggregates(
        &mut self,
        generation: u64,
        points: i64,
        evaluation: Evaluation,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.week_points = points;
        self.week_evaluation = evaluation;
        true
    }

    /// All predictions whose matchweek equals `matchweek`, in the order the
    /// service returned them (fixture order, not kickoff order).
    pub fn filtered_predictions(&self, matchweek: u32) -> Vec<Prediction> {
        self.predictions
            .iter()
            .filter(|p| p.wk == matchweek)
            .cloned()
            .collect()
    }

    /// Capture (generation, matchweek, subset) together for a recompute
    /// request. None while the season predictions have not loaded.
    pub fn week_snapshot(&self) -> Option<(u64, u32, Vec<Prediction>)> {
        if self.predictions.is_empty() {
            return None;
        }
        Some((
            self.generation,
            self.selected_matchweek,
            self.filtered_predictions(self.selected_matchweek),
        ))
    }
}

// ---------------------------------------------------------------------------
// Model tab state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ModelState {
    pub explanation: Option<ModelExplanation>,
    /// Validation-set metrics for the model itself, loaded with the season.
    pub baseline: Evaluation,
    /// Lazy-load latch: the explanation is requested the first time the
    /// Model tab is opened.
    pub requested: bool,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub board: PredictionBoard,
    pub model: ModelState,
}
