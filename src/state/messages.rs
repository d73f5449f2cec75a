use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use epl_predictor_api::{Evaluation, Fixture, Leaderboard, ModelExplanation, Prediction};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Run the full initial-load sequence (matchweek, fixtures, predictions,
    /// season aggregates, leaderboard, baseline).
    LoadSeason,
    /// Recompute week-scope aggregates for a matchweek's prediction subset.
    /// Subset and generation are captured at request time; the response echoes
    /// the generation so stale results can be discarded.
    RecomputeWeek {
        generation: u64,
        matchweek: u32,
        predictions: Vec<Prediction>,
    },
    /// Static model explanation content, fetched lazily for the Model tab.
    LoadModelExplanation,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    MatchweekLoaded { matchweek: u32 },
    /// Season collections, loaded together (predictions are generated from
    /// the fixture list, so neither is useful without the other).
    SeasonLoaded {
        fixtures: Vec<Fixture>,
        predictions: Vec<Prediction>,
    },
    SeasonPointsLoaded { points: i64 },
    LeaderboardLoaded { leaderboard: Leaderboard },
    BaselineLoaded { evaluation: Evaluation },
    SeasonEvaluationLoaded { evaluation: Evaluation },
    WeekRecomputed {
        generation: u64,
        points: i64,
        evaluation: Evaluation,
    },
    ModelExplanationLoaded { explanation: ModelExplanation },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
