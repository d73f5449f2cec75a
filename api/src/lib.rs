pub mod client;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Domain types — wire field names are part of the service contract and must
// survive serialization bit-exact (Wk, Day, Date, ... Venue).
// ---------------------------------------------------------------------------

/// One scheduled EPL match. Immutable once fetched for a session.
///
/// `Score` and `Result` arrive as empty strings until the match has been
/// played (the service serializes missing values as `""`), and round-trip
/// unchanged. `Date` stays a plain string for the same reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Matchweek number, 1–38.
    #[serde(rename = "Wk")]
    pub wk: u32,
    #[serde(rename = "Day", default)]
    pub day: String,
    #[serde(rename = "Date")]
    pub date: String,
    /// Kickoff time, e.g. "15:00".
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    /// Final score, e.g. "2-1". Empty until played.
    #[serde(rename = "Score", default)]
    pub score: String,
    /// Result code relative to the home team (W/D/L). Empty until played.
    #[serde(rename = "Result", default)]
    pub result: String,
    #[serde(rename = "Venue", default)]
    pub venue: String,
}

impl Fixture {
    /// Identity of a fixture: (matchweek, home team, away team, date).
    pub fn key(&self) -> FixtureKey<'_> {
        FixtureKey {
            wk: self.wk,
            home_team: &self.home_team,
            away_team: &self.away_team,
            date: &self.date,
        }
    }

    pub fn played(&self) -> bool {
        !self.score.is_empty()
    }
}

/// Borrowed fixture identity. Predictions reference their fixture by this key
/// rather than by ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureKey<'a> {
    pub wk: u32,
    pub home_team: &'a str,
    pub away_team: &'a str,
    pub date: &'a str,
}

/// One model-generated forecast, one-to-one with a [`Fixture`].
///
/// The service echoes the fixture columns back alongside `PredScore` and
/// `PredResult`, so a prediction row is self-contained for scoring and
/// evaluation calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "Wk")]
    pub wk: u32,
    #[serde(rename = "Day", default)]
    pub day: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    #[serde(rename = "Score", default)]
    pub score: String,
    #[serde(rename = "Result", default)]
    pub result: String,
    /// Predicted score, e.g. "2-1".
    #[serde(rename = "PredScore")]
    pub pred_score: String,
    /// Predicted result code (W/D/L).
    #[serde(rename = "PredResult")]
    pub pred_result: String,
    #[serde(rename = "Venue", default)]
    pub venue: String,
}

impl Prediction {
    /// Key of the fixture this prediction forecasts (weak back-reference).
    pub fn fixture_key(&self) -> FixtureKey<'_> {
        FixtureKey {
            wk: self.wk,
            home_team: &self.home_team,
            away_team: &self.away_team,
            date: &self.date,
        }
    }

    pub fn forecasts(&self, fixture: &Fixture) -> bool {
        self.fixture_key() == fixture.key()
    }

    /// True when the match has been played and the exact score was predicted.
    pub fn exact_score(&self) -> bool {
        !self.score.is_empty() && self.score == self.pred_score
    }

    /// True when the match has been played and the W/D/L outcome was predicted.
    pub fn correct_result(&self) -> bool {
        !self.result.is_empty() && self.result == self.pred_result
    }
}

/// Open mapping of metric name → percentage in [0, 100].
///
/// The key set is server-defined and deliberately not validated here; metrics
/// this client has never seen are carried through untouched. The two metrics
/// the dashboard displays get convenience accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evaluation(pub BTreeMap<String, f64>);

impl Evaluation {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn correct_scores(&self) -> Option<f64> {
        self.metric("CorrectScores")
    }

    pub fn correct_results(&self) -> Option<f64> {
        self.metric("CorrectResults")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Superbru leaderboard reference totals. Fetched once, immutable for the
/// session, comparison display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub global_top: i64,
    pub global_top_250: i64,
}

// ---------------------------------------------------------------------------
// Model explanation content — static display, no state coupling.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelExplanation {
    #[serde(default)]
    pub content: ExplanationContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplanationContent {
    #[serde(default)]
    pub model_explanation: Option<ExplanationSection>,
    #[serde(default)]
    pub model_workflow: Option<WorkflowSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplanationSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: Vec<ExplanationPoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplanationPoint {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subpoints: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowStep {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub substeps: Vec<String>,
}
