use crate::{Evaluation, Fixture, Leaderboard, ModelExplanation, Prediction};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Client for the EPL prediction/scoring service.
///
/// Every operation is a single request/response pair — no retry, no caching.
/// The base URL comes from `EPLTUI_API_URL` when set, otherwise the local
/// default above.
#[derive(Debug, Clone)]
pub struct PredictorApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for PredictorApi {
    fn default() -> Self {
        let base_url = std::env::var("EPLTUI_API_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self::with_base_url(base_url)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

/// The POST operations wrap their payload as `{"data": [...]}`.
#[derive(Serialize)]
struct DataEnvelope<'a, T> {
    data: &'a [T],
}

#[derive(serde::Deserialize)]
struct MatchweekResponse {
    current_matchweek: u32,
}

#[derive(serde::Deserialize)]
struct PointsResponse {
    points: i64,
}

impl PredictorApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client: Client::builder()
                .user_agent("epltui/0.1 (terminal prediction dashboard)")
                .build()
                .unwrap_or_default(),
            base_url,
            timeout: Duration::from_secs(10),
        }
    }

    /// Current (most recent) matchweek according to the service.
    pub async fn fetch_current_matchweek(&self) -> ApiResult<u32> {
        let raw: MatchweekResponse = self.get("/matchweek").await?;
        Ok(raw.current_matchweek)
    }

    /// Full season fixture list.
    pub async fn fetch_fixtures(&self) -> ApiResult<Vec<Fixture>> {
        self.get("/fixtures").await
    }

    /// Run the model over the given fixtures; one prediction per fixture.
    pub async fn generate_predictions(&self, fixtures: &[Fixture]) -> ApiResult<Vec<Prediction>> {
        self.post("/predict", fixtures).await
    }

    /// Aggregate Superbru points for the given prediction subset.
    pub async fn compute_points(&self, predictions: &[Prediction]) -> ApiResult<i64> {
        let raw: PointsResponse = self.post("/superbru/points", predictions).await?;
        Ok(raw.points)
    }

    /// Global leaderboard reference totals (top and top-250 cutoff).
    pub async fn fetch_top_points(&self) -> ApiResult<Leaderboard> {
        self.get("/superbru/points/top/global").await
    }

    /// Percentage metrics for the given prediction subset.
    pub async fn compute_evaluation(&self, predictions: &[Prediction]) -> ApiResult<Evaluation> {
        self.post("/evaluate", predictions).await
    }

    /// Validation-set metrics for the model itself. Static, display only.
    pub async fn fetch_model_baseline(&self) -> ApiResult<Evaluation> {
        self.get("/model/evaluation").await
    }

    /// Static model explanation and workflow content.
    pub async fn fetch_model_explanation(&self) -> ApiResult<ModelExplanation> {
        self.get("/content/model_explanation").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;
        decode(response, url).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, data: &[B]) -> ApiResult<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&DataEnvelope { data })
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;
        decode(response, url).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: String) -> ApiResult<T> {
    match response.error_for_status() {
        Ok(res) => res
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url)),
        Err(e) => Err(ApiError::Api(e, url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn fixture_json() -> &'static str {
        r#"[{"Wk":1,"Day":"Fri","Date":"2024-08-16","Time":"20:00",
             "HomeTeam":"Man Utd","AwayTeam":"Fulham","Score":"1-0",
             "Result":"W","Venue":"Old Trafford"},
            {"Wk":1,"Day":"Sat","Date":"2024-08-17","Time":"15:00",
             "HomeTeam":"Everton","AwayTeam":"Brighton","Score":"",
             "Result":"","Venue":"Goodison Park"}]"#
    }

    #[tokio::test]
    async fn fetch_current_matchweek_parses_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/matchweek")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"current_matchweek": 24}"#)
            .create_async()
            .await;

        let api = PredictorApi::with_base_url(server.url());
        assert_eq!(api.fetch_current_matchweek().await.unwrap(), 24);
    }

    #[tokio::test]
    async fn fetch_fixtures_parses_wire_fields() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/fixtures")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(fixture_json())
            .create_async()
            .await;

        let api = PredictorApi::with_base_url(server.url());
        let fixtures = api.fetch_fixtures().await.unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].home_team, "Man Utd");
        assert!(fixtures[0].played());
        assert!(!fixtures[1].played());
    }

    #[tokio::test]
    async fn generate_predictions_posts_data_envelope() {
        let mut server = mockito::Server::new_async().await;
        let fixtures: Vec<Fixture> = serde_json::from_str(fixture_json()).unwrap();
        let _m = server
            .mock("POST", "/predict")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "data": [{"HomeTeam": "Man Utd"}, {"HomeTeam": "Everton"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"Wk":1,"Day":"Fri","Date":"2024-08-16","Time":"20:00",
                     "HomeTeam":"Man Utd","AwayTeam":"Fulham","Score":"1-0",
                     "Result":"W","PredScore":"2-0","PredResult":"W",
                     "Venue":"Old Trafford"}]"#,
            )
            .create_async()
            .await;

        let api = PredictorApi::with_base_url(server.url());
        let predictions = api.generate_predictions(&fixtures).await.unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].pred_score, "2-0");
        assert!(predictions[0].forecasts(&fixtures[0]));
    }

    #[tokio::test]
    async fn compute_points_unwraps_points_field() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/superbru/points")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"points": 137}"#)
            .create_async()
            .await;

        let api = PredictorApi::with_base_url(server.url());
        assert_eq!(api.compute_points(&[]).await.unwrap(), 137);
    }

    #[tokio::test]
    async fn fetch_top_points_parses_leaderboard() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/superbru/points/top/global")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"global_top": 412, "global_top_250": 367}"#)
            .create_async()
            .await;

        let api = PredictorApi::with_base_url(server.url());
        let leaderboard = api.fetch_top_points().await.unwrap();
        assert_eq!(leaderboard.global_top, 412);
        assert_eq!(leaderboard.global_top_250, 367);
    }

    #[tokio::test]
    async fn compute_evaluation_keeps_unknown_metrics() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/evaluate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"CorrectScores": 9.3, "CorrectResults": 51.0, "Calibration": 0.87}"#)
            .create_async()
            .await;

        let api = PredictorApi::with_base_url(server.url());
        let evaluation = api.compute_evaluation(&[]).await.unwrap();
        assert_eq!(evaluation.correct_results(), Some(51.0));
        assert_eq!(evaluation.metric("Calibration"), Some(0.87));
    }

    #[tokio::test]
    async fn server_error_surfaces_as_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/matchweek")
            .with_status(500)
            .create_async()
            .await;

        let api = PredictorApi::with_base_url(server.url());
        match api.fetch_current_matchweek().await {
            Err(ApiError::Api(_, url)) => assert!(url.ends_with("/matchweek")),
            other => panic!("expected ApiError::Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_surfaces_as_network_error() {
        // Nothing listens on the discard port.
        let api = PredictorApi::with_base_url("http://127.0.0.1:9");
        match api.fetch_fixtures().await {
            Err(ApiError::Network(..)) => {}
            other => panic!("expected ApiError::Network, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_body_surfaces_as_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/fixtures")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let api = PredictorApi::with_base_url(server.url());
        match api.fetch_fixtures().await {
            Err(ApiError::Parsing(..)) => {}
            other => panic!("expected ApiError::Parsing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn base_url_trailing_slash_is_normalised() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/matchweek")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"current_matchweek": 1}"#)
            .create_async()
            .await;

        let api = PredictorApi::with_base_url(format!("{}/", server.url()));
        assert_eq!(api.fetch_current_matchweek().await.unwrap(), 1);
    }
}
