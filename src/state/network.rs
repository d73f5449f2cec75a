use crate::state::messages::{NetworkRequest, NetworkResponse};
use epl_predictor_api::client::{ApiError, PredictorApi};
use epl_predictor_api::{Evaluation, Prediction};
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// The synchronization engine. Owns the API client, consumes requests one at
/// a time, and emits responses as each remote call resolves. Requests are
/// handled strictly in order, so a week recomputation queued behind the
/// season load only runs once the season sequence has finished or aborted.
pub struct NetworkWorker {
    client: PredictorApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self::with_client(PredictorApi::new(), requests, responses)
    }

    pub fn with_client(
        client: PredictorApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadSeason => self.handle_load_season().await,
                NetworkRequest::RecomputeWeek { generation, matchweek, predictions } => {
                    self.handle_recompute_week(generation, matchweek, &predictions).await
                }
                NetworkRequest::LoadModelExplanation => {
                    self.handle_load_model_explanation().await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            if let Err(err) = result {
                // Failed calls degrade to the zero/empty defaults on screen;
                // the error itself only goes to the log pane.
                error!("network request failed: {err}");
                if self
                    .responses
                    .send(NetworkResponse::Error { message: err.to_string() })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        }
    }

    /// Initial-load sequence, strictly sequential: step N's request is not
    /// issued until step N-1's response has arrived. Each completed step is
    /// emitted as its own message, so a failure later in the chain leaves the
    /// earlier state populated (partial season view) and aborts the rest.
    async fn handle_load_season(&self) -> Result<(), ApiError> {
        debug!("loading season data");
        let matchweek = self.client.fetch_current_matchweek().await?;
        self.send(NetworkResponse::MatchweekLoaded { matchweek }).await;

        let fixtures = self.client.fetch_fixtures().await?;
        let predictions = self.client.generate_predictions(&fixtures).await?;
        self.send(NetworkResponse::SeasonLoaded {
            fixtures,
            predictions: predictions.clone(),
        })
        .await;

        let points = self.client.compute_points(&predictions).await?;
        self.send(NetworkResponse::SeasonPointsLoaded { points }).await;

        let leaderboard = self.client.fetch_top_points().await?;
        self.send(NetworkResponse::LeaderboardLoaded { leaderboard }).await;

        let baseline = self.client.fetch_model_baseline().await?;
        self.send(NetworkResponse::BaselineLoaded { evaluation: baseline }).await;

        let evaluation = self.client.compute_evaluation(&predictions).await?;
        self.send(NetworkResponse::SeasonEvaluationLoaded { evaluation }).await;
        Ok(())
    }

    /// Week-scope recomputation. Failures here never propagate: the named
    /// fallback is points = 0 and an empty metric mapping. The response
    /// echoes the request generation so the store can discard results for a
    /// matchweek the user has already navigated away from.
    async fn handle_recompute_week(
        &self,
        generation: u64,
        matchweek: u32,
        predictions: &[Prediction],
    ) -> Result<(), ApiError> {
        debug!("recomputing aggregates for matchweek {matchweek} (generation {generation})");

        let points = match self.client.compute_points(predictions).await {
            Ok(points) => points,
            Err(err) => {
                warn!("week points for matchweek {matchweek} failed, falling back to 0: {err}");
                0
            }
        };

        let evaluation = match self.client.compute_evaluation(predictions).await {
            Ok(evaluation) => evaluation,
            Err(err) => {
                warn!("week evaluation for matchweek {matchweek} failed, falling back to empty: {err}");
                Evaluation::default()
            }
        };

        self.send(NetworkResponse::WeekRecomputed { generation, points, evaluation })
            .await;
        Ok(())
    }

    async fn handle_load_model_explanation(&self) -> Result<(), ApiError> {
        debug!("loading model explanation content");
        let explanation = self.client.fetch_model_explanation().await?;
        self.send(NetworkResponse::ModelExplanationLoaded { explanation }).await;
        Ok(())
    }

    async fn send(&self, response: NetworkResponse) {
        if let Err(e) = self.responses.send(response).await {
            error!("failed to send network response: {e}");
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Runs the worker against a mock server for a single request, then closes
    // the request channel so the worker (and its spinner task) wind down and
    // the response stream ends.
    async fn collect_responses(
        server_url: String,
        request: NetworkRequest,
    ) -> Vec<NetworkResponse> {
        let (request_tx, request_rx) = mpsc::channel(8);
        let (response_tx, mut response_rx) = mpsc::channel(64);
        let worker = NetworkWorker::with_client(
            PredictorApi::with_base_url(server_url),
            request_rx,
            response_tx,
        );
        let worker_task = tokio::spawn(worker.run());

        request_tx.send(request).await.unwrap();
        drop(request_tx);

        let mut responses = Vec::new();
        while let Some(response) = response_rx.recv().await {
            if !matches!(response, NetworkResponse::LoadingStateChanged { .. }) {
                responses.push(response);
            }
        }
        worker_task.await.unwrap();
        responses
    }

    #[tokio::test]
    async fn season_load_failure_mid_chain_keeps_earlier_steps() {
        let mut server = mockito::Server::new_async().await;
        let _matchweek = server
            .mock("GET", "/matchweek")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"current_matchweek": 7}"#)
            .create_async()
            .await;
        let _fixtures = server
            .mock("GET", "/fixtures")
            .with_status(500)
            .create_async()
            .await;

        let responses = collect_responses(server.url(), NetworkRequest::LoadSeason).await;

        assert!(matches!(
            responses[0],
            NetworkResponse::MatchweekLoaded { matchweek: 7 }
        ));
        assert!(matches!(responses[1], NetworkResponse::Error { .. }));
        assert_eq!(responses.len(), 2, "sequence aborts at the failed step");
    }

    #[tokio::test]
    async fn week_recompute_falls_back_to_zero_and_empty_on_failure() {
        let mut server = mockito::Server::new_async().await;
        let _points = server
            .mock("POST", "/superbru/points")
            .with_status(500)
            .create_async()
            .await;
        let _evaluate = server
            .mock("POST", "/evaluate")
            .with_status(500)
            .create_async()
            .await;

        let request = NetworkRequest::RecomputeWeek {
            generation: 3,
            matchweek: 12,
            predictions: vec![Prediction::default()],
        };
        let responses = collect_responses(server.url(), request).await;

        assert_eq!(responses.len(), 1);
        match &responses[0] {
            NetworkResponse::WeekRecomputed { generation, points, evaluation } => {
                assert_eq!(*generation, 3);
                assert_eq!(*points, 0);
                assert!(evaluation.is_empty());
            }
            other => panic!("unexpected response {other:?}"),
        }
    }
}
