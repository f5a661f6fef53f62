use crate::dashboard::model::DashboardModel;
use crate::workflow::runner::Runner;
use anyhow::{anyhow, Result};
use log::error;
use offsetcore::model::MatchingCriteria;
use offsetcore::random::SeededRandom;
use offsetcore::session::{MarketBoard, MatchingSession};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub fn dashboard_bind_address(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

#[derive(Debug)]
struct BridgeError;

impl warp::reject::Reject for BridgeError {}

/// Mutable market state shared between the driver and HTTP handlers.
pub struct MarketWorkspace {
    pub board: MarketBoard,
    pub session: MatchingSession,
    pub rng: SeededRandom,
}

type SharedModel = Arc<RwLock<DashboardModel>>;
type SharedWorkspace = Arc<Mutex<MarketWorkspace>>;

/// Hosts the dashboard HTTP endpoint and reruns matching on request.
pub struct DashboardBridge {
    state: SharedModel,
    runner: Arc<Runner>,
    workspace: SharedWorkspace,
}

fn rematch(
    runner: &Runner,
    workspace: &SharedWorkspace,
    state: &SharedModel,
    criteria: &MatchingCriteria,
) -> Result<DashboardModel> {
    let mut guard = workspace
        .lock()
        .map_err(|_| anyhow!("market workspace lock poisoned"))?;
    let MarketWorkspace { board, session, rng } = &mut *guard;
    let result = runner.execute_with(board, session, criteria, rng)?;
    let model = DashboardModel::from_result(&result, criteria, session.certificates());

    let mut published = state
        .write()
        .map_err(|_| anyhow!("dashboard state lock poisoned"))?;
    *published = model.clone();
    Ok(model)
}

impl DashboardBridge {
    pub fn new(runner: Arc<Runner>, workspace: MarketWorkspace) -> Self {
        Self {
            state: Arc::new(RwLock::new(DashboardModel::default())),
            runner,
            workspace: Arc::new(Mutex::new(workspace)),
        }
    }

    /// Serves `GET /snapshot`, `GET /matches`, `GET /predictions` and `POST /match`.
    pub fn spawn(&self, addr: SocketAddr) {
        let state_for_filter = self.state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());
        let workspace = self.workspace.clone();
        let workspace_filter = warp::any().map(move || workspace.clone());

        let snapshot_route = warp::path("snapshot")
            .and(warp::get())
            .and(state_filter.clone())
            .and_then(|state: SharedModel| async move {
                let guard = state
                    .read()
                    .map_err(|_| warp::reject::custom(BridgeError))?;
                Ok::<_, warp::Rejection>(warp::reply::json(&*guard))
            });

        let matches_route = warp::path("matches")
            .and(warp::get())
            .and(state_filter.clone())
            .and_then(|state: SharedModel| async move {
                let guard = state
                    .read()
                    .map_err(|_| warp::reject::custom(BridgeError))?;
                Ok::<_, warp::Rejection>(warp::reply::json(&guard.matches))
            });

        let predictions_route = warp::path("predictions")
            .and(warp::get())
            .and(state_filter.clone())
            .and_then(|state: SharedModel| async move {
                let guard = state
                    .read()
                    .map_err(|_| warp::reject::custom(BridgeError))?;
                Ok::<_, warp::Rejection>(warp::reply::json(&guard.predictions))
            });

        let match_route = warp::path("match")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and(workspace_filter)
            .and_then(
                |criteria: MatchingCriteria,
                 state: SharedModel,
                 runner: Arc<Runner>,
                 workspace: SharedWorkspace| async move {
                    match rematch(&runner, &workspace, &state, &criteria) {
                        Ok(model) => {
                            println!(
                                "[DASHBOARD] {} -> {} matches",
                                model.company_name,
                                model.matches.len()
                            );
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "matches": model.matches.len(),
                                    "best": model.matches.first().map(|m| m.plant_id.clone()),
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            error!("match request failed: {:#}", err);
                            Err(warp::reject::custom(BridgeError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = snapshot_route
                .or(matches_route)
                .or(predictions_route)
                .or(match_route);
            match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(async move {
                    warp::serve(routes).run(addr).await;
                }),
                Err(err) => error!("failed to build dashboard runtime: {}", err),
            }
        });
    }

    pub fn publish(&self, model: &DashboardModel) -> Result<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| anyhow!("dashboard state lock poisoned"))?;
        *guard = model.clone();
        println!(
            "[DASHBOARD] matches: {}, clean hours: {}, certificates: {}",
            guard.matches.len(),
            guard.clean_hours,
            guard.certificates.len()
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[DASHBOARD] {}", message);
    }

    /// Reruns matching with new criteria and publishes the result.
    pub fn request_match(&self, criteria: &MatchingCriteria) -> Result<DashboardModel> {
        rematch(&self.runner, &self.workspace, &self.state, criteria)
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> DashboardModel {
        self.state.read().unwrap().clone()
    }
}
