use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Engineer {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct EngineerInput {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub engineers: Vec<Engineer>,
}

#[derive(Deserialize)]
pub struct EngineerRef {
    pub id: String,
}

#[derive(Deserialize)]
pub struct TeamInput {
    pub name: String,
    #[serde(default)]
    pub engineers: Vec<EngineerRef>,
}

/// Insertion-ordered, so list endpoints return entities in creation order.
pub type Store<T> = Arc<RwLock<Vec<T>>>;

/// Engineer routes also see every team store so edits reach embedded copies.
#[derive(Clone)]
struct EngineerState {
    engineers: Store<Engineer>,
    teams: Vec<Store<Team>>,
}

#[derive(Clone)]
struct TeamState {
    teams: Store<Team>,
    engineers: Store<Engineer>,
}

type ApiResult<T> = Result<T, (StatusCode, String)>;

pub fn app() -> Router {
    let engineers: Store<Engineer> = Arc::default();
    let devs: Store<Team> = Arc::default();
    let ops: Store<Team> = Arc::default();

    let engineer_routes: Router = Router::new()
        .route("/engineers", get(list_engineers).post(create_engineer))
        .route("/engineers/id/{id}", get(get_engineer))
        .route("/engineers/{id}", put(update_engineer).delete(delete_engineer))
        .with_state(EngineerState {
            engineers: engineers.clone(),
            teams: vec![devs.clone(), ops.clone()],
        });

    engineer_routes
        .merge(team_routes(
            "/dev",
            TeamState {
                teams: devs,
                engineers: engineers.clone(),
            },
        ))
        .merge(team_routes("/op", TeamState { teams: ops, engineers }))
}

fn team_routes(root: &str, state: TeamState) -> Router {
    Router::new()
        .route(root, get(list_teams).post(create_team))
        .route(&format!("{root}/id/{{id}}"), get(get_team))
        .route(&format!("{root}/{{id}}"), put(update_team).delete(delete_team))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found(id: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("no resource with id {id}"))
}

fn deleted() -> Json<Value> {
    Json(json!({ "message": "resource deleted" }))
}

async fn list_engineers(State(state): State<EngineerState>) -> Json<Vec<Engineer>> {
    Json(state.engineers.read().await.clone())
}

async fn create_engineer(
    State(state): State<EngineerState>,
    Json(input): Json<EngineerInput>,
) -> (StatusCode, Json<Engineer>) {
    let engineer = Engineer {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
    };
    state.engineers.write().await.push(engineer.clone());
    info!(id = %engineer.id, "engineer created");
    (StatusCode::CREATED, Json(engineer))
}

async fn get_engineer(
    State(state): State<EngineerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Engineer>> {
    let engineers = state.engineers.read().await;
    engineers
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

async fn update_engineer(
    State(state): State<EngineerState>,
    Path(id): Path<String>,
    Json(input): Json<EngineerInput>,
) -> ApiResult<Json<Engineer>> {
    let mut engineers = state.engineers.write().await;
    let engineer = engineers
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| not_found(&id))?;
    engineer.name = input.name;
    engineer.email = input.email;
    let updated = engineer.clone();

    for store in &state.teams {
        for team in store.write().await.iter_mut() {
            for member in team.engineers.iter_mut().filter(|e| e.id == id) {
                *member = updated.clone();
            }
        }
    }
    info!(%id, "engineer updated");
    Ok(Json(updated))
}

/// Removes the engineer and strips it from every Dev and Ops team.
async fn delete_engineer(
    State(state): State<EngineerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let mut engineers = state.engineers.write().await;
    let index = engineers
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| not_found(&id))?;
    engineers.remove(index);

    let mut detached = 0;
    for store in &state.teams {
        for team in store.write().await.iter_mut() {
            let before = team.engineers.len();
            team.engineers.retain(|e| e.id != id);
            detached += before - team.engineers.len();
        }
    }
    info!(%id, detached, "engineer deleted");
    Ok(deleted())
}

/// Expand references into full engineers, rejecting unknown ids.
async fn resolve(state: &TeamState, refs: Vec<EngineerRef>) -> ApiResult<Vec<Engineer>> {
    let engineers = state.engineers.read().await;
    refs.into_iter()
        .map(|r| {
            engineers
                .iter()
                .find(|e| e.id == r.id)
                .cloned()
                .ok_or((StatusCode::BAD_REQUEST, format!("unknown engineer {}", r.id)))
        })
        .collect()
}

async fn list_teams(State(state): State<TeamState>) -> Json<Vec<Team>> {
    Json(state.teams.read().await.clone())
}

async fn create_team(
    State(state): State<TeamState>,
    Json(input): Json<TeamInput>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    let team = Team {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        engineers: resolve(&state, input.engineers).await?,
    };
    state.teams.write().await.push(team.clone());
    info!(id = %team.id, "team created");
    Ok((StatusCode::CREATED, Json(team)))
}

async fn get_team(State(state): State<TeamState>, Path(id): Path<String>) -> ApiResult<Json<Team>> {
    let teams = state.teams.read().await;
    teams
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

async fn update_team(
    State(state): State<TeamState>,
    Path(id): Path<String>,
    Json(input): Json<TeamInput>,
) -> ApiResult<Json<Team>> {
    let engineers = resolve(&state, input.engineers).await?;
    let mut teams = state.teams.write().await;
    let team = teams
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| not_found(&id))?;
    team.name = input.name;
    team.engineers = engineers;
    info!(%id, "team updated");
    Ok(Json(team.clone()))
}

async fn delete_team(State(state): State<TeamState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let mut teams = state.teams.write().await;
    let index = teams
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| not_found(&id))?;
    teams.remove(index);
    info!(%id, "team deleted");
    Ok(deleted())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_serializes_full_engineers() {
        let team = Team {
            id: "t1".to_string(),
            name: "Dev".to_string(),
            engineers: vec![Engineer {
                id: "e1".to_string(),
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            }],
        };
        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["engineers"][0]["email"], "alice@example.com");
    }

    #[test]
    fn team_input_defaults_engineers_to_empty() {
        let input: TeamInput = serde_json::from_str(r#"{"name":"Solo"}"#).unwrap();
        assert!(input.engineers.is_empty());
    }

    #[test]
    fn team_input_ignores_reference_details() {
        let input: TeamInput =
            serde_json::from_str(r#"{"name":"Dev","engineers":[{"id":"e1","name":"ignored"}]}"#).unwrap();
        assert_eq!(input.engineers[0].id, "e1");
    }

    #[test]
    fn engineer_input_rejects_missing_email() {
        let result: Result<EngineerInput, _> = serde_json::from_str(r#"{"name":"Alice"}"#);
        assert!(result.is_err());
    }
}
