use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const PLATFORMS_PATH: &str = "/v2/config/platforms.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub category: Option<Map<String, Value>>,
    pub radar_config: Option<Map<String, Value>>,
    pub sonar_config: Option<Map<String, Value>>,
    pub intended_use: String,
    pub enabled: bool,
    pub openmix_enabled: bool,
    pub private_archetype: bool,
    pub openmix_visible: bool,
    pub public_provider_archetype_id: i64,
}

/// Create/update payload. `name` is required; everything else defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInput {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub category: Option<Map<String, Value>>,
    #[serde(default)]
    pub radar_config: Option<Map<String, Value>>,
    #[serde(default)]
    pub sonar_config: Option<Map<String, Value>>,
    #[serde(default)]
    pub intended_use: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub openmix_enabled: bool,
    #[serde(default)]
    pub private_archetype: bool,
    #[serde(default)]
    pub openmix_visible: bool,
    #[serde(default)]
    pub public_provider_archetype_id: i64,
}

impl PlatformInput {
    fn into_platform(self, id: i64) -> Platform {
        Platform {
            id,
            name: self.name,
            display_name: self.display_name,
            category: self.category,
            radar_config: self.radar_config,
            sonar_config: self.sonar_config,
            intended_use: self.intended_use,
            enabled: self.enabled,
            openmix_enabled: self.openmix_enabled,
            private_archetype: self.private_archetype,
            openmix_visible: self.openmix_visible,
            public_provider_archetype_id: self.public_provider_archetype_id,
        }
    }
}

/// Ids are handed out sequentially from 1 and never reused.
#[derive(Debug, Default)]
pub struct Store {
    last_id: i64,
    platforms: BTreeMap<i64, Platform>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::default();
    Router::new()
        .route(PLATFORMS_PATH, get(list_platforms).post(create_platform))
        .route(
            &format!("{PLATFORMS_PATH}/{{id}}"),
            get(get_platform).put(update_platform).delete(delete_platform),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_platforms(State(db): State<Db>) -> Json<Vec<Platform>> {
    let store = db.read().await;
    Json(store.platforms.values().cloned().collect())
}

async fn create_platform(
    State(db): State<Db>,
    Json(input): Json<PlatformInput>,
) -> (StatusCode, Json<Platform>) {
    let mut store = db.write().await;
    store.last_id += 1;
    let platform = input.into_platform(store.last_id);
    store.platforms.insert(platform.id, platform.clone());
    tracing::info!(id = platform.id, name = %platform.name, "platform created");
    (StatusCode::CREATED, Json(platform))
}

async fn get_platform(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Platform>, StatusCode> {
    let store = db.read().await;
    store.platforms.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_platform(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<PlatformInput>,
) -> Result<Json<Platform>, StatusCode> {
    let mut store = db.write().await;
    let platform = store.platforms.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *platform = input.into_platform(id);
    tracing::info!(id, "platform updated");
    Ok(Json(platform.clone()))
}

async fn delete_platform(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .platforms
        .remove(&id)
        .map(|_| {
            tracing::info!(id, "platform deleted");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}
