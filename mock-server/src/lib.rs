use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const ENDPOINT: &str = "/api/v2/execution_environments/";
pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionEnvironment {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub related: Map<String, Value>,
    pub summary_fields: Map<String, Value>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub organization: Option<i64>,
    pub image: String,
    pub managed: bool,
    pub credential: Option<i64>,
    pub pull: String,
}

/// Writable fields. Every field is optional so the same shape serves POST and
/// PATCH; POST checks `name` and `image` itself.
#[derive(Debug, Default, Deserialize)]
pub struct WriteExecutionEnvironment {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub organization: Option<Option<i64>>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub credential: Option<Option<i64>>,
    pub pull: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Page {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ExecutionEnvironment>,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    items: HashMap<i64, ExecutionEnvironment>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(ENDPOINT, get(list_execution_environments).post(create_execution_environment))
        .route(
            "/api/v2/execution_environments/{id}",
            get(get_execution_environment)
                .patch(update_execution_environment)
                .delete(delete_execution_environment),
        )
        .route(
            "/api/v2/execution_environments/{id}/",
            get(get_execution_environment)
                .patch(update_execution_environment)
                .delete(delete_execution_environment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// AWX answers unknown ids with this body.
fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
}

fn required(fields: &[&str]) -> Response {
    let body: BTreeMap<&str, [&str; 1]> = fields
        .iter()
        .map(|field| (*field, ["This field is required."]))
        .collect();
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn page_link(page: usize, page_size: usize, name: Option<&str>) -> Result<String, Response> {
    let mut pairs = vec![
        ("page", page.to_string()),
        ("page_size", page_size.to_string()),
    ];
    if let Some(name) = name {
        pairs.push(("name", name.to_string()));
    }
    let query = serde_urlencoded::to_string(&pairs).map_err(|err| {
        tracing::error!(error = %err, "failed to encode page link");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })?;
    Ok(format!("{ENDPOINT}?{query}"))
}

async fn list_execution_environments(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page>, Response> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page == 0 || page_size == 0 {
        return Err(not_found());
    }

    let store = db.read().await;
    let mut matching: Vec<&ExecutionEnvironment> = store
        .items
        .values()
        .filter(|ee| params.name.as_deref().is_none_or(|name| ee.name == name))
        .collect();
    matching.sort_by_key(|ee| ee.id);

    let count = matching.len();
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return Err(not_found());
    };
    if start > 0 && start >= count {
        return Err(not_found());
    }
    let results = matching
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    let name = params.name.as_deref();
    let has_next = start
        .checked_add(page_size)
        .is_some_and(|end| end < count);
    let next = if has_next {
        Some(page_link(page + 1, page_size, name)?)
    } else {
        None
    };
    let previous = if page > 1 {
        Some(page_link(page - 1, page_size, name)?)
    } else {
        None
    };
    Ok(Json(Page {
        count,
        next,
        previous,
        results,
    }))
}

async fn create_execution_environment(
    State(db): State<Db>,
    Json(input): Json<WriteExecutionEnvironment>,
) -> Response {
    let missing: Vec<&str> = [("name", input.name.is_none()), ("image", input.image.is_none())]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
    if !missing.is_empty() {
        return required(&missing);
    }

    let mut store = db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    let now = Utc::now();
    let mut ee = ExecutionEnvironment {
        id,
        kind: "execution_environment".to_string(),
        url: format!("{ENDPOINT}{id}/"),
        related: Map::new(),
        summary_fields: Map::new(),
        created: now,
        modified: now,
        name: String::new(),
        description: String::new(),
        organization: None,
        image: String::new(),
        managed: false,
        credential: None,
        pull: String::new(),
    };
    apply(&mut ee, input);
    store.items.insert(id, ee.clone());
    (StatusCode::CREATED, Json(ee)).into_response()
}

async fn get_execution_environment(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.items.get(&id) {
        Some(ee) => Json(ee.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_execution_environment(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<WriteExecutionEnvironment>,
) -> Response {
    let mut store = db.write().await;
    let Some(ee) = store.items.get_mut(&id) else {
        return not_found();
    };
    apply(ee, input);
    ee.modified = Utc::now();
    Json(ee.clone()).into_response()
}

async fn delete_execution_environment(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut store = db.write().await;
    match store.items.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

fn apply(ee: &mut ExecutionEnvironment, input: WriteExecutionEnvironment) {
    if let Some(name) = input.name {
        ee.name = name;
    }
    if let Some(description) = input.description {
        ee.description = description;
    }
    if let Some(organization) = input.organization {
        ee.organization = organization;
        ee.related.remove("organization");
        if let Some(org) = organization {
            ee.related.insert(
                "organization".to_string(),
                Value::String(format!("/api/v2/organizations/{org}/")),
            );
        }
    }
    if let Some(image) = input.image {
        ee.image = image;
    }
    if let Some(credential) = input.credential {
        ee.credential = credential;
    }
    if let Some(pull) = input.pull {
        ee.pull = pull;
    }
}
