//! In-process mock of the Pokemon REST API
//!
//! Special search terms trigger failure modes: `boom` answers 500 and
//! `malformed` answers 200 with a body that is not a page.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use pokedex::model::Pokemon;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Default)]
struct Store {
    pokemons: Vec<Pokemon>,
    next_id: u64,
    queries: Vec<HashMap<String, String>>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    store: Arc<Mutex<Store>>,
}

impl MockApi {
    pub fn seed(&self, names: &[&str]) {
        let mut store = self.store.lock().unwrap();
        for name in names {
            store.next_id += 1;
            let id = store.next_id;
            let number = id as u32;
            store.pokemons.push(Pokemon {
                id: id.to_string(),
                name: name.to_string(),
                number,
                types: vec!["normal".into()],
                ability: "run-away".into(),
                image_url: format!("https://img.example/{number}.png"),
            });
        }
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.store
            .lock()
            .unwrap()
            .queries
            .last()
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.store.lock().unwrap().pokemons.len()
    }
}

pub struct MockServer {
    pub url: String,
    pub api: MockApi,
}

pub async fn spawn_server() -> MockServer {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let api = MockApi::default();
    let app = Router::new()
        .route("/pokemons", get(list_pokemons).post(create_pokemon))
        .route(
            "/pokemons/:id",
            get(get_pokemon).patch(update_pokemon).delete(delete_pokemon),
        )
        .with_state(api.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    MockServer {
        url: format!("http://{addr}"),
        api,
    }
}

async fn list_pokemons(
    State(api): State<MockApi>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut store = api.store.lock().unwrap();
    store.queries.push(params.clone());

    let search = params.get("search").map(|s| s.to_lowercase());
    match search.as_deref() {
        Some("boom") => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("malformed") => return Json(json!({"items": "nope", "total": 1})).into_response(),
        _ => {}
    }

    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(12);
    let matching: Vec<&Pokemon> = store
        .pokemons
        .iter()
        .filter(|p| search.as_deref().map_or(true, |s| p.name.contains(s)))
        .collect();
    let total = matching.len();
    let items: Vec<&Pokemon> = matching
        .into_iter()
        .skip((page.max(1) - 1) * limit)
        .take(limit)
        .collect();

    Json(json!({
        "items": items,
        "total": total,
        "page": page,
        "limit": limit,
        "totalPages": total.div_ceil(limit.max(1)),
    }))
    .into_response()
}

async fn get_pokemon(State(api): State<MockApi>, Path(id): Path<String>) -> Response {
    let store = api.store.lock().unwrap();
    match store.pokemons.iter().find(|p| p.id == id) {
        Some(pokemon) => Json(pokemon.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response(),
    }
}

async fn create_pokemon(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    let name = body["name"].as_str().unwrap_or_default().trim().to_string();
    if name.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "name is required"})))
            .into_response();
    }
    if name == "silent-conflict" {
        return StatusCode::CONFLICT.into_response();
    }

    let mut store = api.store.lock().unwrap();
    if store.pokemons.iter().any(|p| p.name.eq_ignore_ascii_case(&name)) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "This Pokémon already exists"})),
        )
            .into_response();
    }

    store.next_id += 1;
    let number = body["number"].as_u64().unwrap_or_default() as u32;
    let pokemon = Pokemon {
        id: store.next_id.to_string(),
        name,
        number,
        types: serde_json::from_value(body["types"].clone()).unwrap_or_default(),
        ability: body["ability"].as_str().unwrap_or_default().to_string(),
        image_url: format!("https://img.example/{number}.png"),
    };
    store.pokemons.push(pokemon.clone());
    (StatusCode::CREATED, Json(pokemon)).into_response()
}

async fn update_pokemon(
    State(api): State<MockApi>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = api.store.lock().unwrap();
    let Some(pokemon) = store.pokemons.iter_mut().find(|p| p.id == id) else {
        return (StatusCode::NOT_FOUND, "no such pokemon").into_response();
    };
    if let Some(name) = body["name"].as_str() {
        pokemon.name = name.to_string();
    }
    if let Some(number) = body["number"].as_u64() {
        pokemon.number = number as u32;
    }
    if let Ok(types) = serde_json::from_value(body["types"].clone()) {
        pokemon.types = types;
    }
    if let Some(ability) = body["ability"].as_str() {
        pokemon.ability = ability.to_string();
    }
    Json(pokemon.clone()).into_response()
}

async fn delete_pokemon(State(api): State<MockApi>, Path(id): Path<String>) -> Response {
    let mut store = api.store.lock().unwrap();
    let before = store.pokemons.len();
    store.pokemons.retain(|p| p.id != id);
    if store.pokemons.len() == before {
        (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
