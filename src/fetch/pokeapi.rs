//! PokeAPI-backed entity fetcher.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use super::error::FetchError;
use super::fetcher::EntityFetcher;
use crate::config::ApiConfig;

/// Longest upstream error body kept in a [`FetchError::Upstream`] message.
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub sprite: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base: u32,
}

impl Pokemon {
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats.iter().find(|s| s.name == name).map(|s| s.base)
    }

    pub fn hp(&self) -> Option<u32> {
        self.stat("hp")
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {}", self.id, self.name)?;
        writeln!(f, "  types:     {}", self.types.join(", "))?;
        writeln!(f, "  abilities: {}", self.abilities.join(", "))?;
        write!(f, "  height:    {}  weight: {}", self.height, self.weight)?;
        for stat in &self.stats {
            write!(f, "\n  {:<16}{}", stat.name, stat.base)?;
        }
        Ok(())
    }
}

// Wire shapes of the `/pokemon/{name}` response; only the fields we use.

#[derive(Deserialize)]
struct RawPokemon {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    types: Vec<RawTypeSlot>,
    #[serde(default)]
    abilities: Vec<RawAbilitySlot>,
    #[serde(default)]
    stats: Vec<RawStat>,
    #[serde(default)]
    sprites: RawSprites,
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Deserialize)]
struct RawTypeSlot {
    slot: u32,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Deserialize)]
struct RawAbilitySlot {
    ability: NamedResource,
}

#[derive(Deserialize)]
struct RawStat {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Deserialize, Default)]
struct RawSprites {
    front_default: Option<String>,
}

impl From<RawPokemon> for Pokemon {
    fn from(raw: RawPokemon) -> Self {
        let mut types = raw.types;
        types.sort_by_key(|t| t.slot);

        Self {
            id: raw.id,
            name: raw.name,
            height: raw.height,
            weight: raw.weight,
            types: types.into_iter().map(|t| t.kind.name).collect(),
            abilities: raw.abilities.into_iter().map(|a| a.ability.name).collect(),
            stats: raw
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    base: s.base_stat,
                })
                .collect(),
            sprite: raw.sprites.front_default,
        }
    }
}

/// HTTP client for `GET {base_url}/pokemon/{name}`.
pub struct PokeApiClient {
    client: Client,
    base_url: Url,
    request_timeout: Duration,
}

impl PokeApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            FetchError::InvalidRequest(format!("base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidRequest(format!(
                "base URL '{}' cannot have path segments",
                config.base_url
            )));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            request_timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// URL for `name`, normalized the way PokeAPI expects (lower-case).
    pub fn url_for(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("pokemon")
                .push(&name.trim().to_lowercase());
        }
        url
    }

    async fn do_fetch(&self, name: &str) -> Result<Pokemon, FetchError> {
        // `/pokemon/` with no name is the list endpoint, not a lookup.
        if name.trim().is_empty() {
            return Err(FetchError::InvalidRequest(
                "pokemon name must not be blank".to_string(),
            ));
        }

        let url = self.url_for(name);
        debug!(%url, "requesting pokemon");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                name: name.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                message: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let bytes = response.bytes().await?;
        let raw: RawPokemon =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(raw.into())
    }
}

#[async_trait]
impl EntityFetcher for PokeApiClient {
    type Entity = Pokemon;

    async fn fetch(&self, name: &str) -> Result<Pokemon, FetchError> {
        match timeout(self.request_timeout, self.do_fetch(name)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                secs: self.request_timeout.as_secs(),
            }),
        }
    }
}

fn truncate(text: &str, max_len: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
