//! Geo Service (C11) — external collaborator consumed by the location scorer.
//!
//! `estimate` matches the collaborator interface in SPEC_FULL §6: given hint
//! strings and transport constraints, return a travel score and reachability
//! rather than a bare distance, so the location scorer can fold it directly
//! into its distance-estimation sub-score (§4.5).

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Car,
    PublicTransport,
    Bike,
    Walk,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoEstimateRequest {
    pub origin_hint: String,
    pub destination_hint: String,
    pub max_distance_km: u32,
    pub transport_modes: HashSet<TransportMode>,
    pub max_travel_minutes: HashMap<TransportMode, u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoEstimateResponse {
    pub travel_score: f64,
    pub reachable: bool,
    #[serde(default)]
    pub details: Map<String, Value>,
}

/// Stateless from the engine's perspective: no session affinity is assumed
/// across calls (§6).
#[async_trait]
pub trait GeoService: Send + Sync {
    async fn estimate(&self, request: &GeoEstimateRequest) -> anyhow::Result<GeoEstimateResponse>;
}

/// Used when `GEO_SERVICE_URL` isn't configured. Always errors, forcing the
/// location scorer into heuristic mode (§4.5).
pub struct NullGeoService;

#[async_trait]
impl GeoService for NullGeoService {
    async fn estimate(&self, _request: &GeoEstimateRequest) -> anyhow::Result<GeoEstimateResponse> {
        anyhow::bail!("no geo service configured")
    }
}

/// Thin HTTP client over a travel-estimate backend, mirroring the teacher's
/// `reqwest::Client` + fixed-`Duration`-timeout idiom for external calls.
pub struct HttpGeoService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGeoService {
    pub fn new(base_url: String, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .expect("reqwest client builder should not fail with a static config");
        Self { client, base_url }
    }
}

#[async_trait]
impl GeoService for HttpGeoService {
    async fn estimate(&self, request: &GeoEstimateRequest) -> anyhow::Result<GeoEstimateResponse> {
        let url = format!("{}/estimate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .inspect_err(|err| warn!(%err, "geo service request failed"))?
            .error_for_status()?
            .json::<GeoEstimateResponse>()
            .await?;
        Ok(response)
    }
}
