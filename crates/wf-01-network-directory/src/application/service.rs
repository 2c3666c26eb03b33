//! # Directory Service
//!
//! Application service orchestrating registration, search and the
//! proximity-gated connect over an injected record store.

use async_trait::async_trait;
use std::sync::Arc;

use wf_telemetry::metric_inc;
use wf_telemetry::metrics::{CONNECT_ATTEMPTS, NEARBY_SEARCHES, REGISTRATIONS, SKIPPED_DOCUMENTS};

use crate::config::DirectoryConfig;
use crate::domain::{
    invariant_non_empty, invariant_search_radius, invariant_within_reach, ConnectRequest,
    ConnectedNetwork, DirectoryError, ErrorKind, GeoPoint, GeoQuery, Location, NearbyNetwork,
    NearbyRequest, NetworkId, NetworkSummary, NewNetwork, RegisterRequest,
};
use crate::ports::{DirectoryApi, RecordStore};

/// Network Directory Service.
pub struct DirectoryService<S: RecordStore> {
    config: DirectoryConfig,
    store: Arc<S>,
}

impl<S: RecordStore> DirectoryService<S> {
    /// Create a service over an already constructed store.
    pub fn new(config: DirectoryConfig, store: Arc<S>) -> Self {
        Self { config, store }
    }

    /// Active configuration.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Underlying store handle.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    async fn try_register(&self, request: RegisterRequest) -> Result<NetworkId, DirectoryError> {
        let network = validate_registration(request)?;

        let address = &network.location.address;
        if self.store.exists(&network.ssid, address).await? {
            return Err(DirectoryError::Conflict {
                ssid: network.ssid,
                address: address.clone(),
            });
        }

        let ssid = network.ssid.clone();
        // DuplicateKey from a concurrent insert converts to Conflict
        let id = self.store.insert(network).await?;
        tracing::info!("[wf-01] Registered network {} ({})", id, ssid);
        Ok(id)
    }

    async fn search(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<NearbyNetwork>, DirectoryError> {
        let query = GeoQuery::within_km(center, radius_km);
        let documents = self.store.find_within(&query).await?;

        let mut results = Vec::with_capacity(documents.len());
        for doc in &documents {
            match doc.nearby(&center) {
                Some(nearby) => results.push(nearby),
                None => {
                    tracing::debug!("[wf-01] Skipping malformed document {}", doc.id);
                    metric_inc!(SKIPPED_DOCUMENTS);
                }
            }
        }
        results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        metric_inc!(NEARBY_SEARCHES);
        tracing::debug!(
            "[wf-01] Nearby search at ({}, {}) r={}km: {} results",
            center.latitude,
            center.longitude,
            radius_km,
            results.len()
        );
        Ok(results)
    }

    async fn try_connect(&self, request: ConnectRequest) -> Result<ConnectedNetwork, DirectoryError> {
        let id = NetworkId::parse(&request.network_id)?;
        let requester = GeoPoint::new(request.latitude, request.longitude)?;

        let doc = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        let stored = doc.point().ok_or_else(|| {
            DirectoryError::Data(format!(
                "network {} has coordinates {:?}",
                id, doc.location.coordinates
            ))
        })?;

        let distance_km = requester.distance_km(&stored);
        invariant_within_reach(distance_km, self.config.connect_radius_km)?;

        tracing::info!(
            "[wf-01] Connect granted for {} at {:.1} m",
            id,
            distance_km * 1000.0
        );
        Ok(ConnectedNetwork {
            ssid: doc.ssid,
            credential: doc.credential,
            location: doc.location,
            description: doc.description,
        })
    }

    fn search_radius(&self, requested: Option<f64>) -> Result<f64, DirectoryError> {
        let radius = requested.unwrap_or(self.config.default_search_radius_km);
        invariant_search_radius(radius, self.config.max_search_radius_km)?;
        Ok(radius)
    }
}

/// Check a registration and normalise its location.
fn validate_registration(request: RegisterRequest) -> Result<NewNetwork, DirectoryError> {
    invariant_non_empty("ssid", &request.ssid)?;
    invariant_non_empty("description", &request.description)?;

    let point = match request.location.coordinates.as_slice() {
        [lon, lat] => GeoPoint::new(*lat, *lon)?,
        other => {
            return Err(DirectoryError::Validation(format!(
                "coordinates must be [longitude, latitude], got {} values",
                other.len()
            )))
        }
    };

    Ok(NewNetwork {
        ssid: request.ssid,
        credential: request.credential,
        location: Location::point(point, request.location.address),
        description: request.description,
    })
}

fn parse_radius(raw: Option<&str>) -> Result<Option<f64>, DirectoryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(Some)
            .map_err(|_| DirectoryError::Validation(format!("radius is not a number: {text:?}"))),
    }
}

#[async_trait]
impl<S: RecordStore> DirectoryApi for DirectoryService<S> {
    async fn register(&self, request: RegisterRequest) -> Result<NetworkId, DirectoryError> {
        let result = self.try_register(request).await;
        let outcome = match &result {
            Ok(_) => "created",
            Err(e) => match e.kind() {
                ErrorKind::Conflict => "conflict",
                ErrorKind::Validation => "rejected",
                _ => "failed",
            },
        };
        metric_inc!(REGISTRATIONS, &[outcome]);
        if let Err(e) = &result {
            if e.is_client_fault() {
                tracing::debug!("[wf-01] Registration refused: {}", e);
            } else {
                tracing::error!("[wf-01] Registration failed: {}", e);
            }
        }
        result
    }

    async fn list_all(&self) -> Result<Vec<NetworkSummary>, DirectoryError> {
        let documents = self.store.find_all().await?;
        let total = documents.len();
        let summaries: Vec<NetworkSummary> =
            documents.iter().filter_map(|doc| doc.summary()).collect();

        let skipped = total - summaries.len();
        if skipped > 0 {
            tracing::debug!("[wf-01] list_all skipped {} malformed documents", skipped);
            SKIPPED_DOCUMENTS.inc_by(skipped as u64);
        }
        Ok(summaries)
    }

    async fn nearby_search(
        &self,
        request: NearbyRequest,
    ) -> Result<Vec<NearbyNetwork>, DirectoryError> {
        let center = GeoPoint::parse(&request.latitude, &request.longitude)?;
        let radius = self.search_radius(parse_radius(request.radius.as_deref())?)?;
        self.search(center, radius).await
    }

    async fn nearby_at(
        &self,
        center: GeoPoint,
        radius_km: Option<f64>,
    ) -> Result<Vec<NearbyNetwork>, DirectoryError> {
        let radius = self.search_radius(radius_km)?;
        self.search(center, radius).await
    }

    async fn connect(&self, request: ConnectRequest) -> Result<ConnectedNetwork, DirectoryError> {
        let result = self.try_connect(request).await;
        let outcome = match &result {
            Ok(_) => "granted",
            Err(e) => match e.kind() {
                ErrorKind::Forbidden => "denied",
                ErrorKind::NotFound => "not_found",
                ErrorKind::Validation => "rejected",
                _ => "failed",
            },
        };
        metric_inc!(CONNECT_ATTEMPTS, &[outcome]);
        if let Err(e) = &result {
            match e.kind() {
                ErrorKind::Forbidden => tracing::warn!("[wf-01] Connect denied: {}", e),
                ErrorKind::Data | ErrorKind::Store => {
                    tracing::error!("[wf-01] Connect failed: {}", e)
                }
                _ => tracing::debug!("[wf-01] Connect refused: {}", e),
            }
        }
        result
    }

    async fn health(&self) -> Result<(), DirectoryError> {
        self.store.ping().await?;
        Ok(())
    }
}
