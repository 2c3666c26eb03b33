//! # Directory Flows
//!
//! Register, search and connect through `DirectoryService` backed by each
//! record store, the way the node wires them.
//!
//! ## Scenarios
//!
//! 1. **Cafe**: register, find at zero distance, connect on site
//! 2. **Duplicate**: same (ssid, address) twice is a conflict
//! 3. **Non-numeric latitude**: rejected before any store access
//! 4. **Boundary**: connect exactly at the configured radius succeeds

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::sync::Arc;

    use wf_01_network_directory::{
        haversine_km, ConnectRequest, DirectoryApi, DirectoryConfig, DirectoryError,
        DirectoryService, ErrorKind, GeoPoint, InMemoryRecordStore, Location, NearbyRequest,
        RecordStore, RegisterRequest, UnavailableRecordStore,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const CAFE_LAT: f64 = 37.8;
    const CAFE_LON: f64 = -122.4;

    fn register_request(ssid: &str, lat: f64, lon: f64, address: &str) -> RegisterRequest {
        RegisterRequest {
            ssid: ssid.to_string(),
            credential: format!("{ssid}-secret"),
            location: Location {
                kind: String::new(),
                coordinates: vec![lon, lat],
                address: address.to_string(),
            },
            description: format!("{ssid} hotspot"),
        }
    }

    fn cafe() -> RegisterRequest {
        RegisterRequest {
            credential: "latte123".to_string(),
            ..register_request("Cafe", CAFE_LAT, CAFE_LON, "12 Main St")
        }
    }

    fn nearby(lat: &str, lon: &str) -> NearbyRequest {
        NearbyRequest {
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            radius: None,
        }
    }

    fn memory_directory(config: DirectoryConfig) -> DirectoryService<InMemoryRecordStore> {
        DirectoryService::new(config, Arc::new(InMemoryRecordStore::new()))
    }

    async fn cafe_scenario<S: RecordStore>(directory: &DirectoryService<S>) {
        let id = directory.register(cafe()).await.unwrap();

        let found = directory
            .nearby_search(nearby("37.8", "-122.4"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert_eq!(found[0].ssid, "Cafe");
        assert!(found[0].distance_km.abs() < 1e-9);

        let connected = directory
            .connect(ConnectRequest {
                network_id: id.to_string(),
                latitude: CAFE_LAT,
                longitude: CAFE_LON,
            })
            .await
            .unwrap();
        assert_eq!(connected.ssid, "Cafe");
        assert_eq!(connected.credential, "latte123");
        assert_eq!(connected.location.address, "12 Main St");
        assert_eq!(connected.location.kind, "Point");
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[tokio::test]
    async fn test_cafe_scenario_in_memory() {
        cafe_scenario(&memory_directory(DirectoryConfig::default())).await;
    }

    #[cfg(feature = "rocksdb")]
    #[tokio::test]
    async fn test_cafe_scenario_rocksdb() {
        use wf_01_network_directory::{RocksDbRecordStore, RocksDbStoreConfig};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("networks").to_string_lossy().into_owned();
        let store = RocksDbRecordStore::open(RocksDbStoreConfig::for_testing(path)).unwrap();
        let directory = DirectoryService::new(DirectoryConfig::default(), Arc::new(store));

        cafe_scenario(&directory).await;
    }

    #[tokio::test]
    async fn test_duplicate_scenario() {
        let directory = memory_directory(DirectoryConfig::default());
        directory.register(cafe()).await.unwrap();

        let err = directory.register(cafe()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Same name elsewhere is a different network.
        directory
            .register(register_request("Cafe", 37.7, -122.3, "99 Other Ave"))
            .await
            .unwrap();
        assert_eq!(directory.list_all().await.unwrap().len(), 2);
        assert!(directory.store().exists("Cafe", "12 Main St").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_have_one_winner() {
        let directory = Arc::new(memory_directory(DirectoryConfig::default()));

        let attempts: Vec<_> = (0..16)
            .map(|_| {
                let directory = Arc::clone(&directory);
                tokio::spawn(async move { directory.register(cafe()).await })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => created += 1,
                Err(DirectoryError::Conflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
    }

    #[tokio::test]
    async fn test_non_numeric_latitude_scenario() {
        // A store that fails every call proves validation happens first.
        let directory = DirectoryService::new(
            DirectoryConfig::default(),
            Arc::new(UnavailableRecordStore {
                reason: "must not be reached".into(),
            }),
        );

        let err = directory
            .nearby_search(nearby("abc", "-122.4"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = directory
            .nearby_search(nearby("37.8", "-122.4"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Store);
    }

    #[tokio::test]
    async fn test_connect_boundary_is_inclusive() {
        let requester = GeoPoint::new(CAFE_LAT + 0.0009, CAFE_LON).unwrap();
        let exact = haversine_km(
            requester.latitude,
            requester.longitude,
            CAFE_LAT,
            CAFE_LON,
        );

        let directory = memory_directory(DirectoryConfig {
            connect_radius_km: exact,
            ..DirectoryConfig::default()
        });
        let id = directory.register(cafe()).await.unwrap();

        let at_limit = ConnectRequest {
            network_id: id.to_string(),
            latitude: requester.latitude,
            longitude: requester.longitude,
        };
        assert!(directory.connect(at_limit).await.is_ok());

        let beyond = ConnectRequest {
            network_id: id.to_string(),
            latitude: CAFE_LAT + 0.0010,
            longitude: CAFE_LON,
        };
        assert!(matches!(
            directory.connect(beyond).await,
            Err(DirectoryError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn test_default_connect_radius_is_100m() {
        let directory = memory_directory(DirectoryConfig::default());
        let id = directory.register(cafe()).await.unwrap();

        // ~89 m and ~111 m north
        let near = ConnectRequest {
            network_id: id.to_string(),
            latitude: CAFE_LAT + 0.0008,
            longitude: CAFE_LON,
        };
        let far = ConnectRequest {
            latitude: CAFE_LAT + 0.0010,
            ..near.clone()
        };
        assert!(directory.connect(near).await.is_ok());
        assert!(directory.connect(far).await.is_err());
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// A record is returned iff it lies within the radius, with the exact
        /// haversine distance.
        #[test]
        fn prop_nearby_matches_haversine(
            dlat in -0.03f64..0.03,
            dlon in -0.03f64..0.03,
            radius in 0.5f64..3.0,
        ) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let directory = memory_directory(DirectoryConfig::default());
                let (lat, lon) = (CAFE_LAT + dlat, CAFE_LON + dlon);
                directory
                    .register(register_request("Spot", lat, lon, "somewhere"))
                    .await
                    .unwrap();

                let expected = haversine_km(CAFE_LAT, CAFE_LON, lat, lon);
                let found = directory
                    .nearby_search(NearbyRequest {
                        latitude: CAFE_LAT.to_string(),
                        longitude: CAFE_LON.to_string(),
                        radius: Some(radius.to_string()),
                    })
                    .await
                    .unwrap();

                // Skip cases too close to the edge for float noise.
                if (expected - radius).abs() > 1e-6 {
                    prop_assert_eq!(found.len(), usize::from(expected < radius));
                }
                for network in &found {
                    prop_assert!((network.distance_km - expected).abs() < 1e-6);
                    prop_assert!(network.distance_km <= radius + 1e-6);
                }
                Ok(())
            })?;
        }
    }
}
