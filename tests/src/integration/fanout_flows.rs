//! # Fan-out Flows
//!
//! Waypoint suggestions joined with directory searches, using a scripted
//! suggester in place of Gemini.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wf_01_network_directory::{
        DirectoryApi, DirectoryConfig, DirectoryService, GeoPoint, InMemoryRecordStore, Location,
        RegisterRequest, UnavailableRecordStore,
    };
    use wf_02_waypoint_fanout::{
        FanoutApi, FanoutConfig, FanoutError, MockSuggester, SuggesterError, Waypoint,
        WaypointFanoutService, WaypointRequest,
    };
    use wifi_node::NodeSuggester;

    const ROUTE: &str = r#"Here is your route:
```json
{
  "stops": [
    {"latitude": 37.8, "longitude": -122.4, "name": "Harbor Cafe"},
    {"latitude": "37.81", "longitude": "-122.41", "name": "Library"},
    {"latitude": null, "longitude": -122.42, "name": "Somewhere vague"}
  ],
  "route_description": "Coastal walk"
}
```"#;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    async fn seeded_directory() -> Arc<DirectoryService<InMemoryRecordStore>> {
        let directory = Arc::new(DirectoryService::new(
            DirectoryConfig::default(),
            Arc::new(InMemoryRecordStore::new()),
        ));
        for (ssid, lat, lon, address) in [
            ("HarborGuest", 37.8, -122.4, "1 Pier"),
            ("LibraryOpen", 37.81, -122.41, "2 Book Ln"),
            ("FarAway", 38.5, -121.5, "3 Valley Rd"),
        ] {
            directory
                .register(RegisterRequest {
                    ssid: ssid.to_string(),
                    credential: "secret".to_string(),
                    location: Location {
                        kind: "Point".to_string(),
                        coordinates: vec![lon, lat],
                        address: address.to_string(),
                    },
                    description: format!("{ssid} guest network"),
                })
                .await
                .unwrap();
        }
        directory
    }

    #[tokio::test]
    async fn test_route_joined_with_networks() {
        let suggester = Arc::new(MockSuggester::replying(ROUTE));
        let fanout = WaypointFanoutService::new(
            FanoutConfig::default(),
            seeded_directory().await,
            Arc::clone(&suggester),
        );

        let route = fanout
            .recommend_stops_with_networks(point(37.79, -122.39), point(37.82, -122.43))
            .await
            .unwrap();

        assert_eq!(route.route_description, "Coastal walk");
        let names: Vec<_> = route
            .stops
            .iter()
            .map(|s| s.waypoint.name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, ["Harbor Cafe", "Library", "Somewhere vague"]);

        // The two networks are ~1.4 km apart, beyond the 1 km default radius.
        let ssids = |i: usize| -> Vec<String> {
            route.stops[i].networks.iter().map(|n| n.ssid.clone()).collect()
        };
        assert_eq!(ssids(0), ["HarborGuest"]);
        assert_eq!(ssids(1), ["LibraryOpen"]);
        assert!(route.stops[0].networks[0].distance_km < 1e-9);

        // Stop without a latitude is kept with no networks.
        assert!(route.stops[2].networks.is_empty());

        let sent = suggester.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].max_stops, FanoutConfig::default().default_stops);
        assert_eq!(sent[0].stop_type, FanoutConfig::default().default_stop_type);
    }

    #[tokio::test]
    async fn test_store_outage_yields_empty_lists() {
        let directory = Arc::new(DirectoryService::new(
            DirectoryConfig::default(),
            Arc::new(UnavailableRecordStore::default()),
        ));
        let fanout = WaypointFanoutService::new(
            FanoutConfig::default(),
            directory,
            Arc::new(MockSuggester::replying(ROUTE)),
        );

        let route = fanout
            .recommend_stops_with_networks(point(37.79, -122.39), point(37.82, -122.43))
            .await
            .unwrap();
        assert_eq!(route.stops.len(), 3);
        assert!(route.stops.iter().all(|s| s.networks.is_empty()));
    }

    #[tokio::test]
    async fn test_caller_stops_isolate_malformed_entries() {
        let fanout = WaypointFanoutService::new(
            FanoutConfig::default(),
            seeded_directory().await,
            Arc::new(MockSuggester::replying(ROUTE)),
        );

        let stops = vec![
            Waypoint {
                latitude: Some(200.0),
                longitude: Some(0.0),
                name: Some("Off the map".into()),
            },
            Waypoint::at(point(38.5, -121.5), Some("Valley".into())),
            Waypoint::default(),
        ];
        let joined = fanout.networks_for_stops(stops.clone()).await;

        assert_eq!(joined.len(), 3);
        assert_eq!(joined[0].waypoint, stops[0]);
        assert!(joined[0].networks.is_empty());
        assert_eq!(joined[1].networks.len(), 1);
        assert_eq!(joined[1].networks[0].ssid, "FarAway");
        assert!(joined[2].networks.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_format_error() {
        let fanout = WaypointFanoutService::new(
            FanoutConfig::default(),
            seeded_directory().await,
            Arc::new(MockSuggester::replying("I cannot help with routes today.")),
        );

        let err = fanout
            .recommend_stops_with_networks(point(37.79, -122.39), point(37.82, -122.43))
            .await
            .unwrap_err();
        assert!(matches!(err, FanoutError::UpstreamFormat(_)));
        assert!(!err.is_client_fault());
    }

    #[tokio::test]
    async fn test_upstream_status_is_not_retried() {
        let suggester = Arc::new(MockSuggester::failing(SuggesterError::Status {
            status: 503,
            body: "overloaded".into(),
        }));
        let fanout = WaypointFanoutService::new(
            FanoutConfig::default(),
            seeded_directory().await,
            Arc::clone(&suggester),
        );

        let err = fanout
            .find_waypoints(WaypointRequest {
                start: point(37.79, -122.39),
                end: point(37.82, -122.43),
                stop_type: "cafe".into(),
                max_stops: 2,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, FanoutError::Upstream(SuggesterError::Status { status: 503, .. })));
        assert_eq!(suggester.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_node_without_key_reports_not_configured() {
        let fanout = WaypointFanoutService::new(
            FanoutConfig::default(),
            seeded_directory().await,
            Arc::new(NodeSuggester::from_config(Default::default())),
        );

        let err = fanout
            .recommend_stops_with_networks(point(37.79, -122.39), point(37.82, -122.43))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FanoutError::Upstream(SuggesterError::NotConfigured(_))
        ));
    }
}
