//! # HTTP Flows
//!
//! A fully wired node served on an ephemeral port and driven with a real
//! HTTP client.

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    use wf_03_api_gateway::{GatewayConfig, GatewayError};
    use wifi_node::{NodeConfig, SubsystemContainer};

    struct TestServer {
        base: String,
        client: reqwest::Client,
        stop: Option<oneshot::Sender<()>>,
        task: JoinHandle<Result<(), GatewayError>>,
    }

    impl TestServer {
        async fn start() -> Self {
            let mut config = NodeConfig::default();
            config.gateway = GatewayConfig::for_testing();
            let container = Arc::new(SubsystemContainer::new(config).unwrap());

            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr: SocketAddr = listener.local_addr().unwrap();
            let (stop, stopped) = oneshot::channel::<()>();

            let task = tokio::spawn(async move {
                container
                    .gateway
                    .serve(listener, async {
                        let _ = stopped.await;
                    })
                    .await
            });

            Self {
                base: format!("http://{addr}"),
                client: reqwest::Client::new(),
                stop: Some(stop),
                task,
            }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base, path)
        }

        async fn shutdown(mut self) {
            if let Some(stop) = self.stop.take() {
                let _ = stop.send(());
            }
            self.task.await.unwrap().unwrap();
        }
    }

    fn cafe() -> Value {
        json!({
            "ssid": "Cafe",
            "password": "latte123",
            "location": {"type": "Point", "coordinates": [-122.4, 37.8], "address": "12 Main St"},
            "description": "corner cafe"
        })
    }

    #[tokio::test]
    async fn test_register_search_connect_over_http() {
        let server = TestServer::start().await;

        let res = server
            .client
            .post(server.url("/api/wifi/scan"))
            .json(&cafe())
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["message"], "WiFi details saved");
        let id = body["id"].as_str().unwrap().to_string();

        let res = server
            .client
            .get(server.url("/api/wifi/nearby"))
            .query(&[("latitude", "37.8"), ("longitude", "-122.4")])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let found: Value = res.json().await.unwrap();
        assert_eq!(found[0]["ssid"], "Cafe");
        assert!(found[0].get("password").is_none());

        let res = server
            .client
            .post(server.url("/api/wifi/connect"))
            .json(&json!({"wifi_id": id, "latitude": 37.8, "longitude": -122.4}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let connected: Value = res.json().await.unwrap();
        assert_eq!(connected["password"], "latte123");

        let res = server
            .client
            .post(server.url("/api/wifi/connect"))
            .json(&json!({"wifi_id": id, "latitude": 37.81, "longitude": -122.4}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_duplicate_and_validation_over_http() {
        let server = TestServer::start().await;
        let scan = server.url("/api/wifi/scan");

        let first = server.client.post(&scan).json(&cafe()).send().await.unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = server.client.post(&scan).json(&cafe()).send().await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: Value = second.json().await.unwrap();
        assert_eq!(body["error"], "conflict");

        let res = server
            .client
            .get(server.url("/api/wifi/nearby"))
            .query(&[("latitude", "abc"), ("longitude", "-122.4")])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let listed: Value = server
            .client
            .get(server.url("/api/wifi"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_fanout_without_key_is_bad_gateway() {
        let server = TestServer::start().await;

        let res = server
            .client
            .get(server.url("/api/gemini/recommendstopswifi"))
            .query(&[
                ("start_lat", "37.79"),
                ("start_lng", "-122.39"),
                ("end_lat", "37.82"),
                ("end_lng", "-122.43"),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let health = server.client.get(server.url("/health")).send().await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        server.shutdown().await;
    }
}
