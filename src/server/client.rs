//! Lot Server Client
//!
//! JSON-over-HTTP client for the parking lot server: vehicle listing and the
//! add/remove/exit mutations.

use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::lot::{VehicleId, VehicleRecord};
use crate::server::LotServer;
use crate::server::error::ServerError;
use crate::server::messages::{AddVehicleRequest, MutationResponse, RemoveVehicleRequest};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("parking-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct LotServerClient {
    client: Client,
    environment: Environment,
}

impl LotServerClient {
    pub fn new(environment: Environment) -> Result<Self, ServerError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.server_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ServerError> {
        serde_json::from_slice(bytes).map_err(ServerError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ServerError> {
        if !response.status().is_success() {
            return Err(ServerError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ServerError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    /// Posts a mutation. The server reports validation and lookup failures as
    /// 4xx responses that still carry `{"success": false}`; those are returned
    /// as a rejected mutation rather than an HTTP error.
    async fn post_mutation<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<MutationResponse, ServerError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        let mut request = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            let response_bytes = response.bytes().await?;
            return Self::decode_response(&response_bytes);
        }

        let response_bytes = response.bytes().await?;
        match Self::decode_response::<MutationResponse>(&response_bytes) {
            Ok(rejection) if !rejection.success => Ok(rejection),
            _ => Err(ServerError::Http {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&response_bytes).into_owned(),
            }),
        }
    }

    fn id_endpoint(prefix: &str, id: VehicleId) -> String {
        format!("{}/{}", prefix, urlencoding::encode(&id.to_string()))
    }
}

#[async_trait::async_trait]
impl LotServer for LotServerClient {
    async fn list_vehicles(&self) -> Result<Vec<VehicleRecord>, ServerError> {
        self.get_request("list").await
    }

    async fn add_vehicle(
        &self,
        request: &AddVehicleRequest,
    ) -> Result<MutationResponse, ServerError> {
        self.post_mutation("add", Some(request)).await
    }

    async fn remove_vehicle(&self, id: VehicleId) -> Result<MutationResponse, ServerError> {
        self.post_mutation("remove", Some(&RemoveVehicleRequest { id }))
            .await
    }

    async fn queue_exit(&self, id: VehicleId) -> Result<MutationResponse, ServerError> {
        self.post_mutation::<()>(&Self::id_endpoint("queue_exit", id), None)
            .await
    }

    async fn exit_vehicle(&self, id: VehicleId) -> Result<MutationResponse, ServerError> {
        self.post_mutation::<()>(&Self::id_endpoint("exit", id), None)
            .await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::Machine;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one HTTP request with a canned response and returns the
    /// request line and body that were received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (Environment, tokio::task::JoinHandle<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            let (head, body_start, content_length) = loop {
                let n = socket.read(&mut buf).await.unwrap();
                received.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&received).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let head = text[..end].to_string();
                    let content_length = head
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    break (head, end + 4, content_length);
                }
            };
            while received.len() < body_start + content_length {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            let request_body = String::from_utf8_lossy(&received[body_start..]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            let request_line = head.lines().next().unwrap_or_default().to_string();
            (request_line, request_body)
        });
        let environment = Environment::Custom {
            server_url: format!("http://{}", addr),
        };
        (environment, handle)
    }

    #[test]
    fn test_build_url_joins_without_double_slash() {
        let client = LotServerClient::new(Environment::Custom {
            server_url: "http://lot.example/".to_string(),
        })
        .unwrap();
        assert_eq!(client.build_url("/list"), "http://lot.example/list");
        assert_eq!(
            LotServerClient::id_endpoint("queue_exit", VehicleId::new(12)),
            "queue_exit/12"
        );
    }

    #[tokio::test]
    /// Should decode the positional vehicle rows of `/list`.
    async fn test_list_vehicles_decodes_rows() {
        let (environment, server) =
            serve_once("200 OK", r#"[[1,"12가3456",1,0,2,0],[2,"34나5678",false,true,3]]"#).await;
        let client = LotServerClient::new(environment).unwrap();

        let vehicles = client.list_vehicles().await.unwrap();
        let (request_line, _) = server.await.unwrap();

        assert!(request_line.starts_with("GET /list "));
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].plate, "12가3456");
        assert!(vehicles[0].low);
        assert_eq!(vehicles[1].machine, 3);
        assert!(vehicles[1].small);
    }

    #[tokio::test]
    /// Should send the add body as JSON with the machine as a string.
    async fn test_add_vehicle_posts_json_body() {
        let (environment, server) = serve_once("200 OK", r#"{"success": true}"#).await;
        let client = LotServerClient::new(environment).unwrap();

        let request = AddVehicleRequest::new("12가3456", true, Machine::Two);
        let response = client.add_vehicle(&request).await.unwrap();
        let (request_line, body) = server.await.unwrap();

        assert!(response.success);
        assert!(request_line.starts_with("POST /add "));
        let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({"plate": "12가3456", "small": true, "machine": "2"})
        );
    }

    #[tokio::test]
    /// A 4xx carrying `{"success": false}` is a rejected mutation, not an error.
    async fn test_rejection_with_error_status_is_not_an_error() {
        let (environment, server) = serve_once(
            "400 Bad Request",
            r#"{"success": false, "msg": "plate required"}"#,
        )
        .await;
        let client = LotServerClient::new(environment).unwrap();

        let request = AddVehicleRequest::new(" ", false, Machine::One);
        let response = client.add_vehicle(&request).await.unwrap();
        server.await.unwrap();

        assert!(!response.success);
        assert_eq!(response.msg.as_deref(), Some("plate required"));
    }

    #[tokio::test]
    /// Should address queue and exit requests by vehicle id.
    async fn test_queue_exit_uses_id_path() {
        let (environment, server) = serve_once("200 OK", r#"{"success": true}"#).await;
        let client = LotServerClient::new(environment).unwrap();

        let response = client.queue_exit(VehicleId::new(5)).await.unwrap();
        let (request_line, _) = server.await.unwrap();

        assert!(response.success);
        assert!(request_line.starts_with("POST /queue_exit/5 "));
    }

    #[tokio::test]
    /// A 5xx without a mutation body surfaces as an HTTP error.
    async fn test_server_error_is_reported_with_status() {
        let (environment, server) = serve_once("500 Internal Server Error", "boom").await;
        let client = LotServerClient::new(environment).unwrap();

        let result = client.remove_vehicle(VehicleId::new(1)).await;
        server.await.unwrap();

        match result {
            Err(ServerError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    /// A malformed list body is a decode error.
    async fn test_malformed_list_is_a_decode_error() {
        let (environment, server) = serve_once("200 OK", r#"{"cars": []}"#).await;
        let client = LotServerClient::new(environment).unwrap();

        let result = client.list_vehicles().await;
        server.await.unwrap();

        assert!(matches!(result, Err(ServerError::Decode(_))));
    }
}
