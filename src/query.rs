// src/query.rs
use async_trait::async_trait;
use log::debug;
use rand::Rng;
use std::fmt;
use std::fmt::Write as _;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tokio::time::timeout;

use crate::models::status::{normalize, Endpoint, StatusRecord};
use crate::utils::{oob_packet, parse_infostring, OOB_HEADER};

#[derive(Debug)]
pub enum QueryError {
    Bind(std::io::Error),
    Send(std::io::Error),
    Recv(std::io::Error),
    TimedOut,
    EmptyResponse,
    MalformedResponse,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind(e) => write!(f, "failed to bind query socket: {}", e),
            Self::Send(e) => write!(f, "failed to send query: {}", e),
            Self::Recv(e) => write!(f, "failed to receive response: {}", e),
            Self::TimedOut => write!(f, "timed out waiting for response"),
            Self::EmptyResponse => write!(f, "server returned no game state"),
            Self::MalformedResponse => write!(f, "server returned a malformed response"),
        }
    }
}

/// Capability for fetching one server's status. The scheduler treats every
/// error variant the same way: one offline notice, no cursor step.
#[async_trait]
pub trait StatusQuery: Send + Sync {
    async fn query(&self, endpoint: &Endpoint) -> Result<StatusRecord, QueryError>;
}

/// Connectionless Quake3 `getstatus` query over UDP.
pub struct Quake3Query {
    timeout: Duration,
}

impl Quake3Query {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl StatusQuery for Quake3Query {
    async fn query(&self, endpoint: &Endpoint) -> Result<StatusRecord, QueryError> {
        // The socket is owned by this scope and closed on every exit path.
        let socket = UdpSocket::bind("0.0.0.0:0").await.map_err(QueryError::Bind)?;

        let nonce_bytes: [u8; 4] = {
            let mut rng = rand::thread_rng();
            rng.gen()
        };
        let mut challenge = String::from("0x");
        for byte in nonce_bytes {
            write!(&mut challenge, "{:02X}", byte).unwrap();
        }

        let request = oob_packet(&format!("getstatus {}", challenge));
        let target = SocketAddr::from((endpoint.host, endpoint.port));

        let started = Instant::now();
        socket
            .send_to(&request, target)
            .await
            .map_err(QueryError::Send)?;

        let mut buffer = [0u8; 2048];
        let (len, _addr) = match timeout(self.timeout, socket.recv_from(&mut buffer)).await {
            Ok(Ok(received)) => received,
            Ok(Err(e)) => return Err(QueryError::Recv(e)),
            Err(_) => return Err(QueryError::TimedOut),
        };
        let ping_ms = started.elapsed().as_millis() as u64;

        if len <= OOB_HEADER.len() {
            return Err(QueryError::EmptyResponse);
        }
        if buffer[..OOB_HEADER.len()] != OOB_HEADER {
            return Err(QueryError::MalformedResponse);
        }

        let payload = String::from_utf8_lossy(&buffer[OOB_HEADER.len()..len]).into_owned();
        let mut lines = payload.lines();
        match lines.next() {
            Some(header) if header.trim() == "statusResponse" => {}
            Some(_) => return Err(QueryError::MalformedResponse),
            None => return Err(QueryError::EmptyResponse),
        }

        let info_line = lines.next().ok_or(QueryError::EmptyResponse)?;
        let mut fields = parse_infostring(info_line);
        if fields.is_empty() {
            return Err(QueryError::EmptyResponse);
        }

        // One line per connected player follows the infostring.
        let players = lines.filter(|line| !line.trim().is_empty()).count();
        fields
            .entry("clients".to_string())
            .or_insert_with(|| players.to_string());

        debug!("{} answered in {}ms", endpoint, ping_ms);
        Ok(normalize(&fields, ping_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    async fn mock_server(response: Option<Vec<u8>>) -> Endpoint {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = socket.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut buffer = [0u8; 2048];
            let (_, from) = socket.recv_from(&mut buffer).await.unwrap();
            if let Some(response) = response {
                socket.send_to(&response, from).await.unwrap();
            }
        });
        Endpoint::new(Ipv4Addr::LOCALHOST, port)
    }

    fn status_response(info: &str, players: &[&str]) -> Vec<u8> {
        let mut body = format!("statusResponse\n{}", info);
        for player in players {
            body.push('\n');
            body.push_str(player);
        }
        oob_packet(&body)
    }

    #[tokio::test]
    async fn queries_a_responding_server() {
        let endpoint = mock_server(Some(status_response(
            "\\hostname\\Arena\\mapname\\q3dm17\\gametype\\0\\sv_maxclients\\16\\clients\\3",
            &[],
        )))
        .await;
        let record = Quake3Query::new(Duration::from_secs(1))
            .query(&endpoint)
            .await
            .unwrap();
        assert_eq!(record.hostname, "Arena");
        assert_eq!(record.map_name, "q3dm17");
        assert_eq!(record.current_players, 3);
        assert_eq!(record.max_players, 16);
        assert_eq!(record.protocol, "unknown");
    }

    #[tokio::test]
    async fn counts_player_lines_when_clients_key_is_absent() {
        let endpoint = mock_server(Some(status_response(
            "\\hostname\\Arena\\mapname\\q3dm6\\sv_maxclients\\8",
            &["0 25 \"alice\"", "12 40 \"bob\""],
        )))
        .await;
        let record = Quake3Query::new(Duration::from_secs(1))
            .query(&endpoint)
            .await
            .unwrap();
        assert_eq!(record.current_players, 2);
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let endpoint = mock_server(None).await;
        let err = Quake3Query::new(Duration::from_millis(100))
            .query(&endpoint)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::TimedOut));
    }

    #[tokio::test]
    async fn response_without_oob_header_is_malformed() {
        let endpoint = mock_server(Some(b"statusResponse\n\\hostname\\x".to_vec())).await;
        let err = Quake3Query::new(Duration::from_secs(1))
            .query(&endpoint)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse));
    }

    #[tokio::test]
    async fn response_without_fields_is_empty() {
        let endpoint = mock_server(Some(oob_packet("statusResponse\n\\"))).await;
        let err = Quake3Query::new(Duration::from_secs(1))
            .query(&endpoint)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::EmptyResponse));
    }
}
