// src/announce.rs
use async_trait::async_trait;
use log::{debug, error};
use tokio::net::UdpSocket;

use crate::utils::oob_packet;

/// Fire-and-forget delivery of a rendered message. Implementations log
/// failures and never propagate them to the scheduler.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, text: &str);
}

/// Delivers messages to a game server's chat through an rcon `say`.
pub struct RconAnnouncer {
    address: String,
    password: String,
}

impl RconAnnouncer {
    pub fn new(address: String, password: String) -> Self {
        Self { address, password }
    }
}

#[async_trait]
impl Announcer for RconAnnouncer {
    async fn announce(&self, text: &str) {
        let packet = oob_packet(&format!("rcon {} say {}", self.password, text));
        let socket = match UdpSocket::bind("0.0.0.0:0").await {
            Ok(socket) => socket,
            Err(e) => {
                error!("could not bind rcon socket: {}", e);
                return;
            }
        };
        match socket.send_to(&packet, self.address.as_str()).await {
            Ok(_) => debug!("announced {} bytes to {}", text.len(), self.address),
            Err(e) => error!("failed to send rcon say to {}: {}", self.address, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sends_an_oob_rcon_say() {
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let announcer = RconAnnouncer::new(address, "secret".to_string());
        announcer.announce("hello arena").await;

        let mut buffer = [0u8; 512];
        let (len, _) = listener.recv_from(&mut buffer).await.unwrap();
        assert_eq!(&buffer[..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&buffer[4..len], b"rcon secret say hello arena");
    }

    #[tokio::test]
    async fn unreachable_target_does_not_panic() {
        // Reserved TEST-NET-1 address; the send either errors or vanishes.
        let announcer = RconAnnouncer::new("192.0.2.1:27960".to_string(), String::new());
        announcer.announce("into the void").await;
    }
}
