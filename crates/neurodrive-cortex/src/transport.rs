//! WebSocket transport to the Cortex service.

use std::io::ErrorKind;
use std::net::TcpStream;
use std::time::Duration;

use tracing::debug;
use tungstenite::client::IntoClientRequest;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Connector, Message, WebSocket};

use crate::error::{CortexError, Result};
use crate::rpc::RpcRequest;

/// Text-frame channel to a Cortex service
pub trait CortexTransport {
    fn send(&mut self, request: &RpcRequest) -> Result<()>;

    /// Next text frame, or `Ok(None)` if nothing arrived within the read timeout
    fn receive(&mut self) -> Result<Option<String>>;

    fn close(&mut self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub url: String,
    /// The local service presents a self-signed certificate
    pub accept_invalid_certs: bool,
    pub read_timeout: Duration,
}

/// Blocking WebSocket connection with a read timeout
pub struct CortexConnection {
    url: String,
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl CortexConnection {
    pub fn connect(options: &ConnectionOptions) -> Result<Self> {
        let request = options
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| CortexError::ConnectionFailed(e.to_string()))?;

        let secure = request.uri().scheme_str() == Some("wss");
        let host = request
            .uri()
            .host()
            .ok_or_else(|| CortexError::ConnectionFailed(format!("no host in {}", options.url)))?
            .to_string();
        let port = request
            .uri()
            .port_u16()
            .unwrap_or(if secure { 443 } else { 80 });

        let stream = TcpStream::connect((host.as_str(), port))
            .map_err(|e| CortexError::ConnectionFailed(format!("{}:{}: {}", host, port, e)))?;
        let timeout_handle = stream
            .try_clone()
            .map_err(|e| CortexError::ConnectionFailed(e.to_string()))?;

        let connector = if secure {
            let tls = native_tls::TlsConnector::builder()
                .danger_accept_invalid_certs(options.accept_invalid_certs)
                .danger_accept_invalid_hostnames(options.accept_invalid_certs)
                .build()
                .map_err(|e| CortexError::ConnectionFailed(e.to_string()))?;
            Connector::NativeTls(tls)
        } else {
            Connector::Plain
        };

        let (socket, _response) =
            tungstenite::client_tls_with_config(request, stream, None, Some(connector))
                .map_err(|e| CortexError::ConnectionFailed(e.to_string()))?;

        // Applied after the handshake so a slow TLS setup is not cut short
        timeout_handle
            .set_read_timeout(Some(options.read_timeout))
            .map_err(|e| CortexError::ConnectionFailed(e.to_string()))?;

        debug!("[CORTEX] Connected to {}", options.url);
        Ok(Self {
            url: options.url.clone(),
            socket,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CortexTransport for CortexConnection {
    fn send(&mut self, request: &RpcRequest) -> Result<()> {
        let text = request.to_json()?;
        self.socket
            .send(Message::Text(text))
            .map_err(|e| CortexError::SendFailed(e.to_string()))
    }

    fn receive(&mut self) -> Result<Option<String>> {
        match self.socket.read() {
            Ok(Message::Text(text)) => Ok(Some(text)),
            Ok(Message::Binary(data)) => String::from_utf8(data)
                .map(Some)
                .map_err(|e| CortexError::ReceiveFailed(e.to_string())),
            Ok(Message::Close(_)) => Err(CortexError::ConnectionClosed),
            Ok(_) => Ok(None), // Ping/Pong
            Err(tungstenite::Error::Io(ref e))
                if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
            {
                Ok(None)
            }
            Err(tungstenite::Error::ConnectionClosed) | Err(tungstenite::Error::AlreadyClosed) => {
                Err(CortexError::ConnectionClosed)
            }
            Err(e) => Err(CortexError::ReceiveFailed(e.to_string())),
        }
    }

    fn close(&mut self) -> Result<()> {
        match self.socket.close(None) {
            Ok(()) | Err(tungstenite::Error::ConnectionClosed) | Err(tungstenite::Error::AlreadyClosed) => {
                Ok(())
            }
            Err(e) => Err(CortexError::SendFailed(e.to_string())),
        }
    }
}
