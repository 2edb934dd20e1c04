//! Client disconnect detection.
//!
//! actix-web keeps polling a handler after its peer has gone away, so the
//! server registers [`on_connect`] to keep a duplicate handle on every
//! accepted socket. Handlers race their work against [`disconnected`], which
//! resolves once the peer closes or resets the connection.

use std::any::Any;
use std::time::Duration;

use actix_web::HttpRequest;
use actix_web::dev::Extensions;

/// Backoff while unread bytes (a pipelined request) sit on the socket.
const PIPELINED_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A second handle on a connection's socket, used only for peeking.
pub struct PeerSocket(tokio::net::TcpStream);

impl PeerSocket {
    /// Resolves once the peer has closed or reset the connection.
    ///
    /// Peeking never consumes data, so the HTTP dispatcher still sees every
    /// byte the client sends.
    pub async fn closed(&self) {
        let mut buf = [0_u8; 1];

        loop {
            match self.0.peek(&mut buf).await {
                Ok(0) => return,
                Err(e) => {
                    log::debug!("Peer socket error: {e}");
                    return;
                }
                Ok(_) => tokio::time::sleep(PIPELINED_POLL_INTERVAL).await,
            }
        }
    }
}

/// `HttpServer::on_connect` hook that attaches a [`PeerSocket`] to each
/// plain TCP connection.
pub fn on_connect(connection: &dyn Any, extensions: &mut Extensions) {
    let Some(stream) = connection.downcast_ref::<actix_web::rt::net::TcpStream>() else {
        return;
    };

    match duplicate(stream) {
        Ok(peer) => {
            extensions.insert(peer);
        }
        Err(e) => log::debug!("Failed to watch connection for disconnects: {e}"),
    }
}

#[cfg(unix)]
fn duplicate(stream: &tokio::net::TcpStream) -> std::io::Result<PeerSocket> {
    use std::os::fd::AsFd as _;

    let fd = stream.as_fd().try_clone_to_owned()?;
    let stream = std::net::TcpStream::from(fd);
    stream.set_nonblocking(true)?;

    Ok(PeerSocket(tokio::net::TcpStream::from_std(stream)?))
}

#[cfg(not(unix))]
fn duplicate(_stream: &tokio::net::TcpStream) -> std::io::Result<PeerSocket> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "socket duplication is only supported on unix",
    ))
}

/// Resolves when the client behind `req` disconnects. Never resolves for
/// connections that are not being watched.
pub async fn disconnected(req: &HttpRequest) {
    match req.conn_data::<PeerSocket>() {
        Some(peer) => peer.closed().await,
        None => std::future::pending().await,
    }
}
