//! TCP listener with port fallback.

use std::io;
use std::net::{IpAddr, SocketAddr};

use tokio::net::TcpListener;

/// Bind `host:port`, moving to the next port while the address is in use.
///
/// At most `attempts` consecutive ports are tried. Errors other than
/// `AddrInUse` are returned immediately.
///
/// # Errors
///
/// Returns the last bind error if no port in the range is free.
pub async fn bind_with_fallback(host: IpAddr, port: u16, attempts: u16) -> io::Result<TcpListener> {
    let mut last_err = io::Error::new(io::ErrorKind::InvalidInput, "no ports to try");

    for offset in 0..attempts.max(1) {
        let Some(candidate) = port.checked_add(offset) else {
            break;
        };
        match TcpListener::bind(SocketAddr::new(host, candidate)).await {
            Ok(listener) => {
                if offset > 0 {
                    tracing::warn!(requested = port, bound = candidate, "Port in use, bound to next free port");
                }
                return Ok(listener);
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                tracing::debug!(port = candidate, "Port in use");
                last_err = e;
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[tokio::test]
    async fn test_moves_past_occupied_port() {
        let taken = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = taken.local_addr().unwrap().port();

        match bind_with_fallback(LOCALHOST, port, 10).await {
            Ok(listener) => assert_ne!(listener.local_addr().unwrap().port(), port),
            // The next ports may also be taken on a busy host.
            Err(e) => assert_eq!(e.kind(), io::ErrorKind::AddrInUse),
        }
    }

    #[tokio::test]
    async fn test_single_attempt_reports_addr_in_use() {
        let taken = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let err = bind_with_fallback(LOCALHOST, port, 1).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AddrInUse);
    }
}
