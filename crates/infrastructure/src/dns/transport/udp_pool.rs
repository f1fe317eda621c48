use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, info};

/// Reusable UDP sockets shared by every in-flight exchange.
///
/// Each exchange checks one socket out; the semaphore caps how many are out
/// at once so a burst of resolutions cannot fan out unbounded sockets.
/// Sockets are unconnected and bound to an ephemeral port, so any of them
/// can talk to any server.
pub struct UdpSocketPool {
    idle: Mutex<Vec<Arc<UdpSocket>>>,

    /// Idle sockets kept for reuse; extras are closed on release.
    max_idle: usize,

    semaphore: Arc<Semaphore>,

    max_in_flight: usize,

    total_created: AtomicU64,

    total_reused: AtomicU64,
}

impl UdpSocketPool {
    /// * `max_idle` - sockets kept around between exchanges
    /// * `max_in_flight` - sockets checked out at the same time
    pub fn new(max_idle: usize, max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        info!(max_idle, max_in_flight, "Initializing UDP socket pool");

        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
            semaphore: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
            total_created: AtomicU64::new(0),
            total_reused: AtomicU64::new(0),
        }
    }

    /// Checks a socket out, waiting while `max_in_flight` are in use.
    ///
    /// The socket goes back to the pool when the guard drops, including
    /// when the owning future is cancelled.
    pub async fn acquire(&self, server: SocketAddr) -> Result<PooledUdpSocket<'_>, std::io::Error> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        if let Some(socket) = self.take_idle() {
            self.total_reused.fetch_add(1, Ordering::Relaxed);
            debug!(server = %server, "Reusing UDP socket from pool");
            return Ok(PooledUdpSocket {
                socket,
                pool: self,
                _permit: permit,
            });
        }

        let socket = Self::create_socket(server)?;
        self.total_created.fetch_add(1, Ordering::Relaxed);
        debug!(server = %server, "Created new UDP socket");

        Ok(PooledUdpSocket {
            socket: Arc::new(socket),
            pool: self,
            _permit: permit,
        })
    }

    fn take_idle(&self) -> Option<Arc<UdpSocket>> {
        self.idle.lock().ok().and_then(|mut idle| idle.pop())
    }

    fn create_socket(server: SocketAddr) -> Result<UdpSocket, std::io::Error> {
        use socket2::{Domain, Protocol, Socket, Type};

        let (domain, bind_addr): (Domain, SocketAddr) = if server.is_ipv4() {
            (Domain::IPV4, SocketAddr::from(([0, 0, 0, 0], 0)))
        } else {
            (Domain::IPV6, SocketAddr::from(([0u16; 8], 0)))
        };

        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_recv_buffer_size(256 * 1024)?;
        socket.set_send_buffer_size(128 * 1024)?;
        socket.bind(&bind_addr.into())?;
        socket.set_nonblocking(true)?;

        let std_socket: std::net::UdpSocket = socket.into();
        UdpSocket::from_std(std_socket)
    }

    fn release(&self, socket: Arc<UdpSocket>) {
        let Ok(mut idle) = self.idle.lock() else {
            return;
        };
        if idle.len() < self.max_idle {
            idle.push(socket);
            debug!(pool_size = idle.len(), "Returned UDP socket to pool");
        } else {
            debug!("Pool full, dropping socket");
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            total_created: self.total_created.load(Ordering::Relaxed),
            total_reused: self.total_reused.load(Ordering::Relaxed),
            total_pooled: self.idle.lock().map(|idle| idle.len()).unwrap_or(0),
            in_use: self.in_use(),
        }
    }

    fn in_use(&self) -> usize {
        self.max_in_flight - self.semaphore.available_permits()
    }
}

/// A checked-out socket; returns itself to the pool on drop.
pub struct PooledUdpSocket<'a> {
    socket: Arc<UdpSocket>,
    pool: &'a UdpSocketPool,
    _permit: OwnedSemaphorePermit,
}

impl PooledUdpSocket<'_> {
    pub fn socket(&self) -> &UdpSocket {
        &self.socket
    }
}

impl Drop for PooledUdpSocket<'_> {
    fn drop(&mut self) {
        self.pool.release(self.socket.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Sockets opened since startup
    pub total_created: u64,
    /// Checkouts served by an idle socket
    pub total_reused: u64,
    /// Idle sockets right now
    pub total_pooled: usize,
    /// Sockets checked out right now
    pub in_use: usize,
}
