use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};

use crate::error::ListenerError;
use crate::game::MapState;

use super::ingest::{apply_datagram, IngestOutcome};

/// Largest datagram we accept; object messages are well under this
const MAX_DATAGRAM_SIZE: usize = 64 * 1024;

/// Upper bound on datagrams drained per tick so a flood cannot starve render
const MAX_DATAGRAMS_PER_POLL: usize = 4096;

/// Running totals for the log
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub received: u64,
    pub applied: u64,
    pub clears: u64,
    pub dropped: u64,
    pub enemies_evicted: u64,
}

impl IngestStats {
    fn record(&mut self, outcome: &IngestOutcome) {
        self.received += 1;
        match outcome {
            IngestOutcome::Cleared { .. } => self.clears += 1,
            IngestOutcome::Upserted { enemies_evicted, .. } => {
                self.applied += 1;
                self.enemies_evicted += *enemies_evicted as u64;
            }
            IngestOutcome::Dropped(_) => self.dropped += 1,
        }
    }
}

/// Non-blocking UDP receiver, drained once per frame
pub struct UdpListener {
    socket: Option<UdpSocket>,
    buf: Vec<u8>,
    stats: IngestStats,
}

impl UdpListener {
    pub fn bind(addr: SocketAddr) -> Result<Self, ListenerError> {
        let socket = UdpSocket::bind(addr).map_err(|source| ListenerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        socket.set_nonblocking(true).map_err(ListenerError::Configure)?;

        match socket.local_addr() {
            Ok(local) => log::info!("Listening for map updates on udp://{}", local),
            Err(_) => log::info!("Listening for map updates on udp://{}", addr),
        }

        Ok(Self {
            socket: Some(socket),
            buf: vec![0; MAX_DATAGRAM_SIZE],
            stats: IngestStats::default(),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Apply every datagram that has arrived since the last poll.
    /// Returns the number processed.
    pub fn poll(&mut self, state: &mut MapState, now: f64) -> usize {
        let Some(socket) = &self.socket else {
            return 0;
        };

        let mut processed = 0;
        while processed < MAX_DATAGRAMS_PER_POLL {
            match socket.recv_from(&mut self.buf) {
                Ok((len, from)) => {
                    log::trace!("Received {} bytes from {}", len, from);
                    let outcome = apply_datagram(state, &self.buf[..len], now);
                    self.stats.record(&outcome);
                    processed += 1;
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                // ICMP port unreachable and friends surface here on some
                // platforms; they don't affect later datagrams
                Err(e) => {
                    log::warn!("UDP receive error: {}", e);
                    break;
                }
            }
        }
        processed
    }

    /// Close the socket. Safe to call more than once.
    pub fn close(&mut self) {
        if self.socket.take().is_some() {
            log::info!(
                "Listener closed: {} received, {} applied, {} clears, {} dropped, {} enemies evicted",
                self.stats.received,
                self.stats.applied,
                self.stats.clears,
                self.stats.dropped,
                self.stats.enemies_evicted
            );
        }
    }
}
