pub mod ingest;
pub mod listener;
pub mod protocol;

pub use ingest::{apply_datagram, apply_message, IngestOutcome};
pub use listener::{IngestStats, UdpListener};
pub use protocol::{decode_datagram, InboundMessage};
