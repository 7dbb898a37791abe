//! Client module — transport seam to the session server.
//!
//! Every session operation reaches the server through the [`ServerOps`]
//! trait. `live.rs` provides the real HTTP-backed implementation,
//! `fake.rs` a recording test double.

pub mod error;
pub mod fake;
pub mod live;
pub mod server;

pub use error::TransportError;
pub use fake::{CallRecord, FakeServer};
pub use live::LiveServer;
pub use server::ServerOps;
