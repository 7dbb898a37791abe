//! Service module — background state synchronization.

pub mod sync;

pub use sync::sync_loop;
