//! Runtime module — logging init, boot, and the main console loop.

pub mod boot;
pub mod run;
