//! Wire types shared between the WB pickup front-end and its API server.

pub mod domain;
pub mod shared;
pub mod system;
