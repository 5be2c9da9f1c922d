//! Test helpers para aside-server.

#![allow(dead_code, unused_imports)]

pub mod client;
pub mod doubles;

pub use client::{TestClient, TestResponse, client, client_for};
pub use doubles::{CountingStore, FlakyCache};
