//! Persisted values and asynchronous fetch lifecycles.
//!
//! - [`persist`]: values mirrored into a durable [`storage`] backend
//! - [`fetch`]: a four-state request lifecycle over an async fetcher
//! - [`cli`]: the `pokeinfo` command-line shell built on both

pub mod cli;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod mvi;
pub mod persist;
pub mod storage;
