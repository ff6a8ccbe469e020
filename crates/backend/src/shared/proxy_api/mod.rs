//! Клиент Proxy API - HTTP-шлюза к базе Firebird

pub mod client;

pub use client::{ProxyApi, ProxyApiClient, ProxyApiError, Row};
