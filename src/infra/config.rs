//! Centralized configuration (environment variables + defaults).

use crate::domain::search::RangeStrategy;
use anyhow::Context;
use std::path::PathBuf;

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// HTTP listen port (default 1323).
pub fn port() -> anyhow::Result<u16> {
    parse_or("PORT", 1323)
}

/// Pool size; each in-flight request holds at most one connection.
pub fn db_max_connections() -> anyhow::Result<u32> {
    Ok(parse_or("DB_MAX_CONNECTIONS", 10u32)?.max(1))
}

pub fn chair_condition_path() -> PathBuf {
    path_or("CHAIR_CONDITION_PATH", "fixture/chair_condition.json")
}

pub fn estate_condition_path() -> PathBuf {
    path_or("ESTATE_CONDITION_PATH", "fixture/estate_condition.json")
}

pub fn features_bit_path() -> PathBuf {
    path_or("FEATURES_BIT_PATH", "fixture/features_bit.json")
}

/// `interval` (default) or `bucketed`.
pub fn search_strategy() -> anyhow::Result<RangeStrategy> {
    match std::env::var("SEARCH_STRATEGY") {
        Ok(v) => v.parse().map_err(|e: String| anyhow::anyhow!("SEARCH_STRATEGY: {e}")),
        Err(_) => Ok(RangeStrategy::default()),
    }
}

fn path_or(key: &str, default: &str) -> PathBuf {
    std::env::var_os(key)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key} must be a valid number: {e}")),
        Err(_) => Ok(default),
    }
}
