// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> Config {
    let mut full = vec!["feedback-worker", "--database-url", "postgres://localhost/feedback"];
    full.extend_from_slice(args);
    Config::parse_from(full)
}

#[test]
fn defaults_are_valid() {
    let config = parse(&[]);
    assert_eq!(config.max_deliver, 5);
    assert_eq!(config.prefetch_count, 10);
    assert_eq!(config.db_pool_min, 5);
    assert_eq!(config.db_pool_max, 20);
    assert_eq!(config.redis_pool_max, 50);
    assert!(config.validate().is_ok());
}

#[test]
fn rejects_zero_prefetch() {
    let config = parse(&["--prefetch-count", "0"]);
    assert!(config.validate().is_err());
}

#[test]
fn rejects_empty_database_url() {
    let config = Config::parse_from(["feedback-worker", "--database-url", ""]);
    assert!(config.validate().is_err());
}

#[test]
fn rejects_db_pool_min_greater_than_max() {
    let config = parse(&["--db-pool-min", "25", "--db-pool-max", "20"]);
    assert!(config.validate().is_err());
}

#[test]
fn rejects_zero_redis_pool_max() {
    let config = parse(&["--redis-pool-max", "0"]);
    assert!(config.validate().is_err());
}
