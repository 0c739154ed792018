//! Data models for the distributions dashboard.
//!
//! This module provides the canonical filter state, the server-owned
//! distribution records, and configuration types.

mod config;
mod distribution;
mod filter;

pub use config::{
    ApiConfig, BASE_URL_ENV, CacheConfig, Config, ConfigError, DisplayConfig,
    LEGACY_BASE_URL_ENV, STRICT_ENV, THEME_ENV,
};
pub use distribution::{
    Distribution, DistributionStatus, PageResponse, Pagination, ResponseMeta, parse_timestamp,
};
pub use filter::{
    DEFAULT_LIMIT, DEFAULT_SORT, FilterState, FilterTag, PAGE_SIZES, PriorityTag, SortKey,
    StatusTag, join_tags, split_tags,
};
