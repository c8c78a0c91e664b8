//! PostgreSQL storage for TruFurrs.
//!
//! Documents live in a single JSONB table keyed by collection and id. The
//! repositories here implement the `domain` repository traits on top of it,
//! plus the account tables used by the local auth provider.

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
