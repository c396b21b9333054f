// Brandlens: brand-monitoring dashboard backend.
//
// This is the library root. Each module corresponds to a major subsystem:
// the local mention store, the per-request site aggregation, the upstream
// BrandMentions clients, and the JSON API served to the dashboard.

pub mod config;
pub mod db;
pub mod error;
pub mod sites;
pub mod upstream;
pub mod web;
