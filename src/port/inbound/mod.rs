//! Inbound (driving) ports consumed by inbound adapters.

pub mod catalog;
