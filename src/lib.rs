//! LocaPay: rent and shared-electricity billing for a house of tenants.
//!
//! [`billing`] holds the apportionment engine, [`domain::Roster`] the validated
//! tenant collection. Everything else is plumbing around them: persistence,
//! configuration, and a local JSON API.

pub mod api;
pub mod billing;
pub mod config;
pub mod controller;
pub mod domain;
pub mod repo;
pub mod telemetry;
