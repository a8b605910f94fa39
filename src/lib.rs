//! macbots - reports on relevant mac bots from infra snapshots
//!
//! This library loads the bot and builder snapshots, filters mac bots by
//! master and builder blocklists, and joins builders to the hostnames that
//! back them.

pub mod blocklist;
pub mod cli;
pub mod error;
pub mod filter;
pub mod report;
pub mod snapshot;
