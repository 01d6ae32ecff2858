//! CLI command handlers
//!
//! Each subcommand lives in its own module with a `handle` entry point.

pub mod api_server;
pub mod config;
pub mod helpers;
pub mod incentive;
pub mod payout_json;
pub mod payouts;
pub mod process;
pub mod score;
pub mod serve;
