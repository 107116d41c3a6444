#![warn(clippy::all, missing_docs)]

//! Core domain logic for the rentdesk rental counter.
//!
//! This crate hosts the vehicle and customer records, the flat-file
//! fleet/roster store, the active-rental ledger, and the rental
//! service used by the command-line frontend and any future frontends.

pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use error::RentalError;
pub use ledger::{Rental, RentalLedger};
pub use models::{Car, Customer};
pub use service::{RentalReceipt, RentalService, RentalSummary, ReturnOutcome};
pub use store::FleetStore;
