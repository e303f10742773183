//! Kaution Engine library crate.
//!
//! This crate computes German residential security deposits (Kaution)
//! under the three-month cap of §551 BGB: the deposit owed, the three
//! installments, the yearly interest or fee of the chosen way of
//! holding it and a five-year value projection.  Applications may call
//! [`engine::compute`] directly or embed the HTTP API via
//! [`api::build_router`].

pub mod models;
pub mod catalog;
pub mod calendar;
pub mod money;
pub mod engine;
pub mod report;
pub mod error;
pub mod config;
pub mod api;

pub use catalog::{DepositTypeOption, DEPOSIT_TYPES};
pub use engine::{compare_deposit_types, compute, compute_batch, compute_standard};
pub use models::{DepositInputs, DepositResult, DepositTypeId, InstallmentLine, Recommendation};
