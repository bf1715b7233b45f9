//! Payroll declaration engine for French Pajemploi childcare contracts.
//!
//! This crate turns a calendar of per-day attendance states (worked, off, sick,
//! paid leave, contract off) into the monthly figures declared on the Pajemploi
//! portal: salary, majored hours, sick-leave deduction, allowances, paid-leave
//! accrual and the August paid-leave payout.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
