//! Core data models for the payroll declaration engine.
//!
//! This module contains the domain models shared by the calculation modules
//! and the engine pipeline.

mod child_contract;
mod day_state;
mod declaration_result;
mod household;
mod pay_month;

pub use child_contract::ChildContract;
pub(crate) use day_state::monday_of;
pub use day_state::{
    ChildCalendar, DateSet, DaySets, DayState, expand_all_day_event, parse_iso_date,
};
pub use declaration_result::{
    AuditStep, DeclarationBatch, DeclarationReport, DeclarationResult, PaidLeaveCounters,
};
pub use household::{CellState, Household};
pub use pay_month::{PayMonth, ReferencePeriod};
