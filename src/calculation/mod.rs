//! Calculation logic for the payroll declaration engine.
//!
//! This module contains the calculation functions behind a monthly
//! declaration: French bank holidays, the contractual calendar, majored
//! hours, paid-leave accrual, the sick-leave deduction, daily allowances,
//! the August paid-leave payout, and the declaration assembling them.

mod allowances;
mod bank_holidays;
mod calendar;
mod conges_payes;
mod declaration;
mod majored_hours;
mod paid_leave;
mod sick_leave;

pub use allowances::{AllowancePayment, AllowancesResult, calculate_allowances};
pub use bank_holidays::{BankHolidayCache, bank_holidays_for_year, easter_date};
pub use calendar::{
    CalendarDay, CalendarWeek, calendar_grid, hours_for_day, is_business_day,
    normal_hours_in_month, sick_leave_hours, week_key, worked_days_count,
};
pub use conges_payes::{CongesPayesResult, PayoutMethod, calculate_conges_payes};
pub use declaration::{DeclarationCalculation, compute_declaration, round_to_cents};
pub use majored_hours::{MajoredHoursResult, compute_majored_hours, qualifying_weeks};
pub use paid_leave::{
    PaidLeaveCountersResult, compute_acquired_paid_leave, compute_paid_leave_saturday_days,
    compute_worked_weeks, count_paid_leave_taken_in_period, paid_leave_counters,
};
pub use sick_leave::{SickLeaveResult, calculate_sick_leave};
