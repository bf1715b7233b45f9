//! Declaration pipeline.
//!
//! The [`PayrollEngine`] owns the loaded configuration and the bank holiday
//! cache, and recomputes declarations and paid-leave counters on request.
//! The host application calls it again after every input change: a day-state
//! edit, a contract edit, or a different displayed month.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::calculation::{
    BankHolidayCache, compute_declaration, paid_leave_counters, round_to_cents,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ChildCalendar, DayState, DeclarationBatch, DeclarationReport, Household, PaidLeaveCounters,
    PayMonth,
};

/// Computes declarations for the configured children.
///
/// # Example
///
/// ```no_run
/// use pajemploi_engine::engine::PayrollEngine;
/// use pajemploi_engine::models::{Household, PayMonth};
///
/// let engine = PayrollEngine::load("./config/pajemploi").unwrap();
/// let household = Household::with_children(["Axelle", "Brune"]);
/// let batch = engine.declaration_batch(&household, PayMonth::new(2026, 2).unwrap()).unwrap();
/// println!("{}", serde_json::to_string_pretty(&batch).unwrap());
/// ```
#[derive(Debug)]
pub struct PayrollEngine {
    config: ConfigLoader,
    holidays: BankHolidayCache,
}

impl PayrollEngine {
    /// Creates an engine with an empty holiday cache.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_holiday_cache(config, BankHolidayCache::new())
    }

    /// Creates an engine reusing an existing holiday cache.
    pub fn with_holiday_cache(config: ConfigLoader, holidays: BankHolidayCache) -> Self {
        Self { config, holidays }
    }

    /// Loads the configuration directory and creates an engine.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Ok(Self::new(ConfigLoader::load(path)?))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the holiday cache.
    pub fn holidays(&self) -> &BankHolidayCache {
        &self.holidays
    }

    /// Paid-leave counters of one child as of `month`.
    pub fn paid_leave_counters(
        &self,
        child: &str,
        calendar: &ChildCalendar,
        month: PayMonth,
    ) -> EngineResult<PaidLeaveCounters> {
        let contract = self.config.get_contract(child)?;
        let result = paid_leave_counters(
            contract,
            &calendar.day_sets(),
            month,
            self.config.regime(),
            &self.holidays,
            1,
        );
        Ok(result.counters)
    }

    /// Paid-leave counters of every configured child present in the household.
    pub fn household_counters(
        &self,
        household: &Household,
        month: PayMonth,
    ) -> BTreeMap<String, PaidLeaveCounters> {
        self.config
            .contracts()
            .iter()
            .filter_map(|contract| {
                let calendar = household.calendar(&contract.name).ok()?;
                let counters = paid_leave_counters(
                    contract,
                    &calendar.day_sets(),
                    month,
                    self.config.regime(),
                    &self.holidays,
                    1,
                )
                .counters;
                Some((contract.name.clone(), counters))
            })
            .collect()
    }

    /// Broadcasts `state` for `date` to every child of the household.
    ///
    /// Balances are recomputed as of `month` first, so a child with no paid
    /// leave left gets a day off instead.
    pub fn set_state_all(
        &self,
        household: &mut Household,
        date: NaiveDate,
        state: DayState,
        month: PayMonth,
    ) {
        let counters = if state == DayState::PaidLeave {
            self.household_counters(household, month)
        } else {
            BTreeMap::new()
        };
        household.set_state_all(date, state, &counters);
    }

    /// Computes the declaration of one child for `month`.
    pub fn declare(
        &self,
        child: &str,
        calendar: &ChildCalendar,
        month: PayMonth,
    ) -> EngineResult<DeclarationReport> {
        let start_time = Instant::now();
        let contract = self.config.get_contract(child)?;
        let regime = self.config.regime();
        let days = calendar.day_sets();

        let accrual = paid_leave_counters(contract, &days, month, regime, &self.holidays, 1);
        let calculation = compute_declaration(
            contract,
            month,
            &days,
            accrual.counters.acquired_previous,
            regime,
            &self.holidays,
            accrual.audit_step.step_number + 1,
        );

        let mut audit_steps = Vec::with_capacity(calculation.audit_steps.len() + 1);
        audit_steps.push(accrual.audit_step);
        audit_steps.extend(calculation.audit_steps);

        let declaration = calculation.declaration;
        info!(
            child = %child,
            month = %month,
            worked_days = declaration.worked_days,
            majored_hours = %declaration.majored_hours_count.normalize(),
            total_salary = %round_to_cents(declaration.total_salary),
            duration_us = start_time.elapsed().as_micros(),
            "Declaration computed"
        );

        Ok(DeclarationReport {
            declaration,
            counters: accrual.counters,
            audit_steps,
        })
    }

    /// Computes one declaration per configured child, in configuration order.
    ///
    /// A configured child missing from the household is declared as having
    /// worked every day. Household children without a contract are skipped.
    pub fn declare_household(
        &self,
        household: &Household,
        month: PayMonth,
    ) -> EngineResult<Vec<DeclarationReport>> {
        for name in household.children() {
            if self.config.get_contract(name).is_err() {
                warn!(child = %name, "No contract configured, skipping child");
            }
        }

        let default_calendar = ChildCalendar::default();
        let mut reports = Vec::with_capacity(self.config.contracts().len());
        for contract in self.config.contracts() {
            let calendar = match household.calendar(&contract.name) {
                Ok(calendar) => calendar,
                Err(EngineError::ChildNotFound { .. }) => {
                    warn!(child = %contract.name, "No day states recorded, assuming all days worked");
                    &default_calendar
                }
                Err(err) => return Err(err),
            };
            reports.push(self.declare(&contract.name, calendar, month)?);
        }

        info!(
            month = %month,
            declarations = reports.len(),
            "Household declarations computed"
        );
        Ok(reports)
    }

    /// The payload handed to the portal form filler for `month`.
    pub fn declaration_batch(
        &self,
        household: &Household,
        month: PayMonth,
    ) -> EngineResult<DeclarationBatch> {
        let declarations = self
            .declare_household(household, month)?
            .into_iter()
            .map(|report| report.declaration)
            .collect();
        Ok(DeclarationBatch { declarations })
    }
}
