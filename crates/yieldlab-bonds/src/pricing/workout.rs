//! Yield-to-worst over call and put exercise scenarios.
//!
//! Every exercise date after settlement and before the final flow is a
//! workout scenario. The schedule is cut at that date and the remaining
//! notional redeemed at the strike; the yield is solved against the same
//! clean price and the same accrued interest as the full schedule.
//!
//! The holder exercises puts to their advantage and the issuer exercises
//! calls to theirs:
//!
//! ```text
//! maturity leg   = max(YTM, best put yield)
//! yield-to-worst = min(maturity leg, every call yield)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use yieldlab_core::daycounts::DayCountConvention;
use yieldlab_core::types::{CashFlow, Date, Frequency, PaymentType};

use crate::error::{BondError, BondResult};
use crate::pricing::present_value::PricingSchedule;
use crate::pricing::yield_solver::{YieldResult, YieldSolver};
use crate::types::{CallSchedule, OptionKind, PutSchedule};

/// Kind of redemption a workout scenario assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutKind {
    /// Held to the final flow
    Maturity,
    /// Called by the issuer
    Call,
    /// Put by the holder
    Put,
}

impl From<OptionKind> for WorkoutKind {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::Call => WorkoutKind::Call,
            OptionKind::Put => WorkoutKind::Put,
        }
    }
}

/// Yield of one workout scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutYield {
    /// Scenario kind.
    pub kind: WorkoutKind,
    /// Redemption date.
    pub date: Date,
    /// Redemption price, % of outstanding face.
    pub strike: Decimal,
    /// Solved yield (decimal).
    #[serde(rename = "yield")]
    pub yield_value: f64,
    /// Solver iterations.
    pub iterations: u32,
}

/// Yield-to-worst and the scenarios behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResult {
    /// The lowest yield the holder can end up with.
    pub yield_to_worst: f64,
    /// Redemption date of the worst scenario.
    pub worst_date: Date,
    /// Kind of the worst scenario.
    pub worst_kind: WorkoutKind,
    /// Every scenario, maturity first, then by date.
    pub scenarios: Vec<WorkoutYield>,
    /// Iterations summed over all call and put solves.
    pub iterations: u32,
}

/// Inputs shared by every workout scenario of one calculation.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutContext<'a> {
    /// Full cash-flow schedule.
    pub flows: &'a [CashFlow],
    /// Settlement date.
    pub settlement: Date,
    /// Issue date.
    pub issue_date: Date,
    /// Original face value.
    pub face_value: Decimal,
    /// Day count convention.
    pub day_count: DayCountConvention,
    /// Coupon frequency.
    pub frequency: Frequency,
}

impl WorkoutContext<'_> {
    /// Schedule redeemed on `date` at `strike` % of the notional then outstanding.
    ///
    /// On a coupon date the scheduled coupon is paid and any amortization
    /// due that day is repaid at par before the rest is redeemed at the
    /// strike. Off a coupon date the coupon accrued since the previous flow
    /// is paid with the redemption.
    pub fn truncated_schedule(
        &self,
        date: Date,
        strike: Decimal,
        kind: OptionKind,
    ) -> BondResult<Vec<CashFlow>> {
        let payment_type = match kind {
            OptionKind::Call => PaymentType::Call,
            OptionKind::Put => PaymentType::Put,
        };
        let price = strike / Decimal::ONE_HUNDRED;

        let mut truncated: Vec<CashFlow> =
            self.flows.iter().copied().filter(|cf| cf.date() < date).collect();
        let outstanding_before = truncated
            .last()
            .map_or(self.face_value, CashFlow::outstanding_after);

        let redemption = if let Some(on_date) = self.flows.iter().find(|cf| cf.date() == date) {
            let remaining = on_date.outstanding_after();
            CashFlow::new(
                date,
                on_date.coupon(),
                on_date.principal() + remaining * price,
                Decimal::ZERO,
                payment_type,
                on_date.coupon_rate(),
            )
        } else {
            let next = self
                .flows
                .iter()
                .find(|cf| cf.date() > date)
                .ok_or_else(|| {
                    BondError::validation(format!("exercise date {date} is after the final flow"))
                })?;
            let period_start = truncated.last().map_or(self.issue_date, CashFlow::date);
            let dc = self.day_count.to_day_count(self.frequency);
            let period_days = dc.day_count(period_start, next.date());
            let elapsed = if period_days > 0 {
                Decimal::from(dc.day_count(period_start, date)) / Decimal::from(period_days)
            } else {
                Decimal::ZERO
            };
            CashFlow::new(
                date,
                next.coupon() * elapsed,
                outstanding_before * price,
                Decimal::ZERO,
                payment_type,
                next.coupon_rate(),
            )
        };

        truncated.push(redemption);
        Ok(truncated)
    }

    fn solve_scenario(
        &self,
        full: &PricingSchedule,
        solver: &YieldSolver,
        target_clean: f64,
        date: Date,
        strike: Decimal,
        kind: OptionKind,
    ) -> BondResult<WorkoutYield> {
        let flows = self.truncated_schedule(date, strike, kind)?;
        let schedule = PricingSchedule::new(
            &flows,
            self.settlement,
            self.issue_date,
            self.face_value,
            self.day_count,
            self.frequency,
        )?
        .with_accrued(full.accrued(), full.accrued_amount());
        let result = solver.solve(&schedule, target_clean)?;
        debug!(%date, ?kind, yield_value = result.yield_value, "workout scenario solved");
        Ok(WorkoutYield {
            kind: kind.into(),
            date,
            strike,
            yield_value: result.yield_value,
            iterations: result.iterations,
        })
    }

    /// Like `solve_scenario`, but an exercise with no yield in the solver
    /// domain is dropped rather than failing the analysis.
    fn feasible_scenario(
        &self,
        full: &PricingSchedule,
        solver: &YieldSolver,
        target_clean: f64,
        date: Date,
        strike: Decimal,
        kind: OptionKind,
    ) -> BondResult<Option<WorkoutYield>> {
        match self.solve_scenario(full, solver, target_clean, date, strike, kind) {
            Ok(w) => Ok(Some(w)),
            Err(BondError::NoSolution { reason }) => {
                debug!(%date, ?kind, %reason, "workout scenario skipped");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Computes yield-to-worst.
///
/// `full` is the full schedule prepared for pricing, `ytm` its solved
/// yield-to-maturity for `target_clean`. Scenario dates come from the call
/// and put windows, with the schedule's flow dates as coupon dates. An
/// exercise whose yield falls outside the solver domain is left out; only a
/// failure of the maturity leg fails the analysis.
pub fn yield_to_worst(
    ctx: &WorkoutContext<'_>,
    full: &PricingSchedule,
    solver: &YieldSolver,
    target_clean: f64,
    ytm: &YieldResult,
    calls: &CallSchedule,
    puts: &PutSchedule,
) -> BondResult<WorkoutResult> {
    let Some(last) = ctx.flows.last() else {
        return Err(BondError::schedule("cash-flow schedule is empty"));
    };
    let final_date = last.date();
    let coupon_dates: Vec<Date> = ctx.flows.iter().map(CashFlow::date).collect();

    let maturity_leg = WorkoutYield {
        kind: WorkoutKind::Maturity,
        date: final_date,
        strike: Decimal::ONE_HUNDRED,
        yield_value: ytm.yield_value,
        iterations: ytm.iterations,
    };

    let mut put_yields = Vec::new();
    for (date, strike) in puts.exercise_scenarios(&coupon_dates, ctx.settlement, final_date) {
        if let Some(y) = ctx.feasible_scenario(full, solver, target_clean, date, strike, OptionKind::Put)? {
            put_yields.push(y);
        }
    }
    let mut call_yields = Vec::new();
    for (date, strike) in calls.exercise_scenarios(&coupon_dates, ctx.settlement, final_date) {
        if let Some(y) = ctx.feasible_scenario(full, solver, target_clean, date, strike, OptionKind::Call)? {
            call_yields.push(y);
        }
    }

    let holder_best = put_yields
        .iter()
        .copied()
        .fold(maturity_leg, |best, p| if p.yield_value > best.yield_value { p } else { best });
    let worst = call_yields
        .iter()
        .copied()
        .fold(holder_best, |worst, c| if c.yield_value < worst.yield_value { c } else { worst });

    let iterations = put_yields
        .iter()
        .chain(call_yields.iter())
        .map(|w| w.iterations)
        .sum();

    let mut scenarios = Vec::with_capacity(1 + put_yields.len() + call_yields.len());
    scenarios.push(maturity_leg);
    let mut exercises: Vec<WorkoutYield> = put_yields.into_iter().chain(call_yields).collect();
    exercises.sort_by_key(|w| w.date);
    scenarios.extend(exercises);

    debug!(
        yield_to_worst = worst.yield_value,
        worst_date = %worst.date,
        scenarios = scenarios.len(),
        "yield to worst"
    );

    Ok(WorkoutResult {
        yield_to_worst: worst.yield_value,
        worst_date: worst.date,
        worst_kind: worst.kind,
        scenarios,
        iterations,
    })
}
