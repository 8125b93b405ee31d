//! Calculation requests.
//!
//! [`CalculationRequestDto`] is the JSON contract: camelCase fields, rates
//! and yields as annualized percentages (`5.25` means 5.25%), spreads in
//! basis points. [`CalculationRequest`] is the typed form the engine runs
//! on, with every rate as a decimal fraction. The conversion between the
//! two is the only place a percentage is divided by 100.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use yieldlab_bonds::types::{
    AmortizationSchedule, BondFeatures, BondTerms, CallSchedule, CouponRateChange, CouponSteps,
    PutSchedule,
};
use yieldlab_core::daycounts::DayCountConvention;
use yieldlab_core::types::{CashFlow, Date, Frequency, PaymentType};

use crate::error::{AnalyticsError, EngineResult};

/// Percentage on the wire to decimal fraction.
pub(crate) fn from_percent(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

/// Decimal fraction to percentage on the wire.
pub(crate) fn to_percent(value: Decimal) -> Decimal {
    value * Decimal::ONE_HUNDRED
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Contractual terms as sent by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BondTermsDto {
    /// Issuer name.
    pub issuer: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Face value in currency units.
    pub face_value: Decimal,
    /// Issue date.
    pub issue_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Optional first coupon date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_coupon_date: Option<Date>,
    /// Annual coupon rate, percent.
    pub coupon_rate: Decimal,
    /// Coupons per year (default 2).
    #[serde(default)]
    pub frequency: Frequency,
    /// Day count convention (default 30/360).
    #[serde(default)]
    pub day_count: DayCountConvention,
    /// Business days from trade to settlement.
    #[serde(default)]
    pub settlement_lag_days: u32,
}

/// A coupon rate change, rate in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CouponChangeDto {
    /// First coupon payment date the new rate applies to.
    pub effective_date: Date,
    /// New annual rate, percent.
    pub rate: Decimal,
}

/// A cash flow on the wire, coupon rate in percent.
///
/// Results carry the schedule in this form so it can be persisted and sent
/// back unchanged as a predefined schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CashFlowDto {
    /// Payment date.
    pub date: Date,
    /// Coupon amount.
    pub coupon: Decimal,
    /// Principal amount.
    pub principal: Decimal,
    /// Coupon plus principal.
    pub total: Decimal,
    /// Notional outstanding after this payment.
    pub outstanding_after: Decimal,
    /// Payment type.
    pub payment_type: PaymentType,
    /// Annual coupon rate for the period, percent.
    pub coupon_rate: Decimal,
}

impl From<&CashFlow> for CashFlowDto {
    fn from(cf: &CashFlow) -> Self {
        Self {
            date: cf.date(),
            coupon: cf.coupon(),
            principal: cf.principal(),
            total: cf.total(),
            outstanding_after: cf.outstanding_after(),
            payment_type: cf.payment_type(),
            coupon_rate: to_percent(cf.coupon_rate()),
        }
    }
}

impl TryFrom<&CashFlowDto> for CashFlow {
    type Error = AnalyticsError;

    fn try_from(dto: &CashFlowDto) -> EngineResult<Self> {
        if dto.total != dto.coupon + dto.principal {
            return Err(AnalyticsError::schedule(format!(
                "cash flow on {}: total {} is not coupon {} plus principal {}",
                dto.date, dto.total, dto.coupon, dto.principal
            )));
        }
        Ok(CashFlow::new(
            dto.date,
            dto.coupon,
            dto.principal,
            dto.outstanding_after,
            dto.payment_type,
            from_percent(dto.coupon_rate),
        ))
    }
}

/// A benchmark yield point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BenchmarkDto {
    /// Benchmark yield, percent.
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    /// Tenor point of the benchmark, informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<Date>,
    /// Benchmark name, informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// JSON calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CalculationRequestDto {
    /// Contractual terms.
    pub bond: BondTermsDto,
    /// Scheduled principal repayments.
    #[serde(default)]
    pub amortization: AmortizationSchedule,
    /// Issuer call windows, strikes in % of face.
    #[serde(default)]
    pub calls: CallSchedule,
    /// Holder put windows, strikes in % of face.
    #[serde(default)]
    pub puts: PutSchedule,
    /// Coupon rate changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coupon_changes: Vec<CouponChangeDto>,
    /// Settlement date. Takes precedence over `tradeDate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_date: Option<Date>,
    /// Trade date; settlement is this plus the bond's settlement lag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_date: Option<Date>,
    /// Clean price, % of face.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_price: Option<f64>,
    /// Yield, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_yield: Option<f64>,
    /// Spread over the benchmark, basis points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_spread: Option<f64>,
    /// Benchmark yield point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkDto>,
    /// Predefined schedule used instead of generating one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_flows: Option<Vec<CashFlowDto>>,
}

// =============================================================================
// TYPED REQUEST
// =============================================================================

/// The one input a calculation is anchored on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Locked {
    /// Clean price, % of face.
    Price(f64),
    /// Annual yield, decimal.
    Yield(f64),
    /// Spread over the benchmark, basis points.
    Spread(f64),
}

impl Locked {
    /// Builds the locked input from the three optional wire fields.
    ///
    /// # Errors
    ///
    /// `AmbiguousInput` unless exactly one field is set; `Validation` for a
    /// non-finite value or a non-positive price.
    pub fn from_fields(
        market_price: Option<f64>,
        target_yield_pct: Option<f64>,
        target_spread_bp: Option<f64>,
    ) -> EngineResult<Self> {
        let locked = match (market_price, target_yield_pct, target_spread_bp) {
            (Some(price), None, None) => Locked::Price(price),
            (None, Some(pct), None) => Locked::Yield(pct / 100.0),
            (None, None, Some(bp)) => Locked::Spread(bp),
            (None, None, None) => {
                return Err(AnalyticsError::ambiguous(
                    "one of marketPrice, targetYield or targetSpread is required",
                ))
            }
            _ => {
                let set: Vec<&str> = [
                    ("marketPrice", market_price.is_some()),
                    ("targetYield", target_yield_pct.is_some()),
                    ("targetSpread", target_spread_bp.is_some()),
                ]
                .into_iter()
                .filter_map(|(name, present)| present.then_some(name))
                .collect();
                return Err(AnalyticsError::ambiguous(format!(
                    "exactly one locked input allowed, got {}",
                    set.join(" and ")
                )));
            }
        };
        locked.check()?;
        Ok(locked)
    }

    fn check(self) -> EngineResult<()> {
        match self {
            Locked::Price(p) if !(p.is_finite() && p > 0.0) => Err(AnalyticsError::validation(
                format!("marketPrice must be a positive finite number, got {p}"),
            )),
            Locked::Yield(y) if !y.is_finite() => Err(AnalyticsError::validation(
                "targetYield must be a finite number",
            )),
            Locked::Spread(s) if !s.is_finite() => Err(AnalyticsError::validation(
                "targetSpread must be a finite number",
            )),
            _ => Ok(()),
        }
    }

    /// Wire name of the locked field.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            Locked::Price(_) => "marketPrice",
            Locked::Yield(_) => "targetYield",
            Locked::Spread(_) => "targetSpread",
        }
    }
}

/// A benchmark yield point, yield as a decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct Benchmark {
    /// Benchmark yield, decimal.
    pub yield_value: f64,
    /// Tenor point, informational.
    pub maturity: Option<Date>,
    /// Name, informational.
    pub label: Option<String>,
}

impl From<BenchmarkDto> for Benchmark {
    fn from(dto: BenchmarkDto) -> Self {
        Self {
            yield_value: dto.yield_pct / 100.0,
            maturity: dto.maturity,
            label: dto.label,
        }
    }
}

/// A typed calculation request.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    /// Contractual terms.
    pub terms: BondTerms,
    /// Feature schedules.
    pub features: BondFeatures,
    /// Settlement date.
    pub settlement: Date,
    /// Locked input.
    pub locked: Locked,
    /// Benchmark point for spread conversion and reporting.
    pub benchmark: Option<Benchmark>,
    /// Predefined schedule, adopted instead of generating one.
    pub predefined_schedule: Option<Vec<CashFlow>>,
}

impl CalculationRequest {
    /// A request with no features, benchmark or predefined schedule.
    #[must_use]
    pub fn new(terms: BondTerms, settlement: Date, locked: Locked) -> Self {
        Self {
            terms,
            features: BondFeatures::default(),
            settlement,
            locked,
            benchmark: None,
            predefined_schedule: None,
        }
    }

    /// Builder method to set the feature schedules.
    #[must_use]
    pub fn with_features(mut self, features: BondFeatures) -> Self {
        self.features = features;
        self
    }

    /// Builder method to set the benchmark.
    #[must_use]
    pub fn with_benchmark(mut self, benchmark: Benchmark) -> Self {
        self.benchmark = Some(benchmark);
        self
    }

    /// Builder method to supply a predefined schedule.
    #[must_use]
    pub fn with_predefined_schedule(mut self, flows: Vec<CashFlow>) -> Self {
        self.predefined_schedule = Some(flows);
        self
    }

    /// Parses and converts a JSON request.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let dto: CalculationRequestDto = serde_json::from_str(json)?;
        dto.try_into()
    }
}

impl CalculationRequestDto {
    /// Validated bond terms, coupon rate converted to a decimal.
    pub fn to_terms(&self) -> EngineResult<BondTerms> {
        let bond = &self.bond;
        Ok(BondTerms::builder()
            .issuer(bond.issuer.clone())
            .currency(bond.currency.clone())
            .face_value(bond.face_value)
            .issue_date(bond.issue_date)
            .maturity_date(bond.maturity_date)
            .first_coupon_date(bond.first_coupon_date)
            .coupon_rate(from_percent(bond.coupon_rate))
            .frequency(bond.frequency)
            .day_count(bond.day_count)
            .settlement_lag_days(bond.settlement_lag_days)
            .build()?)
    }

    /// Feature schedules, coupon change rates converted to decimals.
    pub fn to_features(&self) -> BondFeatures {
        BondFeatures {
            amortization: self.amortization.clone(),
            calls: self.calls.clone(),
            puts: self.puts.clone(),
            coupon_changes: CouponSteps::new(
                self.coupon_changes
                    .iter()
                    .map(|c| CouponRateChange::new(c.effective_date, from_percent(c.rate)))
                    .collect(),
            ),
        }
    }

    /// Predefined schedule, if one was supplied.
    pub fn to_predefined_schedule(&self) -> EngineResult<Option<Vec<CashFlow>>> {
        self.cash_flows
            .as_deref()
            .map(|flows| {
                flows
                    .iter()
                    .map(CashFlow::try_from)
                    .collect::<EngineResult<Vec<_>>>()
            })
            .transpose()
    }
}

impl TryFrom<CalculationRequestDto> for CalculationRequest {
    type Error = AnalyticsError;

    fn try_from(dto: CalculationRequestDto) -> EngineResult<Self> {
        let locked = Locked::from_fields(dto.market_price, dto.target_yield, dto.target_spread)?;
        let terms = dto.to_terms()?;

        let settlement = match (dto.settlement_date, dto.trade_date) {
            (Some(settlement), _) => settlement,
            (None, Some(trade)) => terms.settlement_from_trade(trade),
            (None, None) => {
                return Err(AnalyticsError::validation(
                    "settlementDate or tradeDate is required",
                ))
            }
        };

        Ok(Self {
            features: dto.to_features(),
            predefined_schedule: dto.to_predefined_schedule()?,
            benchmark: dto.benchmark.map(Benchmark::from),
            terms,
            settlement,
            locked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn base() -> serde_json::Value {
        json!({
            "bond": {
                "issuer": "Acme Corp",
                "currency": "USD",
                "faceValue": 1000,
                "issueDate": "2025-01-15",
                "maturityDate": "2035-01-15",
                "couponRate": 5.25,
                "frequency": 2,
                "dayCount": "30/360",
                "settlementLagDays": 2
            },
            "settlementDate": "2025-03-03",
            "marketPrice": 99.5
        })
    }

    fn parse(value: serde_json::Value) -> EngineResult<CalculationRequest> {
        CalculationRequest::from_json(&value.to_string())
    }

    #[test]
    fn test_rates_converted_once() {
        let mut value = base();
        value["couponChanges"] = json!([{ "effectiveDate": "2030-01-15", "rate": 6.5 }]);
        let request = parse(value).unwrap();
        assert_eq!(request.terms.coupon_rate(), dec!(0.0525));
        assert_eq!(request.features.coupon_changes.changes()[0].rate, dec!(0.065));
        assert_eq!(request.locked, Locked::Price(99.5));
    }

    #[test]
    fn test_yield_and_benchmark_percent() {
        let mut value = base();
        value.as_object_mut().unwrap().remove("marketPrice");
        value["targetYield"] = json!(4.75);
        value["benchmark"] = json!({ "yield": 4.0, "label": "UST 10Y" });
        let request = parse(value).unwrap();
        assert_eq!(request.locked, Locked::Yield(0.0475));
        let benchmark = request.benchmark.unwrap();
        assert_eq!(benchmark.yield_value, 0.04);
        assert_eq!(benchmark.label.as_deref(), Some("UST 10Y"));
    }

    #[test]
    fn test_two_locked_inputs_are_ambiguous() {
        let mut value = base();
        value["targetYield"] = json!(5.0);
        let err = parse(value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousInputError);
        assert!(err.to_string().contains("marketPrice and targetYield"));
    }

    #[test]
    fn test_no_locked_input_is_ambiguous() {
        let mut value = base();
        value.as_object_mut().unwrap().remove("marketPrice");
        assert_eq!(parse(value).unwrap_err().kind(), ErrorKind::AmbiguousInputError);
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let mut value = base();
        value["marketPrice"] = json!(0.0);
        assert_eq!(parse(value).unwrap_err().kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_settlement_from_trade_date() {
        let mut value = base();
        value.as_object_mut().unwrap().remove("settlementDate");
        // Friday 2025-02-28 plus two business days
        value["tradeDate"] = json!("2025-02-28");
        let request = parse(value).unwrap();
        assert_eq!(request.settlement, d(2025, 3, 4));
    }

    #[test]
    fn test_missing_settlement() {
        let mut value = base();
        value.as_object_mut().unwrap().remove("settlementDate");
        let err = parse(value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_invalid_terms_are_validation_errors() {
        let mut value = base();
        value["bond"]["maturityDate"] = json!("2024-01-15");
        assert_eq!(parse(value).unwrap_err().kind(), ErrorKind::ValidationError);

        let mut value = base();
        value["bond"]["frequency"] = json!(5);
        assert_eq!(parse(value).unwrap_err().kind(), ErrorKind::ValidationError);

        let mut value = base();
        value["marketPrise"] = json!(100);
        assert_eq!(parse(value).unwrap_err().kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_cash_flow_dto_round_trip() {
        let cf = CashFlow::new(
            d(2025, 7, 15),
            dec!(26.25),
            dec!(0),
            dec!(1000),
            PaymentType::Coupon,
            dec!(0.0525),
        );
        let dto = CashFlowDto::from(&cf);
        assert_eq!(dto.coupon_rate, dec!(5.25));
        assert_eq!(CashFlow::try_from(&dto).unwrap(), cf);
    }

    #[test]
    fn test_cash_flow_dto_total_mismatch() {
        let dto = CashFlowDto {
            date: d(2025, 7, 15),
            coupon: dec!(26.25),
            principal: dec!(0),
            total: dec!(26),
            outstanding_after: dec!(1000),
            payment_type: PaymentType::Coupon,
            coupon_rate: dec!(5.25),
        };
        let err = CashFlow::try_from(&dto).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ScheduleError);
    }
}
