//! Configuration types for the statutory payroll schedule.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a schedule directory.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::TaxPolicy;

/// Metadata about the statutory schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Short identifier for the schedule (e.g., "NG-PAYE-2024").
    pub code: String,
    /// The human-readable name of the schedule.
    pub name: String,
    /// ISO country code of the issuing jurisdiction.
    pub jurisdiction: String,
    /// The date from which this schedule applies.
    pub effective_date: NaiveDate,
    /// URL to the official documentation.
    pub source_url: String,
}

/// A single PAYE band over annual taxable income.
///
/// Income in `[lower, upper)` is taxed at `rate`. A bracket with no
/// `upper` bound is the top band and taxes everything above `lower`.
///
/// # Example
///
/// ```
/// use payroll_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let band = TaxBracket::new(
///     Decimal::new(300_000, 0),
///     Some(Decimal::new(600_000, 0)),
///     Decimal::new(11, 2),
/// );
/// assert_eq!(band.taxable_portion(Decimal::new(450_000, 0)), Decimal::new(150_000, 0));
/// assert_eq!(band.taxable_portion(Decimal::new(900_000, 0)), Decimal::new(300_000, 0));
/// assert_eq!(band.taxable_portion(Decimal::new(100_000, 0)), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound of the band.
    pub lower: Decimal,
    /// Exclusive upper bound of the band, `None` for the top band.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Marginal rate applied within the band.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a new bracket.
    pub fn new(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> Self {
        Self { lower, upper, rate }
    }

    /// Returns the part of `income` that falls inside this band.
    pub fn taxable_portion(&self, income: Decimal) -> Decimal {
        if income <= self.lower {
            return Decimal::ZERO;
        }
        let ceiling = match self.upper {
            Some(upper) => income.min(upper),
            None => income,
        };
        ceiling - self.lower
    }
}

/// Parameters of the Consolidated Relief Allowance.
///
/// Relief is `max(minimum, gross * floor_rate) + gross * gross_rate`,
/// computed over annual gross income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedRelief {
    /// The fixed relief floor (₦200,000 in 2024).
    pub minimum: Decimal,
    /// Share of gross used when it exceeds the fixed floor (1%).
    pub floor_rate: Decimal,
    /// Additional share of gross always relieved (20%).
    pub gross_rate: Decimal,
}

/// PAYE configuration from paye.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeConfig {
    /// Progressive bands, ascending.
    pub brackets: Vec<TaxBracket>,
    /// Relief parameters, used when the relief policy is selected.
    pub consolidated_relief: ConsolidatedRelief,
    /// Whether relief is applied when a caller does not choose a policy.
    #[serde(default)]
    pub apply_consolidated_relief: bool,
}

/// A deduction charged at a flat rate of monthly gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRate {
    /// Statutory reference for the deduction.
    pub clause: String,
    /// Share of gross pay.
    pub rate: Decimal,
}

/// A flat-rate deduction with a monthly ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CappedRate {
    /// Statutory reference for the deduction.
    pub clause: String,
    /// Share of gross pay.
    pub rate: Decimal,
    /// Maximum deducted in one month.
    pub monthly_cap: Decimal,
}

/// Flat statutory deductions from deductions.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionConfig {
    /// Contributory pension.
    pub pension: FlatRate,
    /// National Housing Fund.
    pub nhf: CappedRate,
    /// Nigeria Social Insurance Trust Fund.
    pub nsitf: FlatRate,
    /// Industrial Training Fund.
    pub itf: FlatRate,
}

/// The complete statutory schedule loaded from YAML files.
///
/// A `StatutoryConfig` can only be built through [`StatutoryConfig::new`],
/// which rejects bracket tables that are empty, unsorted, overlapping,
/// gapped or bounded at the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatutoryConfig {
    metadata: ScheduleMetadata,
    paye: PayeConfig,
    deductions: DeductionConfig,
}

impl StatutoryConfig {
    /// Creates a new schedule from its component parts, validating it.
    pub fn new(
        metadata: ScheduleMetadata,
        paye: PayeConfig,
        deductions: DeductionConfig,
    ) -> EngineResult<Self> {
        validate_brackets(&paye.brackets)?;
        validate_relief(&paye.consolidated_relief)?;
        validate_deductions(&deductions)?;
        Ok(Self {
            metadata,
            paye,
            deductions,
        })
    }

    /// The 2024 Nigerian schedule, built in.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::StatutoryConfig;
    ///
    /// let config = StatutoryConfig::nigeria_2024();
    /// assert_eq!(config.brackets().len(), 6);
    /// assert!(config.brackets().last().unwrap().upper.is_none());
    /// ```
    pub fn nigeria_2024() -> Self {
        let naira = |n: i64| Decimal::new(n, 0);
        let pct = |n: i64, scale: u32| Decimal::new(n, scale);

        Self {
            metadata: ScheduleMetadata {
                code: "NG-PAYE-2024".to_string(),
                name: "Nigeria PAYE and Statutory Deductions 2024".to_string(),
                jurisdiction: "NG".to_string(),
                effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
                source_url: "https://www.firs.gov.ng/personal-income-tax".to_string(),
            },
            paye: PayeConfig {
                brackets: vec![
                    TaxBracket::new(naira(0), Some(naira(300_000)), pct(7, 2)),
                    TaxBracket::new(naira(300_000), Some(naira(600_000)), pct(11, 2)),
                    TaxBracket::new(naira(600_000), Some(naira(1_100_000)), pct(15, 2)),
                    TaxBracket::new(naira(1_100_000), Some(naira(1_600_000)), pct(19, 2)),
                    TaxBracket::new(naira(1_600_000), Some(naira(3_200_000)), pct(21, 2)),
                    TaxBracket::new(naira(3_200_000), None, pct(24, 2)),
                ],
                consolidated_relief: ConsolidatedRelief {
                    minimum: naira(200_000),
                    floor_rate: pct(1, 2),
                    gross_rate: pct(20, 2),
                },
                apply_consolidated_relief: false,
            },
            deductions: DeductionConfig {
                pension: FlatRate {
                    clause: "PRA 2014 s.4(1)".to_string(),
                    rate: pct(8, 2),
                },
                nhf: CappedRate {
                    clause: "NHF Act s.4".to_string(),
                    rate: pct(25, 3),
                    monthly_cap: naira(100_000),
                },
                nsitf: FlatRate {
                    clause: "ECA 2010 s.33".to_string(),
                    rate: pct(1, 2),
                },
                itf: FlatRate {
                    clause: "ITF Act s.6".to_string(),
                    rate: pct(1, 2),
                },
            },
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the PAYE configuration.
    pub fn paye(&self) -> &PayeConfig {
        &self.paye
    }

    /// Returns the PAYE brackets, ascending.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.paye.brackets
    }

    /// Returns the flat deduction configuration.
    pub fn deductions(&self) -> &DeductionConfig {
        &self.deductions
    }

    /// Returns the relief policy used when the caller does not pick one.
    pub fn default_policy(&self) -> TaxPolicy {
        TaxPolicy {
            apply_consolidated_relief: self.paye.apply_consolidated_relief,
        }
    }
}

fn invalid(message: String) -> EngineError {
    EngineError::InvalidConfig { message }
}

fn is_fraction(rate: Decimal) -> bool {
    rate > Decimal::ZERO && rate < Decimal::ONE
}

/// Checks the bracket table invariants: starts at zero, contiguous,
/// ascending, rates in (0, 1), exactly one unbounded band at the end.
pub(crate) fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let Some(first) = brackets.first() else {
        return Err(invalid("bracket table is empty".to_string()));
    };
    if !first.lower.is_zero() {
        return Err(invalid(format!(
            "first bracket must start at 0, found {}",
            first.lower
        )));
    }

    for (index, bracket) in brackets.iter().enumerate() {
        let number = index + 1;
        if !is_fraction(bracket.rate) {
            return Err(invalid(format!(
                "bracket {} rate {} is outside (0, 1)",
                number, bracket.rate
            )));
        }

        let is_last = number == brackets.len();
        match (bracket.upper, is_last) {
            (None, true) => {}
            (None, false) => {
                return Err(invalid(format!(
                    "bracket {} is unbounded but is not the last bracket",
                    number
                )));
            }
            (Some(upper), true) => {
                return Err(invalid(format!(
                    "last bracket must be unbounded, found upper bound {}",
                    upper
                )));
            }
            (Some(upper), false) => {
                if upper <= bracket.lower {
                    return Err(invalid(format!(
                        "bracket {} upper bound {} is not above its lower bound {}",
                        number, upper, bracket.lower
                    )));
                }
                let next = &brackets[index + 1];
                if next.lower != upper {
                    return Err(invalid(format!(
                        "bracket {} starts at {} but bracket {} ends at {}",
                        number + 1,
                        next.lower,
                        number,
                        upper
                    )));
                }
            }
        }
    }

    Ok(())
}

fn validate_relief(relief: &ConsolidatedRelief) -> EngineResult<()> {
    if relief.minimum.is_sign_negative() {
        return Err(invalid(format!(
            "consolidated relief minimum {} is negative",
            relief.minimum
        )));
    }
    for (name, rate) in [
        ("floor_rate", relief.floor_rate),
        ("gross_rate", relief.gross_rate),
    ] {
        if !is_fraction(rate) {
            return Err(invalid(format!(
                "consolidated relief {} {} is outside (0, 1)",
                name, rate
            )));
        }
    }
    Ok(())
}

fn validate_deductions(deductions: &DeductionConfig) -> EngineResult<()> {
    let rates = [
        ("pension", deductions.pension.rate),
        ("nhf", deductions.nhf.rate),
        ("nsitf", deductions.nsitf.rate),
        ("itf", deductions.itf.rate),
    ];
    for (name, rate) in rates {
        if !is_fraction(rate) {
            return Err(invalid(format!("{} rate {} is outside (0, 1)", name, rate)));
        }
    }
    if deductions.nhf.monthly_cap.is_sign_negative() {
        return Err(invalid(format!(
            "nhf monthly cap {} is negative",
            deductions.nhf.monthly_cap
        )));
    }
    Ok(())
}
