//! Calendar periods in ISO-8601 `PnYnMnWnD` form.
//!
//! A [`Period`] is not a fixed duration: adding `P1M` to January 31st lands
//! on the last day of February. Years and months are applied together as a
//! single month count (clamped to the end of the month), then days.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use pest::Parser;
use pest_derive::Parser;

use crate::error::CoreError;

#[derive(Parser)]
#[grammar = "period.pest"]
struct PeriodParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    /// Weeks are folded into days when parsing.
    pub days: i32,
}

impl Period {
    pub const fn new(years: i32, months: i32, days: i32) -> Self {
        Self { years, months, days }
    }

    pub const fn months(months: i32) -> Self {
        Self::new(0, months, 0)
    }

    pub const fn days(days: i32) -> Self {
        Self::new(0, 0, days)
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    pub fn is_negative(&self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    /// True when every component is non-negative and at least one is not zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && !self.is_negative()
    }

    fn total_months(&self) -> i64 {
        i64::from(self.years) * 12 + i64::from(self.months)
    }

    /// Shifts `date` forward by this period.
    pub fn add_to(&self, date: NaiveDate) -> Result<NaiveDate, CoreError> {
        self.checked_add_to(date)
            .ok_or(CoreError::DateOutOfRange(date, *self))
    }

    fn checked_add_to(&self, date: NaiveDate) -> Option<NaiveDate> {
        let total_months = self.total_months();
        let months = Months::new(u32::try_from(total_months.unsigned_abs()).ok()?);
        let date = if total_months >= 0 {
            date.checked_add_months(months)?
        } else {
            date.checked_sub_months(months)?
        };

        let days = Days::new(u64::from(self.days.unsigned_abs()));
        if self.days >= 0 {
            date.checked_add_days(days)
        } else {
            date.checked_sub_days(days)
        }
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| CoreError::InvalidPeriod {
            input: s.to_string(),
            reason,
        };

        let period = PeriodParser::parse(Rule::period, s)
            .map_err(|e| invalid(e.variant.message().into_owned()))?
            .next()
            .ok_or_else(|| invalid("empty input".to_string()))?;

        let mut negate = false;
        let mut result = Period::default();
        for pair in period.into_inner() {
            let rule = pair.as_rule();
            if rule == Rule::sign {
                negate = pair.as_str() == "-";
                continue;
            }
            if rule == Rule::EOI {
                continue;
            }

            let text = pair.into_inner().as_str();
            let amount = text
                .parse::<i32>()
                .map_err(|_| invalid(format!("amount '{text}' out of range")))?;
            match rule {
                Rule::years => result.years = amount,
                Rule::months => result.months = amount,
                Rule::weeks => {
                    result.days = amount
                        .checked_mul(7)
                        .ok_or_else(|| invalid("week amount out of range".to_string()))?;
                }
                _ => {
                    result.days = result
                        .days
                        .checked_add(amount)
                        .ok_or_else(|| invalid("day amount out of range".to_string()))?;
                }
            }
        }

        if negate {
            result = Period::new(
                result.years.checked_neg().ok_or_else(|| invalid("out of range".to_string()))?,
                result.months.checked_neg().ok_or_else(|| invalid("out of range".to_string()))?,
                result.days.checked_neg().ok_or_else(|| invalid("out of range".to_string()))?,
            );
        }
        Ok(result)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("P0D");
        }
        f.write_str("P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}
