//! Input bounds enforced by the interactive shell.
//!
//! The calculation core only rejects non-positive values; the narrower
//! ranges accepted from a user at the prompt live here.

use std::{fmt, ops::RangeInclusive};

pub const MIN_LOAN_AMOUNT: i32 = 1000;
pub const MAX_LOAN_AMOUNT: i32 = 1_000_000;
// rates are whole percentages
pub const MIN_INTEREST_RATE: i32 = 1;
pub const MAX_INTEREST_RATE: i32 = 10;
pub const MIN_MONTHS: i32 = 2;
pub const MAX_MONTHS: i32 = 360;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Amount,
    Rate,
    Months,
}

impl Field {
    // prompt order
    pub const ALL: [Field; 3] = [Field::Amount, Field::Rate, Field::Months];

    pub fn invalid_message(&self) -> &'static str {
        match self {
            Field::Amount => "Invalid Amount",
            Field::Rate => "Invalid Rate",
            Field::Months => "Invalid months",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Amount => "loan amount",
            Field::Rate => "interest rate",
            Field::Months => "number of months",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputBounds {
    pub min_amount: i32,
    pub max_amount: i32,
    pub min_rate: i32,
    pub max_rate: i32,
    pub min_months: i32,
    pub max_months: i32,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            min_amount: MIN_LOAN_AMOUNT,
            max_amount: MAX_LOAN_AMOUNT,
            min_rate: MIN_INTEREST_RATE,
            max_rate: MAX_INTEREST_RATE,
            min_months: MIN_MONTHS,
            max_months: MAX_MONTHS,
        }
    }
}

impl InputBounds {
    pub fn range(&self, field: Field) -> RangeInclusive<i32> {
        match field {
            Field::Amount => self.min_amount..=self.max_amount,
            Field::Rate => self.min_rate..=self.max_rate,
            Field::Months => self.min_months..=self.max_months,
        }
    }

    pub fn accepts(&self, field: Field, value: i32) -> bool {
        self.range(field).contains(&value)
    }
}
