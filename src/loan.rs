use crate::config::{Field, InputBounds, MAX_MONTHS};
use crate::error::{LoanError, Result};
use crate::table::{format_row, format_table};
use log::{debug, trace};
use std::fmt;

pub const MONTHS_IN_YEAR: f64 = 12.0;
pub const PERCENT: f64 = 100.0;
// interest, principal, balance
pub const COLUMNS_IN_TABLE: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanParameters {
    pub principal: i32,
    pub annual_rate_percent: i32,
    pub term_months: i32,
}

impl LoanParameters {
    pub fn new(principal: i32, annual_rate_percent: i32, term_months: i32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
        }
    }

    pub fn get(&self, field: Field) -> i32 {
        match field {
            Field::Amount => self.principal,
            Field::Rate => self.annual_rate_percent,
            Field::Months => self.term_months,
        }
    }

    // first field out of range, in prompt order
    pub fn validate(&self, bounds: &InputBounds) -> std::result::Result<(), Field> {
        Field::ALL
            .into_iter()
            .find(|&field| !bounds.accepts(field, self.get(field)))
            .map_or(Ok(()), Err)
    }
}

/// One month of an amortization schedule. `balance` is recorded before
/// clamping, so the final row may hold a tiny negative drift value.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmortizationRow {
    columns: [f64; COLUMNS_IN_TABLE],
}

impl AmortizationRow {
    pub fn new(interest: f64, principal: f64, balance: f64) -> Self {
        Self {
            columns: [interest, principal, balance],
        }
    }

    pub fn interest(&self) -> f64 {
        self.columns[0]
    }

    pub fn principal(&self) -> f64 {
        self.columns[1]
    }

    pub fn balance(&self) -> f64 {
        self.columns[2]
    }
}

impl AsRef<[f64]> for AmortizationRow {
    fn as_ref(&self) -> &[f64] {
        &self.columns
    }
}

impl fmt::Display for AmortizationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "interest ${:.2}, principal ${:.2}, balance ${:.2}",
            self.interest(),
            self.principal(),
            self.balance().abs()
        )
    }
}

fn monthly_rate(annual_rate_percent: i32) -> f64 {
    (annual_rate_percent as f64 / PERCENT) / MONTHS_IN_YEAR
}

fn check_inputs(principal: i32, annual_rate_percent: i32, term_months: i32) -> Result<()> {
    if principal <= 0 {
        return Err(LoanError::InvalidAmount);
    }
    if annual_rate_percent <= 0 {
        return Err(LoanError::InvalidRate);
    }
    if term_months <= 0 {
        return Err(LoanError::InvalidMonths);
    }
    Ok(())
}

/// Fixed monthly payment that retires `principal` over `term_months`.
///
/// No rounding is applied; cents are only rounded when displayed.
pub fn calculate_payment(principal: i32, annual_rate_percent: i32, term_months: i32) -> Result<f64> {
    check_inputs(principal, annual_rate_percent, term_months)?;

    let rate = monthly_rate(annual_rate_percent);
    let principal = principal as f64;

    if rate == 0. {
        return Ok(principal / term_months as f64);
    }

    let factor = (1. + rate).powi(term_months);
    let payment = principal * (rate * factor) / (factor - 1.);
    debug!(
        "payment for {} at {}% over {} months is {}",
        principal, annual_rate_percent, term_months, payment
    );
    Ok(payment)
}

pub fn build_schedule(
    principal: i32,
    annual_rate_percent: i32,
    term_months: i32,
) -> Result<Vec<AmortizationRow>> {
    let payment = calculate_payment(principal, annual_rate_percent, term_months)?;
    Ok(amortize(principal, annual_rate_percent, term_months, payment))
}

// calculate the rows for a payment already checked by calculate_payment
fn amortize(principal: i32, annual_rate_percent: i32, term_months: i32, payment: f64) -> Vec<AmortizationRow> {
    let rate = monthly_rate(annual_rate_percent);

    // terms past the shell's bounds grow the vector as they go
    let mut schedule = Vec::with_capacity(term_months.clamp(0, MAX_MONTHS) as usize);
    let mut balance = principal as f64;

    for month in 1..=term_months {
        let interest = balance * rate;
        let principal_paid = payment - interest;
        balance -= principal_paid;
        trace!(
            "month {}, interest {}, principal {}, balance {}",
            month,
            interest,
            principal_paid,
            balance
        );

        // the row keeps the unclamped balance; only the running total is reset
        schedule.push(AmortizationRow::new(interest, principal_paid, balance));
        if balance < 0. {
            balance = 0.;
        }
    }
    schedule
}

// payment and schedule are computed once, in new
#[derive(PartialEq, Debug)]
pub struct Loan {
    pub params: LoanParameters,
    pmt_amount: f64,
    scheduled_pmts: Vec<AmortizationRow>,
}

impl Loan {
    pub fn new(params: LoanParameters) -> Result<Self> {
        let LoanParameters {
            principal,
            annual_rate_percent,
            term_months,
        } = params;
        let pmt_amount = calculate_payment(principal, annual_rate_percent, term_months)?;
        Ok(Self {
            params,
            pmt_amount,
            scheduled_pmts: amortize(principal, annual_rate_percent, term_months, pmt_amount),
        })
    }

    pub fn get_pmt_amount(&self) -> f64 {
        self.pmt_amount
    }

    pub fn get_pmt_count(&self) -> usize {
        self.scheduled_pmts.len()
    }

    pub fn schedule(&self) -> &[AmortizationRow] {
        &self.scheduled_pmts
    }

    pub fn get_pmt_detail(&self, pmt_number: usize) -> Option<&AmortizationRow> {
        pmt_number
            .checked_sub(1)
            .and_then(|idx| self.scheduled_pmts.get(idx))
    }

    // pmt_number is 1-based
    pub fn get_pmt_info(&self, pmt_number: usize) -> Option<String> {
        self.get_pmt_detail(pmt_number).map(|row| {
            format_row(
                pmt_number,
                self.pmt_amount,
                row.interest(),
                row.principal(),
                row.balance(),
            )
        })
    }

    pub fn amortization_table(&self) -> Result<String> {
        format_table(self.pmt_amount, Some(self.scheduled_pmts.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::{build_schedule, calculate_payment, AmortizationRow, Loan, LoanParameters};
    use crate::config::{Field, InputBounds};
    use crate::error::LoanError;
    use test_log::test;

    const DELTA: f64 = 0.01;

    fn assert_close(expected: f64, actual: f64, delta: f64, what: &str) {
        assert!(
            (expected - actual).abs() <= delta,
            "{}: expected {}, got {}",
            what,
            expected,
            actual
        );
    }

    fn assert_schedule(expected: &[[f64; 3]], actual: &[AmortizationRow]) {
        assert_eq!(expected.len(), actual.len(), "schedule length");
        for (i, (exp, row)) in expected.iter().zip(actual).enumerate() {
            assert_close(exp[0], row.interest(), DELTA, &format!("row {} interest", i));
            assert_close(exp[1], row.principal(), DELTA, &format!("row {} principal", i));
            assert_close(exp[2], row.balance(), DELTA, &format!("row {} balance", i));
        }
    }

    #[test]
    fn test_calculate_payment() {
        assert_close(85.61, calculate_payment(1000, 5, 12).unwrap(), DELTA, "1000/5/12");
        assert_close(732.26, calculate_payment(1450, 8, 2).unwrap(), DELTA, "1450/8/2");
        assert_close(501.04, calculate_payment(2000, 1, 4).unwrap(), DELTA, "2000/1/4");
        assert_close(3372.30, calculate_payment(10000, 7, 3).unwrap(), DELTA, "10000/7/3");
    }

    #[test]
    fn test_calculate_payment_is_unrounded() {
        let payment = calculate_payment(1450, 8, 2).unwrap();
        assert_close(732.2580287929161, payment, 1e-9, "1450/8/2");
    }

    #[test]
    fn test_invalid_inputs_checked_in_order() {
        assert_eq!(calculate_payment(0, -1, -2), Err(LoanError::InvalidAmount));
        assert_eq!(calculate_payment(100, -1, -2), Err(LoanError::InvalidRate));
        assert_eq!(calculate_payment(100, 1, -2), Err(LoanError::InvalidMonths));

        assert_eq!(build_schedule(0, -1, -2), Err(LoanError::InvalidAmount));
        assert_eq!(build_schedule(100, -1, -2), Err(LoanError::InvalidRate));
        assert_eq!(build_schedule(100, 1, -2), Err(LoanError::InvalidMonths));

        assert_eq!(LoanError::InvalidAmount.to_string(), "Invalid amount");
        assert_eq!(LoanError::InvalidRate.to_string(), "Invalid rate");
        assert_eq!(LoanError::InvalidMonths.to_string(), "Invalid months");
    }

    #[test]
    fn test_schedule_1000_5_12() {
        let expected = [
            [4.17, 81.44, 918.56],
            [3.83, 81.78, 836.78],
            [3.49, 82.12, 754.66],
            [3.14, 82.46, 672.20],
            [2.80, 82.81, 589.39],
            [2.46, 83.15, 506.24],
            [2.11, 83.50, 422.74],
            [1.76, 83.85, 338.89],
            [1.41, 84.20, 254.70],
            [1.06, 84.55, 170.15],
            [0.71, 84.90, 85.25],
            [0.36, 85.25, 0.00],
        ];
        assert_schedule(&expected, &build_schedule(1000, 5, 12).unwrap());
    }

    #[test]
    fn test_schedule_short_terms() {
        assert_schedule(
            &[[9.67, 722.59, 727.41], [4.85, 727.41, 0.00]],
            &build_schedule(1450, 8, 2).unwrap(),
        );
        assert_schedule(
            &[
                [1.67, 499.38, 1500.62],
                [1.25, 499.79, 1000.83],
                [0.83, 500.21, 500.62],
                [0.42, 500.62, 0.00],
            ],
            &build_schedule(2000, 1, 4).unwrap(),
        );
        assert_schedule(
            &[
                [58.33, 3313.96, 6686.04],
                [39.00, 3333.30, 3352.74],
                [19.56, 3352.74, 0.00],
            ],
            &build_schedule(10000, 7, 3).unwrap(),
        );
    }

    #[test]
    fn test_rows_add_up_to_payment_and_principal() {
        for (principal, rate, months) in [(1000, 5, 12), (250_000, 6, 360), (1_000_000, 10, 2), (5000, 1, 180)] {
            let payment = calculate_payment(principal, rate, months).unwrap();
            let schedule = build_schedule(principal, rate, months).unwrap();
            assert_eq!(schedule.len(), months as usize);

            for row in &schedule {
                assert_close(payment, row.interest() + row.principal(), 1e-6, "interest + principal");
            }
            let repaid: f64 = schedule.iter().map(AmortizationRow::principal).sum();
            assert_close(principal as f64, repaid, DELTA, "principal repaid");
            assert_close(0., schedule[schedule.len() - 1].balance(), DELTA, "final balance");
        }
    }

    #[test]
    fn test_final_row_keeps_unclamped_balance() {
        let schedule = build_schedule(1450, 8, 2).unwrap();
        let last = schedule[1].balance();
        // whatever drift remains is recorded as is, never replaced by zero
        assert_eq!(last, 1450. - schedule[0].principal() - schedule[1].principal());
    }

    #[test]
    fn test_long_term_schedule() {
        let schedule = build_schedule(1000, 5, 1200).unwrap();
        assert_eq!(schedule.len(), 1200);
        assert_close(0., schedule[1199].balance(), DELTA, "final balance");
    }

    #[test]
    fn test_calls_are_idempotent() {
        assert_eq!(calculate_payment(1000, 5, 12), calculate_payment(1000, 5, 12));
        assert_eq!(build_schedule(1000, 5, 12), build_schedule(1000, 5, 12));
    }

    #[test]
    fn test_loan() {
        let loan = Loan::new(LoanParameters::new(1450, 8, 2)).unwrap();

        assert_close(732.26, loan.get_pmt_amount(), DELTA, "payment");
        assert_eq!(loan.get_pmt_count(), 2);
        assert_eq!(loan.schedule(), build_schedule(1450, 8, 2).unwrap().as_slice());
        assert_eq!(loan.get_pmt_info(1).unwrap(), "   1     732.26      9.67   722.59    727.41");
        assert_eq!(loan.get_pmt_info(2).unwrap(), "   2     732.26      4.85   727.41      0.00");
        assert_eq!(loan.get_pmt_info(0), None);
        assert_eq!(loan.get_pmt_info(3), None);
        assert_eq!(
            loan.get_pmt_detail(2).unwrap().to_string(),
            "interest $4.85, principal $727.41, balance $0.00"
        );
        assert_eq!(
            loan.amortization_table().unwrap(),
            "   1     732.26      9.67   722.59    727.41\n   2     732.26      4.85   727.41      0.00\n"
        );

        assert_eq!(Loan::new(LoanParameters::new(100, 0, 12)), Err(LoanError::InvalidRate));
    }

    #[test]
    fn test_validate_parameters() {
        let bounds = InputBounds::default();

        assert_eq!(LoanParameters::new(1000, 1, 2).validate(&bounds), Ok(()));
        assert_eq!(LoanParameters::new(999, 0, 1).validate(&bounds), Err(Field::Amount));
        assert_eq!(LoanParameters::new(1000, 11, 1).validate(&bounds), Err(Field::Rate));
        assert_eq!(LoanParameters::new(1000, 10, 361).validate(&bounds), Err(Field::Months));
    }
}
