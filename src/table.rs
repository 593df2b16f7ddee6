//! Fixed-width text rendering of an amortization schedule.

use crate::error::{LoanError, Result};
use crate::loan::COLUMNS_IN_TABLE;

pub const TABLE_HEADER: &str = "Number  Payment  Interest     Loan   Balance";
pub const TABLE_SEPARATOR: &str = "--------------------------------------------";

// balance is shown as its absolute value so a final -7e-12 prints as 0.00
pub fn format_row(number: usize, payment: f64, interest: f64, principal: f64, balance: f64) -> String {
    format!(
        "{:4} {:10.2} {:9.2} {:8.2} {:9.2}",
        number,
        payment,
        interest,
        principal,
        balance.abs()
    )
}

/// Renders each row of interest, principal and balance on its own line,
/// numbered from 1, without the header. `None` is a missing table.
pub fn format_table<R: AsRef<[f64]>>(payment: f64, table: Option<&[R]>) -> Result<String> {
    let table = table.ok_or(LoanError::NullTable)?;
    if table.is_empty() {
        return Err(LoanError::EmptyTable);
    }
    if table.iter().any(|row| row.as_ref().len() != COLUMNS_IN_TABLE) {
        return Err(LoanError::InvalidRows);
    }

    let mut output = String::new();
    for (i, row) in table.iter().enumerate() {
        let row = row.as_ref();
        output.push_str(&format_row(i + 1, payment, row[0], row[1], row[2]));
        output.push('\n');
    }
    Ok(output)
}
