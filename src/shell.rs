//! Interactive menu loop around the calculator.

use crate::config::{Field, InputBounds};
use crate::loan::{calculate_payment, Loan, LoanParameters};
use crate::table::{TABLE_HEADER, TABLE_SEPARATOR};
use log::{info, warn};
use std::io::{self, BufRead, Write};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuOption {
    Payment,
    Table,
    Quit,
}

impl MenuOption {
    /// Case-insensitive match of a whole input line against P, T or Q.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_uppercase().as_str() {
            "P" => Some(MenuOption::Payment),
            "T" => Some(MenuOption::Table),
            "Q" => Some(MenuOption::Quit),
            _ => None,
        }
    }
}

// result of collecting the three loan fields
enum Entry {
    Accepted(LoanParameters),
    Rejected(Field),
    Closed,
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    bounds: InputBounds,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_bounds(input, output, InputBounds::default())
    }

    pub fn with_bounds(input: R, output: W, bounds: InputBounds) -> Self {
        Self {
            input,
            output,
            bounds,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the user quits or input is exhausted.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.display_menu()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => {
                    info!("input closed at the menu");
                    break;
                }
            };

            let option = match MenuOption::parse(&line) {
                Some(MenuOption::Quit) => break,
                Some(option) => option,
                None => {
                    warn!("unrecognised option {:?}", line.trim());
                    writeln!(self.output, "Invalid option")?;
                    continue;
                }
            };

            match self.read_parameters()? {
                Entry::Accepted(params) => self.answer(option, params)?,
                Entry::Rejected(field) => {
                    writeln!(self.output, "{}", field.invalid_message())?;
                }
                Entry::Closed => {
                    info!("input closed while reading loan details");
                    break;
                }
            }
        }
        self.output.flush()
    }

    fn display_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "Loan Calculator - Please choose an option.")?;
        writeln!(self.output)?;
        writeln!(self.output, "P - Payment")?;
        writeln!(self.output, "T - Table")?;
        writeln!(self.output, "Q - Quit")?;
        write!(self.output, "Option: ")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn read_parameters(&mut self) -> io::Result<Entry> {
        let mut values = [0; 3];
        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            let range = self.bounds.range(field);
            let label = match field {
                Field::Amount => "Loan Amount",
                Field::Rate => "Interest Rate",
                Field::Months => "Number of Months",
            };
            write!(self.output, "{}({} - {}): ", label, range.start(), range.end())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(Entry::Closed);
            };
            match line.trim().parse::<i32>() {
                Ok(value) if self.bounds.accepts(field, value) => *slot = value,
                Ok(value) => {
                    warn!("{} {} outside {:?}", field, value, range);
                    return Ok(Entry::Rejected(field));
                }
                Err(e) => {
                    warn!("{} {:?} is not a whole number: {}", field, line.trim(), e);
                    return Ok(Entry::Rejected(field));
                }
            }
        }

        let [principal, rate, months] = values;
        let params = LoanParameters::new(principal, rate, months);
        match params.validate(&self.bounds) {
            Ok(()) => Ok(Entry::Accepted(params)),
            Err(field) => Ok(Entry::Rejected(field)),
        }
    }

    fn answer(&mut self, option: MenuOption, params: LoanParameters) -> io::Result<()> {
        info!("{:?} requested for {:?}", option, params);
        let LoanParameters {
            principal,
            annual_rate_percent,
            term_months,
        } = params;

        let rendered = match option {
            MenuOption::Payment => calculate_payment(principal, annual_rate_percent, term_months)
                .map(|payment| format!("Monthly Payment: ${:.2}\n", payment)),
            MenuOption::Table => Loan::new(params)
                .and_then(|loan| loan.amortization_table())
                .map(|body| format!("{}\n{}\n{}", TABLE_HEADER, TABLE_SEPARATOR, body)),
            MenuOption::Quit => return Ok(()),
        };

        match rendered {
            Ok(text) => write!(self.output, "{}", text),
            Err(e) => {
                // only reachable when custom bounds admit values the core refuses
                warn!("calculation refused for {:?}: {}", params, e);
                writeln!(self.output, "{}", e)
            }
        }
    }
}
