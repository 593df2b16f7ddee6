use loancalc::shell::Shell;
use log::{error, info};
use simple_logger::SimpleLogger;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("logger already initialised: {}", e);
    }

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout());
    match shell.run() {
        Ok(()) => {
            info!("session finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("terminal i/o failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<loancalc::loan::AmortizationRow>();
    is_normal::<loancalc::loan::LoanParameters>();
    is_normal::<loancalc::loan::Loan>();
    is_normal::<loancalc::config::InputBounds>();
    is_normal::<loancalc::error::LoanError>();
}
