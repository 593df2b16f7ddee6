pub mod config;
pub mod error;
pub mod loan;
pub mod shell;
pub mod table;
