//! Console output and report writing

pub mod console;
pub mod report_writer;

pub use console::{format_day_fix, print_banner, print_summary};
pub use report_writer::write_report;
