mod sink;

pub use sink::{COLUMNS, write_report, write_report_file};
