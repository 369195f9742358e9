// Purpose - external interfaces, format conversions

pub mod trace;

pub use trace::{export_trace, import_trace, read_trace, write_trace};
