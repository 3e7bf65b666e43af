//! Line protocol decoding (SHT30-style temperature/humidity module).
//!
//! The module speaks one record per line, `R:070.0RH 032.4C`, terminated by
//! `\n` or `\r`. The decoder turns the byte stream into lines with a hard
//! length bound; the parser reads the two fixed-offset fields and reports
//! unrecognized lines separately from malformed numbers.

pub mod decoder;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use decoder::LineDecoder;
pub use parser::{LineRecord, parse_line_record};
