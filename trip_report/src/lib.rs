pub mod accumulator;
pub mod report;

pub use accumulator::*;

#[derive(Debug)]
pub enum ReportError {
    Io(String),
    Parse(String),
}
