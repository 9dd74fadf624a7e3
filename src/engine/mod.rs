pub mod config;
pub mod error;
pub mod sheet;

pub use config::DrillConfig;
pub use error::DrillError;
pub use sheet::{compile_sheet, DrillSheet, LineError, Question, SheetBuild};
