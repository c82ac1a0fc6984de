pub mod amount;
pub mod csv;
pub mod document;
pub mod editing;
pub mod entry;
pub mod io;
pub mod month;
pub mod settings_ops;
pub mod workbook;

pub use document::LedgerFile;
pub use editing::History;
pub use entry::{FieldValue, LedgerEntry};
pub use workbook::{CardEntry, MonthTotals, Settings, Workbook};
