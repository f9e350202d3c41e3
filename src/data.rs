pub mod columns;
mod identifier;
mod table;
mod values;

pub use identifier::{Identifier, IdentifierError};
pub use table::TableData;
pub use values::Value;
