pub mod schema;
pub mod validation;

pub use schema::{RecordSchema, SchemaHandle};
pub use validation::{decode_record, validate_record};
