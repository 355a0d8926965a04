//! Form domain module.
//!
//! Form identity, schemas, the generic field map, and the wording used to
//! ask for each field.

pub mod catalog;
mod field_role;
mod field_values;
mod form_type;
mod identifier;
pub mod questions;
mod schema;
mod template;

pub use catalog::{builtin_schema, builtin_schemas};
pub use field_role::FieldRole;
pub use field_values::{is_blank, FieldValues};
pub use form_type::FormType;
pub use identifier::FormIdentifier;
pub use questions::{generated_question, humanize, label_for};
pub use schema::{FieldDef, FieldType, FormSchema};
pub use template::FormTemplate;
