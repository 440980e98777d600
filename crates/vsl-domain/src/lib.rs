//! vsl-domain
//!
//! Data model for the gated video landing page: localized text, the
//! declarative lead-capture form schema, and lead records.
//! Structural schema checks only; value validation lives in vsl-core. No I/O.

pub mod field;
pub mod lead;
pub mod locale;
pub mod schema;

pub use field::{Constraints, FieldKind, FieldSpec, SelectOption};
pub use lead::{Lead, LeadInput};
pub use locale::{resolve_optional, LocalizedText, DEFAULT_LOCALE};
pub use schema::{default_lead_schema, ErrorMap, FormSchema, SchemaError, SubmittedValues};
