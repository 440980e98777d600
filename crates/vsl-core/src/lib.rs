//! vsl-core
//!
//! Validation engine and session logic for the gated video landing page.
//! Depends on vsl-domain. No terminal I/O, no direct storage.

pub mod error;
pub mod gate;
pub mod messages;
pub mod modal;
pub mod sink;
pub mod validator;

pub use error::{ModalError, SinkError};
pub use gate::{GatedMedia, PlayOutcome};
pub use messages::{get_error_messages, message_table, supported_locales, MessageKey, MessageTable};
pub use modal::{FormModal, ModalState, SubmitAttempt, SubmitOutcome};
pub use sink::{LeadSink, MemoryLeadSink};
pub use validator::{validate_field, validate_form, FormValidator};
