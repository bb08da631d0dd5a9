//! UI Components
//!
//! Reusable Leptos components, one file per component.

mod admin_panel;
mod concepto_card;
mod form_field;
mod password_modal;
mod solicitud_form;

pub use admin_panel::AdminPanel;
pub use concepto_card::ConceptoCard;
pub use form_field::{TextAreaField, TextField};
pub use password_modal::PasswordModal;
pub use solicitud_form::SolicitudForm;
