//! Form binding and validation between the HTTP layer and the repositories.

mod forms;
mod validation;
pub use forms::{OwnerForm, PetForm, VisitForm};
pub use validation::{FieldErrors, FormValidator};
