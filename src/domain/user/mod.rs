// User domain module
// Public user identity, credential value objects and form validation

#![allow(clippy::module_inception)]

pub mod forms;
pub mod user;
pub mod value_objects;

pub use forms::{validate_login, Credentials, Registration, RegistrationForm};
pub use user::{Role, User};
pub use value_objects::Email;
