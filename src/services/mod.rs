pub mod auth_service;

pub use auth_service::{AdminIdentity, AuthService, ProfessorIdentity, StudentIdentity};
