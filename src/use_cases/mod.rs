mod auth_service;
mod sign_up;
mod verify_password;

pub use auth_service::AuthService;
