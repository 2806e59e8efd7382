pub mod controller;
pub mod roster;
pub mod rules;

pub use controller::RegistrationController;
