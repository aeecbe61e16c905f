// Manager credential gate

pub mod secret;

pub use secret::verify_admin_secret;
