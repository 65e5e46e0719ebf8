//! Page components for the application.

pub mod home;
pub mod login;

pub use home::HomePage;
pub use login::LoginPage;
