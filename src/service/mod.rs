pub mod credentials;
pub mod password;
