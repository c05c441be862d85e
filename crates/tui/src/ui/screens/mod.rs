pub mod entries;
pub mod login;
pub mod placeholder;
