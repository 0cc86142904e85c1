pub mod access;
pub mod article;
pub mod source;
pub mod user;
pub mod validation;
