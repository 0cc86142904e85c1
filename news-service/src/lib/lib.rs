pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::access;
pub use domain::article;
pub use domain::source;
pub use domain::user;
pub use outbound::repositories;
