pub mod errors;
pub mod models;
pub mod policy;
pub mod resolver;

pub use errors::AccessError;
pub use models::Principal;
pub use models::Role;
pub use policy::require_owner_or_admin;
pub use policy::require_role;
pub use resolver::IdentityResolver;
pub use resolver::IdentityResolverPort;
