pub mod article;
pub mod memory;
pub mod source;
pub mod user;

pub use article::PostgresArticleRepository;
pub use memory::InMemoryRepository;
pub use source::PostgresSourceRepository;
pub use user::PostgresUserRepository;
