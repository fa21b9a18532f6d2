pub mod article_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use user_repo::UserRepo;
