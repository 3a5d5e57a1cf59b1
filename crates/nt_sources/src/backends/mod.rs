pub mod memory;
pub mod http;
pub mod file;

pub use memory::{mock_articles, MockArticleSource};
pub use http::{ArticlesResponse, HttpArticleSource};
pub use file::FileArticleSource;
