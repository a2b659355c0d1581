pub mod newsapi;
pub mod normalize;

pub use newsapi::NewsApiSource;

pub mod prelude {
    pub use super::newsapi::NewsApiSource;
    pub use xt_core::{Article, HeadlinesSource, NewsPage, NewsQuery, Result, Error};
}
