mod url_fetcher;

pub use url_fetcher::UrlFetcher;
