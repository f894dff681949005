//! Where temperature documents come from.
//!
//! Every source returns the raw document text; parsing and normalization happen in
//! [`crate::document`].

use crate::Result;
use std::path::PathBuf;

pub trait DataSource {
    /// Human-readable location, used in logs and error messages.
    fn describe(&self) -> String;

    fn read_text(&self) -> Result<String>;
}

/// An in-memory document (stdin, tests, embedded fixtures).
#[derive(Debug, Clone)]
pub struct StaticSource {
    label: String,
    text: String,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl DataSource for StaticSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn read_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

#[cfg(feature = "http")]
pub use http::HttpSource;

#[cfg(feature = "http")]
mod http {
    use super::DataSource;
    use crate::{Error, Result};
    use std::time::Duration;

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// One blocking `GET`; non-2xx statuses are errors.
    #[derive(Debug, Clone)]
    pub struct HttpSource {
        url: String,
        timeout: Duration,
    }

    impl HttpSource {
        pub fn new(url: impl Into<String>) -> Self {
            Self {
                url: url.into(),
                timeout: DEFAULT_TIMEOUT,
            }
        }

        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = timeout;
            self
        }

        pub fn url(&self) -> &str {
            &self.url
        }
    }

    impl DataSource for HttpSource {
        fn describe(&self) -> String {
            self.url.clone()
        }

        fn read_text(&self) -> Result<String> {
            let fetch_err = |e: ureq::Error| Error::Fetch {
                url: self.url.clone(),
                message: e.to_string(),
            };

            let config = ureq::Agent::config_builder()
                .timeout_global(Some(self.timeout))
                .build();
            let agent: ureq::Agent = config.into();

            tracing::debug!(url = %self.url, "fetching temperature document");
            let mut response = agent.get(self.url.as_str()).call().map_err(fetch_err)?;
            let text = response
                .body_mut()
                .read_to_string()
                .map_err(fetch_err)?;
            tracing::debug!(bytes = text.len(), "fetched temperature document");
            Ok(text)
        }
    }
}
