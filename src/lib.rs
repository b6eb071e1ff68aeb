//! Fetch a GitHub user's contribution statistics over GraphQL and render them
//! as a themed SVG card.
//!
//! The pipeline is `Credentials -> Retrying<GithubClient> -> reduce -> render`.
//! Fetching is the only fallible, effectful step; reduction and rendering are
//! pure functions.

pub mod config;
pub mod error;
pub mod github;
pub mod retry;
pub mod schema;
pub mod stats;
pub mod svg;

pub use config::{ConfigError, Credentials};
pub use error::{FetchError, RetryError};
pub use github::{GithubClient, StatsSource};
pub use retry::{ExponentialBackoff, RetryPolicy, Retrying};
pub use schema::RawApiResponse;
pub use stats::{StatsCard, reduce};
pub use svg::{Theme, render, render_with_title};
