//! Search public repositories through the live GitHub API.
//!
//! Run:
//! `cargo run --example search_repositories -- <query>`
//!
//! Set `RUST_LOG=github_client=debug` to see request tracing.

use std::borrow::Cow;

use github_client::{ApiRequestable, ApiService, Endpoint, Params};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

struct SearchRepositories {
    query: String,
    per_page: u32,
}

impl Endpoint for SearchRepositories {
    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/search/repositories")
    }

    fn params(&self) -> Params {
        Params::from([
            ("q".to_owned(), self.query.as_str().into()),
            ("per_page".to_owned(), self.per_page.into()),
        ])
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    total_count: u64,
    items: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
    stargazers_count: u64,
    description: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "language:rust".to_owned());
    let service = ApiService::github()?;

    let result: SearchResult = service
        .send(&SearchRepositories {
            query,
            per_page: 10,
        })
        .await?;

    println!("{} repositories found", result.total_count);
    for repo in result.items {
        println!(
            "- {:<40} {:>8}  {}",
            repo.full_name,
            repo.stargazers_count,
            repo.description.unwrap_or_default()
        );
    }
    Ok(())
}
