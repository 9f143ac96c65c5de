pub mod cli;
pub mod client;
pub mod service;
pub mod source;

pub use client::{GithubClient, HttpGithubClient};
pub use service::Miner;
pub use source::{DataSource, IssueState, RepoSlug, RestDataSource, SharedSource};
