//! Remote script sources and the three-phase load bracket.
//!
//! A remote load injects three ordered steps around the target script:
//!
//! ```text
//!   begin ───────► target ──────────► end
//!   push(url)      fetch + execute    pop(), then resolve/reject
//!                  (settlement is     with the recorded result
//!                   only recorded)
//! ```
//!
//! The caller never observes the target's result before the context has been
//! popped, so nested loads triggered by the script always see the extended
//! stack and nothing after it does.

use super::{context::LoadContext, error::LoadError};
use anyhow::Result;
use std::{future::Future, io, pin::Pin, sync::Arc};

/// Boxed future returned by [`RemoteSource::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Capability to fetch the source text of a remote script.
pub trait RemoteSource: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

// ============================================================================
// HTTP Source
// ============================================================================

/// Fetches remote scripts over HTTP(S).
///
/// Requests run on tokio's blocking pool. Protocol-relative links
/// (`//cdn/x.js`) are fetched over `https:`.
#[derive(Clone)]
pub struct HttpRemote {
    agent: ureq::Agent,
}

impl HttpRemote {
    pub fn new(user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(user_agent).build();
        Self { agent }
    }

    fn absolute(url: &str) -> String {
        if url.starts_with("//") {
            format!("https:{url}")
        } else {
            url.to_owned()
        }
    }
}

impl RemoteSource for HttpRemote {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        let agent = self.agent.clone();
        let url = Self::absolute(url);

        Box::pin(async move {
            let body = tokio::task::spawn_blocking(move || -> Result<String> {
                let response = agent.get(&url).call()?;
                Ok(response.into_string()?)
            })
            .await??;
            Ok(body)
        })
    }
}

impl HttpRemote {
    /// Download `url` and return its size in bytes.
    ///
    /// The body is streamed, never decoded, so binary assets and bodies past
    /// ureq's string limit are measured exactly.
    pub async fn fetch_size(&self, url: &str) -> Result<u64> {
        let agent = self.agent.clone();
        let url = Self::absolute(url);

        tokio::task::spawn_blocking(move || -> Result<u64> {
            let response = agent.get(&url).call()?;
            Ok(count_bytes(response.into_reader())?)
        })
        .await?
    }
}

fn count_bytes(mut reader: impl io::Read) -> io::Result<u64> {
    io::copy(&mut reader, &mut io::sink())
}

impl std::fmt::Debug for HttpRemote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRemote").finish_non_exhaustive()
    }
}

/// Shared handle to a remote source.
pub type SharedRemote = Arc<dyn RemoteSource>;

// ============================================================================
// Bracket
// ============================================================================

/// Phase of a remote load bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Begun,
    Settled,
    Ended,
}

/// The begin/settle/end ordering contract of one remote load.
#[derive(Debug)]
pub struct Bracket {
    url: String,
    phase: Phase,
    outcome: Option<Result<(), LoadError>>,
}

impl Bracket {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            phase: Phase::Pending,
            outcome: None,
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Leading step: enter the context.
    pub fn begin(&mut self, context: &mut LoadContext) {
        debug_assert_eq!(self.phase, Phase::Pending);
        context.push(&self.url);
        self.phase = Phase::Begun;
    }

    /// Target step: record the outcome. Only the first settlement counts.
    pub fn settle(&mut self, outcome: Result<(), LoadError>) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
            self.phase = Phase::Settled;
        }
    }

    /// Trailing step: leave the context, then hand back the recorded outcome.
    pub fn end(mut self, context: &mut LoadContext) -> Result<(), LoadError> {
        context.pop();
        self.phase = Phase::Ended;
        self.outcome.take().unwrap_or(Ok(()))
    }
}
