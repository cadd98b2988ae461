//! # Runtime
//!
//! Tokio runtime profiles shared by the workspace binaries.
//!
//! * **High performance**: the HTTP server; all detected cores, larger stacks.
//! * **Memory efficient**: constrained hosts; half the cores, small stacks, short keep-alive.
//! * **Default**: auto-detected worker count with conservative stacks.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[fitclass_runtime::main(high_performance)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use fitclass_derive::main;

use anyhow::Context;
use std::sync::OnceLock;
use std::thread::available_parallelism;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

const FALLBACK_WORKER_THREADS: usize = 4;
const MAX_WORKER_THREADS: usize = 1024;
const MIN_STACK_SIZE: usize = 1024 * 1024;
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
const DEFAULT_THREAD_NAME: &str = "fitclass-worker";

static DETECTED_WORKERS: OnceLock<usize> = OnceLock::new();

/// Worker count from `TOKIO_WORKER_THREADS`, falling back to available parallelism.
fn detected_workers() -> usize {
    *DETECTED_WORKERS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|&n| (1..=MAX_WORKER_THREADS).contains(&n))
            .unwrap_or_else(|| {
                available_parallelism().map_or(FALLBACK_WORKER_THREADS, std::num::NonZero::get)
            })
    })
}

/// Configuration for a multi-thread Tokio runtime.
///
/// Values are clamped on every setter and again before the runtime is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: detected_workers(),
            stack_size: 2 * 1024 * 1024,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: Duration::from_secs(60),
        }
    }
}

impl RuntimeConfig {
    /// Profile for the HTTP server.
    #[must_use]
    pub fn high_performance() -> Self {
        Self {
            worker_threads: detected_workers(),
            stack_size: 4 * 1024 * 1024,
            thread_name: "fitclass-http".to_owned(),
            thread_keep_alive: Duration::from_secs(300),
        }
    }

    /// Profile for short-lived tools where footprint matters more than throughput.
    #[must_use]
    pub fn memory_efficient() -> Self {
        Self {
            worker_threads: (detected_workers() / 2).max(1),
            stack_size: MIN_STACK_SIZE,
            thread_name: "fitclass-lite".to_owned(),
            thread_keep_alive: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKER_THREADS);
        self
    }

    #[must_use]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name = if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }

    #[must_use]
    pub const fn with_thread_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.thread_keep_alive = keep_alive;
        self
    }

    fn normalized(&self) -> Self {
        self.clone()
            .with_worker_threads(self.worker_threads)
            .with_stack_size(self.stack_size)
            .with_thread_name(self.thread_name.clone())
    }
}

/// Builds a multi-thread runtime with all drivers (I/O, time, signals) enabled.
///
/// # Errors
/// Returns an error if the OS refuses to create the worker threads.
///
/// # Examples
///
/// ```rust
/// use fitclass_runtime::{RuntimeConfig, build_runtime_with_config};
///
/// let runtime = build_runtime_with_config(&RuntimeConfig::default().with_worker_threads(1))?;
/// assert_eq!(runtime.block_on(async { 2 + 2 }), 4);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config.normalized();
    debug!(config = ?config, "Building tokio runtime");

    Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_name(&config.thread_name)
        .thread_stack_size(config.stack_size)
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all()
        .build()
        .context("Failed to initialize tokio runtime")
}
