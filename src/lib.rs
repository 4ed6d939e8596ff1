// Library surface for headless/integration tests and reuse.
// main.rs only adds the CLI and the terminal setup/teardown.
pub mod app;
pub mod audio;
pub mod celebration;
pub mod config;
pub mod problem;
pub mod runtime;
pub mod session;
pub mod ui;

/// Tick interval of the event loop; also the resolution at which the
/// session's delayed continuations count down.
pub const TICK_RATE_MS: u64 = 100;
