//! Headless quiz-taking client: session state, a backend seam, view scoping
//! for late responses and the result poller.
pub mod attempt;
pub mod backend;
pub mod scope;
pub mod session;
pub mod watch;
