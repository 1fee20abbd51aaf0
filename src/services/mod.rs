//! Process-level services used by the binaries

#[cfg(feature = "runtime")]
pub mod tracing_setup;
