//! DreamDice Scripting System
//!
//! Embedded QuickJS runtime plus the module loader that brings the packaged
//! dice chunks into it.
//!
//! The host creates one [`runtime::ScriptRuntime`], hands its packaged
//! chunks to [`loader::boot`], and gets back either a [`loader::BootReport`]
//! naming what was bound, or an [`error::ScriptError`] saying which chunk
//! failed and in which phase.

pub mod error;
pub mod loader;
pub mod runtime;

pub use rquickjs;

/// Host version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
