//! Base plugin trait definition.
//!
//! Engines injected into the [`crate::DocumentProcessor`] (OCR backends and text
//! classifiers) implement [`Plugin`], which provides identification and lifecycle hooks.

use crate::Result;

/// Base trait that all engine plugins implement.
///
/// # Thread Safety
///
/// Plugins are shared as `Arc<dyn Trait>` across concurrent requests, so they must be
/// `Send + Sync`. Engines whose calls need exclusive access serialize them internally.
///
/// # Example
///
/// ```rust
/// use docreader::plugins::Plugin;
/// use docreader::Result;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// struct MyPlugin {
///     initialized: AtomicBool,
/// }
///
/// impl Plugin for MyPlugin {
///     fn name(&self) -> &str {
///         "my-plugin"
///     }
///
///     fn version(&self) -> String {
///         "1.0.0".to_string()
///     }
///
///     fn initialize(&self) -> Result<()> {
///         self.initialized.store(true, Ordering::Release);
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Unique, lowercase, hyphenated identifier (e.g. `"tesseract"`).
    fn name(&self) -> &str;

    /// Semantic version of the plugin.
    fn version(&self) -> String;

    /// Called once when the plugin is handed to a processor.
    ///
    /// Takes `&self` to work with `Arc<dyn Plugin>`; use interior mutability for state.
    /// A processor refuses a plugin whose initialization fails.
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Called when the owning processor shuts down. Errors are logged, not propagated.
    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    /// Optional description for logs.
    fn description(&self) -> &str {
        ""
    }
}
