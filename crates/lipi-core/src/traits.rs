use async_trait::async_trait;

use crate::{Result, Surface};

/// Trait for the rendering collaborator the harness drives.
///
/// Implementations own a single rendered session against the service under
/// verification. Which element is "the input" and which candidates may be
/// "the output" is fixed at construction from the configured selector
/// strings; the methods here expose only the logical operations the harness
/// needs. None of these operations are safe to call concurrently from
/// multiple logical cases.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Returns the unique identifier for this driver.
    fn name(&self) -> &'static str;

    /// Navigates the session to the given URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Navigation`] if the surface is unreachable.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Waits until the page reports it has finished loading.
    ///
    /// # Errors
    ///
    /// Returns an error if the readiness check cannot be evaluated.
    async fn wait_for_idle(&self) -> Result<()>;

    /// Writes the full string into the input surface atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the input surface cannot be located or written.
    async fn fill_input(&self, text: &str) -> Result<()>;

    /// Resets the input surface to empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the input surface cannot be located or cleared.
    async fn clear_input(&self) -> Result<()>;

    /// Appends one character to the input surface, simulating a keystroke.
    ///
    /// # Errors
    ///
    /// Returns an error if the keystroke cannot be delivered.
    async fn press_input(&self, unit: char) -> Result<()>;

    /// Returns every element matching the output container selector.
    ///
    /// The selector aliases the input's container class, so the result may
    /// include the input surface itself; callers must filter by the
    /// [`Surface::editable`] flag rather than rely on selector uniqueness.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be executed.
    async fn output_candidates(&self) -> Result<Vec<Surface>>;
}
