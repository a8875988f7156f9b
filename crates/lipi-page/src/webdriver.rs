//! `WebDriver`-backed implementation of [`PageDriver`].
//!
//! Drives a real browser session through a `WebDriver` endpoint
//! (chromedriver or geckodriver). All fantoccini error types are mapped to
//! the core taxonomy here and never escape this module.

use crate::detector::await_condition;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use lipi_core::{Error, PageDriver, Result, SelectorConfig, Surface};
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Bound on waiting for the document to report readiness.
const READY_TIMEOUT: Duration = Duration::from_secs(30);
/// Interval between readiness checks.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A live rendered session behind a `WebDriver` endpoint.
pub struct WebDriverPage {
    /// The `WebDriver` session
    client: Client,
    /// Selector and label strings for the two surfaces
    selectors: SelectorConfig,
}

/// Maps a `WebDriver` command failure into the core taxonomy.
fn driver_error(error: &CmdError) -> Error {
    Error::Driver(error.to_string())
}

impl WebDriverPage {
    /// Connects to a `WebDriver` endpoint and starts a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Navigation`] if no session can be established;
    /// fatal for the whole run.
    pub async fn connect(webdriver_url: &str, selectors: SelectorConfig) -> Result<Self> {
        let client = ClientBuilder::native()
            .connect(webdriver_url)
            .await
            .map_err(|error| {
                Error::Navigation(format!("WebDriver session at {webdriver_url}: {error}"))
            })?;

        Ok(Self { client, selectors })
    }

    /// Ends the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be closed cleanly.
    pub async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .map_err(|error| driver_error(&error))
    }

    /// Locates the input textbox by its accessible name.
    ///
    /// `WebDriver` has no role/name query, so the accessible name is matched
    /// against the `placeholder` and `aria-label` attributes of textarea
    /// candidates; falls back to the first textarea on the page.
    async fn input_element(&self) -> Result<Element> {
        let candidates = self
            .client
            .find_all(Locator::Css("textarea"))
            .await
            .map_err(|error| driver_error(&error))?;

        for element in &candidates {
            let placeholder = element
                .attr("placeholder")
                .await
                .map_err(|error| driver_error(&error))?;
            let aria_label = element
                .attr("aria-label")
                .await
                .map_err(|error| driver_error(&error))?;
            let label = self.selectors.input_label.as_str();
            if placeholder.as_deref() == Some(label) || aria_label.as_deref() == Some(label) {
                return Ok(element.clone());
            }
        }

        candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::Driver("input surface not found".to_owned()))
    }

    /// Whether the document currently reports `readyState === "complete"`.
    async fn document_ready(&self) -> Result<bool> {
        let value = self
            .client
            .execute("return document.readyState;", Vec::new())
            .await
            .map_err(|error| driver_error(&error))?;
        Ok(value == JsonValue::String("complete".to_owned()))
    }
}

#[async_trait]
impl PageDriver for WebDriverPage {
    fn name(&self) -> &'static str {
        "webdriver"
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|error| Error::Navigation(format!("goto {url}: {error}")))
    }

    async fn wait_for_idle(&self) -> Result<()> {
        let ready = await_condition(
            move || self.document_ready(),
            READY_POLL_INTERVAL,
            READY_TIMEOUT,
        )
        .await?;

        if ready {
            Ok(())
        } else {
            Err(Error::Navigation(format!(
                "page did not become ready within {} ms",
                READY_TIMEOUT.as_millis()
            )))
        }
    }

    async fn fill_input(&self, text: &str) -> Result<()> {
        let element = self.input_element().await?;
        element
            .clear()
            .await
            .map_err(|error| driver_error(&error))?;
        if text.is_empty() {
            return Ok(());
        }
        element
            .send_keys(text)
            .await
            .map_err(|error| driver_error(&error))
    }

    async fn clear_input(&self) -> Result<()> {
        let element = self.input_element().await?;
        element.clear().await.map_err(|error| driver_error(&error))
    }

    async fn press_input(&self, unit: char) -> Result<()> {
        let element = self.input_element().await?;
        element
            .send_keys(&unit.to_string())
            .await
            .map_err(|error| driver_error(&error))
    }

    async fn output_candidates(&self) -> Result<Vec<Surface>> {
        let elements = self
            .client
            .find_all(Locator::Css(&self.selectors.output_container))
            .await
            .map_err(|error| driver_error(&error))?;

        let mut candidates = Vec::with_capacity(elements.len());
        for element in &elements {
            let tag = element
                .prop("tagName")
                .await
                .map_err(|error| driver_error(&error))?
                .unwrap_or_default();
            let role = element
                .attr("role")
                .await
                .map_err(|error| driver_error(&error))?;
            let editable = tag.eq_ignore_ascii_case("textarea") || role.as_deref() == Some("textbox");
            let text = element.text().await.map_err(|error| driver_error(&error))?;
            candidates.push(Surface::new(text, editable));
        }
        Ok(candidates)
    }
}
