//! JSON encoder - dumps each page's display list for inspection and tests.

use quire_layout::{DisplayCommand, DocumentEncoder, Extent};
use serde::Serialize;

use crate::error::RenderError;

/// One page of the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonPage {
    /// Page width in device pixels.
    pub width: f32,
    /// Page height in device pixels.
    pub height: f32,
    /// Resolution the page was laid out at.
    pub dpi: f32,
    /// Drawing commands in painting order.
    pub commands: Vec<DisplayCommand>,
}

/// Encoder collecting pages as [`JsonPage`] values.
///
/// The output is a pretty-printed JSON array with one object per page.
#[derive(Debug, Default)]
pub struct JsonEncoder {
    pages: Vec<JsonPage>,
}

impl JsonEncoder {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentEncoder for JsonEncoder {
    type Output = String;
    type Error = RenderError;

    fn begin_page(&mut self, size: Extent, dpi: f32) -> Result<(), Self::Error> {
        self.pages.push(JsonPage {
            width: size.width,
            height: size.height,
            dpi,
            commands: Vec::new(),
        });
        Ok(())
    }

    fn execute(&mut self, command: &DisplayCommand) -> Result<(), Self::Error> {
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command.clone());
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, Self::Error> {
        Ok(serde_json::to_string_pretty(&self.pages)?)
    }
}
