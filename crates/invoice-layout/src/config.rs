//! Page capacity configuration
//!
//! Row capacities differ by page role. A document that fits entirely on one
//! page keeps the header and the summary block together ("compact"), while a
//! multi-page document uses a larger first page, uniform interior pages, and
//! a closing page that reserves room for the summary.

use crate::{LayoutError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row capacities for each page role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutConfig {
    /// Max rows when the whole document fits on a single page
    pub compact_rows: usize,
    /// Max rows on page 1 of a multi-page document
    pub first_page_rows: usize,
    /// Rows per interior page
    pub middle_page_rows: usize,
    /// Rows available on the closing page, which also carries the summary
    pub last_page_rows: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            compact_rows: 10,
            first_page_rows: 14,
            middle_page_rows: 21,
            last_page_rows: 16,
        }
    }
}

impl LayoutConfig {
    pub fn new(
        compact_rows: usize,
        first_page_rows: usize,
        middle_page_rows: usize,
        last_page_rows: usize,
    ) -> Result<Self> {
        let config = Self {
            compact_rows,
            first_page_rows,
            middle_page_rows,
            last_page_rows,
        };
        config.validate()?;
        Ok(config)
    }

    /// Two-parameter form: no distinct compact or closing capacity.
    ///
    /// Equivalent to `new(first, first, other, other)`.
    pub fn uniform(first_page_rows: usize, other_page_rows: usize) -> Result<Self> {
        Self::new(
            first_page_rows,
            first_page_rows,
            other_page_rows,
            other_page_rows,
        )
    }

    /// Validate the capacities
    pub fn validate(&self) -> Result<()> {
        if self.compact_rows == 0
            || self.first_page_rows == 0
            || self.middle_page_rows == 0
            || self.last_page_rows == 0
        {
            return Err(LayoutError::Config(
                "page capacities must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| LayoutError::Config(format!("Failed to read config: {}", e)))?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| LayoutError::Config(format!("Failed to write config: {}", e)))?;
        Ok(())
    }
}
