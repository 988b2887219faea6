//! One-time page setup
//!
//! [`configure_display`] runs once at startup and its [`DisplayConfig`] is
//! handed to every render through the app state.

use serde::Deserialize;

/// Horizontal layout of the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Map uses the full window width
    #[default]
    Wide,
    /// Map sits in a fixed-width centered column
    Centered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub title: String,
    pub layout: Layout,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("page title must not be empty")]
    EmptyTitle,
}

/// Validated page setup shared by every render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    title: String,
    layout: Layout,
}

impl DisplayConfig {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Bulma container class for the layout
    pub fn container_class(&self) -> &'static str {
        match self.layout {
            Layout::Wide => "container is-fluid",
            Layout::Centered => "container",
        }
    }
}

pub fn configure_display(options: DisplayOptions) -> Result<DisplayConfig, Error> {
    let title = options.title.trim();
    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }
    Ok(DisplayConfig {
        title: title.to_string(),
        layout: options.layout,
    })
}
