use axum::http::StatusCode;
use maud::{html, Markup};

use crate::{
    display::DisplayConfig,
    templates::layouts::{base, PageConfig},
};

/// Shown in place of the map when a rendering pass aborts
pub fn error_page(display: &DisplayConfig, status: StatusCode, message: &str) -> Markup {
    let content = html! {
        div class="notification is-danger" {
            p class="has-text-weight-bold" {
                (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error"))
            }
            p { (message) }
            a href="/" class="button is-light mt-4" { "Reload" }
        }
    };
    base(&PageConfig::from(display), content)
}
