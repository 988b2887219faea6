use maud::{html, Markup, DOCTYPE};

use crate::display::DisplayConfig;

pub struct PageConfig<'a> {
    pub title: &'a str,
    pub container_class: &'a str,
}

impl<'a> From<&'a DisplayConfig> for PageConfig<'a> {
    fn from(display: &'a DisplayConfig) -> Self {
        PageConfig {
            title: display.title(),
            container_class: display.container_class(),
        }
    }
}

pub fn base(config: &PageConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ja" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.title) }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@1.0.4/css/bulma.min.css";
            }
            body {
                section class="section" {
                    div class=(config.container_class) {
                        h1 class="title" { (config.title) }

                        // Main content area
                        div id="main-content" {
                            (content)
                        }
                    }
                }
            }
        }
    }
}
