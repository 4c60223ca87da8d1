//! What the display hands to its host: a minimal element tree for text
//! output, and an HTML page rendered from a template.

use std::fmt;

use askama::Template;

use crate::model::{DisplayState, Location, WeatherReading};

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Container(Vec<Element>),
    Heading(String),
    Paragraph(String),
    Text(String),
}

impl Element {
    /// All visible text, depth first, joined by newlines.
    pub fn text_content(&self) -> String {
        let mut lines = Vec::new();
        self.collect_text(&mut lines);
        lines.join("\n")
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Element::Container(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Element::Heading(text) | Element::Paragraph(text) | Element::Text(text) => {
                out.push(text.as_str())
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text_content())
    }
}

#[derive(Template)]
#[template(path = "weather.html")]
struct WeatherTemplate<'a> {
    location: &'a str,
    loading_text: &'a str,
    reading: Option<&'a WeatherReading>,
}

/// Render the state as HTML. Text is escaped by the template engine.
pub fn render_html(
    location: &Location,
    loading_text: &str,
    state: &DisplayState,
) -> askama::Result<String> {
    WeatherTemplate {
        location: location.name,
        loading_text,
        reading: state.reading(),
    }
    .render()
}
