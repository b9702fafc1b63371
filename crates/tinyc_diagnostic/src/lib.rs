pub mod location;
mod render;
pub mod sources;

use std::fmt;

pub use termcolor;
use termcolor::{Color, ColorSpec};

use self::location::Location;
use self::sources::Sources;

/// A fatal error, rendered with the source lines it points at.
pub struct Diagnostic<S: Sources> {
    pub message: String,
    pub snippets: Vec<Snippet<S>>,
}

impl<S: Sources> Diagnostic<S> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            snippets: vec![],
        }
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: Snippet<S>) -> Self {
        self.snippets.push(snippet);
        self
    }
}

impl<S: Sources> fmt::Debug for Diagnostic<S>
where
    S::SourceId: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("message", &self.message)
            .field("snippets", &self.snippets)
            .finish()
    }
}

/// An underlined run of `width` bytes starting at `loc`.
pub struct Snippet<S: Sources> {
    pub label: String,

    pub source_id: S::SourceId,
    pub loc: Location,
    pub width: usize,
}

impl<S: Sources> Snippet<S> {
    pub fn new(
        label: impl Into<String>,
        source_id: S::SourceId,
        loc: Location,
        width: usize,
    ) -> Self {
        Self {
            label: label.into(),

            source_id,
            loc,
            width,
        }
    }
}

impl<S: Sources> fmt::Debug for Snippet<S>
where
    S::SourceId: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Snippet")
            .field("label", &self.label)
            .field("source_id", &self.source_id)
            .field("loc", &self.loc)
            .field("width", &self.width)
            .finish()
    }
}

#[derive(Debug)]
pub struct Config {
    pub error_color: ColorSpec,

    pub emphasis: ColorSpec,
    pub subtle: ColorSpec,

    pub gutter: &'static str,

    pub underline: &'static str,
    pub underline_after: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        let mut error_color = ColorSpec::new();
        error_color.set_fg(Some(Color::Red));
        error_color.set_bold(true);

        let mut subtle = ColorSpec::new();
        subtle.set_italic(true);
        subtle.set_dimmed(true);

        let mut emphasis = ColorSpec::new();
        emphasis.set_bold(true);

        Self {
            error_color,
            emphasis,
            subtle,

            gutter: "│",

            underline: "^",
            underline_after: " ",
        }
    }
}
