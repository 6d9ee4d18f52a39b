//! Builder-pattern printer for parse-failure diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use pegtree_core::InputBuffer;

use super::result::ParseFailure;

/// Renders a [`ParseFailure`] as an annotated source snippet.
pub struct FailurePrinter<'a> {
    failure: &'a ParseFailure,
    buffer: &'a InputBuffer,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> FailurePrinter<'a> {
    pub fn new(failure: &'a ParseFailure, buffer: &'a InputBuffer) -> Self {
        Self {
            failure,
            buffer,
            path: None,
            colored: false,
        }
    }

    /// Display path for the snippet header.
    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let location = self.failure.location;
        let message = self.failure.message();
        let title = format!("parse failed at {}:{}", location.line, location.column);
        let span = annotation_span(self.buffer, location.index as usize);

        let mut snippet = Snippet::source(self.buffer.as_str())
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(span).label(&message));
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&title).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// Byte span of the char at `index`, clamped so an annotation at the
/// virtual end of input stays inside the source.
fn annotation_span(buffer: &InputBuffer, index: usize) -> std::ops::Range<usize> {
    let start = buffer.byte_offset(index);
    let end = buffer.byte_offset(index + 1);
    if start == end {
        return start.saturating_sub(1)..end;
    }
    start..end
}
