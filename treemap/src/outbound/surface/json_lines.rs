//! Directive stream written as one JSON object per line.

use std::io::Write;

use super::{Directive, DirectiveSink, DirectiveSurface};
use crate::domain::ports::RenderSurfaceError;

/// Writes each directive as a JSON line and flushes it.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DirectiveSink for JsonLinesSink<W> {
    fn emit(&mut self, directive: Directive) -> Result<(), RenderSurfaceError> {
        serde_json::to_writer(&mut self.writer, &directive)
            .map_err(|error| RenderSurfaceError::rejected(error.to_string()))?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .map_err(|error| RenderSurfaceError::unavailable(error.to_string()))
    }
}

/// Surface streaming directives to a writer.
pub type JsonLinesRenderSurface<W> = DirectiveSurface<JsonLinesSink<W>>;

impl<W: Write> JsonLinesRenderSurface<W> {
    #[must_use]
    pub fn to_writer(writer: W) -> Self {
        Self::new(JsonLinesSink::new(writer))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rstest::rstest;

    use super::*;
    use crate::domain::SelectionText;
    use crate::domain::ports::RenderSurface;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[rstest]
    fn each_directive_is_one_line() {
        let mut surface = JsonLinesRenderSurface::to_writer(Vec::new());
        let text = SelectionText {
            name: "Dąb".to_owned(),
            facts: "3 lata temu, 𝝓 30 cm".to_owned(),
        };
        surface.show_selection(&text).expect("selection written");
        surface.show_selection(&text).expect("selection written");

        let output = String::from_utf8(surface.into_sink().into_inner()).expect("utf-8 output");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"directive":"showSelection","name":"Dąb","facts":"3 lata temu, 𝝓 30 cm"}"#
        );
    }

    #[rstest]
    fn write_failures_surface_as_errors() {
        let mut surface = JsonLinesRenderSurface::to_writer(BrokenPipe);
        let text = SelectionText {
            name: "Lipa".to_owned(),
            facts: String::new(),
        };
        let error = surface.show_selection(&text).expect_err("pipe is closed");
        assert!(matches!(error.code(), 1 | 3));
    }
}
