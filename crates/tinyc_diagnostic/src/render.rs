use std::io;

use termcolor::WriteColor;
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::{Config, Diagnostic, Snippet};

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<W: WriteColor, S: Sources> DiagnosticWriter<'_, '_, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        for snippet in &self.diagnostic.snippets {
            // snippets into unknown sources only lose their excerpt
            if let Some(source) = self.sources.get_source(snippet.source_id) {
                self.draw_snippet(source, snippet)?;
            }
        }

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        let sources = self.sources;
        let located = self.diagnostic.snippets.first().and_then(|snippet| {
            let source = sources.get_source(snippet.source_id)?;
            Some((snippet.loc, source.name_str()))
        });

        if let Some((loc, name)) = located {
            self.stream.set_color(&self.config.emphasis)?;
            write!(self.stream, "{}: ", loc.in_source(name))?;
            self.stream.reset()?;
        }

        self.stream.set_color(&self.config.error_color)?;
        write!(self.stream, "error:")?;
        self.stream.reset()?;

        writeln!(self.stream, " {}", self.diagnostic.message)
    }

    fn draw_snippet(
        &mut self,
        source: &Cached<S::Source>,
        snippet: &Snippet<S>,
    ) -> io::Result<()> {
        let Some(line) = source.line_str(snippet.loc.row) else {
            return Ok(());
        };

        let line_num = snippet.loc.row + 1;
        let line_num_width = 1 + line_num.ilog10() as usize;

        self.draw_gutter(None, line_num_width)?;
        writeln!(self.stream)?;

        self.draw_gutter(Some(line_num), line_num_width)?;
        writeln!(self.stream, " {}", line.replace('\t', TAB))?;

        let before_snippet = line.get(..snippet.loc.col).unwrap_or(line);
        let offset = str_width(before_snippet);

        // a snippet may run past the end of its line, e.g. a string literal
        // containing a newline
        let underlined = line
            .get(snippet.loc.col..)
            .and_then(|rest| rest.get(..snippet.width.min(rest.len())))
            .map_or(0, str_width)
            .max(1);

        self.draw_gutter(None, line_num_width)?;

        self.stream.set_color(&self.config.error_color)?;

        write!(self.stream, " {:<offset$}", "")?;
        for _ in 0..underlined {
            write!(self.stream, "{}", self.config.underline)?;
        }
        writeln!(
            self.stream,
            "{}{}",
            self.config.underline_after, snippet.label
        )?;

        self.stream.reset()?;

        Ok(())
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        match line {
            Some(line) => write!(self.stream, "{line:>line_num_width$}")?,
            None => write!(self.stream, "{:>line_num_width$}", "")?,
        }

        write!(self.stream, " {}", self.config.gutter)?;

        self.stream.reset()?;

        Ok(())
    }
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}
