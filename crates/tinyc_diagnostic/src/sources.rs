pub trait Sources {
    type SourceId: Copy + Eq + std::hash::Hash;
    type Source: Source;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>>;
}

pub trait Source {
    fn name_str(&self) -> &str;
    fn source_str(&self) -> &str;
}

/// A source with the byte offset of every line start indexed up front.
#[derive(Debug)]
pub struct Cached<S: Source> {
    source: S,
    line_starts: Vec<usize>,
}

impl<S: Source> Cached<S> {
    pub fn new(source: S) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .source_str()
                    .match_indices('\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        Self {
            source,
            line_starts,
        }
    }

    /// The text of row `row`, without its line terminator.
    pub fn line_str(&self, row: usize) -> Option<&str> {
        let source = self.source_str();

        let start = *self.line_starts.get(row)?;
        let end = self
            .line_starts
            .get(row + 1)
            .map_or(source.len(), |&next| next - 1);

        let line = &source[start..end];
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}

impl<S: Source> Source for Cached<S> {
    fn name_str(&self) -> &str {
        self.source.name_str()
    }

    fn source_str(&self) -> &str {
        self.source.source_str()
    }
}
