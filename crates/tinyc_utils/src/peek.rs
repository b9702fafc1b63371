/// Lookahead over an iterator that can be cheaply cloned.
pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    /// Like [`Peek::peek`], but looks one item further ahead.
    fn peek_second(&self) -> Option<Self::Item>;
}

impl Peek for std::str::Chars<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }

    fn peek_second(&self) -> Option<Self::Item> {
        self.clone().nth(1)
    }
}
