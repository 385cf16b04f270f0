///
/// CodeWriter
///
/// Line-oriented text buffer with a current indentation level. Blank lines
/// never carry indentation.
///

pub(crate) struct CodeWriter<'a> {
    out: String,
    indent: &'a str,
    level: usize,
}

impl<'a> CodeWriter<'a> {
    pub(crate) const fn new(indent: &'a str) -> Self {
        Self {
            out: String::new(),
            indent,
            level: 0,
        }
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.out.push_str(self.indent);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `{`, the body one level deeper, then `}`.
    pub(crate) fn block<R, F>(&mut self, body: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.line("{");
        self.level += 1;
        let result = body(self);
        self.level -= 1;
        self.line("}");

        result
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

///
/// TESTS
///
