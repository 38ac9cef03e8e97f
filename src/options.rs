//! Parser and emitter configuration, built with a small builder type.

/// Options for [`crate::parse_with_options`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    max_depth: usize,
}

impl Default for ParserOptions {
    /// Returns default parser options: a maximum nesting depth of 512.
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

impl ParserOptions {
    /// The maximum combined nesting depth of arrays and objects the parser
    /// will descend into before returning [`crate::ParseError::DepthExceeded`].
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// A builder for [`ParserOptions`].
///
/// ```
/// use fsmjson::ParserOptionsBuilder;
///
/// let options = ParserOptionsBuilder::default().with_max_depth(16).build();
/// assert_eq!(options.max_depth(), 16);
/// ```
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptionsBuilder {
    options: ParserOptions,
}

impl ParserOptionsBuilder {
    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Build the final [`ParserOptions`].
    pub fn build(self) -> ParserOptions {
        self.options
    }
}

/// The whitespace style used by the indented emitter mode.
///
/// Covers every combination of indent unit ({space, tab}) and line ending
/// ({LF, CRLF}), plus a fully compact mode with no insignificant whitespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WhitespaceStyle {
    /// Compact: no insignificant whitespace at all.
    #[default]
    Compact,
    SpaceLf,
    TabLf,
    SpaceCrLf,
    TabCrLf,
}

impl WhitespaceStyle {
    pub(crate) fn indent_unit(self) -> &'static str {
        match self {
            WhitespaceStyle::Compact => "",
            WhitespaceStyle::SpaceLf | WhitespaceStyle::SpaceCrLf => "    ",
            WhitespaceStyle::TabLf | WhitespaceStyle::TabCrLf => "\t",
        }
    }

    pub(crate) fn newline(self) -> &'static str {
        match self {
            WhitespaceStyle::Compact => "",
            WhitespaceStyle::SpaceLf | WhitespaceStyle::TabLf => "\n",
            WhitespaceStyle::SpaceCrLf | WhitespaceStyle::TabCrLf => "\r\n",
        }
    }

    pub(crate) fn is_compact(self) -> bool {
        matches!(self, WhitespaceStyle::Compact)
    }
}
