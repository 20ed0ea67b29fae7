/// Configuration options for the tree builder.
///
/// Stream tuning (chunk size, token size limit) is not part of the options;
/// it is passed to [`parse_reader`](crate::parse_reader) and
/// [`parse_source`](crate::parse_source) directly.
///
/// # Default
///
/// All options default to `false`, which gives strict RFC 8259 structure with
/// trailing text ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Whether a comma may appear right before `]` or `}`.
    ///
    /// # Examples
    ///
    /// ```json
    /// {"a": 1, "b": [1, 2,],}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_commas: bool,

    /// Whether anything other than whitespace after the top-level value is an
    /// error.
    ///
    /// When `false`, parsing stops as soon as the top-level value is complete
    /// and the rest of the input is never read.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_trailing_content: bool,
}
