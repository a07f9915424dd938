/// Converter configuration
///
/// # Examples
///
/// ```
/// use to_api::{ApiConverter, ConverterConfig};
///
/// let converter = ApiConverter::with_config(ConverterConfig::new().max_depth(4));
/// assert_eq!(converter.config().max_depth, 4);
/// ```
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// How many records deep a conversion may descend. The top-level record
    /// sits at depth 0; descending into its attributes or an expanded
    /// relation adds one.
    pub max_depth: usize,
}

impl ConverterConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record nesting limit
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
