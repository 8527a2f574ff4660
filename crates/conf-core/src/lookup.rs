//! Read-only, section-keyed access shared by every loader.

/// Section-keyed read access to a loaded configuration.
///
/// Implemented by [`ConfigStore`](crate::ConfigStore), which resolves and
/// types its sections, and by [`JsonConfig`](crate::JsonConfig), which passes
/// a JSON document through untouched. Code that only needs lookups can take
/// either.
pub trait SectionLookup {
    /// What one section looks like in this loader.
    type Section;

    /// Look up a section by name.
    fn section(&self, name: &str) -> Option<&Self::Section>;

    /// All section names.
    fn section_names(&self) -> Vec<&str>;

    /// Whether a section with this name exists.
    fn contains_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }
}
