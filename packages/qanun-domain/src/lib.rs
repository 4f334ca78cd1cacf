//! Domain model for statute retrieval: the `LegalSlice` record, its value
//! objects, and the search filter predicate shared by both search paths.

mod error;
mod filter;
mod slice;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, Result};
pub use filter::{CompiledFilter, SEARCHABLE_STATES, SearchFilters, parse_as_of};
pub use slice::{
	Effective, Granularity, Instrument, Jurisdiction, JurisdictionLevel, LegalSlice,
	OfficialLanguage, PrimaryLang, SliceState, Source, Structure, StructureLocators,
};
