//! Request filters and the compiled predicate shared by both search paths.
//!
//! The predicate is compiled once per request and handed unchanged to the
//! vector and keyword searchers. Keeping one compiled form (evaluated
//! in-memory here, rendered to SQL by the storage layer) is what keeps the
//! two paths from drifting apart.

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, LegalSlice, Result, SliceState};

const AS_OF_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Lifecycle states admitted into search results. Repealed and unknown
/// slices are excluded regardless of caller input.
pub const SEARCHABLE_STATES: &[SliceState] = &[SliceState::InForce, SliceState::Amended];

/// Caller-supplied filters, rebuilt per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
	pub jurisdiction: Option<String>,
	pub topics: Option<Vec<String>>,
	pub as_of: Option<Date>,
}
impl SearchFilters {
	/// Builds filters from raw request values. A malformed as-of string is
	/// a caller error, never silently dropped.
	pub fn parse(
		jurisdiction: Option<String>,
		topics: Option<Vec<String>>,
		as_of: Option<&str>,
	) -> Result<Self> {
		let as_of = match as_of {
			Some(raw) => Some(parse_as_of(raw)?),
			None => None,
		};

		Ok(Self { jurisdiction, topics, as_of })
	}

	/// Compiles the filters into the predicate both searchers apply.
	pub fn compile(&self) -> CompiledFilter {
		let jurisdiction = self
			.jurisdiction
			.as_deref()
			.map(|raw| raw.trim().to_lowercase())
			.filter(|normalized| !normalized.is_empty());
		let topics = self.topics.as_deref().filter(|topics| !topics.is_empty()).map(|topics| {
			let mut sorted: Vec<String> = topics.to_vec();

			sorted.sort();
			sorted.dedup();

			sorted
		});

		CompiledFilter { jurisdiction, topics, as_of: self.as_of, states: SEARCHABLE_STATES }
	}
}

/// Parses a `YYYY-MM-DD` as-of date. Permissive about a trailing time
/// component: a full timestamp is accepted and truncated to its date.
pub fn parse_as_of(raw: &str) -> Result<Date> {
	let trimmed = raw.trim();
	let date_part = match trimmed.char_indices().nth(10) {
		Some((byte_idx, sep)) if sep == 'T' || sep == ' ' => &trimmed[..byte_idx],
		_ => trimmed,
	};

	Date::parse(date_part, AS_OF_FORMAT)
		.map_err(|_| Error::InvalidAsOf { value: raw.to_string() })
}

/// The compiled predicate: an AND of the baseline state clause and every
/// caller clause that is present.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
	/// Trimmed, lower-cased jurisdiction string; `None` when absent or blank.
	pub jurisdiction: Option<String>,
	/// Sorted, deduplicated topic set; `None` when absent or empty.
	pub topics: Option<Vec<String>>,
	pub as_of: Option<Date>,
	pub states: &'static [SliceState],
}
impl CompiledFilter {
	pub fn matches(&self, slice: &LegalSlice) -> bool {
		if !self.states.contains(&slice.state) {
			return false;
		}
		if let Some(jurisdiction) = self.jurisdiction.as_deref()
			&& !jurisdiction_matches(slice, jurisdiction)
		{
			return false;
		}
		if let Some(topics) = self.topics.as_deref()
			&& !topics.iter().all(|topic| slice.topics.iter().any(|have| have == topic))
		{
			return false;
		}
		if let Some(as_of) = self.as_of {
			if slice.effective.from_date > as_of {
				return false;
			}
			if let Some(to) = slice.effective.to_date
				&& to <= as_of
			{
				return false;
			}
		}

		true
	}
}

fn jurisdiction_matches(slice: &LegalSlice, needle: &str) -> bool {
	let jurisdiction = &slice.jurisdiction;
	let candidates = [
		Some(jurisdiction.level.as_str()),
		Some(jurisdiction.name.as_str()),
		jurisdiction.emirate.as_deref(),
		jurisdiction.freezone.as_deref(),
	];

	candidates.into_iter().flatten().any(|value| value.to_lowercase() == needle)
}
