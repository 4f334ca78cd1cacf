use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, Result};

/// Where in the UAE legal hierarchy an instrument sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionLevel {
	Federal,
	Emirate,
	Freezone,
}
impl JurisdictionLevel {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Federal => "federal",
			Self::Emirate => "emirate",
			Self::Freezone => "freezone",
		}
	}
}
impl FromStr for JurisdictionLevel {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw {
			"federal" => Ok(Self::Federal),
			"emirate" => Ok(Self::Emirate),
			"freezone" => Ok(Self::Freezone),
			_ => Err(Error::UnknownVariant { field: "jurisdiction level", value: raw.to_string() }),
		}
	}
}

/// The structural level a slice represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
	Article,
	Clause,
	Item,
	Rule,
	Section,
}
impl Granularity {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Article => "article",
			Self::Clause => "clause",
			Self::Item => "item",
			Self::Rule => "rule",
			Self::Section => "section",
		}
	}
}
impl FromStr for Granularity {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw {
			"article" => Ok(Self::Article),
			"clause" => Ok(Self::Clause),
			"item" => Ok(Self::Item),
			"rule" => Ok(Self::Rule),
			"section" => Ok(Self::Section),
			_ => Err(Error::UnknownVariant { field: "granularity", value: raw.to_string() }),
		}
	}
}

/// Lifecycle state of a slice. Only `in_force` and `amended` slices are
/// searchable; `repealed` and `unknown` are excluded unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceState {
	InForce,
	Amended,
	Repealed,
	Unknown,
}
impl SliceState {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::InForce => "in_force",
			Self::Amended => "amended",
			Self::Repealed => "repealed",
			Self::Unknown => "unknown",
		}
	}
}
impl FromStr for SliceState {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw {
			"in_force" => Ok(Self::InForce),
			"amended" => Ok(Self::Amended),
			"repealed" => Ok(Self::Repealed),
			"unknown" => Ok(Self::Unknown),
			_ => Err(Error::UnknownVariant { field: "state", value: raw.to_string() }),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryLang {
	Ar,
	En,
}
impl PrimaryLang {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Ar => "ar",
			Self::En => "en",
		}
	}
}
impl FromStr for PrimaryLang {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw {
			"ar" => Ok(Self::Ar),
			"en" => Ok(Self::En),
			_ => Err(Error::UnknownVariant { field: "primary_lang", value: raw.to_string() }),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfficialLanguage {
	Arabic,
	English,
}
impl OfficialLanguage {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Arabic => "Arabic",
			Self::English => "English",
		}
	}
}
impl FromStr for OfficialLanguage {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw {
			"Arabic" => Ok(Self::Arabic),
			"English" => Ok(Self::English),
			_ => Err(Error::UnknownVariant { field: "official_language", value: raw.to_string() }),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jurisdiction {
	pub level: JurisdictionLevel,
	/// UAE / Dubai / Abu Dhabi / DIFC / ADGM ...
	pub name: String,
	pub emirate: Option<String>,
	pub freezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
	pub portal: String,
	pub url: String,
	pub gazette: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
	pub r#type: String,
	pub number: String,
	pub year: i32,
	pub title: String,
	pub issuer: Option<String>,
	pub official_language: OfficialLanguage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureLocators {
	pub part: Option<String>,
	pub chapter: Option<String>,
	pub section: Option<String>,
	pub article: Option<String>,
	pub rule: Option<String>,
	pub clause: Option<String>,
	pub item: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
	pub granularity: Granularity,
	/// Human-readable locator, e.g. "Part 2 > Article 16(1)".
	pub path: String,
	pub locators: StructureLocators,
}

/// Validity interval. `to_date`, when present, is exclusive and must lie
/// strictly after `from_date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effective {
	pub from_date: Date,
	pub to_date: Option<Date>,
}

/// A single structural unit of a legal instrument, the atomic unit of
/// retrieval. Immutable once ingested; the retrieval core only reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalSlice {
	pub id: String,
	pub jurisdiction: Jurisdiction,
	pub source: Source,
	pub instrument: Instrument,
	pub structure: Structure,
	pub text_content: String,
	pub text_hash: String,
	pub primary_lang: PrimaryLang,
	pub topics: Vec<String>,
	pub state: SliceState,
	pub effective: Effective,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub embedding: Option<Vec<f32>>,
}
impl LegalSlice {
	pub fn year(&self) -> i32 {
		self.instrument.year
	}

	/// Checks the record invariants: effective interval ordering and, when
	/// an embedding is stored, its dimension.
	pub fn validate(&self, embed_dim: usize) -> Result<()> {
		if let Some(to) = self.effective.to_date
			&& to <= self.effective.from_date
		{
			return Err(Error::EffectiveIntervalInverted { id: self.id.clone() });
		}
		if let Some(embedding) = self.embedding.as_ref()
			&& embedding.len() != embed_dim
		{
			return Err(Error::EmbeddingDimMismatch {
				id: self.id.clone(),
				expected: embed_dim,
				actual: embedding.len(),
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use time::macros::date;

	use super::*;
	use crate::test_support::fixture_slice;

	#[test]
	fn validate_accepts_open_interval() {
		let slice = fixture_slice("s1");

		assert!(slice.validate(4).is_ok());
	}

	#[test]
	fn validate_rejects_inverted_interval() {
		let mut slice = fixture_slice("s1");

		slice.effective.to_date = Some(slice.effective.from_date);

		assert!(matches!(
			slice.validate(4),
			Err(Error::EffectiveIntervalInverted { .. })
		));
	}

	#[test]
	fn validate_rejects_wrong_embedding_dim() {
		let mut slice = fixture_slice("s1");

		slice.embedding = Some(vec![0.0; 3]);

		assert!(matches!(slice.validate(4), Err(Error::EmbeddingDimMismatch { .. })));
	}

	#[test]
	fn validate_accepts_matching_embedding_dim() {
		let mut slice = fixture_slice("s1");

		slice.embedding = Some(vec![0.25; 4]);
		slice.effective.to_date = Some(date!(2031 - 01 - 01));

		assert!(slice.validate(4).is_ok());
	}

	#[test]
	fn enums_round_trip_through_strings() {
		for state in
			[SliceState::InForce, SliceState::Amended, SliceState::Repealed, SliceState::Unknown]
		{
			assert_eq!(state.as_str().parse::<SliceState>().unwrap(), state);
		}
		for level in
			[JurisdictionLevel::Federal, JurisdictionLevel::Emirate, JurisdictionLevel::Freezone]
		{
			assert_eq!(level.as_str().parse::<JurisdictionLevel>().unwrap(), level);
		}
	}
}
