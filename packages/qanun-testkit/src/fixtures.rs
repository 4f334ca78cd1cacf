//! Builder for test corpora.

use time::{Date, macros::date};

use qanun_domain::{
	Effective, Granularity, Instrument, Jurisdiction, JurisdictionLevel, LegalSlice,
	OfficialLanguage, PrimaryLang, SliceState, Source, Structure, StructureLocators,
};

/// Builds a `LegalSlice` with sensible federal defaults; override what the
/// test cares about.
pub struct SliceFixture {
	slice: LegalSlice,
}
impl SliceFixture {
	pub fn new(id: &str) -> Self {
		Self {
			slice: LegalSlice {
				id: id.to_string(),
				jurisdiction: Jurisdiction {
					level: JurisdictionLevel::Federal,
					name: "UAE".to_string(),
					emirate: None,
					freezone: None,
				},
				source: Source {
					portal: "uaelegislation.gov.ae".to_string(),
					url: format!("https://uaelegislation.gov.ae/{id}"),
					gazette: None,
				},
				instrument: Instrument {
					r#type: "Federal Law".to_string(),
					number: "1".to_string(),
					year: 2020,
					title: format!("Instrument {id}"),
					issuer: None,
					official_language: OfficialLanguage::Arabic,
				},
				structure: Structure {
					granularity: Granularity::Article,
					path: "Article 1".to_string(),
					locators: StructureLocators {
						article: Some("1".to_string()),
						..Default::default()
					},
				},
				text_content: "General provisions.".to_string(),
				text_hash: format!("hash-{id}"),
				primary_lang: PrimaryLang::Ar,
				topics: Vec::new(),
				state: SliceState::InForce,
				effective: Effective { from_date: date!(2020 - 01 - 01), to_date: None },
				embedding: None,
			},
		}
	}

	pub fn title(mut self, title: &str) -> Self {
		self.slice.instrument.title = title.to_string();

		self
	}

	pub fn text(mut self, text: &str) -> Self {
		self.slice.text_content = text.to_string();

		self
	}

	pub fn path(mut self, path: &str) -> Self {
		self.slice.structure.path = path.to_string();

		self
	}

	pub fn year(mut self, year: i32) -> Self {
		self.slice.instrument.year = year;

		self
	}

	pub fn emirate(mut self, name: &str) -> Self {
		self.slice.jurisdiction.level = JurisdictionLevel::Emirate;
		self.slice.jurisdiction.name = name.to_string();
		self.slice.jurisdiction.emirate = Some(name.to_string());

		self
	}

	pub fn freezone(mut self, name: &str) -> Self {
		self.slice.jurisdiction.level = JurisdictionLevel::Freezone;
		self.slice.jurisdiction.name = name.to_string();
		self.slice.jurisdiction.freezone = Some(name.to_string());

		self
	}

	pub fn topics(mut self, topics: &[&str]) -> Self {
		self.slice.topics = topics.iter().map(|topic| topic.to_string()).collect();

		self
	}

	pub fn state(mut self, state: SliceState) -> Self {
		self.slice.state = state;

		self
	}

	pub fn effective(mut self, from_date: Date, to_date: Option<Date>) -> Self {
		self.slice.effective = Effective { from_date, to_date };

		self
	}

	pub fn embedding(mut self, embedding: Vec<f32>) -> Self {
		self.slice.embedding = Some(embedding);

		self
	}

	pub fn build(self) -> LegalSlice {
		self.slice
	}
}
