use time::macros::date;

use crate::{
	Effective, Granularity, Instrument, Jurisdiction, JurisdictionLevel, LegalSlice,
	OfficialLanguage, PrimaryLang, SliceState, Source, Structure, StructureLocators,
};

pub(crate) fn fixture_slice(id: &str) -> LegalSlice {
	LegalSlice {
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
			number: "5".to_string(),
			year: 2020,
			title: "Civil Transactions Law".to_string(),
			issuer: None,
			official_language: OfficialLanguage::Arabic,
		},
		structure: Structure {
			granularity: Granularity::Article,
			path: "Article 1".to_string(),
			locators: StructureLocators { article: Some("1".to_string()), ..Default::default() },
		},
		text_content: "General provisions.".to_string(),
		text_hash: format!("hash-{id}"),
		primary_lang: PrimaryLang::Ar,
		topics: Vec::new(),
		state: SliceState::InForce,
		effective: Effective { from_date: date!(2020 - 01 - 01), to_date: None },
		embedding: None,
	}
}
