//! Thin answer composition over the fused search results.
//!
//! Takes the top citations as-is, templates them into a
//! disclaimer-qualified string, and performs no additional ranking.

use crate::{Citation, QanunService, SearchRequest, ServiceResult};

pub const DISCLAIMER: &str = "Information retrieval tool, not legal advice. The official text \
prevails: DIFC/ADGM English versions are authoritative; federal English texts are usually \
reference translations.";

const NO_MATCH_MESSAGE: &str =
	"No matching official provisions were found. Try adjusting the keywords.";

const ANSWER_CITATIONS: usize = 3;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerResponse {
	pub answer: String,
	pub items: Vec<Citation>,
	pub disclaimer: String,
}

impl QanunService {
	pub async fn answer(&self, req: SearchRequest) -> ServiceResult<AnswerResponse> {
		let response = self.search(req).await?;
		let answer = synthesize_answer(&response.items);

		Ok(AnswerResponse { answer, items: response.items, disclaimer: DISCLAIMER.to_string() })
	}
}

pub fn synthesize_answer(citations: &[Citation]) -> String {
	if citations.is_empty() {
		return NO_MATCH_MESSAGE.to_string();
	}

	let fragments: Vec<String> = citations
		.iter()
		.take(ANSWER_CITATIONS)
		.map(|citation| {
			format!(
				"{} ({}): {}",
				citation.instrument_title, citation.structure_path, citation.snippet
			)
		})
		.collect();

	format!(
		"According to the retrieved official provisions (not legal advice): {}",
		fragments.join("; ")
	)
}
