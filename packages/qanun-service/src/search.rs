//! The two search paths and their hybrid composition.
//!
//! The filter predicate is compiled once per request and handed unchanged
//! to both paths; they have no data dependency on each other and run
//! concurrently, with fusion as the single join point.

use std::collections::HashMap;

use qanun_config::Metric;
use qanun_domain::{CompiledFilter, LegalSlice, SearchFilters};

use crate::{
	Citation, QanunService, ServiceError, ServiceResult, citation::build_citation,
	fusion::{ScoredCandidate, cmp_f32_desc},
};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub query: String,
	pub jurisdiction: Option<String>,
	pub topics: Option<Vec<String>>,
	/// `YYYY-MM-DD`; malformed values are a caller error.
	pub as_of: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub query: String,
	pub items: Vec<Citation>,
}

/// One result from a single search path, before fusion.
#[derive(Debug, Clone)]
pub struct ScoredSlice {
	pub slice: LegalSlice,
	pub score: f32,
}

impl QanunService {
	pub async fn search(&self, req: SearchRequest) -> ServiceResult<SearchResponse> {
		let filters =
			SearchFilters::parse(req.jurisdiction, req.topics, req.as_of.as_deref())?;
		let ranked = self.hybrid_search(&req.query, &filters, self.cfg.search.limit).await?;
		let items = ranked
			.iter()
			.map(|candidate| build_citation(&candidate.slice, self.cfg.search.snippet_max_chars))
			.collect();

		Ok(SearchResponse { query: req.query, items })
	}

	pub async fn hybrid_search(
		&self,
		query: &str,
		filters: &SearchFilters,
		limit: usize,
	) -> ServiceResult<Vec<ScoredCandidate>> {
		let compiled = filters.compile();
		let vector_k = limit.min(self.cfg.search.vector_k);
		let keyword_k = (limit * 2).min(self.cfg.search.keyword_k);
		let (vector_results, keyword_results) = tokio::try_join!(
			self.vector_search(query, &compiled, vector_k),
			self.keyword_search(query, &compiled, keyword_k),
		)?;

		tracing::debug!(
			vector = vector_results.len(),
			keyword = keyword_results.len(),
			"Search paths returned candidates."
		);

		Ok(self.fuser.fuse(
			vector_results,
			keyword_results,
			compiled.jurisdiction.is_some(),
			limit,
		))
	}

	/// Embeds the query and ranks filter-satisfying slices by the
	/// configured metric. Rows without a measure are discarded; the
	/// returned score is monotone with the metric's ordering.
	pub async fn vector_search(
		&self,
		query: &str,
		filter: &CompiledFilter,
		k: usize,
	) -> ServiceResult<Vec<ScoredSlice>> {
		let metric = self.cfg.retrieval.metric;
		let query_vector = self.embedder.embed(query);
		let neighbors = self
			.index
			.nearest(&query_vector, k, metric, filter)
			.await
			.map_err(|err| ServiceError::Index { message: err.to_string() })?;
		let scored_ids: Vec<(String, f32)> = neighbors
			.into_iter()
			.filter_map(|neighbor| {
				neighbor
					.measure
					.map(|measure| (neighbor.slice_id, similarity_from_measure(metric, measure)))
			})
			.collect();
		let ids: Vec<String> = scored_ids.iter().map(|(id, _)| id.clone()).collect();
		let mut by_id: HashMap<String, LegalSlice> = self
			.store
			.fetch(&ids)
			.await?
			.into_iter()
			.map(|slice| (slice.id.clone(), slice))
			.collect();

		Ok(scored_ids
			.into_iter()
			.filter_map(|(id, score)| {
				by_id.remove(&id).map(|slice| ScoredSlice { slice, score })
			})
			.collect())
	}

	/// Scores filter-satisfying slices by weighted substring matches. A
	/// candidate must match every token in at least one field; ties break
	/// by instrument year, then id.
	pub async fn keyword_search(
		&self,
		query: &str,
		filter: &CompiledFilter,
		k: usize,
	) -> ServiceResult<Vec<ScoredSlice>> {
		let tokens = tokenize(query);

		if tokens.is_empty() {
			return Ok(Vec::new());
		}

		let candidates = self.store.scan_matching(filter, &tokens).await?;
		let lowered: Vec<String> = tokens.iter().map(|token| token.to_lowercase()).collect();
		let mut scored: Vec<ScoredSlice> = candidates
			.into_iter()
			.filter_map(|slice| {
				keyword_score(&slice, &lowered)
					.map(|score| ScoredSlice { slice, score: score as f32 })
			})
			.collect();

		scored.sort_by(|left, right| {
			cmp_f32_desc(left.score, right.score)
				.then_with(|| right.slice.year().cmp(&left.slice.year()))
				.then_with(|| left.slice.id.cmp(&right.slice.id))
		});
		scored.truncate(k);

		Ok(scored)
	}
}

pub fn tokenize(query: &str) -> Vec<String> {
	query.split_whitespace().map(str::to_string).collect()
}

/// Sum of matched-field weights (title 3, path 2, text 1) over all tokens,
/// or `None` when any token matches nowhere.
pub(crate) fn keyword_score(slice: &LegalSlice, tokens_lower: &[String]) -> Option<u32> {
	let title = slice.instrument.title.to_lowercase();
	let path = slice.structure.path.to_lowercase();
	let text = slice.text_content.to_lowercase();
	let mut total = 0_u32;

	for token in tokens_lower {
		let mut token_score = 0_u32;

		if title.contains(token.as_str()) {
			token_score += 3;
		}
		if path.contains(token.as_str()) {
			token_score += 2;
		}
		if text.contains(token.as_str()) {
			token_score += 1;
		}

		if token_score == 0 {
			return None;
		}

		total += token_score;
	}

	Some(total)
}

pub fn similarity_from_measure(metric: Metric, measure: f32) -> f32 {
	match metric {
		Metric::Cosine => 1.0 - measure,
		Metric::Euclidean => 1.0 / (1.0 + measure),
		Metric::InnerProduct => measure,
	}
}
