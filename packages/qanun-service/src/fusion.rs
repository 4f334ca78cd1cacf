//! Rank fusion: merges the vector and keyword orderings into one list.
//!
//! Each source contributes a reciprocal-rank base term plus its raw score,
//! so a result ranked first by either path counts even when the two score
//! domains are not directly comparable. The vector path carries the larger
//! rank weight; keyword substring matches are the noisier signal.

use std::{cmp::Ordering, collections::HashMap};

use qanun_domain::LegalSlice;

use crate::search::ScoredSlice;

#[derive(Debug, Clone, Copy)]
pub struct FusionWeights {
	pub vector_rank: f32,
	pub keyword_rank: f32,
	pub jurisdiction_boost: f32,
}
impl Default for FusionWeights {
	fn default() -> Self {
		Self { vector_rank: 1.2, keyword_rank: 0.8, jurisdiction_boost: 0.5 }
	}
}

/// Which search path produced a fused candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePath {
	Vector,
	Keyword,
	Both,
}

/// A fused candidate with its accumulated score. Request-scoped; never
/// persisted.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
	pub slice: LegalSlice,
	pub score: f32,
	pub source: SourcePath,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Fuser {
	pub weights: FusionWeights,
}
impl Fuser {
	pub fn new(weights: FusionWeights) -> Self {
		Self { weights }
	}

	/// Merges both ranked lists, accumulating contributions for slices
	/// present in both, and returns at most `limit` candidates ordered by
	/// accumulated score with ties broken by slice id.
	pub fn fuse(
		&self,
		vector_results: Vec<ScoredSlice>,
		keyword_results: Vec<ScoredSlice>,
		jurisdiction_filtered: bool,
		limit: usize,
	) -> Vec<ScoredCandidate> {
		let mut combined: HashMap<String, ScoredCandidate> = HashMap::new();

		for (rank, item) in vector_results.into_iter().enumerate() {
			let score = self.weights.vector_rank / (1 + rank) as f32 + item.score.max(0.0);

			combined.insert(
				item.slice.id.clone(),
				ScoredCandidate { slice: item.slice, score, source: SourcePath::Vector },
			);
		}

		for (rank, item) in keyword_results.into_iter().enumerate() {
			let increment = self.weights.keyword_rank / (1 + rank) as f32 + item.score;

			match combined.get_mut(&item.slice.id) {
				Some(existing) => {
					existing.score += increment;
					existing.source = SourcePath::Both;
				},
				None => {
					combined.insert(
						item.slice.id.clone(),
						ScoredCandidate {
							slice: item.slice,
							score: increment,
							source: SourcePath::Keyword,
						},
					);
				},
			}
		}

		// A constant offset over the already-filtered set: it cannot change
		// relative order, and is kept for score parity with the original
		// ranking output.
		if jurisdiction_filtered {
			for candidate in combined.values_mut() {
				candidate.score += self.weights.jurisdiction_boost;
			}
		}

		let mut ranked: Vec<ScoredCandidate> = combined.into_values().collect();

		ranked.sort_by(|left, right| {
			cmp_f32_desc(left.score, right.score).then_with(|| left.slice.id.cmp(&right.slice.id))
		});
		ranked.truncate(limit);

		ranked
	}
}

pub(crate) fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
