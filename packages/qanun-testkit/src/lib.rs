//! In-memory fakes for the storage collaborators, plus fixture builders.
//!
//! `MemoryCorpus` implements both `SliceStore` and `VectorIndex` against
//! one map, evaluating the compiled filter directly and computing exact
//! brute-force distances, so the retrieval core can be tested without
//! Postgres.

mod fixtures;

pub use fixtures::SliceFixture;

use std::{collections::BTreeMap, sync::Mutex};

use qanun_config::Metric;
use qanun_domain::{CompiledFilter, LegalSlice};
use qanun_storage::{
	Error, Result,
	store::{BoxFuture, Neighbor, SliceStore, VectorIndex},
};

pub struct MemoryCorpus {
	embed_dim: usize,
	slices: Mutex<BTreeMap<String, LegalSlice>>,
}
impl MemoryCorpus {
	pub fn new(embed_dim: usize) -> Self {
		Self { embed_dim, slices: Mutex::new(BTreeMap::new()) }
	}

	pub fn seed(&self, slices: impl IntoIterator<Item = LegalSlice>) {
		let mut held = self.lock();

		for slice in slices {
			held.insert(slice.id.clone(), slice);
		}
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, LegalSlice>> {
		self.slices.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl SliceStore for MemoryCorpus {
	fn scan_matching<'a>(
		&'a self,
		filter: &'a CompiledFilter,
		terms: &'a [String],
	) -> BoxFuture<'a, Result<Vec<LegalSlice>>> {
		Box::pin(async move {
			let lowered: Vec<String> = terms.iter().map(|term| term.to_lowercase()).collect();
			let matched = self
				.lock()
				.values()
				.filter(|slice| filter.matches(slice))
				.filter(|slice| lowered.iter().all(|term| contains_term(slice, term)))
				.cloned()
				.collect();

			Ok(matched)
		})
	}

	fn fetch<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, Result<Vec<LegalSlice>>> {
		Box::pin(async move {
			let held = self.lock();

			Ok(ids.iter().filter_map(|id| held.get(id).cloned()).collect())
		})
	}

	fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<LegalSlice>>> {
		Box::pin(async move { Ok(self.lock().get(id).cloned()) })
	}

	fn upsert<'a>(&'a self, slice: &'a LegalSlice) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			slice.validate(self.embed_dim)?;
			self.lock().insert(slice.id.clone(), slice.clone());

			Ok(())
		})
	}
}
impl VectorIndex for MemoryCorpus {
	fn nearest<'a>(
		&'a self,
		vector: &'a [f32],
		k: usize,
		metric: Metric,
		filter: &'a CompiledFilter,
	) -> BoxFuture<'a, Result<Vec<Neighbor>>> {
		Box::pin(async move {
			let mut measured: Vec<(String, f32)> = Vec::new();

			for slice in self.lock().values() {
				if !filter.matches(slice) {
					continue;
				}

				let Some(embedding) = slice.embedding.as_deref() else {
					continue;
				};

				if embedding.len() != vector.len() {
					return Err(Error::InvalidArgument(format!(
						"Stored embedding for {} has {} dimensions, query has {}.",
						slice.id,
						embedding.len(),
						vector.len()
					)));
				}

				let measure = match metric {
					Metric::Cosine => cosine_distance(vector, embedding),
					Metric::Euclidean => l2_distance(vector, embedding),
					Metric::InnerProduct => dot(vector, embedding),
				};

				measured.push((slice.id.clone(), measure));
			}

			measured.sort_by(|left, right| {
				let by_measure = match metric {
					Metric::InnerProduct => right.1.total_cmp(&left.1),
					Metric::Cosine | Metric::Euclidean => left.1.total_cmp(&right.1),
				};

				by_measure.then_with(|| left.0.cmp(&right.0))
			});
			measured.truncate(k);

			Ok(measured
				.into_iter()
				.map(|(slice_id, measure)| Neighbor { slice_id, measure: Some(measure) })
				.collect())
		})
	}
}

fn contains_term(slice: &LegalSlice, term_lower: &str) -> bool {
	slice.instrument.title.to_lowercase().contains(term_lower)
		|| slice.structure.path.to_lowercase().contains(term_lower)
		|| slice.text_content.to_lowercase().contains(term_lower)
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
	a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
	a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f32>().sqrt()
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
	let norm_a = dot(a, a).sqrt();
	let norm_b = dot(b, b).sqrt();

	if norm_a == 0.0 || norm_b == 0.0 {
		return 1.0;
	}

	1.0 - dot(a, b) / (norm_a * norm_b)
}
