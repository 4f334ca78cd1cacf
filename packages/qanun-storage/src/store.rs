//! Narrow collaborator interfaces the retrieval core searches through.
//!
//! Both traits take the same `CompiledFilter`; an implementation must apply
//! it to every row it returns. The in-memory fakes in `qanun-testkit`
//! implement the same contracts with exact brute-force distances.

use std::{future::Future, pin::Pin};

use qanun_config::Metric;
use qanun_domain::{CompiledFilter, LegalSlice};

use crate::Result;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One nearest-neighbour row: a slice id and the metric's raw measure
/// (distance for cosine/euclidean, raw inner product for ip). A missing
/// measure is surfaced as `None` and discarded by the searcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
	pub slice_id: String,
	pub measure: Option<f32>,
}

pub trait SliceStore
where
	Self: Send + Sync,
{
	/// Returns every slice satisfying the filter and, when `terms` is
	/// non-empty, containing every term as a case-insensitive substring of
	/// at least one of title, structure path, or text content.
	fn scan_matching<'a>(
		&'a self,
		filter: &'a CompiledFilter,
		terms: &'a [String],
	) -> BoxFuture<'a, Result<Vec<LegalSlice>>>;

	fn fetch<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, Result<Vec<LegalSlice>>>;

	fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<LegalSlice>>>;

	fn upsert<'a>(&'a self, slice: &'a LegalSlice) -> BoxFuture<'a, Result<()>>;
}

pub trait VectorIndex
where
	Self: Send + Sync,
{
	/// Returns up to `k` filter-satisfying slices with stored embeddings,
	/// ordered by the metric (ascending distance, or descending raw inner
	/// product).
	fn nearest<'a>(
		&'a self,
		vector: &'a [f32],
		k: usize,
		metric: Metric,
		filter: &'a CompiledFilter,
	) -> BoxFuture<'a, Result<Vec<Neighbor>>>;
}
