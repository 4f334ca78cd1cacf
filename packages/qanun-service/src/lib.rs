//! The hybrid retrieval core: query + filters in, ranked citable slices
//! out. Vector and keyword search run against the storage collaborators;
//! rank fusion merges their orderings; the citation formatter bounds the
//! final output.

pub mod answer;
pub mod citation;
pub mod embedding;
pub mod fusion;
pub mod search;

use std::sync::Arc;

use qanun_config::Config;
use qanun_domain::LegalSlice;
use qanun_storage::store::{SliceStore, VectorIndex};

pub use answer::{AnswerResponse, DISCLAIMER};
pub use citation::{Citation, build_citation, snippet};
pub use embedding::HashEmbedder;
pub use fusion::{Fuser, FusionWeights, ScoredCandidate, SourcePath};
pub use search::{ScoredSlice, SearchRequest, SearchResponse};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Maps text to a fixed-dimension vector. Pure and stateless: identical
/// input must always produce an identical vector.
pub trait Embedder
where
	Self: Send + Sync,
{
	fn embed(&self, text: &str) -> Vec<f32>;

	fn dim(&self) -> usize;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	Storage { message: String },
	Index { message: String },
}
impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::Storage { message } => write!(f, "Storage error: {message}"),
			Self::Index { message } => write!(f, "Index error: {message}"),
		}
	}
}
impl std::error::Error for ServiceError {}
impl From<qanun_domain::Error> for ServiceError {
	fn from(err: qanun_domain::Error) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
impl From<qanun_storage::Error> for ServiceError {
	fn from(err: qanun_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

pub struct QanunService {
	pub cfg: Config,
	pub store: Arc<dyn SliceStore>,
	pub index: Arc<dyn VectorIndex>,
	pub embedder: Arc<dyn Embedder>,
	pub fuser: Fuser,
}
impl QanunService {
	pub fn new(cfg: Config, store: Arc<dyn SliceStore>, index: Arc<dyn VectorIndex>) -> Self {
		let embedder = Arc::new(HashEmbedder::new(cfg.retrieval.embed_dim));

		Self::with_embedder(cfg, store, index, embedder)
	}

	pub fn with_embedder(
		cfg: Config,
		store: Arc<dyn SliceStore>,
		index: Arc<dyn VectorIndex>,
		embedder: Arc<dyn Embedder>,
	) -> Self {
		Self { cfg, store, index, embedder, fuser: Fuser::default() }
	}

	pub async fn get_slice(&self, id: &str) -> ServiceResult<Option<LegalSlice>> {
		let slice = self.store.get(id).await?;

		Ok(slice)
	}
}
