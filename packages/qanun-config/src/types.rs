use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Postgres,
	pub retrieval: Retrieval,
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Retrieval {
	pub embed_dim: usize,
	pub metric: Metric,
}

/// Per-request search depths. Not environment-tunable; the defaults mirror
/// the depths the ranking contract was calibrated against.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	pub vector_k: usize,
	pub keyword_k: usize,
	pub limit: usize,
	pub snippet_max_chars: usize,
}
impl Default for Search {
	fn default() -> Self {
		Self { vector_k: 8, keyword_k: 16, limit: 8, snippet_max_chars: 200 }
	}
}

/// Distance/similarity function used against stored embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
	Cosine,
	Euclidean,
	InnerProduct,
}
impl Metric {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Cosine => "cosine",
			Self::Euclidean => "euclidean",
			Self::InnerProduct => "ip",
		}
	}

	/// Parses a configured metric name. Returns `None` for unrecognized
	/// values so the caller can fall back with a warning.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_lowercase().as_str() {
			"cosine" => Some(Self::Cosine),
			"euclidean" | "l2" => Some(Self::Euclidean),
			"ip" | "inner_product" | "inner-product" => Some(Self::InnerProduct),
			_ => None,
		}
	}
}
