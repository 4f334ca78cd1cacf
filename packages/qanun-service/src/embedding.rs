//! Deterministic placeholder embedding.
//!
//! Stands in for a learned model behind the `Embedder` trait: it hashes the
//! text, tiles the digest bytes to the configured dimension, centers them
//! into [-0.5, 0.5], and normalizes to unit length. Distinct texts land on
//! near-orthogonal vectors; identical texts always land on the same one.

use sha2::{Digest, Sha256};

use crate::Embedder;

pub struct HashEmbedder {
	dim: usize,
}
impl HashEmbedder {
	pub fn new(dim: usize) -> Self {
		Self { dim }
	}
}
impl Embedder for HashEmbedder {
	fn embed(&self, text: &str) -> Vec<f32> {
		hash_embed(text, self.dim)
	}

	fn dim(&self) -> usize {
		self.dim
	}
}

pub fn hash_embed(text: &str, dim: usize) -> Vec<f32> {
	if text.is_empty() {
		return vec![0.0; dim];
	}

	let digest = Sha256::digest(text.as_bytes());
	let bytes = digest.as_slice();
	let mut out: Vec<f32> =
		(0..dim).map(|i| bytes[i % bytes.len()] as f32 / 255.0 - 0.5).collect();
	let norm = out.iter().map(|value| value * value).sum::<f32>().sqrt();

	if norm > 0.0 {
		for value in &mut out {
			*value /= norm;
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identical_text_embeds_identically() {
		assert_eq!(hash_embed("tenancy deposit", 384), hash_embed("tenancy deposit", 384));
	}

	#[test]
	fn distinct_texts_embed_differently() {
		assert_ne!(hash_embed("tenancy deposit", 384), hash_embed("commercial agency", 384));
	}

	#[test]
	fn output_always_has_configured_dimension() {
		for dim in [1, 16, 384, 768] {
			assert_eq!(hash_embed("some text", dim).len(), dim);
			assert_eq!(hash_embed("", dim).len(), dim);
		}
	}

	#[test]
	fn non_empty_text_embeds_to_unit_norm() {
		let vector = hash_embed("landlord obligations", 384);
		let norm = vector.iter().map(|value| value * value).sum::<f32>().sqrt();

		assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
	}

	#[test]
	fn empty_text_embeds_to_zero_vector() {
		let vector = hash_embed("", 384);

		assert!(vector.iter().all(|value| *value == 0.0));
	}

	#[test]
	fn digest_bytes_tile_beyond_thirty_two() {
		let vector = hash_embed("tiling", 384);

		// The 32-byte digest repeats, so positions 32 apart agree after
		// normalization.
		assert_eq!(vector[0], vector[32]);
		assert_eq!(vector[5], vector[37]);
	}

	#[test]
	fn embedder_trait_reports_dimension() {
		let embedder = HashEmbedder::new(64);

		assert_eq!(embedder.dim(), 64);
		assert_eq!(Embedder::embed(&embedder, "text").len(), 64);
	}
}
