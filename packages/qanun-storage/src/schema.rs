//! DDL for the slice store. Rendered with the configured embedding
//! dimension substituted into the vector column.

const SCHEMA: &str = "\
CREATE EXTENSION IF NOT EXISTS vector;

CREATE TABLE IF NOT EXISTS legal_slice (
	id TEXT PRIMARY KEY,
	level TEXT NOT NULL,
	name TEXT NOT NULL,
	emirate TEXT,
	freezone TEXT,
	portal TEXT NOT NULL,
	url TEXT NOT NULL,
	gazette TEXT,
	type TEXT NOT NULL,
	number TEXT NOT NULL,
	year INT NOT NULL,
	title TEXT NOT NULL,
	issuer TEXT,
	official_language TEXT NOT NULL,
	granularity TEXT NOT NULL,
	path TEXT NOT NULL,
	part TEXT,
	chapter TEXT,
	section TEXT,
	article TEXT,
	rule TEXT,
	clause TEXT,
	item TEXT,
	text_content TEXT NOT NULL,
	text_hash TEXT NOT NULL,
	primary_lang TEXT NOT NULL,
	topics TEXT[],
	state TEXT NOT NULL,
	effective_from DATE NOT NULL,
	effective_to DATE,
	vector_embedding vector(<EMBED_DIM>)
);

CREATE INDEX IF NOT EXISTS idx_jurisdiction ON legal_slice (level, name, emirate, freezone);

CREATE INDEX IF NOT EXISTS idx_state ON legal_slice (state);

CREATE INDEX IF NOT EXISTS idx_topics ON legal_slice USING GIN (topics);

CREATE INDEX IF NOT EXISTS idx_effective ON legal_slice (effective_from, effective_to)";

pub fn render_schema(embed_dim: usize) -> String {
	SCHEMA.replace("<EMBED_DIM>", &embed_dim.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn substitutes_vector_dimension() {
		let sql = render_schema(384);

		assert!(sql.contains("vector_embedding vector(384)"));
		assert!(!sql.contains("<EMBED_DIM>"));
	}
}
