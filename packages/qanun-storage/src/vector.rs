//! pgvector-backed nearest-neighbour index.

use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use qanun_config::Metric;
use qanun_domain::CompiledFilter;

use crate::{
	Result,
	slices::push_filter_clauses,
	store::{BoxFuture, Neighbor, VectorIndex},
};

pub struct PgVectorIndex {
	pool: PgPool,
}
impl PgVectorIndex {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}
impl VectorIndex for PgVectorIndex {
	fn nearest<'a>(
		&'a self,
		vector: &'a [f32],
		k: usize,
		metric: Metric,
		filter: &'a CompiledFilter,
	) -> BoxFuture<'a, Result<Vec<Neighbor>>> {
		Box::pin(async move {
			let vec_text = vector_to_pg(vector);
			let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT id, ");

			// pgvector's <#> evaluates to the negated inner product; re-negate
			// so the measure column carries the raw value the scoring
			// contract expects.
			match metric {
				Metric::Cosine => {
					qb.push("(vector_embedding <=> ");
					qb.push_bind(vec_text);
					qb.push("::text::vector)::real");
				},
				Metric::Euclidean => {
					qb.push("(vector_embedding <-> ");
					qb.push_bind(vec_text);
					qb.push("::text::vector)::real");
				},
				Metric::InnerProduct => {
					qb.push("(-(vector_embedding <#> ");
					qb.push_bind(vec_text);
					qb.push("::text::vector))::real");
				},
			}

			qb.push(" AS measure FROM legal_slice WHERE vector_embedding IS NOT NULL AND ");
			push_filter_clauses(&mut qb, filter);
			qb.push(" ORDER BY measure ");
			qb.push(match metric {
				Metric::InnerProduct => "DESC",
				Metric::Cosine | Metric::Euclidean => "ASC",
			});
			qb.push(" LIMIT ");
			qb.push_bind(k as i64);

			let rows = qb.build().fetch_all(&self.pool).await?;

			rows.iter()
				.map(|row| {
					Ok(Neighbor { slice_id: row.try_get("id")?, measure: row.try_get("measure")? })
				})
				.collect()
		})
	}
}

/// Encodes a vector in pgvector's bracketed text form for a
/// `::text::vector` bind cast.
pub fn vector_to_pg(vector: &[f32]) -> String {
	let mut out = String::with_capacity(vector.len() * 8);

	out.push('[');

	for (i, value) in vector.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}

		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}
