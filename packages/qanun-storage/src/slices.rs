//! Postgres-backed `SliceStore` and the shared filter-to-SQL rendering.
//!
//! `push_filter_clauses` is the only place `CompiledFilter` becomes SQL;
//! the keyword scan and the vector nearest-neighbour query both go through
//! it, so the two search paths cannot disagree on the predicate.

use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

use qanun_domain::{
	CompiledFilter, Effective, Instrument, Jurisdiction, LegalSlice, Source, Structure,
	StructureLocators,
};

use crate::{
	Result,
	store::{BoxFuture, SliceStore},
	vector::vector_to_pg,
};

pub(crate) const SLICE_COLUMNS: &str = "\
id, level, name, emirate, freezone, portal, url, gazette, type, number, year, title, issuer, \
official_language, granularity, path, part, chapter, section, article, rule, clause, item, \
text_content, text_hash, primary_lang, topics, state, effective_from, effective_to";

const UPSERT_SQL: &str = "\
INSERT INTO legal_slice (
	id,
	level,
	name,
	emirate,
	freezone,
	portal,
	url,
	gazette,
	type,
	number,
	year,
	title,
	issuer,
	official_language,
	granularity,
	path,
	part,
	chapter,
	section,
	article,
	rule,
	clause,
	item,
	text_content,
	text_hash,
	primary_lang,
	topics,
	state,
	effective_from,
	effective_to,
	vector_embedding
)
VALUES (
	$1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
	$11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
	$21, $22, $23, $24, $25, $26, $27, $28, $29, $30,
	$31::text::vector
)
ON CONFLICT (id) DO UPDATE
SET
	level = EXCLUDED.level,
	name = EXCLUDED.name,
	emirate = EXCLUDED.emirate,
	freezone = EXCLUDED.freezone,
	portal = EXCLUDED.portal,
	url = EXCLUDED.url,
	gazette = EXCLUDED.gazette,
	type = EXCLUDED.type,
	number = EXCLUDED.number,
	year = EXCLUDED.year,
	title = EXCLUDED.title,
	issuer = EXCLUDED.issuer,
	official_language = EXCLUDED.official_language,
	granularity = EXCLUDED.granularity,
	path = EXCLUDED.path,
	part = EXCLUDED.part,
	chapter = EXCLUDED.chapter,
	section = EXCLUDED.section,
	article = EXCLUDED.article,
	rule = EXCLUDED.rule,
	clause = EXCLUDED.clause,
	item = EXCLUDED.item,
	text_content = EXCLUDED.text_content,
	text_hash = EXCLUDED.text_hash,
	primary_lang = EXCLUDED.primary_lang,
	topics = EXCLUDED.topics,
	state = EXCLUDED.state,
	effective_from = EXCLUDED.effective_from,
	effective_to = EXCLUDED.effective_to,
	vector_embedding = EXCLUDED.vector_embedding";

pub struct PgSliceStore {
	pool: PgPool,
	embed_dim: usize,
}
impl PgSliceStore {
	pub fn new(pool: PgPool, embed_dim: usize) -> Self {
		Self { pool, embed_dim }
	}
}
impl SliceStore for PgSliceStore {
	fn scan_matching<'a>(
		&'a self,
		filter: &'a CompiledFilter,
		terms: &'a [String],
	) -> BoxFuture<'a, Result<Vec<LegalSlice>>> {
		Box::pin(async move {
			let mut qb: QueryBuilder<Postgres> =
				QueryBuilder::new(format!("SELECT {SLICE_COLUMNS} FROM legal_slice WHERE "));

			push_filter_clauses(&mut qb, filter);

			for term in terms {
				let pattern = like_pattern(term);

				qb.push(" AND (title ILIKE ");
				qb.push_bind(pattern.clone());
				qb.push(" OR path ILIKE ");
				qb.push_bind(pattern.clone());
				qb.push(" OR text_content ILIKE ");
				qb.push_bind(pattern);
				qb.push(")");
			}

			qb.push(" ORDER BY id");

			let rows = qb.build().fetch_all(&self.pool).await?;

			rows.iter().map(slice_from_row).collect()
		})
	}

	fn fetch<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, Result<Vec<LegalSlice>>> {
		Box::pin(async move {
			if ids.is_empty() {
				return Ok(Vec::new());
			}

			let sql =
				format!("SELECT {SLICE_COLUMNS} FROM legal_slice WHERE id = ANY($1) ORDER BY id");
			let rows = sqlx::query(&sql).bind(ids).fetch_all(&self.pool).await?;

			rows.iter().map(slice_from_row).collect()
		})
	}

	fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<LegalSlice>>> {
		Box::pin(async move {
			let sql = format!("SELECT {SLICE_COLUMNS} FROM legal_slice WHERE id = $1");
			let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;

			row.as_ref().map(slice_from_row).transpose()
		})
	}

	fn upsert<'a>(&'a self, slice: &'a LegalSlice) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			slice.validate(self.embed_dim)?;

			sqlx::query(UPSERT_SQL)
				.bind(slice.id.as_str())
				.bind(slice.jurisdiction.level.as_str())
				.bind(slice.jurisdiction.name.as_str())
				.bind(slice.jurisdiction.emirate.as_deref())
				.bind(slice.jurisdiction.freezone.as_deref())
				.bind(slice.source.portal.as_str())
				.bind(slice.source.url.as_str())
				.bind(slice.source.gazette.as_deref())
				.bind(slice.instrument.r#type.as_str())
				.bind(slice.instrument.number.as_str())
				.bind(slice.instrument.year)
				.bind(slice.instrument.title.as_str())
				.bind(slice.instrument.issuer.as_deref())
				.bind(slice.instrument.official_language.as_str())
				.bind(slice.structure.granularity.as_str())
				.bind(slice.structure.path.as_str())
				.bind(slice.structure.locators.part.as_deref())
				.bind(slice.structure.locators.chapter.as_deref())
				.bind(slice.structure.locators.section.as_deref())
				.bind(slice.structure.locators.article.as_deref())
				.bind(slice.structure.locators.rule.as_deref())
				.bind(slice.structure.locators.clause.as_deref())
				.bind(slice.structure.locators.item.as_deref())
				.bind(slice.text_content.as_str())
				.bind(slice.text_hash.as_str())
				.bind(slice.primary_lang.as_str())
				.bind(&slice.topics[..])
				.bind(slice.state.as_str())
				.bind(slice.effective.from_date)
				.bind(slice.effective.to_date)
				.bind(slice.embedding.as_deref().map(vector_to_pg))
				.execute(&self.pool)
				.await?;

			Ok(())
		})
	}
}

/// Renders the compiled filter into WHERE clauses. The caller positions
/// the builder so the first clause lands directly after `WHERE ` or
/// `AND `.
pub(crate) fn push_filter_clauses<'args>(
	qb: &mut QueryBuilder<'args, Postgres>,
	filter: &'args CompiledFilter,
) {
	qb.push("state IN (");

	{
		let mut states = qb.separated(", ");

		for state in filter.states {
			states.push_bind(state.as_str());
		}
	}

	qb.push(")");

	if let Some(jurisdiction) = filter.jurisdiction.as_deref() {
		qb.push(" AND (lower(level) = ");
		qb.push_bind(jurisdiction);
		qb.push(" OR lower(name) = ");
		qb.push_bind(jurisdiction);
		qb.push(" OR lower(emirate) = ");
		qb.push_bind(jurisdiction);
		qb.push(" OR lower(freezone) = ");
		qb.push_bind(jurisdiction);
		qb.push(")");
	}
	if let Some(topics) = filter.topics.as_deref() {
		qb.push(" AND topics @> ");
		qb.push_bind(topics);
	}
	if let Some(as_of) = filter.as_of {
		qb.push(" AND effective_from <= ");
		qb.push_bind(as_of);
		qb.push(" AND (effective_to IS NULL OR effective_to > ");
		qb.push_bind(as_of);
		qb.push(")");
	}
}

/// Wraps a search term in `%...%`, escaping LIKE wildcards so the term
/// matches literally.
fn like_pattern(term: &str) -> String {
	let mut escaped = String::with_capacity(term.len() + 2);

	escaped.push('%');

	for ch in term.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			escaped.push('\\');
		}

		escaped.push(ch);
	}

	escaped.push('%');

	escaped
}

fn slice_from_row(row: &PgRow) -> Result<LegalSlice> {
	let level: String = row.try_get("level")?;
	let official_language: String = row.try_get("official_language")?;
	let granularity: String = row.try_get("granularity")?;
	let primary_lang: String = row.try_get("primary_lang")?;
	let state: String = row.try_get("state")?;

	Ok(LegalSlice {
		id: row.try_get("id")?,
		jurisdiction: Jurisdiction {
			level: level.parse()?,
			name: row.try_get("name")?,
			emirate: row.try_get("emirate")?,
			freezone: row.try_get("freezone")?,
		},
		source: Source {
			portal: row.try_get("portal")?,
			url: row.try_get("url")?,
			gazette: row.try_get("gazette")?,
		},
		instrument: Instrument {
			r#type: row.try_get("type")?,
			number: row.try_get("number")?,
			year: row.try_get("year")?,
			title: row.try_get("title")?,
			issuer: row.try_get("issuer")?,
			official_language: official_language.parse()?,
		},
		structure: Structure {
			granularity: granularity.parse()?,
			path: row.try_get("path")?,
			locators: StructureLocators {
				part: row.try_get("part")?,
				chapter: row.try_get("chapter")?,
				section: row.try_get("section")?,
				article: row.try_get("article")?,
				rule: row.try_get("rule")?,
				clause: row.try_get("clause")?,
				item: row.try_get("item")?,
			},
		},
		text_content: row.try_get("text_content")?,
		text_hash: row.try_get("text_hash")?,
		primary_lang: primary_lang.parse()?,
		topics: row.try_get::<Option<Vec<String>>, _>("topics")?.unwrap_or_default(),
		state: state.parse()?,
		effective: Effective {
			from_date: row.try_get("effective_from")?,
			to_date: row.try_get("effective_to")?,
		},
		// Embeddings stay in the database; reads never materialize them.
		embedding: None,
	})
}

#[cfg(test)]
mod tests {
	use time::macros::date;

	use qanun_domain::SearchFilters;

	use super::*;

	fn rendered(filters: &SearchFilters) -> String {
		let compiled = filters.compile();
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT id FROM legal_slice WHERE ");

		push_filter_clauses(&mut qb, &compiled);

		qb.sql().to_string()
	}

	#[test]
	fn baseline_filter_renders_state_clause_only() {
		let sql = rendered(&SearchFilters::default());

		assert!(sql.contains("state IN ($1, $2)"));
		assert!(!sql.contains("lower(level)"));
		assert!(!sql.contains("topics @>"));
		assert!(!sql.contains("effective_from"));
	}

	#[test]
	fn jurisdiction_clause_covers_all_four_fields() {
		let filters = SearchFilters {
			jurisdiction: Some("Dubai".to_string()),
			topics: None,
			as_of: None,
		};
		let sql = rendered(&filters);

		for column in ["lower(level)", "lower(name)", "lower(emirate)", "lower(freezone)"] {
			assert!(sql.contains(column), "missing {column} in {sql}");
		}
	}

	#[test]
	fn temporal_clause_renders_half_open_window() {
		let filters = SearchFilters {
			jurisdiction: None,
			topics: None,
			as_of: Some(date!(2024 - 06 - 15)),
		};
		let sql = rendered(&filters);

		assert!(sql.contains("effective_from <= "));
		assert!(sql.contains("effective_to IS NULL OR effective_to > "));
	}

	#[test]
	fn topics_clause_uses_array_containment() {
		let filters = SearchFilters {
			jurisdiction: None,
			topics: Some(vec!["tenancy".to_string()]),
			as_of: None,
		};

		assert!(rendered(&filters).contains("topics @> "));
	}

	#[test]
	fn like_pattern_escapes_wildcards() {
		assert_eq!(like_pattern("50%"), "%50\\%%");
		assert_eq!(like_pattern("a_b"), "%a\\_b%");
		assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
		assert_eq!(like_pattern("plain"), "%plain%");
	}
}
