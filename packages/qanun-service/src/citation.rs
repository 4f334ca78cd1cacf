//! Bounded snippets and the citation shape handed to the API layer.
//!
//! Snippetting runs only on the fused top-N, so its cost is bounded by the
//! result limit, not the corpus.

use qanun_domain::LegalSlice;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Citation {
	pub id: String,
	pub instrument_title: String,
	pub structure_path: String,
	pub source_url: String,
	pub gazette: Option<String>,
	pub snippet: String,
}

pub fn build_citation(slice: &LegalSlice, max_chars: usize) -> Citation {
	Citation {
		id: slice.id.clone(),
		instrument_title: slice.instrument.title.clone(),
		structure_path: slice.structure.path.clone(),
		source_url: slice.source.url.clone(),
		gazette: slice.source.gazette.clone(),
		snippet: snippet(&slice.text_content, max_chars),
	}
}

/// Collapses whitespace runs to single spaces and trims.
pub fn normalize_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bounded snippet that never cuts mid-word: truncates at the last space
/// before `max_chars` (at the limit when there is no space) and appends an
/// ellipsis.
pub fn snippet(text: &str, max_chars: usize) -> String {
	let normalized = normalize_whitespace(text);
	let chars: Vec<char> = normalized.chars().collect();

	if chars.len() <= max_chars {
		return normalized;
	}

	let cutoff = chars[..max_chars].iter().rposition(|ch| *ch == ' ').unwrap_or(max_chars);
	let mut out: String = chars[..cutoff].iter().collect();

	out.truncate(out.trim_end().len());
	out.push('…');

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalizes_whitespace_runs() {
		assert_eq!(normalize_whitespace("  a\t\tb \n c  "), "a b c");
		assert_eq!(normalize_whitespace(""), "");
	}

	#[test]
	fn short_text_passes_through_unchanged() {
		assert_eq!(snippet("Tenancy deposit procedures", 100), "Tenancy deposit procedures");
	}

	#[test]
	fn exact_length_text_gets_no_ellipsis() {
		assert_eq!(snippet("abcde", 5), "abcde");
	}

	#[test]
	fn long_text_cuts_at_last_space_before_limit() {
		assert_eq!(snippet("alpha beta gamma", 12), "alpha beta…");
	}

	#[test]
	fn unbroken_text_cuts_at_the_limit() {
		assert_eq!(snippet("abcdefghij", 4), "abcd…");
	}

	#[test]
	fn truncation_counts_characters_not_bytes() {
		// Arabic: five two-byte letters, then more words.
		let text = "\u{645}\u{627}\u{62F}\u{629} \u{627}\u{644}\u{639}\u{642}\u{62F} \u{627}\u{644}\u{627}\u{64A}\u{62C}\u{627}\u{631}";
		let out = snippet(text, 10);

		assert!(out.ends_with('…'));
		assert!(out.chars().count() <= 11);
	}

	#[test]
	fn collapses_internal_whitespace_before_measuring() {
		assert_eq!(snippet("alpha    beta", 100), "alpha beta");
	}
}
