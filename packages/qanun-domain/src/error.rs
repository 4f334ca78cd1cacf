pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid as-of date {value:?}; expected YYYY-MM-DD.")]
	InvalidAsOf { value: String },
	#[error("Unknown {field} value {value:?}.")]
	UnknownVariant { field: &'static str, value: String },
	#[error("Slice {id}: effective_to must be strictly after effective_from.")]
	EffectiveIntervalInverted { id: String },
	#[error("Slice {id}: embedding has {actual} dimensions, expected {expected}.")]
	EmbeddingDimMismatch { id: String, expected: usize, actual: usize },
}
