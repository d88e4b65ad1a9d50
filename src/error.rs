//! Gateway-level error types shared across the policy, signer, and gateway layers.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical gateway error exposed by public APIs.
///
/// Signing requests never surface this type; they resolve to a
/// [`SignResult`](crate::sign::SignResult) instead. It is returned by configuration entry points
/// and by helpers that call a [`UrlSigner`](crate::signer::UrlSigner) directly.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Signer failure.
	#[error(transparent)]
	Signing(#[from] crate::signer::SigningError),
}

/// Configuration failures raised while applying an expiration policy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configured expiration cannot be parsed as an integer number of seconds.
	#[error("The property {key} has an invalid value `{value}`; expected a positive number of seconds.")]
	InvalidExpirySeconds {
		/// Configuration key that carried the value.
		key: &'static str,
		/// Raw configured value.
		value: String,
		/// Underlying integer parsing failure.
		#[source]
		source: std::num::ParseIntError,
	},
	/// Configured expiration is zero.
	#[error("The expiration must be a positive number of seconds.")]
	NonPositiveExpiry,
	/// Configured expiration exceeds the representable duration range.
	#[error("The expiration of {seconds} seconds exceeds the supported range.")]
	ExpiryOutOfRange {
		/// Rejected value.
		seconds: u64,
	},
	/// Policy document could not be deserialized.
	#[error("Policy configuration is malformed.")]
	Parse {
		/// Structured parsing failure including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
