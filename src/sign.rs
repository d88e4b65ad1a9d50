//! Signing request, outcome, and caller-facing response models.

// crates.io
use time::{
	UtcOffset,
	format_description::well_known::{Iso8601, Rfc3339},
};
// self
use crate::_prelude::*;

/// Reason returned when the request omits `url`.
pub const URL_MANDATORY: &str = "url is mandatory";
/// Reason returned when `valid-until` is not an ISO-8601 instant.
pub const VALID_UNTIL_INVALID: &str = "valid-until is not a valid ISO-8601 date string";
/// Reason returned when the signer refuses the URL.
pub const URL_NOT_SIGNABLE: &str = "Given URL cannot be signed";
/// Reason returned when the signer fails.
pub const SIGNING_FAILED: &str = "Error while signing url";

/// Incoming signing request as received from a transport.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignRequest {
	/// Resource URL to sign.
	#[serde(default)]
	pub url: String,
	/// Optional ISO-8601 expiry instant; blank counts as absent.
	#[serde(default, rename = "valid-until", skip_serializing_if = "Option::is_none")]
	pub valid_until: Option<String>,
	/// Optional opaque origin restriction passed through to the signer.
	#[serde(default, rename = "valid-source", skip_serializing_if = "Option::is_none")]
	pub valid_source: Option<String>,
}
impl SignRequest {
	/// Creates a request for `url` with no explicit constraints.
	pub fn new(url: impl Into<String>) -> Self {
		Self { url: url.into(), valid_until: None, valid_source: None }
	}

	/// Sets the requested expiry instant.
	pub fn with_valid_until(mut self, valid_until: impl Into<String>) -> Self {
		self.valid_until = Some(valid_until.into());

		self
	}

	/// Sets the opaque origin restriction.
	pub fn with_valid_source(mut self, valid_source: impl Into<String>) -> Self {
		self.valid_source = Some(valid_source.into());

		self
	}
}

/// Outcome of a signing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignResult {
	/// The URL was signed.
	Signed {
		/// Signed URL produced by the signer.
		signed_url: String,
		/// Instant (UTC) until which the signed URL stays valid.
		valid_until: OffsetDateTime,
	},
	/// The signer does not cover the URL; an expected outcome, not an error.
	Rejected {
		/// Caller-facing reason.
		reason: String,
	},
	/// The signer failed; the cause is logged, never echoed.
	SigningFailed {
		/// Caller-facing reason.
		reason: String,
	},
	/// The request failed validation before reaching the signer.
	InvalidRequest {
		/// Caller-facing validation message.
		reason: String,
	},
}
impl SignResult {
	pub(crate) fn rejected() -> Self {
		Self::Rejected { reason: URL_NOT_SIGNABLE.into() }
	}

	pub(crate) fn signing_failed() -> Self {
		Self::SigningFailed { reason: SIGNING_FAILED.into() }
	}

	pub(crate) fn invalid(reason: &str) -> Self {
		Self::InvalidRequest { reason: reason.into() }
	}

	/// Returns `true` for [`SignResult::Signed`].
	pub fn is_signed(&self) -> bool {
		matches!(self, Self::Signed { .. })
	}

	/// Stable outcome label.
	pub fn outcome(&self) -> SignOutcome {
		match self {
			Self::Signed { .. } => SignOutcome::Signed,
			Self::Rejected { .. } => SignOutcome::Rejected,
			Self::SigningFailed { .. } => SignOutcome::SigningFailed,
			Self::InvalidRequest { .. } => SignOutcome::InvalidRequest,
		}
	}

	/// Caller-facing reason for non-signed outcomes.
	pub fn reason(&self) -> Option<&str> {
		match self {
			Self::Signed { .. } => None,
			Self::Rejected { reason }
			| Self::SigningFailed { reason }
			| Self::InvalidRequest { reason } => Some(reason),
		}
	}
}

/// Outcome labels recorded for each signing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignOutcome {
	/// Entry to [`SigningGateway::sign_url`](crate::gateway::SigningGateway::sign_url).
	Attempt,
	/// URL signed.
	Signed,
	/// URL outside the signable space.
	Rejected,
	/// Signer raised an error.
	SigningFailed,
	/// Request failed validation.
	InvalidRequest,
}
impl SignOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignOutcome::Attempt => "attempt",
			SignOutcome::Signed => "signed",
			SignOutcome::Rejected => "rejected",
			SignOutcome::SigningFailed => "signing_failed",
			SignOutcome::InvalidRequest => "invalid_request",
		}
	}
}
impl Display for SignOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// JSON body emitted to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignResponseBody {
	/// Body for a signed URL.
	Signed {
		/// Signed URL.
		url: String,
		/// Expiry instant in ISO-8601 UTC.
		#[serde(rename = "valid-until", with = "time::serde::rfc3339")]
		valid_until: OffsetDateTime,
	},
	/// Body for every other outcome.
	Error {
		/// Caller-facing message.
		error: String,
	},
}

/// Transport-neutral response: status code plus JSON body.
///
/// Rejections and signer failures are documented outcomes of the API and are therefore reported
/// with status 200; only validation failures use a client-error status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignResponse {
	/// HTTP-style status code.
	pub status: u16,
	/// JSON body.
	pub body: SignResponseBody,
}
impl SignResponse {
	/// Status used for signed, rejected, and failed outcomes.
	pub const OK: u16 = 200;
	/// Status used for validation failures.
	pub const BAD_REQUEST: u16 = 400;

	/// Serializes the body to JSON.
	pub fn body_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(&self.body)
	}
}
impl From<SignResult> for SignResponse {
	fn from(result: SignResult) -> Self {
		match result {
			SignResult::Signed { signed_url, valid_until } => Self {
				status: Self::OK,
				body: SignResponseBody::Signed { url: signed_url, valid_until },
			},
			SignResult::Rejected { reason } | SignResult::SigningFailed { reason } =>
				Self { status: Self::OK, body: SignResponseBody::Error { error: reason } },
			SignResult::InvalidRequest { reason } =>
				Self { status: Self::BAD_REQUEST, body: SignResponseBody::Error { error: reason } },
		}
	}
}

/// Parses an ISO-8601 instant and normalizes it to UTC.
///
/// Instants whose UTC form falls outside years 0–9999 are rejected so they can always be
/// rendered back as RFC 3339.
pub fn parse_instant(raw: &str) -> Option<OffsetDateTime> {
	let instant =
		OffsetDateTime::parse(raw.trim(), &Iso8601::DEFAULT).ok()?.to_offset(UtcOffset::UTC);

	(0..=9999).contains(&instant.year()).then_some(instant)
}

/// Renders an instant as RFC 3339 UTC, keeping sub-second digits only when non-zero.
pub fn format_instant(instant: OffsetDateTime) -> Result<String, time::error::Format> {
	instant.to_offset(UtcOffset::UTC).format(&Rfc3339)
}
