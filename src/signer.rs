//! Signer contracts that let the gateway delegate cryptographic work to any backend.
//!
//! The gateway never computes signatures itself. Implementations of [`UrlSigner`] own the key
//! material, the token format, and the matching rules that decide which URL spaces are
//! signable. [`SignableSpace`] is a ready-made matcher for the common prefix-based case.

pub mod space;

pub use space::*;

// self
use crate::_prelude::*;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by [`UrlSigner::sign`].
pub type SignFuture<'a> = Pin<Box<dyn Future<Output = Result<String, SigningError>> + 'a + Send>>;

/// Capability that owns key material and turns plain URLs into signed URLs.
pub trait UrlSigner
where
	Self: Send + Sync,
{
	/// Returns `true` if `url` belongs to a URL space this signer can sign.
	///
	/// Must be a fast, local predicate: no signing and no network I/O.
	fn accepts(&self, url: &str) -> bool;

	/// Signs `url` so it remains valid until `valid_until`.
	///
	/// `client_certificate` and `valid_source` are opaque restrictions whose meaning is defined
	/// entirely by the implementation (client IP, referrer, certificate binding, etc.).
	fn sign<'a>(
		&'a self,
		url: &'a str,
		valid_until: OffsetDateTime,
		client_certificate: Option<&'a ClientCertificate>,
		valid_source: Option<&'a str>,
	) -> SignFuture<'a>;
}

/// Failures raised by [`UrlSigner::sign`].
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Key material needed for the URL is not available.
	#[error("Signing key `{key_id}` is unavailable.")]
	KeyUnavailable {
		/// Identifier of the missing key.
		key_id: String,
	},
	/// The signing parameters are malformed for this signer.
	#[error("Signing parameters are invalid: {reason}.")]
	InvalidParameters {
		/// Signer-supplied explanation.
		reason: String,
	},
	/// Backend-specific failure.
	#[error("Signer backend failed.")]
	Backend {
		/// Underlying backend failure.
		#[source]
		source: BoxError,
	},
}
impl SigningError {
	/// Wraps a backend-specific failure inside [`SigningError`].
	pub fn backend(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Backend { source: Box::new(src) }
	}

	/// Renders the error and its full source chain on one line for diagnostics.
	pub fn chain(&self) -> String {
		let mut rendered = self.to_string();
		let mut source = StdError::source(self);

		while let Some(cause) = source {
			rendered.push_str(": ");
			rendered.push_str(&cause.to_string());

			source = cause.source();
		}

		rendered
	}
}

/// Opaque client certificate forwarded to signers that bind URLs to a client identity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCertificate(String);
impl ClientCertificate {
	/// Wraps an encoded (typically PEM) certificate.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the encoded certificate.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for ClientCertificate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ClientCertificate").field(&"<redacted>").finish()
	}
}
