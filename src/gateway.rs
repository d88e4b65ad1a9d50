//! Signing gateway that validates requests, resolves expirations, and delegates to a signer.
//!
//! [`SigningGateway::sign_url`] never performs cryptographic work and never fails: every branch
//! resolves to a [`SignResult`]. The wall clock is sampled once per request so the computed
//! expiry is deterministic for a given invocation.

// self
use crate::{
	_prelude::*,
	clock::{Clock, SystemClock},
	error::ConfigError,
	obs::{SignMetrics, SignSpan},
	policy::{ExpiryPolicy, SigningPolicy},
	sign::{self, SignOutcome, SignRequest, SignResponse, SignResult},
	signer::UrlSigner,
};

/// Orchestrates signing requests against a single injected [`UrlSigner`].
///
/// Clones share the signer, the clock, the metrics, and the expiration policy, so a policy update
/// through any clone is observed by all of them.
#[derive(Clone)]
pub struct SigningGateway {
	/// Capability that owns key material and decides which URLs are signable.
	pub signer: Arc<dyn UrlSigner>,
	/// Time source sampled once per request.
	pub clock: Arc<dyn Clock>,
	/// Shared counters for signing outcomes.
	pub metrics: Arc<SignMetrics>,
	policy: Arc<ExpiryPolicy>,
}
impl SigningGateway {
	/// Creates a gateway using the system clock and the default two-hour policy.
	pub fn new(signer: Arc<dyn UrlSigner>) -> Self {
		Self {
			signer,
			clock: Arc::new(SystemClock),
			metrics: Default::default(),
			policy: Default::default(),
		}
	}

	/// Replaces the time source.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Seeds the gateway with a dedicated policy holder containing `policy`.
	pub fn with_policy(mut self, policy: SigningPolicy) -> Self {
		self.policy = Arc::new(ExpiryPolicy::new(policy));

		self
	}

	/// Shares an existing policy holder with other components.
	pub fn with_shared_policy(mut self, policy: Arc<ExpiryPolicy>) -> Self {
		self.policy = policy;

		self
	}

	/// Latest committed expiration policy.
	pub fn policy(&self) -> SigningPolicy {
		self.policy.current()
	}

	/// Applies a configuration refresh; `None` resets the default expiry.
	pub fn update_policy(&self, expiry_seconds: Option<u64>) -> Result<SigningPolicy, ConfigError> {
		self.policy.update(expiry_seconds)
	}

	/// Applies a configuration refresh delivered as a flat property map.
	pub fn apply_properties(
		&self,
		properties: &HashMap<String, String>,
	) -> Result<SigningPolicy, ConfigError> {
		self.policy.apply_properties(properties)
	}

	/// Validates `request`, resolves its expiry, and signs it when the signer accepts the URL.
	pub async fn sign_url(&self, request: SignRequest) -> SignResult {
		let span = SignSpan::new("sign_url");

		self.metrics.record(SignOutcome::Attempt);

		let result = span.instrument(self.resolve(request)).await;

		self.metrics.record(result.outcome());

		result
	}

	/// Same as [`sign_url`](Self::sign_url) but encoded for a transport.
	pub async fn sign(&self, request: SignRequest) -> SignResponse {
		self.sign_url(request).await.into()
	}

	async fn resolve(&self, request: SignRequest) -> SignResult {
		let SignRequest { url, valid_until, valid_source } = request;

		if url.trim().is_empty() {
			return SignResult::invalid(sign::URL_MANDATORY);
		}

		let now = truncate_to_millis(self.clock.now_utc());

		let valid_until = match valid_until.as_deref().filter(|raw| !raw.trim().is_empty()) {
			Some(raw) => match sign::parse_instant(raw) {
				Some(instant) => instant,
				None => {
					tracing::debug!(%url, valid_until = raw, "Rejecting malformed valid-until.");

					return SignResult::invalid(sign::VALID_UNTIL_INVALID);
				},
			},
			None => {
				let expiry = self.policy.current().default_expiry();

				match now.checked_add(expiry) {
					Some(instant) => instant,
					None => {
						tracing::warn!(
							%url,
							seconds = expiry.whole_seconds(),
							"Default expiry overflows the supported date range."
						);

						return SignResult::signing_failed();
					},
				}
			},
		};

		if !self.signer.accepts(&url) {
			tracing::debug!(%url, "Signer does not accept the url.");

			return SignResult::rejected();
		}

		match self.signer.sign(&url, valid_until, None, valid_source.as_deref()).await {
			Ok(signed_url) => SignResult::Signed { signed_url, valid_until },
			Err(e) => {
				let cause = e.chain();

				tracing::warn!(%url, error = %cause, "Error while trying to sign url '{url}': {cause}");

				SignResult::signing_failed()
			},
		}
	}
}
impl Debug for SigningGateway {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SigningGateway")
			.field("policy", &self.policy.current())
			.field("metrics", &self.metrics)
			.finish()
	}
}

fn truncate_to_millis(instant: OffsetDateTime) -> OffsetDateTime {
	let nanos = instant.nanosecond();

	instant.replace_nanosecond(nanos - nanos % 1_000_000).unwrap_or(instant)
}
