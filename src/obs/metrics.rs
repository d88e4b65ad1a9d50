// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::sign::SignOutcome;

/// Records a signing outcome via the global metrics recorder (when enabled).
pub fn record_sign_outcome(outcome: SignOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("url_signing_gateway_sign_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Thread-safe per-gateway counters for signing outcomes.
#[derive(Debug, Default)]
pub struct SignMetrics {
	attempts: AtomicU64,
	signed: AtomicU64,
	rejected: AtomicU64,
	failed: AtomicU64,
	invalid: AtomicU64,
}
impl SignMetrics {
	/// Total number of signing requests.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Requests that produced a signed URL.
	pub fn signed(&self) -> u64 {
		self.signed.load(Ordering::Relaxed)
	}

	/// Requests refused because the URL is not signable.
	pub fn rejected(&self) -> u64 {
		self.rejected.load(Ordering::Relaxed)
	}

	/// Requests whose signer call failed.
	pub fn failed(&self) -> u64 {
		self.failed.load(Ordering::Relaxed)
	}

	/// Requests that failed validation.
	pub fn invalid(&self) -> u64 {
		self.invalid.load(Ordering::Relaxed)
	}

	/// Bumps the local counter for `outcome` and forwards it to the global recorder.
	pub(crate) fn record(&self, outcome: SignOutcome) {
		let counter = match outcome {
			SignOutcome::Attempt => &self.attempts,
			SignOutcome::Signed => &self.signed,
			SignOutcome::Rejected => &self.rejected,
			SignOutcome::SigningFailed => &self.failed,
			SignOutcome::InvalidRequest => &self.invalid,
		};

		counter.fetch_add(1, Ordering::Relaxed);
		record_sign_outcome(outcome);
	}
}
