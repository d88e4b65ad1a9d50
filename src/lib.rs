//! Time-limited, origin-restricted URL signing gateway—validate signing requests, resolve the
//! expiration policy, and delegate the cryptography to any pluggable signer.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod clock;
pub mod error;
pub mod gateway;
pub mod obs;
pub mod policy;
pub mod sign;
pub mod signer;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and signer test doubles for unit and integration tests; enabled via
	//! `cfg(test)` or the `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		clock::{Clock, ManualClock},
		gateway::SigningGateway,
		signer::{ClientCertificate, SignFuture, SigningError, UrlSigner},
	};

	/// Instant every test gateway clock starts at.
	pub const TEST_EPOCH: OffsetDateTime = time::macros::datetime!(2025-11-10 12:00 UTC);

	/// Arguments captured by [`RecordingSigner`] for each `sign` call.
	#[derive(Clone, Debug, PartialEq, Eq)]
	pub struct SignCall {
		/// URL handed to the signer.
		pub url: String,
		/// Absolute expiry handed to the signer.
		pub valid_until: OffsetDateTime,
		/// Whether a client certificate was supplied.
		pub client_certificate: bool,
		/// Opaque source restriction handed to the signer.
		pub valid_source: Option<String>,
	}

	/// Scripted [`UrlSigner`] test double that records every call it receives.
	#[derive(Debug)]
	pub struct RecordingSigner {
		accepts: bool,
		failure: Option<String>,
		accepts_calls: Mutex<Vec<String>>,
		sign_calls: Mutex<Vec<SignCall>>,
	}
	impl RecordingSigner {
		/// Accepts every URL and appends `?sig=abc` when signing.
		pub fn accepting() -> Self {
			Self {
				accepts: true,
				failure: None,
				accepts_calls: Default::default(),
				sign_calls: Default::default(),
			}
		}

		/// Refuses every URL.
		pub fn rejecting() -> Self {
			Self { accepts: false, ..Self::accepting() }
		}

		/// Accepts every URL but fails signing with a backend error carrying `cause`.
		pub fn failing(cause: impl Into<String>) -> Self {
			Self { failure: Some(cause.into()), ..Self::accepting() }
		}

		/// URLs passed to `accepts`, in call order.
		pub fn accepts_calls(&self) -> Vec<String> {
			self.accepts_calls.lock().clone()
		}

		/// Arguments passed to `sign`, in call order.
		pub fn sign_calls(&self) -> Vec<SignCall> {
			self.sign_calls.lock().clone()
		}
	}
	impl UrlSigner for RecordingSigner {
		fn accepts(&self, url: &str) -> bool {
			self.accepts_calls.lock().push(url.to_owned());

			self.accepts
		}

		fn sign<'a>(
			&'a self,
			url: &'a str,
			valid_until: OffsetDateTime,
			client_certificate: Option<&'a ClientCertificate>,
			valid_source: Option<&'a str>,
		) -> SignFuture<'a> {
			self.sign_calls.lock().push(SignCall {
				url: url.to_owned(),
				valid_until,
				client_certificate: client_certificate.is_some(),
				valid_source: valid_source.map(ToOwned::to_owned),
			});

			let outcome = match &self.failure {
				Some(cause) => Err(SigningError::backend(std::io::Error::other(cause.clone()))),
				None => Ok(format!("{url}?sig=abc")),
			};

			Box::pin(async move { outcome })
		}
	}

	/// Builds a gateway around `signer` whose clock is frozen at [`TEST_EPOCH`].
	pub fn build_test_gateway(
		signer: RecordingSigner,
	) -> (SigningGateway, Arc<RecordingSigner>, Arc<ManualClock>) {
		let signer = Arc::new(signer);
		let clock = Arc::new(ManualClock::new(TEST_EPOCH));
		let gateway = SigningGateway::new(signer.clone() as Arc<dyn UrlSigner>)
			.with_clock(clock.clone() as Arc<dyn Clock>);

		(gateway, signer, clock)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use time;
pub use url;
#[cfg(test)] use {color_eyre as _, tokio as _, tracing_subscriber as _};
