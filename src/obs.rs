//! Observability helpers for the signing gateway.
//!
//! - Every [`sign_url`](crate::gateway::SigningGateway::sign_url) call runs inside a span named
//!   `url_signing_gateway.sign` carrying the `stage` field.
//! - Enable `metrics` to increment the `url_signing_gateway_sign_total` counter for every
//!   attempt and outcome, labeled by `outcome`.
//! - [`SignMetrics`] keeps in-process counters regardless of the `metrics` feature.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};
