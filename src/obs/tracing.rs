// self
use crate::_prelude::*;

/// Future type produced by [`SignSpan::instrument`].
pub type InstrumentedSign<F> = tracing::instrument::Instrumented<F>;

/// Span wrapper used by the gateway.
#[derive(Clone, Debug)]
pub struct SignSpan {
	span: tracing::Span,
}
impl SignSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: &'static str) -> Self {
		Self { span: tracing::info_span!("url_signing_gateway.sign", stage) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedSign<Fut>
	where
		Fut: Future,
	{
		use tracing::Instrument;

		fut.instrument(self.span.clone())
	}
}
