//! Injectable UTC time sources.

// self
use crate::_prelude::*;

/// Supplies the current UTC instant to the gateway.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Returns the current instant in UTC.
	fn now_utc(&self) -> OffsetDateTime;
}

/// Wall-clock time source backed by [`OffsetDateTime::now_utc`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now_utc(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// Manually driven clock for deterministic tests and replay tooling.
#[derive(Debug)]
pub struct ManualClock(RwLock<OffsetDateTime>);
impl ManualClock {
	/// Creates a clock frozen at `instant`.
	pub fn new(instant: OffsetDateTime) -> Self {
		Self(RwLock::new(instant))
	}

	/// Moves the clock to `instant`.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.0.write() = instant;
	}

	/// Moves the clock forward by `delta`.
	pub fn advance(&self, delta: Duration) {
		let mut guard = self.0.write();

		*guard += delta;
	}
}
impl Clock for ManualClock {
	fn now_utc(&self) -> OffsetDateTime {
		*self.0.read()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn manual_clock_sets_and_advances() {
		let clock = ManualClock::new(macros::datetime!(2025-11-10 12:00 UTC));

		assert_eq!(clock.now_utc(), macros::datetime!(2025-11-10 12:00 UTC));

		clock.advance(Duration::minutes(90));

		assert_eq!(clock.now_utc(), macros::datetime!(2025-11-10 13:30 UTC));

		clock.set(macros::datetime!(2030-01-01 00:00 UTC));

		assert_eq!(clock.now_utc(), macros::datetime!(2030-01-01 00:00 UTC));
	}

	#[test]
	fn system_clock_reports_utc() {
		let now = SystemClock.now_utc();

		assert!(now.offset().is_utc());
	}
}
