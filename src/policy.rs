//! Expiration policy applied when a signing request carries no explicit expiry.
//!
//! [`ExpiryPolicy`] is the synchronized holder shared by every clone of a
//! [`SigningGateway`](crate::gateway::SigningGateway). Each configuration refresh re-evaluates
//! the policy from scratch: an absent value resets the default instead of keeping a stale
//! override.

// self
use crate::{_prelude::*, error::ConfigError};

/// Configuration key carrying the default expiration in seconds.
pub const EXPIRY_SECONDS_KEY: &str = "url.signing.expires.seconds";
/// Default lifetime of a signed URL: two hours.
pub const DEFAULT_EXPIRY_SECONDS: u64 = 2 * 60 * 60;

/// Immutable snapshot of the expiration policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SigningPolicy {
	default_expiry: Duration,
}
impl SigningPolicy {
	/// Builds a policy that expires unconstrained requests after `seconds`.
	pub fn from_seconds(seconds: u64) -> Result<Self, ConfigError> {
		if seconds == 0 {
			return Err(ConfigError::NonPositiveExpiry);
		}

		let whole = i64::try_from(seconds).map_err(|_| ConfigError::ExpiryOutOfRange { seconds })?;

		Ok(Self { default_expiry: Duration::seconds(whole) })
	}

	/// Lifetime applied when a request omits `valid-until`.
	pub fn default_expiry(&self) -> Duration {
		self.default_expiry
	}

	/// Lifetime in whole seconds.
	pub fn default_expiry_seconds(&self) -> u64 {
		self.default_expiry.whole_seconds().unsigned_abs()
	}
}
impl Default for SigningPolicy {
	fn default() -> Self {
		Self { default_expiry: Duration::seconds(DEFAULT_EXPIRY_SECONDS as i64) }
	}
}

/// Serializable policy document delivered by a configuration source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
	/// Default expiration in seconds; `None` selects [`DEFAULT_EXPIRY_SECONDS`].
	#[serde(default)]
	pub expires_seconds: Option<u64>,
}
impl PolicyConfig {
	/// Parses a JSON policy document, reporting the offending path on failure.
	pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(payload);

		serde_path_to_error::deserialize(&mut de).map_err(|source| ConfigError::Parse { source })
	}
}

/// Thread-safe holder of the current [`SigningPolicy`].
///
/// Readers always observe a complete snapshot; writers replace the snapshot wholesale.
#[derive(Debug, Default)]
pub struct ExpiryPolicy(RwLock<SigningPolicy>);
impl ExpiryPolicy {
	/// Creates a holder seeded with `policy`.
	pub fn new(policy: SigningPolicy) -> Self {
		Self(RwLock::new(policy))
	}

	/// Returns the latest committed snapshot.
	pub fn current(&self) -> SigningPolicy {
		*self.0.read()
	}

	/// Replaces the policy with `expiry_seconds`, or resets it to the default when absent.
	///
	/// Invalid values leave the current policy untouched.
	pub fn update(&self, expiry_seconds: Option<u64>) -> Result<SigningPolicy, ConfigError> {
		let policy = match expiry_seconds {
			Some(seconds) => SigningPolicy::from_seconds(seconds)?,
			None => SigningPolicy::default(),
		};

		*self.0.write() = policy;

		let expiry = humanize(policy.default_expiry());

		if expiry_seconds.is_some() {
			tracing::info!(
				key = EXPIRY_SECONDS_KEY,
				seconds = policy.default_expiry_seconds(),
				"The property {EXPIRY_SECONDS_KEY} has been configured to expire signed URLs in {expiry}."
			);
		} else {
			tracing::info!(
				key = EXPIRY_SECONDS_KEY,
				seconds = policy.default_expiry_seconds(),
				"The property {EXPIRY_SECONDS_KEY} has not been configured, so the default is being used to expire signed URLs in {expiry}."
			);
		}

		Ok(policy)
	}

	/// Applies a parsed [`PolicyConfig`].
	pub fn apply_config(&self, config: &PolicyConfig) -> Result<SigningPolicy, ConfigError> {
		self.update(config.expires_seconds)
	}

	/// Applies a flat property map, reading [`EXPIRY_SECONDS_KEY`].
	///
	/// Blank values count as absent; anything else must be a positive integer.
	pub fn apply_properties(
		&self,
		properties: &HashMap<String, String>,
	) -> Result<SigningPolicy, ConfigError> {
		let expiry_seconds = match properties.get(EXPIRY_SECONDS_KEY).map(|v| v.trim()) {
			Some(raw) if !raw.is_empty() => Some(raw.parse::<u64>().map_err(|source| {
				ConfigError::InvalidExpirySeconds {
					key: EXPIRY_SECONDS_KEY,
					value: raw.to_owned(),
					source,
				}
			})?),
			_ => None,
		};

		self.update(expiry_seconds)
	}
}

/// Renders a duration as `1 day 2 hours 5 seconds`-style text for log output.
pub fn humanize(duration: Duration) -> String {
	const UNITS: [(&str, u64); 4] = [("day", 86_400), ("hour", 3_600), ("minute", 60), ("second", 1)];

	let mut remaining = duration.whole_seconds().unsigned_abs();

	if remaining == 0 {
		return "0 seconds".into();
	}

	let mut parts = Vec::new();

	for (unit, size) in UNITS {
		let count = remaining / size;

		if count == 0 {
			continue;
		}

		remaining %= size;

		parts.push(if count == 1 { format!("1 {unit}") } else { format!("{count} {unit}s") });
	}

	parts.join(" ")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_policy_is_two_hours() {
		let policy = ExpiryPolicy::default().current();

		assert_eq!(policy.default_expiry(), Duration::hours(2));
		assert_eq!(policy.default_expiry_seconds(), 7200);
	}

	#[test]
	fn update_replaces_and_resets() {
		let holder = ExpiryPolicy::default();

		holder.update(Some(3600)).expect("Positive expiry should be accepted.");

		assert_eq!(holder.current().default_expiry(), Duration::hours(1));

		holder.update(None).expect("Resetting to the default should always succeed.");

		assert_eq!(holder.current().default_expiry_seconds(), DEFAULT_EXPIRY_SECONDS);
	}

	#[test]
	fn invalid_values_leave_policy_untouched() {
		let holder = ExpiryPolicy::new(
			SigningPolicy::from_seconds(600).expect("Ten minutes should be a valid policy."),
		);

		assert!(matches!(holder.update(Some(0)), Err(ConfigError::NonPositiveExpiry)));
		assert!(matches!(
			holder.update(Some(u64::MAX)),
			Err(ConfigError::ExpiryOutOfRange { seconds: u64::MAX })
		));
		assert_eq!(holder.current().default_expiry_seconds(), 600);
	}

	#[test]
	fn properties_are_parsed_and_validated() {
		let holder = ExpiryPolicy::default();
		let mut properties = HashMap::from([(EXPIRY_SECONDS_KEY.to_owned(), " 900 ".to_owned())]);

		holder.apply_properties(&properties).expect("Numeric property should be accepted.");

		assert_eq!(holder.current().default_expiry_seconds(), 900);

		properties.insert(EXPIRY_SECONDS_KEY.into(), "fifteen minutes".into());

		let err = holder
			.apply_properties(&properties)
			.expect_err("Non-numeric property should be rejected.");

		assert!(matches!(
			&err,
			ConfigError::InvalidExpirySeconds { key: EXPIRY_SECONDS_KEY, value, .. }
				if value == "fifteen minutes"
		));
		assert_eq!(holder.current().default_expiry_seconds(), 900);

		properties.insert(EXPIRY_SECONDS_KEY.into(), "-5".into());

		assert!(holder.apply_properties(&properties).is_err());

		properties.insert(EXPIRY_SECONDS_KEY.into(), "  ".into());
		holder.apply_properties(&properties).expect("Blank property should reset the default.");

		assert_eq!(holder.current().default_expiry_seconds(), DEFAULT_EXPIRY_SECONDS);
	}

	#[test]
	fn policy_config_reports_paths() {
		let config = PolicyConfig::from_json_str(r#"{"expires_seconds":120}"#)
			.expect("Well-formed policy document should parse.");

		assert_eq!(config.expires_seconds, Some(120));
		assert_eq!(
			PolicyConfig::from_json_str("{}").expect("Empty policy document should parse."),
			PolicyConfig::default()
		);

		let err = PolicyConfig::from_json_str(r#"{"expires_seconds":"soon"}"#)
			.expect_err("String expiry should be rejected.");

		match err {
			ConfigError::Parse { source } => assert_eq!(source.path().to_string(), "expires_seconds"),
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[test]
	fn humanize_renders_units() {
		assert_eq!(humanize(Duration::ZERO), "0 seconds");
		assert_eq!(humanize(Duration::seconds(1)), "1 second");
		assert_eq!(humanize(Duration::hours(2)), "2 hours");
		assert_eq!(humanize(Duration::seconds(5_400)), "1 hour 30 minutes");
		assert_eq!(humanize(Duration::seconds(90_061)), "1 day 1 hour 1 minute 1 second");
	}
}
