//! Prefix matcher over configured signable URL spaces.

// self
use crate::_prelude::*;

/// Errors raised while registering a signable base URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum SignableSpaceError {
	/// Base URL cannot be parsed.
	#[error("Signable base `{url}` is not a valid URL.")]
	Unparsable {
		/// Rejected value.
		url: String,
	},
	/// Base URL has no host (e.g., `mailto:` or `data:` URLs).
	#[error("Signable base `{url}` has no host.")]
	MissingHost {
		/// Rejected value.
		url: String,
	},
	/// Base URL carries a query or fragment, which prefix matching cannot honor.
	#[error("Signable base `{url}` must not carry a query or fragment.")]
	QueryOrFragment {
		/// Rejected value.
		url: String,
	},
}

/// Set of URL prefixes a signer is willing to sign.
///
/// A candidate matches a base when scheme, host, and effective port are equal and the base path
/// is a prefix of the candidate path on a segment boundary, so `https://cdn.example/media`
/// covers `https://cdn.example/media/a.mp4` but not `https://cdn.example/media-private/a.mp4`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignableSpace {
	bases: Vec<Url>,
}
impl SignableSpace {
	/// Creates an empty space that accepts nothing.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a base URL to the space.
	pub fn with_base(mut self, base: &str) -> Result<Self, SignableSpaceError> {
		let url = Url::parse(base.trim())
			.map_err(|_| SignableSpaceError::Unparsable { url: base.to_owned() })?;

		if url.host_str().is_none() {
			return Err(SignableSpaceError::MissingHost { url: base.to_owned() });
		}
		if url.query().is_some() || url.fragment().is_some() {
			return Err(SignableSpaceError::QueryOrFragment { url: base.to_owned() });
		}

		self.bases.push(url);

		Ok(self)
	}

	/// Adds several base URLs, stopping at the first invalid one.
	pub fn with_bases<I, S>(self, bases: I) -> Result<Self, SignableSpaceError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		bases.into_iter().try_fold(self, |space, base| space.with_base(base.as_ref()))
	}

	/// Registered base URLs, in insertion order.
	pub fn bases(&self) -> &[Url] {
		&self.bases
	}

	/// Returns `true` if `candidate` falls under any registered base.
	pub fn accepts(&self, candidate: &str) -> bool {
		let Ok(candidate) = Url::parse(candidate.trim()) else {
			return false;
		};

		self.bases.iter().any(|base| covers(base, &candidate))
	}
}

fn covers(base: &Url, candidate: &Url) -> bool {
	if base.scheme() != candidate.scheme()
		|| base.host_str() != candidate.host_str()
		|| base.port_or_known_default() != candidate.port_or_known_default()
	{
		return false;
	}

	let prefix = base.path().trim_end_matches('/');
	let path = candidate.path();

	if prefix.is_empty() {
		return true;
	}

	match path.strip_prefix(prefix) {
		Some(rest) => rest.is_empty() || rest.starts_with('/'),
		None => false,
	}
}
