//! Reddit OAuth scope enumeration and normalized scope sets.

// std
use std::collections::BTreeSet;
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

macro_rules! def_scopes {
	($($variant:ident => $value:literal,)+) => {
		/// Permission bundles Reddit recognizes for OAuth tokens.
		#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub enum Scope {
			$(
				#[doc = concat!("The `", $value, "` scope.")]
				$variant,
			)+
		}
		impl Scope {
			/// Every scope Reddit recognizes, in lexical order.
			pub const ALL: &'static [Scope] = &[$(Scope::$variant,)+];

			/// Returns the wire identifier.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Scope::$variant => $value,)+
				}
			}
		}
		impl FromStr for Scope {
			type Err = ScopeValidationError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($value => Ok(Scope::$variant),)+
					"" => Err(ScopeValidationError::Empty),
					other => Err(ScopeValidationError::Unknown { scope: other.to_owned() }),
				}
			}
		}
	};
}

def_scopes! {
	Account => "account",
	Creddits => "creddits",
	Edit => "edit",
	Flair => "flair",
	History => "history",
	Identity => "identity",
	LiveManage => "livemanage",
	ModConfig => "modconfig",
	ModContributors => "modcontributors",
	ModFlair => "modflair",
	ModLog => "modlog",
	ModOthers => "modothers",
	ModPosts => "modposts",
	ModSelf => "modself",
	ModTraffic => "modtraffic",
	ModWiki => "modwiki",
	MySubreddits => "mysubreddits",
	PrivateMessages => "privatemessages",
	Read => "read",
	Report => "report",
	Save => "save",
	Submit => "submit",
	Subscribe => "subscribe",
	Vote => "vote",
	WikiEdit => "wikiedit",
	WikiRead => "wikiread",
}

impl Display for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// The scope is not part of Reddit's enumeration.
	#[error("Unknown scope: {scope}.")]
	Unknown {
		/// The offending scope string.
		scope: String,
	},
}

/// Wildcard accepted in scope requests; expands to [`Scope::ALL`].
pub const WILDCARD: &str = "*";

/// Normalized, deduplicated set of Reddit scopes.
///
/// Scopes are kept sorted so equality and the rendered forms stay stable. The URL form
/// used by the authorize endpoint is comma-joined; the token endpoint reports scopes
/// space-delimited, and [`FromStr`] accepts either delimiter.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeSet(BTreeSet<Scope>);
impl ScopeSet {
	/// Creates a scope set from requested identifiers; `"*"` expands to every scope.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut set = BTreeSet::new();

		for scope in scopes {
			let raw = scope.as_ref();

			if raw == WILDCARD {
				set.extend(Scope::ALL.iter().copied());

				continue;
			}

			set.insert(raw.parse::<Scope>()?);
		}

		Ok(Self(set))
	}

	/// Scope set containing every known scope.
	pub fn all() -> Self {
		Self(Scope::ALL.iter().copied().collect())
	}

	/// Number of distinct scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the set contains the provided scope.
	pub fn contains(&self, scope: Scope) -> bool {
		self.0.contains(&scope)
	}

	/// Returns true when every known scope is present.
	pub fn is_all(&self) -> bool {
		self.0.len() == Scope::ALL.len()
	}

	/// Iterator over scopes in lexical order.
	pub fn iter(&self) -> impl Iterator<Item = Scope> + '_ {
		self.0.iter().copied()
	}

	/// Comma-joined form used in authorize URLs.
	pub fn to_url_param(&self) -> String {
		self.join(",")
	}

	/// Space-delimited form, as reported by the token endpoint.
	pub fn normalized(&self) -> String {
		self.join(" ")
	}

	fn join(&self, delimiter: &str) -> String {
		self.0.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(delimiter)
	}
}
impl Debug for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ScopeSet").field(&self.normalized()).finish()
	}
}
impl Display for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.normalized())
	}
}
impl FromIterator<Scope> for ScopeSet {
	fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}
impl FromStr for ScopeSet {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s.split(|c: char| c == ',' || c.is_whitespace()).filter(|part| !part.is_empty()))
	}
}
impl Serialize for ScopeSet {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for scope in self.0.iter() {
			seq.serialize_element(scope.as_str())?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for ScopeSet {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		ScopeSet::new(values).map_err(DeError::custom)
	}
}
