//! Declarative endpoint descriptions and the one validation + request-building algorithm.

// self
use crate::{
	_prelude::*,
	auth::Scope,
	error::{ConfigError, ValidationError},
	http::{FileUpload, HttpMethod, RequestBody},
};

/// Unbounded text.
pub const TEXT: ParamKind = ParamKind::Text { min: 0, max: usize::MAX };
/// Non-empty text.
pub const NON_EMPTY: ParamKind = ParamKind::Text { min: 1, max: usize::MAX };
/// `true`/`false`.
pub const BOOLEAN: ParamKind = ParamKind::Boolean;
/// A single fullname.
pub const FULLNAME: ParamKind = ParamKind::Fullname;
/// Comma-separated fullnames.
pub const FULLNAMES: ParamKind = ParamKind::FullnameList;
/// Binary upload.
pub const FILE: ParamKind = ParamKind::File;

/// Where a parameter travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamLocation {
	/// Substituted into a `{name}` placeholder of the path.
	Path,
	/// Appended to the query string.
	Query,
	/// Sent in the form or multipart body.
	Body,
}

/// Value domain of a parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
	/// Text whose length in characters lies within `min..=max`.
	Text {
		/// Minimum length.
		min: usize,
		/// Maximum length.
		max: usize,
	},
	/// One of a fixed set of strings.
	Choice(&'static [&'static str]),
	/// Integer within `min..=max`.
	Integer {
		/// Inclusive lower bound.
		min: i64,
		/// Inclusive upper bound.
		max: i64,
	},
	/// `true`/`false`.
	Boolean,
	/// Reddit fullname such as `t3_abc123`.
	Fullname,
	/// Comma-separated fullnames.
	FullnameList,
	/// Binary file for multipart uploads.
	File,
}
impl ParamKind {
	/// Text of at most `max` characters.
	pub const fn text_max(max: usize) -> Self {
		ParamKind::Text { min: 0, max }
	}

	/// Integer within `min..=max`.
	pub const fn range(min: i64, max: i64) -> Self {
		ParamKind::Integer { min, max }
	}

	fn label(self) -> &'static str {
		match self {
			ParamKind::Text { .. } | ParamKind::Fullname | ParamKind::FullnameList => "text",
			ParamKind::Choice(_) => "choice",
			ParamKind::Integer { .. } => "integer",
			ParamKind::Boolean => "boolean",
			ParamKind::File => "file",
		}
	}
}

/// One parameter of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSpec {
	/// Wire name.
	pub name: &'static str,
	/// Where the value travels.
	pub location: ParamLocation,
	/// Accepted values.
	pub kind: ParamKind,
	/// Whether the caller must supply it.
	pub required: bool,
}
impl ParamSpec {
	/// Required path parameter.
	pub const fn path(name: &'static str) -> Self {
		Self { name, location: ParamLocation::Path, kind: NON_EMPTY, required: true }
	}

	/// Optional query parameter.
	pub const fn query(name: &'static str, kind: ParamKind) -> Self {
		Self { name, location: ParamLocation::Query, kind, required: false }
	}

	/// Optional body parameter.
	pub const fn body(name: &'static str, kind: ParamKind) -> Self {
		Self { name, location: ParamLocation::Body, kind, required: false }
	}

	/// Marks the parameter as required.
	pub const fn required(mut self) -> Self {
		self.required = true;

		self
	}
}

/// Declarative description of one Reddit endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointSpec {
	/// Catalog name.
	pub name: &'static str,
	/// HTTP verb.
	pub method: HttpMethod,
	/// Path template relative to the API base, with `{name}` placeholders.
	pub path: &'static str,
	/// Scope the token must carry.
	pub scope: Scope,
	/// Accepted parameters in validation order.
	pub params: &'static [ParamSpec],
	/// Constant parameters always sent, such as `api_type=json`.
	pub fixed: &'static [(&'static str, &'static str)],
}
impl EndpointSpec {
	/// Looks up a parameter by name.
	pub fn param(&self, name: &str) -> Option<&ParamSpec> {
		self.params.iter().find(|param| param.name == name)
	}

	/// Validates `params` against the schema without any I/O.
	///
	/// Unknown names are reported first, then each declared parameter in order.
	pub fn validate(&self, params: &Params) -> Result<(), ValidationError> {
		if let Some(unknown) = params.names().find(|name| self.param(name).is_none()) {
			return Err(ValidationError::UnknownParameter {
				endpoint: self.name,
				field: unknown.to_owned(),
			});
		}

		for spec in self.params {
			match params.get(spec.name) {
				Some(value) => check_value(spec, value)?,
				None if spec.required =>
					return Err(ValidationError::MissingParameter {
						endpoint: self.name,
						field: spec.name,
					}),
				None => {},
			}
		}

		Ok(())
	}

	/// Renders the request URL and body for already validated `params`.
	pub fn build(&self, base: &Url, params: &Params) -> Result<(Url, RequestBody), ConfigError> {
		let mut rendered_path = String::new();
		let mut segments = Vec::new();

		for segment in self.path.split('/').filter(|segment| !segment.is_empty()) {
			let value = match segment.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
				Some(name) => params.get(name).map(ParamValue::render).unwrap_or_default(),
				None => segment.to_owned(),
			};

			rendered_path.push('/');
			rendered_path.push_str(&value);
			segments.push(value);
		}

		let mut url =
			join_segments(base, &rendered_path, segments.iter().map(String::as_str))?;
		let mut query = Vec::new();
		let mut fields = Vec::new();
		let mut file = None;

		for spec in self.params {
			let Some(value) = params.get(spec.name) else {
				continue;
			};

			match (spec.location, value) {
				(ParamLocation::Path, _) => {},
				(_, ParamValue::File(upload)) =>
					file = Some(FileUpload {
						field: spec.name.to_owned(),
						file_name: upload.file_name.clone(),
						mime: upload.mime.clone(),
						bytes: upload.bytes.clone(),
					}),
				(ParamLocation::Query, value) => query.push((spec.name, value.render())),
				(ParamLocation::Body, value) => fields.push((spec.name.to_owned(), value.render())),
			}
		}

		for &(name, value) in self.fixed {
			match self.method {
				HttpMethod::Get => query.push((name, value.to_owned())),
				HttpMethod::Post => fields.push((name.to_owned(), value.to_owned())),
			}
		}

		if !query.is_empty() {
			let mut pairs = url.query_pairs_mut();

			for (name, value) in &query {
				pairs.append_pair(name, value);
			}
		}

		let body = match (file, self.method) {
			(Some(file), _) => RequestBody::Multipart { fields, file },
			(None, HttpMethod::Post) => RequestBody::Form(fields),
			(None, HttpMethod::Get) => RequestBody::Empty,
		};

		Ok((url, body))
	}
}

/// Appends percent-encoded path segments to `base`.
pub(crate) fn join_segments<'a>(
	base: &Url,
	rendered: &str,
	segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, ConfigError> {
	let mut url = base.clone();

	url.set_query(None);
	url.path_segments_mut()
		.map_err(|_| ConfigError::InvalidEndpointPath {
			path: rendered.to_owned(),
			source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
		})?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}

/// File supplied for a multipart parameter.
#[derive(Clone, PartialEq, Eq)]
pub struct FileData {
	/// File name reported to Reddit.
	pub file_name: String,
	/// MIME type, for example `image/png`.
	pub mime: String,
	/// File contents.
	pub bytes: Vec<u8>,
}
impl Debug for FileData {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FileData")
			.field("file_name", &self.file_name)
			.field("mime", &self.mime)
			.field("len", &self.bytes.len())
			.finish()
	}
}

/// Caller-supplied parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
	/// Text, choice, or fullname value.
	Text(String),
	/// Integer value.
	Integer(i64),
	/// Boolean value.
	Boolean(bool),
	/// File for a multipart upload.
	File(FileData),
}
impl ParamValue {
	/// Wire form of the value; files render empty.
	pub fn render(&self) -> String {
		match self {
			ParamValue::Text(text) => text.clone(),
			ParamValue::Integer(value) => value.to_string(),
			ParamValue::Boolean(value) => value.to_string(),
			ParamValue::File(_) => String::new(),
		}
	}
}

/// Named parameters for one endpoint call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, ParamValue>);
impl Params {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a text value.
	pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.with(name, ParamValue::Text(value.into()))
	}

	/// Adds an integer value.
	pub fn integer(self, name: impl Into<String>, value: i64) -> Self {
		self.with(name, ParamValue::Integer(value))
	}

	/// Adds a boolean value.
	pub fn boolean(self, name: impl Into<String>, value: bool) -> Self {
		self.with(name, ParamValue::Boolean(value))
	}

	/// Adds a file value.
	pub fn file(self, name: impl Into<String>, file: FileData) -> Self {
		self.with(name, ParamValue::File(file))
	}

	/// Adds a text value when present.
	pub fn text_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
		match value {
			Some(value) => self.text(name, value),
			None => self,
		}
	}

	/// Adds any value, replacing a previous one with the same name.
	pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
		self.0.insert(name.into(), value);

		self
	}

	/// Looks up a value.
	pub fn get(&self, name: &str) -> Option<&ParamValue> {
		self.0.get(name)
	}

	/// Parameter names in lexical order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}
}

fn check_value(spec: &ParamSpec, value: &ParamValue) -> Result<(), ValidationError> {
	let field = || spec.name.to_owned();
	let wrong_type = || ValidationError::WrongType { field: field(), expected: spec.kind.label() };

	match (spec.kind, value) {
		(ParamKind::Text { min, max }, ParamValue::Text(text)) => {
			let actual = text.chars().count();

			if actual == 0 && min > 0 {
				return Err(ValidationError::Empty { field: field() });
			}
			if actual < min {
				return Err(ValidationError::TooShort { field: field(), min, actual });
			}
			if actual > max {
				return Err(ValidationError::TooLong { field: field(), max, actual });
			}

			Ok(())
		},
		(ParamKind::Choice(allowed), ParamValue::Text(text)) =>
			if allowed.contains(&text.as_str()) {
				Ok(())
			} else {
				Err(ValidationError::NotAllowed { field: field(), value: text.clone(), allowed })
			},
		(ParamKind::Integer { min, max }, ParamValue::Integer(value)) =>
			if (min..=max).contains(value) {
				Ok(())
			} else {
				Err(ValidationError::OutOfRange { field: field(), min, max, value: *value })
			},
		(ParamKind::Boolean, ParamValue::Boolean(_)) | (ParamKind::File, ParamValue::File(_)) =>
			Ok(()),
		(ParamKind::Fullname, ParamValue::Text(text)) =>
			if is_fullname(text) {
				Ok(())
			} else {
				Err(ValidationError::InvalidFullname { field: field(), value: text.clone() })
			},
		(ParamKind::FullnameList, ParamValue::Text(text)) =>
			match text.split(',').find(|part| !is_fullname(part)) {
				None => Ok(()),
				Some(bad) =>
					Err(ValidationError::InvalidFullname { field: field(), value: bad.to_owned() }),
			},
		_ => Err(wrong_type()),
	}
}

/// Returns `true` for `t1_`..`t6_` followed by a lowercase base36 id.
pub fn is_fullname(value: &str) -> bool {
	let bytes = value.as_bytes();

	bytes.len() > 3
		&& bytes[0] == b't'
		&& (b'1'..=b'6').contains(&bytes[1])
		&& bytes[2] == b'_'
		&& bytes[3..].iter().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const FLAIR: EndpointSpec = EndpointSpec {
		name: "set_link_flair",
		method: HttpMethod::Post,
		path: "/r/{subreddit}/api/flair",
		scope: Scope::ModFlair,
		params: &[
			ParamSpec::path("subreddit"),
			ParamSpec::body("link", FULLNAME).required(),
			ParamSpec::body("text", ParamKind::text_max(64)),
			ParamSpec::body("css_class", ParamKind::text_max(100)),
		],
		fixed: &[("api_type", "json")],
	};
	const LISTING: EndpointSpec = EndpointSpec {
		name: "hot",
		method: HttpMethod::Get,
		path: "/r/{subreddit}/hot",
		scope: Scope::Read,
		params: &[
			ParamSpec::path("subreddit"),
			ParamSpec::query("limit", ParamKind::range(1, 100)),
			ParamSpec::query("t", ParamKind::Choice(&["hour", "day"])),
			ParamSpec::query("sr_detail", BOOLEAN),
		],
		fixed: &[("raw_json", "1")],
	};

	fn base() -> Url {
		Url::parse("https://oauth.reddit.com").expect("Base URL fixture should parse.")
	}

	#[test]
	fn text_length_is_counted_in_characters() {
		let ok = Params::new().text("subreddit", "rust").text("link", "t3_abc").text("text", "é".repeat(64));

		assert!(FLAIR.validate(&ok).is_ok());

		let long = ok.text("text", "x".repeat(65));

		assert_eq!(
			FLAIR.validate(&long),
			Err(ValidationError::TooLong { field: "text".into(), max: 64, actual: 65 })
		);
	}

	#[test]
	fn schema_violations_are_reported() {
		let base = Params::new().text("subreddit", "rust");

		assert_eq!(
			FLAIR.validate(&base),
			Err(ValidationError::MissingParameter { endpoint: "set_link_flair", field: "link" })
		);
		assert!(matches!(
			FLAIR.validate(&base.clone().text("link", "abc")),
			Err(ValidationError::InvalidFullname { .. })
		));
		assert!(matches!(
			FLAIR.validate(&base.clone().text("link", "t3_x").text("flair", "x")),
			Err(ValidationError::UnknownParameter { .. })
		));
		assert!(matches!(
			LISTING.validate(&base.clone().integer("limit", 101)),
			Err(ValidationError::OutOfRange { min: 1, max: 100, value: 101, .. })
		));
		assert!(matches!(
			LISTING.validate(&base.clone().text("t", "decade")),
			Err(ValidationError::NotAllowed { .. })
		));
		assert!(matches!(
			LISTING.validate(&base.clone().text("limit", "10")),
			Err(ValidationError::WrongType { expected: "integer", .. })
		));
		assert!(matches!(
			LISTING.validate(&Params::new().text("subreddit", "")),
			Err(ValidationError::Empty { .. })
		));
	}

	#[test]
	fn get_requests_render_into_the_query_string() {
		let params = Params::new().text("subreddit", "a b").integer("limit", 5).boolean("sr_detail", true);
		let (url, body) = LISTING.build(&base(), &params).expect("Listing request should build.");

		assert_eq!(url.path(), "/r/a%20b/hot");
		assert_eq!(url.query(), Some("limit=5&sr_detail=true&raw_json=1"));
		assert_eq!(body, RequestBody::Empty);
	}

	#[test]
	fn post_requests_render_into_the_body() {
		let params = Params::new().text("subreddit", "rust").text("link", "t3_abc").text("text", "hi");
		let (url, body) = FLAIR.build(&base(), &params).expect("Flair request should build.");

		assert_eq!(url.as_str(), "https://oauth.reddit.com/r/rust/api/flair");
		assert_eq!(body.field("link"), Some("t3_abc"));
		assert_eq!(body.field("text"), Some("hi"));
		assert_eq!(body.field("api_type"), Some("json"));
		assert_eq!(body.field("css_class"), None);
	}

	#[test]
	fn fullnames_require_a_kind_prefix() {
		assert!(is_fullname("t3_15bfi0"));
		assert!(is_fullname("t5_2qh1i"));
		assert!(!is_fullname("t7_abc"));
		assert!(!is_fullname("t3_"));
		assert!(!is_fullname("T3_abc"));
		assert!(!is_fullname("t3_ABC"));
	}
}
