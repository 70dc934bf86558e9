//! Typed wrappers over the most common catalog entries.

// self
use crate::{
	_prelude::*,
	api::schema::{FileData, Params},
	flows::RedditClient,
	http::{ApiResponse, HttpTransport},
};

/// Kind of post created by [`RedditClient::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
	/// Link post.
	Link,
	/// Text ("self") post.
	SelfPost,
	/// Image post.
	Image,
	/// Video post.
	Video,
	/// Silent video post.
	VideoGif,
}
impl SubmissionKind {
	/// Wire value of the `kind` parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			SubmissionKind::Link => "link",
			SubmissionKind::SelfPost => "self",
			SubmissionKind::Image => "image",
			SubmissionKind::Video => "video",
			SubmissionKind::VideoGif => "videogif",
		}
	}
}

/// New post for [`RedditClient::submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
	/// Target subreddit name without the `r/` prefix.
	pub subreddit: String,
	/// Post kind.
	pub kind: SubmissionKind,
	/// Title, at most 300 characters.
	pub title: String,
	/// Target URL for link and media posts.
	pub url: Option<String>,
	/// Markdown body for text posts.
	pub text: Option<String>,
	/// Mark as NSFW.
	pub nsfw: bool,
	/// Mark as spoiler.
	pub spoiler: bool,
	/// Send inbox replies to the author.
	pub send_replies: bool,
	/// Allow a link that was already submitted.
	pub resubmit: bool,
	/// Flair template to apply.
	pub flair_id: Option<String>,
	/// Flair text, at most 64 characters.
	pub flair_text: Option<String>,
}
impl Submission {
	/// Link post pointing at `url`.
	pub fn link(
		subreddit: impl Into<String>,
		title: impl Into<String>,
		url: impl Into<String>,
	) -> Self {
		Self { url: Some(url.into()), ..Self::new(subreddit, SubmissionKind::Link, title) }
	}

	/// Text post with a markdown body.
	pub fn text(
		subreddit: impl Into<String>,
		title: impl Into<String>,
		text: impl Into<String>,
	) -> Self {
		Self { text: Some(text.into()), ..Self::new(subreddit, SubmissionKind::SelfPost, title) }
	}

	/// Post of any kind with no body yet.
	pub fn new(subreddit: impl Into<String>, kind: SubmissionKind, title: impl Into<String>) -> Self {
		Self {
			subreddit: subreddit.into(),
			kind,
			title: title.into(),
			url: None,
			text: None,
			nsfw: false,
			spoiler: false,
			send_replies: true,
			resubmit: false,
			flair_id: None,
			flair_text: None,
		}
	}

	/// Sets the NSFW flag.
	pub fn nsfw(mut self, nsfw: bool) -> Self {
		self.nsfw = nsfw;

		self
	}

	/// Sets the spoiler flag.
	pub fn spoiler(mut self, spoiler: bool) -> Self {
		self.spoiler = spoiler;

		self
	}

	/// Sets whether replies reach the author's inbox.
	pub fn send_replies(mut self, send_replies: bool) -> Self {
		self.send_replies = send_replies;

		self
	}

	/// Allows resubmitting an already posted link.
	pub fn resubmit(mut self, resubmit: bool) -> Self {
		self.resubmit = resubmit;

		self
	}

	/// Applies a flair template and optional text.
	pub fn flair(mut self, flair_id: impl Into<String>, flair_text: Option<String>) -> Self {
		self.flair_id = Some(flair_id.into());
		self.flair_text = flair_text;

		self
	}

	fn into_params(self) -> Params {
		Params::new()
			.text("sr", self.subreddit)
			.text("kind", self.kind.as_str())
			.text("title", self.title)
			.text_opt("url", self.url)
			.text_opt("text", self.text)
			.boolean("nsfw", self.nsfw)
			.boolean("spoiler", self.spoiler)
			.boolean("sendreplies", self.send_replies)
			.boolean("resubmit", self.resubmit)
			.text_opt("flair_id", self.flair_id)
			.text_opt("flair_text", self.flair_text)
	}
}

/// Direction for [`RedditClient::vote`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoteDirection {
	/// Upvote.
	Up,
	/// Remove an existing vote.
	Clear,
	/// Downvote.
	Down,
}
impl VoteDirection {
	/// Wire value of the `dir` parameter.
	pub const fn as_i64(self) -> i64 {
		match self {
			VoteDirection::Up => 1,
			VoteDirection::Clear => 0,
			VoteDirection::Down => -1,
		}
	}
}

/// Slot an uploaded subreddit image fills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageUpload {
	/// Stylesheet image referenced by `name`.
	Stylesheet {
		/// Image name used in the stylesheet.
		name: String,
	},
	/// Subreddit header.
	Header,
	/// Mobile icon.
	Icon,
	/// Mobile banner.
	Banner,
}
impl ImageUpload {
	fn upload_type(&self) -> &'static str {
		match self {
			ImageUpload::Stylesheet { .. } => "img",
			ImageUpload::Header => "header",
			ImageUpload::Icon => "icon",
			ImageUpload::Banner => "banner",
		}
	}
}

impl<T> RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Identity of the authorized account.
	pub async fn me(&self) -> Result<ApiResponse> {
		self.call("me", Params::new()).await
	}

	/// Sets or clears the flair of a link; `text` is limited to 64 characters.
	pub async fn set_link_flair(
		&self,
		subreddit: &str,
		link: &str,
		text: Option<&str>,
		css_class: Option<&str>,
	) -> Result<ApiResponse> {
		let params = Params::new()
			.text("subreddit", subreddit)
			.text("link", link)
			.text_opt("text", text)
			.text_opt("css_class", css_class);

		self.call("set_link_flair", params).await
	}

	/// Creates a post.
	pub async fn submit(&self, submission: Submission) -> Result<ApiResponse> {
		self.call("submit", submission.into_params()).await
	}

	/// Replies to the link or comment identified by the fullname `parent`.
	pub async fn comment(&self, parent: &str, text: &str) -> Result<ApiResponse> {
		self.call("comment", Params::new().text("thing_id", parent).text("text", text)).await
	}

	/// Votes on the link or comment identified by the fullname `id`.
	pub async fn vote(&self, id: &str, direction: VoteDirection) -> Result<ApiResponse> {
		self.call("vote", Params::new().text("id", id).integer("dir", direction.as_i64())).await
	}

	/// Uploads a PNG or JPEG image to a subreddit as multipart form data.
	pub async fn upload_subreddit_image(
		&self,
		subreddit: &str,
		file: FileData,
		upload: ImageUpload,
	) -> Result<ApiResponse> {
		let img_type = if file.mime.eq_ignore_ascii_case("image/png") { "png" } else { "jpg" };
		let mut params = Params::new()
			.text("subreddit", subreddit)
			.text("img_type", img_type)
			.text("upload_type", upload.upload_type());

		if let ImageUpload::Stylesheet { name } = upload {
			params = params.text("name", name);
		}

		self.call("upload_sr_img", params.file("file", file)).await
	}
}
