//! Reddit's published OAuth endpoints as a static table.

// self
use crate::{
	api::schema::{
		BOOLEAN, EndpointSpec, FILE, FULLNAME, FULLNAMES, NON_EMPTY, ParamKind, ParamSpec, TEXT,
	},
	auth::Scope,
	http::HttpMethod,
};

const JSON: &[(&str, &str)] = &[("api_type", "json")];

const LIMIT: ParamKind = ParamKind::range(1, 100);
const COUNT: ParamKind = ParamKind::range(0, i64::MAX);
const TIME: ParamKind = ParamKind::Choice(&["hour", "day", "week", "month", "year", "all"]);
const FLAIR_TEXT: ParamKind = ParamKind::text_max(64);
const CSS_CLASS: ParamKind = ParamKind::text_max(100);
const FLAIR_TYPE: ParamKind = ParamKind::Choice(&["USER_FLAIR", "LINK_FLAIR"]);
const SUBMIT_KIND: ParamKind = ParamKind::Choice(&["link", "self", "image", "video", "videogif"]);
const TITLE: ParamKind = ParamKind::Text { min: 1, max: 300 };
const REASON: ParamKind = ParamKind::text_max(100);
const COMMENT_SORT: ParamKind = ParamKind::Choice(&[
	"confidence",
	"top",
	"new",
	"controversial",
	"old",
	"random",
	"qa",
	"live",
]);

macro_rules! endpoint {
	($name:literal, $method:ident $path:literal, $scope:ident, $params:expr $(, fixed = $fixed:expr)? $(,)?) => {
		EndpointSpec {
			name: $name,
			method: HttpMethod::$method,
			path: $path,
			scope: Scope::$scope,
			params: $params,
			fixed: endpoint!(@fixed $($fixed)?),
		}
	};
	(@fixed) => {
		&[]
	};
	(@fixed $fixed:expr) => {
		$fixed
	};
}

/// Endpoint-specific parameters followed by Reddit's standard listing parameters.
macro_rules! listing {
	($($param:expr),* $(,)?) => {
		&[
			$($param,)*
			ParamSpec::query("after", FULLNAME),
			ParamSpec::query("before", FULLNAME),
			ParamSpec::query("count", COUNT),
			ParamSpec::query("limit", LIMIT),
			ParamSpec::query("show", ParamKind::Choice(&["all"])),
			ParamSpec::query("sr_detail", BOOLEAN),
		]
	};
}

/// Every endpoint callable through [`RedditClient::call`](crate::flows::RedditClient::call).
pub static CATALOG: &[EndpointSpec] = &[
	// account
	endpoint!("me", Get "/api/v1/me", Identity, &[]),
	endpoint!("me_karma", Get "/api/v1/me/karma", MySubreddits, &[]),
	endpoint!("me_prefs", Get "/api/v1/me/prefs", Identity, &[ParamSpec::query("fields", TEXT)]),
	endpoint!("me_trophies", Get "/api/v1/me/trophies", Identity, &[]),
	endpoint!("prefs_friends", Get "/prefs/friends", Read, &[]),
	endpoint!("prefs_blocked", Get "/prefs/blocked", Read, &[]),
	endpoint!(
		"block_user",
		Post "/api/block_user",
		Account,
		&[ParamSpec::body("name", NON_EMPTY).required()],
	),
	// flair
	endpoint!(
		"clear_flair_templates",
		Post "/r/{subreddit}/api/clearflairtemplates",
		ModFlair,
		&[ParamSpec::path("subreddit"), ParamSpec::body("flair_type", FLAIR_TYPE).required()],
		fixed = JSON,
	),
	endpoint!(
		"delete_flair",
		Post "/r/{subreddit}/api/deleteflair",
		ModFlair,
		&[ParamSpec::path("subreddit"), ParamSpec::body("name", NON_EMPTY).required()],
		fixed = JSON,
	),
	endpoint!(
		"set_user_flair",
		Post "/r/{subreddit}/api/flair",
		ModFlair,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("name", NON_EMPTY).required(),
			ParamSpec::body("text", FLAIR_TEXT),
			ParamSpec::body("css_class", CSS_CLASS),
		],
		fixed = JSON,
	),
	endpoint!(
		"set_link_flair",
		Post "/r/{subreddit}/api/flair",
		ModFlair,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("link", FULLNAME).required(),
			ParamSpec::body("text", FLAIR_TEXT),
			ParamSpec::body("css_class", CSS_CLASS),
		],
		fixed = JSON,
	),
	endpoint!(
		"flair_config",
		Post "/r/{subreddit}/api/flairconfig",
		ModFlair,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("flair_enabled", BOOLEAN),
			ParamSpec::body("flair_position", ParamKind::Choice(&["left", "right"])),
			ParamSpec::body("flair_self_assign_enabled", BOOLEAN),
			ParamSpec::body("link_flair_position", ParamKind::Choice(&["", "left", "right"])),
			ParamSpec::body("link_flair_self_assign_enabled", BOOLEAN),
		],
		fixed = JSON,
	),
	endpoint!(
		"flair_list",
		Get "/r/{subreddit}/api/flairlist",
		ModFlair,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::query("after", TEXT),
			ParamSpec::query("before", TEXT),
			ParamSpec::query("count", COUNT),
			ParamSpec::query("limit", ParamKind::range(1, 1000)),
			ParamSpec::query("name", TEXT),
		],
	),
	endpoint!(
		"flair_selector",
		Post "/r/{subreddit}/api/flairselector",
		Flair,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("link", FULLNAME),
			ParamSpec::body("name", TEXT),
		],
	),
	endpoint!(
		"flair_template",
		Post "/r/{subreddit}/api/flairtemplate",
		ModFlair,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("flair_type", FLAIR_TYPE).required(),
			ParamSpec::body("flair_template_id", TEXT),
			ParamSpec::body("text", FLAIR_TEXT),
			ParamSpec::body("css_class", CSS_CLASS),
			ParamSpec::body("text_editable", BOOLEAN),
		],
		fixed = JSON,
	),
	endpoint!(
		"select_flair",
		Post "/r/{subreddit}/api/selectflair",
		Flair,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("flair_template_id", TEXT),
			ParamSpec::body("link", FULLNAME),
			ParamSpec::body("name", TEXT),
			ParamSpec::body("text", FLAIR_TEXT),
		],
		fixed = JSON,
	),
	endpoint!("link_flair", Get "/r/{subreddit}/api/link_flair", Flair, &[ParamSpec::path("subreddit")]),
	endpoint!("user_flair", Get "/r/{subreddit}/api/user_flair", Flair, &[ParamSpec::path("subreddit")]),
	// links & comments
	endpoint!(
		"comment",
		Post "/api/comment",
		Submit,
		&[
			ParamSpec::body("thing_id", FULLNAME).required(),
			ParamSpec::body("text", NON_EMPTY).required(),
		],
		fixed = JSON,
	),
	endpoint!("del", Post "/api/del", Edit, &[ParamSpec::body("id", FULLNAME).required()]),
	endpoint!(
		"edit_user_text",
		Post "/api/editusertext",
		Edit,
		&[
			ParamSpec::body("thing_id", FULLNAME).required(),
			ParamSpec::body("text", NON_EMPTY).required(),
		],
		fixed = JSON,
	),
	endpoint!("hide", Post "/api/hide", Report, &[ParamSpec::body("id", FULLNAMES).required()]),
	endpoint!("unhide", Post "/api/unhide", Report, &[ParamSpec::body("id", FULLNAMES).required()]),
	endpoint!(
		"info",
		Get "/api/info",
		Read,
		&[ParamSpec::query("id", FULLNAMES), ParamSpec::query("url", NON_EMPTY)],
	),
	endpoint!("lock", Post "/api/lock", ModPosts, &[ParamSpec::body("id", FULLNAME).required()]),
	endpoint!("unlock", Post "/api/unlock", ModPosts, &[ParamSpec::body("id", FULLNAME).required()]),
	endpoint!("mark_nsfw", Post "/api/marknsfw", ModPosts, &[ParamSpec::body("id", FULLNAME).required()]),
	endpoint!(
		"unmark_nsfw",
		Post "/api/unmarknsfw",
		ModPosts,
		&[ParamSpec::body("id", FULLNAME).required()],
	),
	endpoint!(
		"more_children",
		Get "/api/morechildren",
		Read,
		&[
			ParamSpec::query("link_id", FULLNAME).required(),
			ParamSpec::query("children", NON_EMPTY).required(),
			ParamSpec::query("sort", COMMENT_SORT),
			ParamSpec::query("limit_children", BOOLEAN),
		],
		fixed = JSON,
	),
	endpoint!(
		"report",
		Post "/api/report",
		Report,
		&[
			ParamSpec::body("thing_id", FULLNAME).required(),
			ParamSpec::body("reason", REASON),
			ParamSpec::body("other_reason", REASON),
		],
		fixed = JSON,
	),
	endpoint!(
		"save",
		Post "/api/save",
		Save,
		&[ParamSpec::body("id", FULLNAME).required(), ParamSpec::body("category", TEXT)],
	),
	endpoint!("unsave", Post "/api/unsave", Save, &[ParamSpec::body("id", FULLNAME).required()]),
	endpoint!("saved_categories", Get "/api/saved_categories", Save, &[]),
	endpoint!(
		"send_replies",
		Post "/api/sendreplies",
		Edit,
		&[ParamSpec::body("id", FULLNAME).required(), ParamSpec::body("state", BOOLEAN).required()],
	),
	endpoint!(
		"set_contest_mode",
		Post "/api/set_contest_mode",
		ModPosts,
		&[ParamSpec::body("id", FULLNAME).required(), ParamSpec::body("state", BOOLEAN).required()],
		fixed = JSON,
	),
	endpoint!(
		"set_subreddit_sticky",
		Post "/api/set_subreddit_sticky",
		ModPosts,
		&[
			ParamSpec::body("id", FULLNAME).required(),
			ParamSpec::body("state", BOOLEAN).required(),
			ParamSpec::body("num", ParamKind::range(1, 4)),
		],
		fixed = JSON,
	),
	endpoint!(
		"set_suggested_sort",
		Post "/api/set_suggested_sort",
		ModPosts,
		&[ParamSpec::body("id", FULLNAME).required(), ParamSpec::body("sort", COMMENT_SORT)],
		fixed = JSON,
	),
	endpoint!("spoiler", Post "/api/spoiler", ModPosts, &[ParamSpec::body("id", FULLNAME).required()]),
	endpoint!(
		"unspoiler",
		Post "/api/unspoiler",
		ModPosts,
		&[ParamSpec::body("id", FULLNAME).required()],
	),
	endpoint!(
		"submit",
		Post "/api/submit",
		Submit,
		&[
			ParamSpec::body("sr", NON_EMPTY).required(),
			ParamSpec::body("kind", SUBMIT_KIND).required(),
			ParamSpec::body("title", TITLE).required(),
			ParamSpec::body("url", NON_EMPTY),
			ParamSpec::body("text", TEXT),
			ParamSpec::body("resubmit", BOOLEAN),
			ParamSpec::body("sendreplies", BOOLEAN),
			ParamSpec::body("nsfw", BOOLEAN),
			ParamSpec::body("spoiler", BOOLEAN),
			ParamSpec::body("flair_id", TEXT),
			ParamSpec::body("flair_text", FLAIR_TEXT),
		],
		fixed = JSON,
	),
	endpoint!(
		"vote",
		Post "/api/vote",
		Vote,
		&[
			ParamSpec::body("id", FULLNAME).required(),
			ParamSpec::body("dir", ParamKind::range(-1, 1)).required(),
		],
	),
	// listings
	endpoint!("best", Get "/best", Read, listing![]),
	endpoint!("front_hot", Get "/hot", Read, listing![]),
	endpoint!("hot", Get "/r/{subreddit}/hot", Read, listing![ParamSpec::path("subreddit")]),
	endpoint!("new", Get "/r/{subreddit}/new", Read, listing![ParamSpec::path("subreddit")]),
	endpoint!("rising", Get "/r/{subreddit}/rising", Read, listing![ParamSpec::path("subreddit")]),
	endpoint!(
		"top",
		Get "/r/{subreddit}/top",
		Read,
		listing![ParamSpec::path("subreddit"), ParamSpec::query("t", TIME)],
	),
	endpoint!(
		"controversial",
		Get "/r/{subreddit}/controversial",
		Read,
		listing![ParamSpec::path("subreddit"), ParamSpec::query("t", TIME)],
	),
	endpoint!("random", Get "/r/{subreddit}/random", Read, &[ParamSpec::path("subreddit")]),
	endpoint!(
		"comments",
		Get "/r/{subreddit}/comments/{article}",
		Read,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::path("article"),
			ParamSpec::query("comment", NON_EMPTY),
			ParamSpec::query("context", ParamKind::range(0, 8)),
			ParamSpec::query("depth", ParamKind::range(1, i64::MAX)),
			ParamSpec::query("limit", ParamKind::range(1, i64::MAX)),
			ParamSpec::query("showedits", BOOLEAN),
			ParamSpec::query("showmore", BOOLEAN),
			ParamSpec::query("sort", COMMENT_SORT),
			ParamSpec::query("sr_detail", BOOLEAN),
			ParamSpec::query("threaded", BOOLEAN),
			ParamSpec::query("truncate", ParamKind::range(0, 50)),
		],
	),
	endpoint!(
		"duplicates",
		Get "/duplicates/{article}",
		Read,
		listing![ParamSpec::path("article"), ParamSpec::query("crossposts_only", BOOLEAN)],
	),
	endpoint!(
		"by_id",
		Get "/by_id/{names}",
		Read,
		&[ParamSpec { kind: FULLNAMES, ..ParamSpec::path("names") }],
	),
	// messages
	endpoint!(
		"block",
		Post "/api/block",
		PrivateMessages,
		&[ParamSpec::body("id", FULLNAME).required()],
	),
	endpoint!(
		"compose",
		Post "/api/compose",
		PrivateMessages,
		&[
			ParamSpec::body("to", NON_EMPTY).required(),
			ParamSpec::body("subject", ParamKind::Text { min: 1, max: 100 }).required(),
			ParamSpec::body("text", NON_EMPTY).required(),
			ParamSpec::body("from_sr", NON_EMPTY),
		],
		fixed = JSON,
	),
	endpoint!(
		"del_msg",
		Post "/api/del_msg",
		PrivateMessages,
		&[ParamSpec::body("id", FULLNAME).required()],
	),
	endpoint!(
		"read_message",
		Post "/api/read_message",
		PrivateMessages,
		&[ParamSpec::body("id", FULLNAMES).required()],
	),
	endpoint!(
		"unread_message",
		Post "/api/unread_message",
		PrivateMessages,
		&[ParamSpec::body("id", FULLNAMES).required()],
	),
	endpoint!("read_all_messages", Post "/api/read_all_messages", PrivateMessages, &[]),
	endpoint!(
		"message_inbox",
		Get "/message/inbox",
		PrivateMessages,
		listing![ParamSpec::query("mark", BOOLEAN)],
	),
	endpoint!(
		"message_unread",
		Get "/message/unread",
		PrivateMessages,
		listing![ParamSpec::query("mark", BOOLEAN)],
	),
	endpoint!("message_sent", Get "/message/sent", PrivateMessages, listing![]),
	// moderation
	endpoint!(
		"about_log",
		Get "/r/{subreddit}/about/log",
		ModLog,
		listing![
			ParamSpec::path("subreddit"),
			ParamSpec::query("mod", NON_EMPTY),
			ParamSpec::query("type", NON_EMPTY),
		],
	),
	endpoint!(
		"about_queue",
		Get "/r/{subreddit}/about/{location}",
		Read,
		listing![
			ParamSpec::path("subreddit"),
			ParamSpec {
				kind: ParamKind::Choice(&["reports", "spam", "modqueue", "unmoderated", "edited"]),
				..ParamSpec::path("location")
			},
			ParamSpec::query("only", ParamKind::Choice(&["links", "comments"])),
		],
	),
	endpoint!(
		"about_members",
		Get "/r/{subreddit}/about/{role}",
		Read,
		listing![
			ParamSpec::path("subreddit"),
			ParamSpec {
				kind: ParamKind::Choice(&[
					"banned",
					"muted",
					"wikibanned",
					"contributors",
					"wikicontributors",
					"moderators",
				]),
				..ParamSpec::path("role")
			},
			ParamSpec::query("user", NON_EMPTY),
		],
	),
	endpoint!(
		"accept_moderator_invite",
		Post "/r/{subreddit}/api/accept_moderator_invite",
		ModSelf,
		&[ParamSpec::path("subreddit")],
		fixed = JSON,
	),
	endpoint!("approve", Post "/api/approve", ModPosts, &[ParamSpec::body("id", FULLNAME).required()]),
	endpoint!(
		"distinguish",
		Post "/api/distinguish",
		ModPosts,
		&[
			ParamSpec::body("id", FULLNAME).required(),
			ParamSpec::body("how", ParamKind::Choice(&["yes", "no", "admin", "special"])).required(),
			ParamSpec::body("sticky", BOOLEAN),
		],
		fixed = JSON,
	),
	endpoint!(
		"ignore_reports",
		Post "/api/ignore_reports",
		ModPosts,
		&[ParamSpec::body("id", FULLNAME).required()],
	),
	endpoint!(
		"unignore_reports",
		Post "/api/unignore_reports",
		ModPosts,
		&[ParamSpec::body("id", FULLNAME).required()],
	),
	endpoint!(
		"leave_contributor",
		Post "/api/leavecontributor",
		ModSelf,
		&[ParamSpec::body("id", FULLNAME).required()],
	),
	endpoint!(
		"leave_moderator",
		Post "/api/leavemoderator",
		ModSelf,
		&[ParamSpec::body("id", FULLNAME).required()],
	),
	endpoint!(
		"remove",
		Post "/api/remove",
		ModPosts,
		&[ParamSpec::body("id", FULLNAME).required(), ParamSpec::body("spam", BOOLEAN)],
	),
	endpoint!(
		"friend",
		Post "/r/{subreddit}/api/friend",
		ModOthers,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("name", NON_EMPTY).required(),
			ParamSpec::body(
				"type",
				ParamKind::Choice(&[
					"moderator",
					"moderator_invite",
					"contributor",
					"banned",
					"muted",
					"wikibanned",
					"wikicontributor",
				]),
			)
			.required(),
			ParamSpec::body("note", ParamKind::text_max(300)),
			ParamSpec::body("duration", ParamKind::range(1, 999)),
			ParamSpec::body("ban_reason", REASON),
			ParamSpec::body("ban_message", TEXT),
		],
		fixed = JSON,
	),
	endpoint!(
		"unfriend",
		Post "/r/{subreddit}/api/unfriend",
		ModOthers,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("name", NON_EMPTY).required(),
			ParamSpec::body("type", NON_EMPTY).required(),
		],
		fixed = JSON,
	),
	endpoint!(
		"subreddit_stylesheet",
		Post "/r/{subreddit}/api/subreddit_stylesheet",
		ModConfig,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("op", ParamKind::Choice(&["save", "preview"])).required(),
			ParamSpec::body("stylesheet_contents", TEXT).required(),
			ParamSpec::body("reason", ParamKind::text_max(256)),
		],
		fixed = JSON,
	),
	// subreddits
	endpoint!("about", Get "/r/{subreddit}/about", Read, &[ParamSpec::path("subreddit")]),
	endpoint!("about_edit", Get "/r/{subreddit}/about/edit", ModConfig, &[ParamSpec::path("subreddit")]),
	endpoint!("about_rules", Get "/r/{subreddit}/about/rules", Read, &[ParamSpec::path("subreddit")]),
	endpoint!(
		"about_traffic",
		Get "/r/{subreddit}/about/traffic",
		ModTraffic,
		&[ParamSpec::path("subreddit")],
	),
	endpoint!(
		"about_stylesheet",
		Get "/r/{subreddit}/about/stylesheet",
		ModConfig,
		&[ParamSpec::path("subreddit")],
	),
	endpoint!("submit_text", Get "/r/{subreddit}/api/submit_text", Submit, &[ParamSpec::path("subreddit")]),
	endpoint!(
		"subscribe",
		Post "/api/subscribe",
		Subscribe,
		&[
			ParamSpec::body("action", ParamKind::Choice(&["sub", "unsub"])).required(),
			ParamSpec::body("sr", FULLNAMES),
			ParamSpec::body("sr_name", NON_EMPTY),
			ParamSpec::body("skip_initial_defaults", BOOLEAN),
		],
	),
	endpoint!(
		"search_reddit_names",
		Post "/api/search_reddit_names",
		Read,
		&[
			ParamSpec::body("query", ParamKind::Text { min: 1, max: 50 }).required(),
			ParamSpec::body("exact", BOOLEAN),
			ParamSpec::body("include_over_18", BOOLEAN),
		],
	),
	endpoint!(
		"search",
		Get "/r/{subreddit}/search",
		Read,
		listing![
			ParamSpec::path("subreddit"),
			ParamSpec::query("q", ParamKind::Text { min: 1, max: 512 }).required(),
			ParamSpec::query("restrict_sr", BOOLEAN),
			ParamSpec::query(
				"sort",
				ParamKind::Choice(&["relevance", "hot", "top", "new", "comments"]),
			),
			ParamSpec::query("t", TIME),
			ParamSpec::query("type", NON_EMPTY),
		],
	),
	endpoint!(
		"subreddits_mine",
		Get "/subreddits/mine/{where}",
		MySubreddits,
		listing![ParamSpec {
			kind: ParamKind::Choice(&["subscriber", "contributor", "moderator", "streams"]),
			..ParamSpec::path("where")
		}],
	),
	endpoint!(
		"subreddits",
		Get "/subreddits/{where}",
		Read,
		listing![ParamSpec {
			kind: ParamKind::Choice(&["popular", "new", "gold", "default"]),
			..ParamSpec::path("where")
		}],
	),
	endpoint!(
		"delete_sr_img",
		Post "/r/{subreddit}/api/delete_sr_img",
		ModConfig,
		&[ParamSpec::path("subreddit"), ParamSpec::body("img_name", NON_EMPTY).required()],
		fixed = JSON,
	),
	endpoint!(
		"delete_sr_header",
		Post "/r/{subreddit}/api/delete_sr_header",
		ModConfig,
		&[ParamSpec::path("subreddit")],
		fixed = JSON,
	),
	endpoint!(
		"delete_sr_icon",
		Post "/r/{subreddit}/api/delete_sr_icon",
		ModConfig,
		&[ParamSpec::path("subreddit")],
		fixed = JSON,
	),
	endpoint!(
		"delete_sr_banner",
		Post "/r/{subreddit}/api/delete_sr_banner",
		ModConfig,
		&[ParamSpec::path("subreddit")],
		fixed = JSON,
	),
	// users
	endpoint!("user_about", Get "/user/{username}/about", Read, &[ParamSpec::path("username")]),
	endpoint!(
		"user_history",
		Get "/user/{username}/{where}",
		History,
		listing![
			ParamSpec::path("username"),
			ParamSpec {
				kind: ParamKind::Choice(&[
					"overview",
					"submitted",
					"comments",
					"upvoted",
					"downvoted",
					"hidden",
					"saved",
					"gilded",
				]),
				..ParamSpec::path("where")
			},
			ParamSpec::query("sort", ParamKind::Choice(&["hot", "new", "top", "controversial"])),
			ParamSpec::query("t", TIME),
			ParamSpec::query("type", ParamKind::Choice(&["links", "comments"])),
		],
	),
	endpoint!(
		"username_available",
		Get "/api/username_available",
		Read,
		&[ParamSpec::query("user", NON_EMPTY).required()],
	),
	// wiki
	endpoint!(
		"wiki_page",
		Get "/r/{subreddit}/wiki/{page}",
		WikiRead,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::path("page"),
			ParamSpec::query("v", NON_EMPTY),
			ParamSpec::query("v2", NON_EMPTY),
		],
	),
	endpoint!("wiki_pages", Get "/r/{subreddit}/wiki/pages", WikiRead, &[ParamSpec::path("subreddit")]),
	endpoint!(
		"wiki_revisions",
		Get "/r/{subreddit}/wiki/revisions",
		WikiRead,
		listing![ParamSpec::path("subreddit")],
	),
	endpoint!(
		"wiki_page_revisions",
		Get "/r/{subreddit}/wiki/revisions/{page}",
		WikiRead,
		listing![ParamSpec::path("subreddit"), ParamSpec::path("page")],
	),
	endpoint!(
		"wiki_edit",
		Post "/r/{subreddit}/api/wiki/edit",
		WikiEdit,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("page", NON_EMPTY).required(),
			ParamSpec::body("content", TEXT).required(),
			ParamSpec::body("previous", NON_EMPTY),
			ParamSpec::body("reason", ParamKind::text_max(256)),
		],
	),
	endpoint!(
		"wiki_settings",
		Get "/r/{subreddit}/wiki/settings/{page}",
		ModWiki,
		&[ParamSpec::path("subreddit"), ParamSpec::path("page")],
	),
	endpoint!(
		"wiki_hide",
		Post "/r/{subreddit}/api/wiki/hide",
		ModWiki,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("page", NON_EMPTY).required(),
			ParamSpec::body("revision", NON_EMPTY).required(),
		],
	),
	endpoint!(
		"wiki_revert",
		Post "/r/{subreddit}/api/wiki/revert",
		ModWiki,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("page", NON_EMPTY).required(),
			ParamSpec::body("revision", NON_EMPTY).required(),
		],
	),
	endpoint!(
		"wiki_allow_editor",
		Post "/r/{subreddit}/api/wiki/alloweditor/{act}",
		ModWiki,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec { kind: ParamKind::Choice(&["add", "del"]), ..ParamSpec::path("act") },
			ParamSpec::body("page", NON_EMPTY).required(),
			ParamSpec::body("username", NON_EMPTY).required(),
		],
	),
	// images
	endpoint!(
		"upload_sr_img",
		Post "/r/{subreddit}/api/upload_sr_img",
		ModConfig,
		&[
			ParamSpec::path("subreddit"),
			ParamSpec::body("file", FILE).required(),
			ParamSpec::body("header", ParamKind::range(0, 1)),
			ParamSpec::body("img_type", ParamKind::Choice(&["png", "jpg"])).required(),
			ParamSpec::body("name", NON_EMPTY),
			ParamSpec::body(
				"upload_type",
				ParamKind::Choice(&["img", "header", "icon", "banner"]),
			)
			.required(),
		],
	),
];

/// Looks up an endpoint by catalog name.
pub fn find(name: &str) -> Option<&'static EndpointSpec> {
	CATALOG.iter().find(|endpoint| endpoint.name == name)
}
