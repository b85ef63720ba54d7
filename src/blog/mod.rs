//! Blog content.
//!
//! Posts come from a public JSON blob ([`JsonBinSource`]), are filtered and
//! paged client-side ([`BlogQuery`]) and addressed by `title-slug-<id>` URLs
//! ([`slug`]). The feed only opens once a wallet is connected ([`BlogFeed`]).

mod feed;
mod page;
mod post;
mod query;
pub mod slug;
mod source;

pub use feed::BlogFeed;
pub use page::{related_posts, resolve_post, PostLookup};
pub use post::{extract_posts, Author, Post};
pub use query::{format_category_name, BlogQuery, ALL_CATEGORIES, CATEGORIES, SEARCH_SUGGESTIONS};
pub use source::{load_posts, JsonBinSource, PostSource, StaticPostSource};
