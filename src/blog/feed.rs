use super::{load_posts, BlogQuery, Post, PostSource};

/// The blog page's content state.
///
/// Posts are fetched the first time a wallet is seen connected. Disconnecting
/// locks the feed again; reconnecting fetches afresh.
pub struct BlogFeed<S> {
    source: S,
    posts: Vec<Post>,
    loaded: bool,
    unlocked: bool,
    query: BlogQuery,
}

impl<S: PostSource> BlogFeed<S> {
    pub fn new(source: S, per_page: usize) -> Self {
        Self {
            source,
            posts: Vec::new(),
            loaded: false,
            unlocked: false,
            query: BlogQuery::new(per_page),
        }
    }

    /// Applies the current wallet connection state.
    pub async fn sync_wallet(&mut self, connected: bool) {
        self.unlocked = connected;

        if !connected {
            self.loaded = false;
            return;
        }

        if !self.loaded {
            self.loaded = true;
            self.posts = load_posts(&self.source).await;
        }
    }

    /// True while the "wallet required" screen should be shown.
    pub fn is_locked(&self) -> bool {
        !self.unlocked
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn query(&self) -> &BlogQuery {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut BlogQuery {
        &mut self.query
    }

    /// Posts to render right now. Empty while locked.
    pub fn visible(&self) -> Vec<&Post> {
        if self.is_locked() {
            return Vec::new();
        }
        self.query.visible(&self.posts)
    }

    pub fn has_more(&self) -> bool {
        !self.is_locked() && self.query.has_more(&self.posts)
    }
}
