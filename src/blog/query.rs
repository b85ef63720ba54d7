use super::Post;

/// Category id meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Categories offered in the sidebar, `(id, display name)`.
pub const CATEGORIES: &[(&str, &str)] = &[
    (ALL_CATEGORIES, "All Categories"),
    ("blockchain", "Blockchain"),
    ("defi", "DeFi"),
    ("smartcontracts", "Smart Contracts"),
    ("tutorials", "Tutorials"),
    ("nft", "NFT"),
    ("dao", "DAO"),
];

pub const SEARCH_SUGGESTIONS: &[&str] = &[
    "Blockchain fundamentals",
    "Smart contract development",
    "DeFi protocols",
    "NFT marketplace",
    "Web3 development",
    "Cryptocurrency trading",
    "DAO governance",
    "Ethereum tutorials",
    "Solidity programming",
    "MetaMask integration",
    "Decentralized applications",
    "Crypto security",
];

/// Display name for a category id; unknown ids are shown as is.
pub fn format_category_name(category: &str) -> &str {
    match category {
        "web3" => "Web3",
        "blockchain" => "Blockchain",
        "defi" => "DeFi",
        "smartcontracts" => "Smart Contracts",
        "tutorials" => "Tutorials",
        "nft" => "NFT",
        "dao" => "DAO",
        other => other,
    }
}

/// Category filter, search text and "load more" paging over a post list.
///
/// Changing the category or the search text starts over at page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogQuery {
    category: String,
    search: String,
    page: usize,
    per_page: usize,
}

impl Default for BlogQuery {
    fn default() -> Self {
        Self::new(6)
    }
}

impl BlogQuery {
    pub fn new(per_page: usize) -> Self {
        Self {
            category: ALL_CATEGORIES.to_owned(),
            search: String::new(),
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.page = 1;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 1;
    }

    pub fn load_more(&mut self) {
        self.page += 1;
    }

    /// Back to all categories, no search, first page.
    pub fn clear(&mut self) {
        self.category = ALL_CATEGORIES.to_owned();
        self.search.clear();
        self.page = 1;
    }

    /// Posts matching the category and the search text, in source order.
    ///
    /// Search is a case-insensitive substring match on title, excerpt and category.
    pub fn filtered<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let needle = self.search.to_lowercase();

        posts
            .iter()
            .filter(|post| self.category == ALL_CATEGORIES || post.category == self.category)
            .filter(|post| {
                needle.is_empty()
                    || post.title.to_lowercase().contains(&needle)
                    || post.excerpt.to_lowercase().contains(&needle)
                    || post.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// The first `per_page * page` filtered posts.
    pub fn visible<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let mut filtered = self.filtered(posts);
        filtered.truncate(self.shown());
        filtered
    }

    pub fn has_more(&self, posts: &[Post]) -> bool {
        self.filtered(posts).len() > self.shown()
    }

    fn shown(&self) -> usize {
        self.per_page.saturating_mul(self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::Author;

    fn post(id: u64, title: &str, excerpt: &str, category: &str) -> Post {
        Post {
            id,
            title: title.to_owned(),
            excerpt: excerpt.to_owned(),
            content: String::new(),
            category: category.to_owned(),
            date: "2025-01-01".to_owned(),
            read_time: "3 min read".to_owned(),
            image: String::new(),
            author: Author::default(),
            tags: Vec::new(),
        }
    }

    fn many_posts(n: u64) -> Vec<Post> {
        (1..=n)
            .map(|id| post(id, &format!("Post {id}"), "", if id % 2 == 0 { "defi" } else { "nft" }))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let query = BlogQuery::default();
        assert_eq!(query.category(), "all");
        assert_eq!(query.search(), "");
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_category_filter() {
        let posts = many_posts(10);
        let mut query = BlogQuery::default();
        query.set_category("defi");

        let filtered = query.filtered(&posts);
        assert_eq!(filtered.len(), 5);
        assert!(filtered.iter().all(|p| p.category == "defi"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let posts = vec![
            post(1, "Intro to Solidity", "", "tutorials"),
            post(2, "Yield farming", "Understanding SOLIDITY pitfalls", "defi"),
            post(3, "DAO voting", "", "dao"),
        ];
        let mut query = BlogQuery::default();
        query.set_search("solidity");

        let ids: Vec<u64> = query.filtered(&posts).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_search_matches_category() {
        let posts = vec![post(1, "Voting", "", "dao"), post(2, "Minting", "", "nft")];
        let mut query = BlogQuery::default();
        query.set_search("DA");

        assert_eq!(query.filtered(&posts).len(), 1);
    }

    #[test]
    fn test_search_and_category_combine() {
        let posts = vec![
            post(1, "DeFi basics", "", "defi"),
            post(2, "DeFi art", "", "nft"),
        ];
        let mut query = BlogQuery::default();
        query.set_category("nft");
        query.set_search("defi");

        let filtered = query.filtered(&posts);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_pagination() {
        let posts = many_posts(14);
        let mut query = BlogQuery::default();

        assert_eq!(query.visible(&posts).len(), 6);
        assert!(query.has_more(&posts));

        query.load_more();
        assert_eq!(query.visible(&posts).len(), 12);
        assert!(query.has_more(&posts));

        query.load_more();
        assert_eq!(query.visible(&posts).len(), 14);
        assert!(!query.has_more(&posts));
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut query = BlogQuery::default();
        query.load_more();
        query.load_more();

        query.set_search("nft");
        assert_eq!(query.page(), 1);

        query.load_more();
        query.set_category("dao");
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_clear() {
        let mut query = BlogQuery::default();
        query.set_category("dao");
        query.set_search("vote");
        query.load_more();

        query.clear();
        assert_eq!(query, BlogQuery::default());
    }

    #[test]
    fn test_empty_list() {
        let query = BlogQuery::default();
        assert!(query.visible(&[]).is_empty());
        assert!(!query.has_more(&[]));
    }

    #[test]
    fn test_format_category_name() {
        assert_eq!(format_category_name("smartcontracts"), "Smart Contracts");
        assert_eq!(format_category_name("web3"), "Web3");
        assert_eq!(format_category_name("gaming"), "gaming");
    }
}
