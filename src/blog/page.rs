use super::slug::{create_full_slug, extract_id_from_slug};
use super::Post;

/// Outcome of looking a post up by its URL slug.
#[derive(Debug, Clone, PartialEq)]
pub enum PostLookup<'a> {
    Found(&'a Post),
    /// The id matched but the title part is stale; send the visitor to the canonical slug.
    Redirect(String),
    NotFound,
}

/// Finds the post a slug points at.
pub fn resolve_post<'a>(posts: &'a [Post], slug: &str) -> PostLookup<'a> {
    let id = match extract_id_from_slug(slug) {
        Some(id) if id > 0 => id,
        _ => {
            log::debug!(target: "nolyx", "msg=\"no post id in slug\", slug=\"{slug}\"");
            return PostLookup::NotFound;
        }
    };

    let Some(post) = posts.iter().find(|post| post.id == id) else {
        log::debug!(target: "nolyx", "msg=\"post not found\", id={id}");
        return PostLookup::NotFound;
    };

    let canonical = create_full_slug(&post.title, post.id);
    if canonical != slug {
        return PostLookup::Redirect(canonical);
    }

    PostLookup::Found(post)
}

/// Up to `limit` other posts, same category first, then the rest in source order.
pub fn related_posts<'a>(posts: &'a [Post], post: &Post, limit: usize) -> Vec<&'a Post> {
    let others = || posts.iter().filter(move |p| p.id != post.id);

    let mut related: Vec<&Post> = others()
        .filter(|p| p.category == post.category)
        .take(limit)
        .collect();

    let missing = limit.saturating_sub(related.len());
    related.extend(
        others()
            .filter(|p| p.category != post.category)
            .take(missing),
    );

    related
}
