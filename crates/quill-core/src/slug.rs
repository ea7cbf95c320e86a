//! Slug normalization and unique-slug assignment.
//!
//! Slugs are URL-safe, lowercase, hyphenated identifiers derived from a
//! title or tag name. Uniqueness within a table is enforced by probing the
//! store and appending `-1`, `-2`, ... until a free suffix is found. The
//! probe is sequential within one process; two concurrent writers racing on
//! the same candidate can still collide at the database's unique index.

use async_trait::async_trait;

use crate::error::RepoError;

/// Probe for slug collisions in the owning table. Implemented by the post
/// and tag repositories, each against its own slug column.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;
}

/// Normalize a human-readable string into a slug: ASCII alphanumerics are
/// lowercased, every other run of characters collapses to a single hyphen,
/// and leading/trailing hyphens are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Return `candidate` if unused, otherwise the first free of
/// `candidate-1`, `candidate-2`, ...
pub async fn unique_slug<L>(lookup: &L, candidate: &str) -> Result<String, RepoError>
where
    L: SlugLookup + ?Sized,
{
    let mut slug = candidate.to_owned();
    let mut counter = 1u32;

    while lookup.slug_exists(&slug).await? {
        slug = format!("{candidate}-{counter}");
        counter += 1;
    }

    Ok(slug)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct FixedSlugs(HashSet<&'static str>);

    #[async_trait]
    impl SlugLookup for FixedSlugs {
        async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
            Ok(self.0.contains(slug))
        }
    }

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Rust 2026: What's New?"), "rust-2026-what-s-new");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("café au lait"), "caf-au-lait");
        assert_eq!(slugify("!!!"), "");
    }

    #[tokio::test]
    async fn unique_slug_returns_candidate_when_free() {
        let taken = FixedSlugs(HashSet::new());
        assert_eq!(unique_slug(&taken, "my-post").await.unwrap(), "my-post");
    }

    #[tokio::test]
    async fn unique_slug_appends_first_free_suffix() {
        let taken = FixedSlugs(HashSet::from(["my-post"]));
        assert_eq!(unique_slug(&taken, "my-post").await.unwrap(), "my-post-1");

        let taken = FixedSlugs(HashSet::from(["my-post", "my-post-1", "my-post-2"]));
        assert_eq!(unique_slug(&taken, "my-post").await.unwrap(), "my-post-3");
    }
}
