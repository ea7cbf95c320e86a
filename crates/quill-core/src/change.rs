//! Post-update change detection.
//!
//! The update flow compares the stored post (plus its current category and
//! tag sets) against the validated incoming field set and persists only
//! what actually differs. A submission that changes nothing must issue no
//! write at all.

use uuid::Uuid;

use crate::domain::Post;
use crate::image::ImagePolicy;

/// The validated incoming field set of an update request.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category_ids: Vec<Uuid>,
    pub tag_names: Vec<String>,
}

impl PostUpdate {
    /// Incoming content with an absent body normalized to empty.
    pub fn content_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Which mutable fields of a post differ from the stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostChanges {
    pub title: bool,
    pub content: bool,
    /// True only when the image URL differs AND the new URL passes the
    /// image policy. An invalid replacement leaves the stored value
    /// untouched without failing the update.
    pub image: bool,
    pub categories: bool,
    pub tags: bool,
}

impl PostChanges {
    /// Compare stored state against the incoming field set.
    ///
    /// `current_categories` and `current_tags` are the post's persisted
    /// association sets; both comparisons are order-independent.
    pub fn detect(
        post: &Post,
        current_categories: &[Uuid],
        current_tags: &[String],
        incoming: &PostUpdate,
        policy: &ImagePolicy,
    ) -> Self {
        let title = post.title != incoming.title;
        let content = post.content != incoming.content_or_empty();

        let stored_image = post.featured_image_url.as_deref().unwrap_or("");
        let incoming_image = incoming.image.as_deref().unwrap_or("");
        let image = stored_image != incoming_image && policy.is_valid(incoming.image.as_deref());

        let categories = !same_set(current_categories, &incoming.category_ids);
        let tags = !same_set(current_tags, &incoming.tag_names);

        Self {
            title,
            content,
            image,
            categories,
            tags,
        }
    }

    /// Whether any write has to happen at all.
    pub fn any(&self) -> bool {
        self.title || self.content || self.image || self.categories || self.tags
    }
}

fn same_set<T: Ord + Clone>(current: &[T], incoming: &[T]) -> bool {
    let mut a = current.to_vec();
    let mut b = incoming.to_vec();
    a.sort();
    a.dedup();
    b.sort();
    b.dedup();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostStatus;

    fn stored_post() -> Post {
        let mut post = Post::new(
            Uuid::new_v4(),
            "Original title".to_owned(),
            "original-title".to_owned(),
            "original content".to_owned(),
        );
        post.status = PostStatus::Published;
        post.featured_image_url = Some("https://example.com/old.jpg".to_owned());
        post
    }

    fn unchanged_update(post: &Post, categories: &[Uuid], tags: &[String]) -> PostUpdate {
        PostUpdate {
            title: post.title.clone(),
            content: Some(post.content.clone()),
            image: post.featured_image_url.clone(),
            category_ids: categories.to_vec(),
            tag_names: tags.to_vec(),
        }
    }

    #[test]
    fn identical_submission_changes_nothing() {
        let post = stored_post();
        let categories = vec![Uuid::new_v4(), Uuid::new_v4()];
        let tags = vec!["rust".to_owned(), "web".to_owned()];
        let incoming = unchanged_update(&post, &categories, &tags);

        let changes =
            PostChanges::detect(&post, &categories, &tags, &incoming, &ImagePolicy::default());
        assert_eq!(changes, PostChanges::default());
        assert!(!changes.any());
    }

    #[test]
    fn reordered_associations_are_not_a_change() {
        let post = stored_post();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let tags = vec!["rust".to_owned(), "web".to_owned()];

        let mut incoming = unchanged_update(&post, &[b, a], &tags);
        incoming.tag_names = vec!["web".to_owned(), "rust".to_owned()];

        let changes =
            PostChanges::detect(&post, &[a, b], &tags, &incoming, &ImagePolicy::default());
        assert!(!changes.any());
    }

    #[test]
    fn title_and_content_changes_are_detected() {
        let post = stored_post();
        let mut incoming = unchanged_update(&post, &[], &[]);
        incoming.title = "New title".to_owned();
        incoming.content = Some("new content".to_owned());

        let changes = PostChanges::detect(&post, &[], &[], &incoming, &ImagePolicy::default());
        assert!(changes.title);
        assert!(changes.content);
        assert!(!changes.image);
    }

    #[test]
    fn invalid_replacement_image_is_ignored() {
        let post = stored_post();
        let mut incoming = unchanged_update(&post, &[], &[]);
        incoming.image = Some("https://example.com/not-an-image".to_owned());

        let changes = PostChanges::detect(&post, &[], &[], &incoming, &ImagePolicy::default());
        assert!(!changes.image);
        assert!(!changes.any());
    }

    #[test]
    fn valid_replacement_image_is_a_change() {
        let post = stored_post();
        let mut incoming = unchanged_update(&post, &[], &[]);
        incoming.image = Some("https://images.unsplash.com/photo-9".to_owned());

        let changes = PostChanges::detect(&post, &[], &[], &incoming, &ImagePolicy::default());
        assert!(changes.image);
    }

    #[test]
    fn clearing_the_image_is_a_change() {
        let post = stored_post();
        let mut incoming = unchanged_update(&post, &[], &[]);
        incoming.image = None;

        let changes = PostChanges::detect(&post, &[], &[], &incoming, &ImagePolicy::default());
        assert!(changes.image);
    }

    #[test]
    fn category_set_difference_is_detected() {
        let post = stored_post();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let incoming = unchanged_update(&post, &[a], &[]);

        let changes = PostChanges::detect(&post, &[a, b], &[], &incoming, &ImagePolicy::default());
        assert!(changes.categories);
        assert!(!changes.tags);
    }
}
