//! Mapping from domain types to response DTOs.

use quill_core::domain::{
    Category, Comment, CommentWithAuthor, Media, Post, PostDetail, PostStatus, PostSummary, Tag,
};
use quill_core::ports::Page;
use quill_shared::dto::{
    CategoryResponse, CommentResponse, MediaResponse, PageResponse, PostDetailResponse,
    PostResponse, PostSummaryResponse, TagResponse,
};

fn status_str(status: PostStatus) -> String {
    match status {
        PostStatus::Draft => "draft".to_owned(),
        PostStatus::Published => "published".to_owned(),
    }
}

pub fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.user_id,
        title: post.title,
        slug: post.slug,
        content: post.content,
        status: status_str(post.status),
        featured_image_url: post.featured_image_url,
        publication_date: post.publication_date,
        last_modified_date: post.last_modified_date,
        views_count: post.views_count,
        featured: post.featured,
    }
}

pub fn category_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name,
        slug: category.slug,
    }
}

pub fn tag_response(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id,
        name: tag.name,
        slug: tag.slug,
    }
}

pub fn media_response(media: Media) -> MediaResponse {
    MediaResponse {
        id: media.id,
        url: media.url,
        file_name: media.file_name,
        file_type: media.file_type,
        upload_date: media.upload_date,
        description: media.description,
    }
}

pub fn summary_response(summary: PostSummary) -> PostSummaryResponse {
    PostSummaryResponse {
        id: summary.post.id,
        title: summary.post.title,
        slug: summary.post.slug,
        content: summary.post.content,
        author_name: summary.author_name,
        publication_date: summary.post.publication_date,
        views_count: summary.post.views_count,
        featured: summary.post.featured,
        categories: summary.categories.into_iter().map(category_response).collect(),
        media_url: summary.media_url,
    }
}

pub fn detail_response(detail: PostDetail) -> PostDetailResponse {
    PostDetailResponse {
        post: post_response(detail.post),
        author_name: detail.author_name,
        categories: detail.categories.into_iter().map(category_response).collect(),
        tags: detail.tags.into_iter().map(tag_response).collect(),
        media: detail.media.into_iter().map(media_response).collect(),
    }
}

pub fn comment_response(entry: CommentWithAuthor) -> CommentResponse {
    let CommentWithAuthor {
        comment:
            Comment {
                id,
                post_id,
                content,
                created_at,
                ..
            },
        author_name,
    } = entry;

    CommentResponse {
        id,
        post_id,
        author_name,
        content,
        created_at,
    }
}

pub fn page_response<T, U>(page: Page<T>, map: impl Fn(T) -> U) -> PageResponse<U> {
    PageResponse {
        items: page.items.into_iter().map(map).collect(),
        page: page.page,
        per_page: page.per_page,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }
}
