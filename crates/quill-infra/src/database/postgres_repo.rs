//! PostgreSQL repository implementations.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, JoinType, LoaderTrait, ModelTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use quill_core::domain::{
    Category, CommentWithAuthor, Media, PostDetail, PostStatus, PostSummary, Tag, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    CategoryRepository, CommentRepository, MediaRepository, Page, PostRepository, TagRepository,
    UserRepository,
};
use quill_core::slug::SlugLookup;

use super::entity::{
    category, comment, media, post, post_category, post_tag, role, tag, user, user_role,
};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<user::Entity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<post::Entity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<category::Entity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<tag::Entity>;

/// PostgreSQL media repository.
pub type PostgresMediaRepository = PostgresBaseRepository<media::Entity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<comment::Entity>;

fn qerr(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask the local part so addresses never land in logs verbatim
        let masked = match email.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("***@{domain}"),
            },
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(qerr)?;

        Ok(result.map(Into::into))
    }

    async fn roles_of(&self, user_id: Uuid) -> Result<Vec<String>, RepoError> {
        let roles = role::Entity::find()
            .join(JoinType::InnerJoin, role::Relation::UserRoles.def())
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(qerr)?;

        Ok(roles.into_iter().map(|r| r.name).collect())
    }

    async fn assign_role(&self, user_id: Uuid, role_name: &str) -> Result<(), RepoError> {
        let role = role::Entity::find()
            .filter(role::Column::Name.eq(role_name))
            .one(&self.db)
            .await
            .map_err(qerr)?
            .ok_or(RepoError::NotFound)?;

        let link = user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role.id),
        };
        user_role::Entity::insert(link)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate") || err_str.contains("unique") {
                    RepoError::Constraint("Role already assigned".to_string())
                } else {
                    RepoError::Query(err_str)
                }
            })?;

        Ok(())
    }
}

impl PostgresPostRepository {
    /// Attach author names, categories and the lead media URL to a batch
    /// of post rows (the eager-load step of every listing).
    async fn hydrate(&self, models: Vec<post::Model>) -> Result<Vec<PostSummary>, RepoError> {
        let authors = models.load_one(user::Entity, &self.db).await.map_err(qerr)?;
        let categories = models
            .load_many_to_many(category::Entity, post_category::Entity, &self.db)
            .await
            .map_err(qerr)?;
        let media = models
            .load_many(media::Entity, &self.db)
            .await
            .map_err(qerr)?;

        Ok(models
            .into_iter()
            .zip(authors)
            .zip(categories)
            .zip(media)
            .map(|(((model, author), cats), media_rows)| PostSummary {
                post: model.into(),
                author_name: author.map(|u| u.name).unwrap_or_default(),
                categories: cats.into_iter().map(Category::from).collect(),
                media_url: media_rows.into_iter().find_map(|m| m.url),
            })
            .collect())
    }

    fn published() -> sea_orm::Select<post::Entity> {
        post::Entity::find()
            .filter(post::Column::Status.eq(PostStatus::Published.code()))
            .filter(post::Column::PublicationDate.is_not_null())
    }
}

#[async_trait]
impl SlugLookup for PostgresPostRepository {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .map_err(qerr)?;

        Ok(count > 0)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(
        &self,
        category_slug: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<PostSummary>, RepoError> {
        let mut query = Self::published().order_by_desc(post::Column::PublicationDate);

        if let Some(slug) = category_slug {
            query = query
                .join(JoinType::InnerJoin, post::Relation::PostCategories.def())
                .join(
                    JoinType::InnerJoin,
                    post_category::Relation::Category.def(),
                )
                .filter(category::Column::Slug.eq(slug));
        }

        let page = page.max(1);
        let paginator = query.paginate(&self.db, per_page);
        let totals = paginator.num_items_and_pages().await.map_err(qerr)?;
        let models = paginator.fetch_page(page - 1).await.map_err(qerr)?;
        let items = self.hydrate(models).await?;

        Ok(Page {
            items,
            page,
            per_page,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    async fn featured(&self) -> Result<Vec<PostSummary>, RepoError> {
        let models = Self::published()
            .filter(post::Column::Featured.eq(true))
            .order_by_desc(post::Column::PublicationDate)
            .all(&self.db)
            .await
            .map_err(qerr)?;

        self.hydrate(models).await
    }

    async fn popular(&self, limit: u64) -> Result<Vec<PostSummary>, RepoError> {
        let models = Self::published()
            .order_by_desc(post::Column::ViewsCount)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(qerr)?;

        self.hydrate(models).await
    }

    async fn random_published(&self, limit: u64) -> Result<Vec<PostSummary>, RepoError> {
        let models = Self::published()
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(qerr)?;

        self.hydrate(models).await
    }

    async fn detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError> {
        let Some(model) = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(qerr)?
        else {
            return Ok(None);
        };

        let author = model
            .find_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(qerr)?;
        let categories = model
            .find_related(category::Entity)
            .all(&self.db)
            .await
            .map_err(qerr)?;
        let tags = model
            .find_related(tag::Entity)
            .all(&self.db)
            .await
            .map_err(qerr)?;
        let media = model
            .find_related(media::Entity)
            .all(&self.db)
            .await
            .map_err(qerr)?;

        Ok(Some(PostDetail {
            post: model.into(),
            author_name: author.map(|u| u.name).unwrap_or_default(),
            categories: categories.into_iter().map(Category::from).collect(),
            tags: tags.into_iter().map(Tag::from).collect(),
            media: media.into_iter().map(Media::from).collect(),
        }))
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        let result = post::Entity::update_many()
            .col_expr(
                post::Column::ViewsCount,
                Expr::col(post::Column::ViewsCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(qerr)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn category_ids_of(&self, post_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let rows = post_category::Entity::find()
            .filter(post_category::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(qerr)?;

        Ok(rows.into_iter().map(|r| r.category_id).collect())
    }

    async fn tag_names_of(&self, post_id: Uuid) -> Result<Vec<String>, RepoError> {
        let tags = tag::Entity::find()
            .join(JoinType::InnerJoin, tag::Relation::PostTags.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(qerr)?;

        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    async fn sync_categories(&self, post_id: Uuid, category_ids: &[Uuid]) -> Result<(), RepoError> {
        post_category::Entity::delete_many()
            .filter(post_category::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(qerr)?;

        let unique: BTreeSet<Uuid> = category_ids.iter().copied().collect();
        if !unique.is_empty() {
            let rows = unique.into_iter().map(|cid| post_category::ActiveModel {
                post_id: Set(post_id),
                category_id: Set(cid),
            });
            post_category::Entity::insert_many(rows)
                .exec_without_returning(&self.db)
                .await
                .map_err(qerr)?;
        }

        Ok(())
    }

    async fn sync_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError> {
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(qerr)?;

        let unique: BTreeSet<Uuid> = tag_ids.iter().copied().collect();
        if !unique.is_empty() {
            let rows = unique.into_iter().map(|tid| post_tag::ActiveModel {
                post_id: Set(post_id),
                tag_id: Set(tid),
            });
            post_tag::Entity::insert_many(rows)
                .exec_without_returning(&self.db)
                .await
                .map_err(qerr)?;
        }

        Ok(())
    }

    async fn delete_cascading(&self, id: Uuid) -> Result<(), RepoError> {
        // Children first so no orphaned foreign keys remain
        comment::Entity::delete_many()
            .filter(comment::Column::PostId.eq(id))
            .exec(&self.db)
            .await
            .map_err(qerr)?;
        media::Entity::delete_many()
            .filter(media::Column::PostId.eq(id))
            .exec(&self.db)
            .await
            .map_err(qerr)?;
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&self.db)
            .await
            .map_err(qerr)?;
        post_category::Entity::delete_many()
            .filter(post_category::Column::PostId.eq(id))
            .exec(&self.db)
            .await
            .map_err(qerr)?;

        let result = post::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(qerr)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn all(&self) -> Result<Vec<Category>, RepoError> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(qerr)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = category::Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(qerr)?;

        Ok(result.map(Into::into))
    }

    async fn all_exist(&self, ids: &[Uuid]) -> Result<bool, RepoError> {
        let unique: BTreeSet<Uuid> = ids.iter().copied().collect();
        if unique.is_empty() {
            return Ok(true);
        }

        let count = category::Entity::find()
            .filter(category::Column::Id.is_in(unique.iter().copied()))
            .count(&self.db)
            .await
            .map_err(qerr)?;

        Ok(count == unique.len() as u64)
    }
}

#[async_trait]
impl SlugLookup for PostgresTagRepository {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = tag::Entity::find()
            .filter(tag::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .map_err(qerr)?;

        Ok(count > 0)
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let result = tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(qerr)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let rows = comment::Entity::find()
            .find_also_related(user::Entity)
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(qerr)?;

        Ok(rows
            .into_iter()
            .map(|(model, commenter)| CommentWithAuthor {
                comment: model.into(),
                author_name: commenter.map(|u| u.name).unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl MediaRepository for PostgresMediaRepository {
    async fn first_for_post(&self, post_id: Uuid) -> Result<Option<Media>, RepoError> {
        let result = media::Entity::find()
            .filter(media::Column::PostId.eq(post_id))
            .order_by_asc(media::Column::UploadDate)
            .one(&self.db)
            .await
            .map_err(qerr)?;

        Ok(result.map(Into::into))
    }
}
