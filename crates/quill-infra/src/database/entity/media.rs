//! Media entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    pub url: Option<String>,
    pub file_name: String,
    pub file_type: String,
    pub upload_date: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for quill_core::domain::Media {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            url: model.url,
            file_name: model.file_name,
            file_type: model.file_type,
            upload_date: model.upload_date.into(),
            description: model.description,
        }
    }
}

impl From<quill_core::domain::Media> for ActiveModel {
    fn from(media: quill_core::domain::Media) -> Self {
        Self {
            id: Set(media.id),
            post_id: Set(media.post_id),
            url: Set(media.url),
            file_name: Set(media.file_name),
            file_type: Set(media.file_type),
            upload_date: Set(media.upload_date.into()),
            description: Set(media.description),
        }
    }
}
