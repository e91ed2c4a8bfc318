// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "engagements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub profile_url: String,
    pub headline: String,
    pub profile_image_url: String,
    pub reaction_type: String,
    pub icp_score: Option<i32>,
    pub icp_fit: Option<String>,
    pub contacted: bool,
    pub hidden: bool,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::scrape_job::Entity",
        from = "Column::JobId",
        to = "super::scrape_job::Column::Id",
        on_delete = "Cascade"
    )]
    ScrapeJob,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::scrape_job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScrapeJob.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
