// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::engagement::{Engagement, IcpFit};
use crate::domain::models::post::Post;
use crate::domain::services::engagement_stats::{
    AggregatedEngager, EngagerSummary, PostDetailStats, PostSummaryStats,
};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use uuid::Uuid;

/// 帖子
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: Uuid,
    pub url: String,
    pub author_name: String,
    pub author_headline: String,
    pub content: String,
    pub total_reactions: i32,
    pub posted_at: Option<DateTime<FixedOffset>>,
    pub last_scraped_at: Option<DateTime<FixedOffset>>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            url: post.url,
            author_name: post.author_name,
            author_headline: post.author_headline,
            content: post.content,
            total_reactions: post.total_reactions,
            posted_at: post.posted_at,
            last_scraped_at: post.last_scraped_at,
            created_at: post.created_at,
        }
    }
}

/// 互动
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementDto {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub profile_url: String,
    pub headline: String,
    pub profile_image_url: String,
    pub reaction_type: String,
    pub icp_score: Option<i32>,
    pub icp_fit: Option<IcpFit>,
    pub contacted: bool,
    pub created_at: DateTime<FixedOffset>,
}

impl From<Engagement> for EngagementDto {
    fn from(e: Engagement) -> Self {
        Self {
            id: e.id,
            post_id: e.post_id,
            name: e.name,
            profile_url: e.profile_url,
            headline: e.headline,
            profile_image_url: e.profile_image_url,
            reaction_type: e.reaction_type,
            icp_score: e.icp_score,
            icp_fit: e.icp_fit,
            contacted: e.contacted,
            created_at: e.created_at,
        }
    }
}

/// 列表中的帖子及统计
#[derive(Debug, Serialize)]
pub struct PostWithStatsDto {
    #[serde(flatten)]
    pub post: PostDto,
    pub stats: PostSummaryStats,
}

#[derive(Debug, Serialize)]
pub struct PostListResponseDto {
    pub posts: Vec<PostWithStatsDto>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponseDto {
    pub post: PostDto,
    pub engagements: Vec<EngagementDto>,
    pub stats: PostDetailStats,
}

#[derive(Debug, Serialize)]
pub struct EngagersResponseDto {
    pub engagers: Vec<AggregatedEngager>,
    pub summary: EngagerSummary,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponseDto {
    pub success: bool,
}

impl SuccessResponseDto {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
