// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 作者信息缺失时使用的占位名称
pub const DEFAULT_AUTHOR_NAME: &str = "LinkedIn User";

/// 帖子实体
///
/// 每个源URL至多对应一条帖子记录，由首个完成的抓取作业惰性创建。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// 源URL（唯一）
    pub url: String,
    /// 首次解析该URL的用户
    pub user_id: Uuid,
    pub author_name: String,
    pub author_headline: String,
    pub content: String,
    /// 聚合的反应总数
    pub total_reactions: i32,
    pub posted_at: Option<DateTime<FixedOffset>>,
    pub last_scraped_at: Option<DateTime<FixedOffset>>,
    pub is_active: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Post {
    /// 根据抓取结果创建帖子
    ///
    /// 抓取 Actor 不返回作者元数据，因此作者字段使用占位值
    pub fn from_scrape(url: String, user_id: Uuid, total_reactions: i32) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            url,
            user_id,
            author_name: DEFAULT_AUTHOR_NAME.to_string(),
            author_headline: String::new(),
            content: String::new(),
            total_reactions,
            posted_at: Some(now),
            last_scraped_at: Some(now),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
