// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 姓名缺失时的占位值
pub const UNKNOWN_USER: &str = "Unknown User";
/// 反应类型缺失时的默认值
pub const DEFAULT_REACTION: &str = "like";

/// 互动实体
///
/// 一个外部账号在一条被跟踪帖子上的一次反应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engagement {
    pub id: Uuid,
    pub post_id: Uuid,
    pub job_id: Uuid,
    pub user_id: Uuid,
    /// 反应者姓名
    pub name: String,
    /// 反应者主页
    pub profile_url: String,
    pub headline: String,
    pub profile_image_url: String,
    /// 小写的反应类型，如 like / praise / empathy
    pub reaction_type: String,
    /// 外部计算的 ICP 分数
    pub icp_score: Option<i32>,
    /// 外部计算的 ICP 匹配度
    pub icp_fit: Option<IcpFit>,
    pub contacted: bool,
    /// 隐藏的互动不出现在默认列表中
    pub hidden: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// ICP 匹配度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IcpFit {
    High,
    Medium,
    Low,
}

impl fmt::Display for IcpFit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IcpFit::High => write!(f, "high"),
            IcpFit::Medium => write!(f, "medium"),
            IcpFit::Low => write!(f, "low"),
        }
    }
}

impl FromStr for IcpFit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(IcpFit::High),
            "medium" => Ok(IcpFit::Medium),
            "low" => Ok(IcpFit::Low),
            _ => Err(()),
        }
    }
}

/// Actor 数据集中的一条原始反应记录
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReactionRecord {
    #[serde(default)]
    pub reactor: Option<Reactor>,
    #[serde(default)]
    pub reaction_type: Option<String>,
}

/// 反应者信息
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Reactor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub profile_pictures: Option<ProfilePictures>,
}

/// 不同尺寸的头像地址
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfilePictures {
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
}

impl Engagement {
    /// 将原始记录映射为互动行
    ///
    /// 缺失的字段使用空字符串，姓名缺失时使用 "Unknown User"，
    /// 头像优先取 large 尺寸，其次 medium。
    pub fn from_record(record: &ReactionRecord, post_id: Uuid, job_id: Uuid, user_id: Uuid) -> Self {
        let reactor = record.reactor.clone().unwrap_or_default();
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        let profile_image_url = reactor
            .profile_pictures
            .and_then(|pics| non_empty(pics.large).or(non_empty(pics.medium)))
            .unwrap_or_default();

        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            post_id,
            job_id,
            user_id,
            name: non_empty(reactor.name).unwrap_or_else(|| UNKNOWN_USER.to_string()),
            profile_url: reactor.profile_url.unwrap_or_default(),
            headline: reactor.headline.unwrap_or_default(),
            profile_image_url,
            reaction_type: non_empty(record.reaction_type.clone())
                .map(|r| r.to_lowercase())
                .unwrap_or_else(|| DEFAULT_REACTION.to_string()),
            icp_score: None,
            icp_fit: None,
            contacted: false,
            hidden: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// 标记为已联系，并从默认列表中隐藏
    pub fn mark_contacted(&mut self) {
        self.contacted = true;
        self.hidden = true;
        self.updated_at = Utc::now().into();
    }
}
