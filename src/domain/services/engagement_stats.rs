// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::engagement::{Engagement, IcpFit};
use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// "新增"互动的统计窗口
pub const RECENT_WINDOW_HOURS: i64 = 24;
/// 帖子列表中每条帖子展示的高分互动者数量
pub const LIST_TOP_ENGAGERS: usize = 3;
/// 帖子详情中展示的高分互动者数量
pub const DETAIL_TOP_ENGAGERS: usize = 5;

/// ICP 分数最高的互动者
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEngager {
    pub id: Uuid,
    pub name: String,
    pub profile_image_url: String,
    pub icp_score: i32,
}

/// 高 ICP 匹配占比，四舍五入到整数百分比；没有互动时为 0
pub fn icp_match_percentage(engagements: &[Engagement]) -> u32 {
    if engagements.is_empty() {
        return 0;
    }
    let high = count_fit(engagements, IcpFit::High);
    ((high as f64 / engagements.len() as f64) * 100.0).round() as u32
}

/// 按 ICP 分数降序取前 n 个，未评分的互动不参与
pub fn top_icp_engagers(engagements: &[Engagement], n: usize) -> Vec<TopEngager> {
    let mut scored: Vec<(&Engagement, i32)> = engagements
        .iter()
        .filter_map(|e| e.icp_score.map(|score| (e, score)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(n)
        .map(|(e, score)| TopEngager {
            id: e.id,
            name: e.name.clone(),
            profile_image_url: e.profile_image_url.clone(),
            icp_score: score,
        })
        .collect()
}

fn count_fit(engagements: &[Engagement], fit: IcpFit) -> usize {
    engagements.iter().filter(|e| e.icp_fit == Some(fit)).count()
}

fn count_since(engagements: &[Engagement], now: DateTime<FixedOffset>) -> usize {
    let since = now - Duration::hours(RECENT_WINDOW_HOURS);
    engagements.iter().filter(|e| e.created_at >= since).count()
}

/// 帖子列表中的统计
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryStats {
    pub total_engagements: usize,
    pub icp_match_percentage: u32,
    pub new_count: usize,
    pub top_icp_engagers: Vec<TopEngager>,
}

impl PostSummaryStats {
    /// `engagements` 应只包含未隐藏的互动
    pub fn compute(engagements: &[Engagement], now: DateTime<FixedOffset>) -> Self {
        Self {
            total_engagements: engagements.len(),
            icp_match_percentage: icp_match_percentage(engagements),
            new_count: count_since(engagements, now),
            top_icp_engagers: top_icp_engagers(engagements, LIST_TOP_ENGAGERS),
        }
    }
}

/// 帖子详情中的统计
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailStats {
    pub total_engagements: usize,
    pub icp_match_percentage: u32,
    #[serde(rename = "highICPCount")]
    pub high_icp_count: usize,
    #[serde(rename = "mediumICPCount")]
    pub medium_icp_count: usize,
    #[serde(rename = "lowICPCount")]
    pub low_icp_count: usize,
    pub contacted_count: usize,
    pub top_icp_engagers: Vec<TopEngager>,
    pub recent_count: usize,
}

impl PostDetailStats {
    pub fn compute(engagements: &[Engagement], now: DateTime<FixedOffset>) -> Self {
        Self {
            total_engagements: engagements.len(),
            icp_match_percentage: icp_match_percentage(engagements),
            high_icp_count: count_fit(engagements, IcpFit::High),
            medium_icp_count: count_fit(engagements, IcpFit::Medium),
            low_icp_count: count_fit(engagements, IcpFit::Low),
            contacted_count: engagements.iter().filter(|e| e.contacted).count(),
            top_icp_engagers: top_icp_engagers(engagements, DETAIL_TOP_ENGAGERS),
            recent_count: count_since(engagements, now),
        }
    }
}

/// 互动列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct EngagementFilter {
    /// 姓名或头衔的子串，不区分大小写
    pub search: Option<String>,
    /// 只保留指定 ICP 匹配度
    pub icp: Option<IcpFit>,
}

impl EngagementFilter {
    pub fn matches(&self, engagement: &Engagement) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                engagement.name.to_lowercase().contains(&query)
                    || engagement.headline.to_lowercase().contains(&query)
            }
        };
        let matches_icp = self.icp.map_or(true, |fit| engagement.icp_fit == Some(fit));
        matches_search && matches_icp
    }

    pub fn apply(&self, engagements: Vec<Engagement>) -> Vec<Engagement> {
        engagements.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// 跨帖子聚合后的互动者
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedEngager {
    /// 首次出现的互动ID
    pub id: Uuid,
    pub name: String,
    pub profile_url: String,
    pub profile_image_url: String,
    pub headline: String,
    pub icp_score: Option<i32>,
    pub icp_fit: Option<IcpFit>,
    pub total_engagements: u32,
    pub reaction_types: Vec<String>,
    pub last_engaged: DateTime<FixedOffset>,
}

/// 聚合视图的汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagerSummary {
    pub total_engagers: usize,
    pub icp_matches: usize,
    pub repeat_engagers: usize,
}

impl EngagerSummary {
    pub fn compute(engagers: &[AggregatedEngager]) -> Self {
        Self {
            total_engagers: engagers.len(),
            icp_matches: engagers
                .iter()
                .filter(|e| e.icp_fit == Some(IcpFit::High))
                .count(),
            repeat_engagers: engagers.iter().filter(|e| e.total_engagements > 1).count(),
        }
    }
}

fn engager_key(engagement: &Engagement) -> String {
    if engagement.profile_url.is_empty() {
        format!("name:{}", engagement.name)
    } else {
        format!("url:{}", engagement.profile_url)
    }
}

/// 按互动者聚合，结果按互动次数降序
///
/// 互动者以主页URL识别，缺失时退回姓名。次数相同的保持首次出现顺序。
pub fn aggregate_engagers(engagements: &[Engagement]) -> Vec<AggregatedEngager> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut engagers: Vec<AggregatedEngager> = Vec::new();

    for engagement in engagements {
        let key = engager_key(engagement);
        match index.get(&key) {
            Some(&pos) => {
                let existing = &mut engagers[pos];
                existing.total_engagements += 1;
                if !existing.reaction_types.contains(&engagement.reaction_type) {
                    existing.reaction_types.push(engagement.reaction_type.clone());
                }
                if engagement.created_at > existing.last_engaged {
                    existing.last_engaged = engagement.created_at;
                }
                if engagement.icp_score > existing.icp_score {
                    existing.icp_score = engagement.icp_score;
                    existing.icp_fit = engagement.icp_fit.or(existing.icp_fit);
                } else if existing.icp_fit.is_none() {
                    existing.icp_fit = engagement.icp_fit;
                }
            }
            None => {
                index.insert(key, engagers.len());
                engagers.push(AggregatedEngager {
                    id: engagement.id,
                    name: engagement.name.clone(),
                    profile_url: engagement.profile_url.clone(),
                    profile_image_url: engagement.profile_image_url.clone(),
                    headline: engagement.headline.clone(),
                    icp_score: engagement.icp_score,
                    icp_fit: engagement.icp_fit,
                    total_engagements: 1,
                    reaction_types: vec![engagement.reaction_type.clone()],
                    last_engaged: engagement.created_at,
                });
            }
        }
    }

    engagers.sort_by(|a, b| b.total_engagements.cmp(&a.total_engagements));
    engagers
}
