//! Business-intelligence assemblers: volume trends, leader rankings, market
//! alerts, KPIs, scorecards, and the leader performance grid.

use chrono::{DateTime, Utc};
use globalview_core::format::{days_since, percent_change, round1};
use globalview_core::normalize::{
    classify_severity, compose_market, map_consistency, map_intervention_status,
    map_leader_status, normalize_count, partition_legs, role_label, UNKNOWN,
};
use globalview_core::views::{
    BiLeaderScorecard, DailyClosure, HighGrowthLeader, KpiData, KpiSet, LeaderPerformanceDetail,
    LeaderPerformanceGrid, LeaderPerformanceRow, LegStrength, LegSummary, MarketIntervention,
    Page, StagnatingLeader, TopLeader, TopPerformer, TopRegion, TrendDirection,
    VolumeTrendOverview, VolumeTrendPoint,
};
use serde_json::Value;

use crate::client::GlobalviewClient;
use crate::error::ClientError;
use crate::query::{into_page, ListQuery, QueryParams};
use crate::types::{
    list_from, object_from, unwrap_key, value_as_f64, RawDailyClosure, RawKpi, RawLeader,
    RawMarket, RawVolumePoint,
};

/// Granularity of a volume-trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl TrendPeriod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TrendPeriod::Daily => "daily",
            TrendPeriod::Weekly => "weekly",
            TrendPeriod::Monthly => "monthly",
        }
    }
}

fn bi(endpoint: &str) -> [&str; 3] {
    ["globalview", "bi", endpoint]
}

impl GlobalviewClient {
    /// Fetches one volume-trend series.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_volume_trends(
        &self,
        query: &ListQuery,
        period: TrendPeriod,
    ) -> Result<Vec<VolumeTrendPoint>, ClientError> {
        let mut params = query.to_params();
        params.push("period", period.as_str());
        let body = self.get_json(&bi("volume-trends"), &params).await?;
        Ok(map_volume_trend(list_from(&body, "trends")))
    }

    /// Fetches the daily, weekly, and monthly series in parallel.
    ///
    /// # Errors
    ///
    /// Fails if any of the three calls fails.
    pub async fn get_volume_trend_overview(
        &self,
        query: &ListQuery,
    ) -> Result<VolumeTrendOverview, ClientError> {
        let (daily, weekly, monthly) = tokio::try_join!(
            self.get_volume_trends(query, TrendPeriod::Daily),
            self.get_volume_trends(query, TrendPeriod::Weekly),
            self.get_volume_trends(query, TrendPeriod::Monthly),
        )?;
        Ok(VolumeTrendOverview {
            daily,
            weekly,
            monthly,
        })
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_top_leaders(&self, query: &ListQuery) -> Result<Vec<TopLeader>, ClientError> {
        let body = self.get_json(&bi("top-leaders"), &query.to_params()).await?;
        Ok(list_from::<RawLeader>(&body, "leaders")
            .iter()
            .map(map_top_leader)
            .collect())
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_stagnating_leaders(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<StagnatingLeader>, ClientError> {
        let body = self
            .get_json(&bi("stagnating-leaders"), &query.to_params())
            .await?;
        let now = Utc::now();
        Ok(list_from::<RawLeader>(&body, "leaders")
            .iter()
            .map(|raw| map_stagnating_leader(raw, now))
            .collect())
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_markets_needing_intervention(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<MarketIntervention>, ClientError> {
        let body = self
            .get_json(&bi("markets-needing-intervention"), &query.to_params())
            .await?;
        Ok(list_from::<RawMarket>(&body, "markets")
            .iter()
            .map(map_market_intervention)
            .collect())
    }

    /// Markets in decline, most severe first.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_weak_markets(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<MarketIntervention>, ClientError> {
        let body = self.get_json(&bi("weak-markets"), &query.to_params()).await?;
        let mut markets: Vec<MarketIntervention> = list_from::<RawMarket>(&body, "markets")
            .iter()
            .map(map_market_intervention)
            .collect();
        markets.sort_by(|a, b| b.severity.cmp(&a.severity));
        Ok(markets)
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_kpis(&self, query: &ListQuery) -> Result<KpiSet, ClientError> {
        let body = self.get_json(&bi("kpis"), &query.to_params()).await?;
        Ok(map_kpis(&body))
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_leader_scorecards(
        &self,
        query: &ListQuery,
    ) -> Result<Page<BiLeaderScorecard>, ClientError> {
        let body = self
            .get_json(&bi("leader-scorecards"), &query.to_params())
            .await?;
        let now = Utc::now();
        let items = list_from::<RawLeader>(&body, "leaders")
            .iter()
            .map(|raw| map_scorecard(raw, now))
            .collect();
        Ok(into_page(items, &body, query))
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_high_growth_leaders(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<HighGrowthLeader>, ClientError> {
        let body = self
            .get_json(&bi("high-growth-leaders"), &query.to_params())
            .await?;
        Ok(list_from::<RawLeader>(&body, "leaders")
            .iter()
            .map(map_high_growth_leader)
            .collect())
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_top_regions(&self, query: &ListQuery) -> Result<Vec<TopRegion>, ClientError> {
        let body = self.get_json(&bi("top-regions"), &query.to_params()).await?;
        Ok(list_from::<RawMarket>(&body, "regions")
            .iter()
            .map(map_top_region)
            .collect())
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_top_performers(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<TopPerformer>, ClientError> {
        let body = self
            .get_json(&bi("top-performers"), &query.to_params())
            .await?;
        Ok(list_from::<RawLeader>(&body, "performers")
            .iter()
            .enumerate()
            .map(|(idx, raw)| map_top_performer(raw, idx))
            .collect())
    }

    /// Closing figures for one day; `None` asks the server for today.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_daily_closure(&self, date: Option<&str>) -> Result<DailyClosure, ClientError> {
        let mut params = QueryParams::new();
        params.push_opt("date", date);
        let body = self.get_json(&bi("daily-closure"), &params).await?;
        let raw: RawDailyClosure = object_from(&body, "closure");
        Ok(map_daily_closure(&raw))
    }

    /// Paginated leader performance grid.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_leader_performance_grid(
        &self,
        query: &ListQuery,
    ) -> Result<LeaderPerformanceGrid, ClientError> {
        let body = self
            .get_json(&bi("leader-performance"), &query.to_params())
            .await?;
        Ok(map_performance_grid(&body, query))
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_leader_performance_detail(
        &self,
        leader_id: &str,
        query: &ListQuery,
    ) -> Result<LeaderPerformanceDetail, ClientError> {
        let body = self
            .get_json(
                &["globalview", "bi", "leader-performance", leader_id],
                &query.to_params(),
            )
            .await?;
        Ok(map_performance_detail(&body))
    }
}

// ---------------------------------------------------------------------------
// Mappers
// ---------------------------------------------------------------------------

fn leader_id(raw: &RawLeader) -> String {
    raw.resolved_id().unwrap_or_default().to_string()
}

fn leader_name(raw: &RawLeader) -> String {
    raw.resolved_name()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn leader_market(raw: &RawLeader) -> String {
    compose_market(
        raw.country.as_deref(),
        raw.region.as_deref(),
        raw.city.as_deref(),
    )
}

fn growth(raw: &RawLeader) -> f64 {
    round1(raw.growth_percent.unwrap_or(0.0))
}

/// `daysSinceLastContact` when sent, else derived from `lastContactAt`.
fn last_contact_days(raw: &RawLeader, now: DateTime<Utc>) -> Option<i64> {
    match raw.days_since_last_contact {
        Some(days) if days.is_finite() => {
            #[allow(clippy::cast_possible_truncation)]
            let days = days.round().max(0.0) as i64;
            Some(days)
        }
        _ => days_since(raw.last_contact_at.as_deref(), now),
    }
}

fn leg_strength(raw: &RawLeader) -> LegStrength {
    let legs = raw
        .legs
        .iter()
        .map(|leg| LegSummary {
            id: leg.resolved_id().unwrap_or_default().to_string(),
            name: leg.resolved_name().unwrap_or(UNKNOWN).to_string(),
            volume: leg.volume.unwrap_or(0.0),
        })
        .collect();
    partition_legs(raw.leg_threshold.unwrap_or(0.0), legs)
}

/// Top-leader row. Only country and city are kept; region is not shown.
#[must_use]
pub fn map_top_leader(raw: &RawLeader) -> TopLeader {
    TopLeader {
        id: leader_id(raw),
        name: leader_name(raw),
        country: raw.country.clone().unwrap_or_default(),
        city: raw.city.clone().unwrap_or_default(),
        business_volume: raw.business_volume.unwrap_or(0.0),
        growth_percent: growth(raw),
    }
}

#[must_use]
pub fn map_stagnating_leader(raw: &RawLeader, now: DateTime<Utc>) -> StagnatingLeader {
    StagnatingLeader {
        id: leader_id(raw),
        name: leader_name(raw),
        market: leader_market(raw),
        business_volume: raw.business_volume.unwrap_or(0.0),
        growth_percent: growth(raw),
        team_size: normalize_count(raw.team_size),
        days_since_last_contact: last_contact_days(raw, now),
    }
}

#[must_use]
pub fn map_high_growth_leader(raw: &RawLeader) -> HighGrowthLeader {
    let growth_percent = growth(raw);
    HighGrowthLeader {
        id: leader_id(raw),
        name: leader_name(raw),
        market: leader_market(raw),
        business_volume: raw.business_volume.unwrap_or(0.0),
        growth_percent,
        growth_trend: TrendDirection::from_change(growth_percent),
    }
}

/// Ranked performer; falls back to list position when no rank is sent.
#[must_use]
pub fn map_top_performer(raw: &RawLeader, position: usize) -> TopPerformer {
    let rank = raw.rank.map_or_else(
        || u32::try_from(position + 1).unwrap_or(u32::MAX),
        |r| normalize_count(Some(r)),
    );
    TopPerformer {
        rank,
        id: leader_id(raw),
        name: leader_name(raw),
        role: role_label(raw.role.as_deref(), UNKNOWN),
        market: leader_market(raw),
        business_volume: raw.business_volume.unwrap_or(0.0),
        growth_percent: growth(raw),
    }
}

#[must_use]
pub fn map_scorecard(raw: &RawLeader, now: DateTime<Utc>) -> BiLeaderScorecard {
    let growth_percent = growth(raw);
    BiLeaderScorecard {
        id: leader_id(raw),
        name: leader_name(raw),
        role: role_label(raw.role.as_deref(), UNKNOWN),
        country: raw.country.clone(),
        region: raw.region.clone(),
        city: raw.city.clone(),
        market: leader_market(raw),
        business_volume: raw.business_volume.unwrap_or(0.0),
        lifetime_volume: raw.lifetime_volume,
        growth_percent,
        growth_trend: TrendDirection::from_change(growth_percent),
        status: map_leader_status(raw.status.as_deref()),
        consistency: map_consistency(raw.consistency.as_deref()),
        team_size: normalize_count(raw.team_size),
        days_since_last_contact: last_contact_days(raw, now),
        leg_strength: leg_strength(raw),
    }
}

#[must_use]
pub fn map_market_intervention(raw: &RawMarket) -> MarketIntervention {
    let change_percent = raw.change_percent.unwrap_or(0.0);
    MarketIntervention {
        market: compose_market(
            raw.country.as_deref(),
            raw.region.as_deref(),
            raw.city.as_deref(),
        ),
        change_percent: round1(change_percent),
        severity: classify_severity(change_percent),
        reason: raw.reason.clone().unwrap_or_default(),
        status: map_intervention_status(raw.status.as_deref()),
    }
}

#[must_use]
pub fn map_top_region(raw: &RawMarket) -> TopRegion {
    TopRegion {
        market: compose_market(
            raw.country.as_deref(),
            raw.region.as_deref(),
            raw.city.as_deref(),
        ),
        business_volume: raw.business_volume.unwrap_or(0.0),
        leader_count: normalize_count(raw.leader_count),
        growth_percent: round1(raw.growth_percent.unwrap_or(0.0)),
    }
}

fn trend_from_label(label: &str) -> Option<TrendDirection> {
    match label.trim().to_ascii_lowercase().as_str() {
        "up" => Some(TrendDirection::Up),
        "down" => Some(TrendDirection::Down),
        "neutral" | "flat" => Some(TrendDirection::Neutral),
        _ => None,
    }
}

/// One KPI. Direction follows the sign of the percentage; a textual `trend`
/// only decides it when no percentage was sent.
#[must_use]
pub fn map_kpi(raw: &RawKpi) -> KpiData {
    let percent = raw.resolved_trend_percent();
    let trend_percent = round1(percent.unwrap_or(0.0));
    let trend = match percent {
        Some(_) => TrendDirection::from_change(trend_percent),
        None => raw
            .trend_label()
            .and_then(trend_from_label)
            .unwrap_or_default(),
    };
    KpiData {
        value: raw.value.unwrap_or(0.0),
        trend_percent,
        trend,
    }
}

/// Reads the seven named KPIs from `{"kpis": {...}}` or a flat object.
/// Missing KPIs are zero with a neutral trend.
#[must_use]
pub fn map_kpis(body: &Value) -> KpiSet {
    let source = unwrap_key(body, "kpis");
    let kpi = |key: &str| -> KpiData {
        let raw: RawKpi = match source.get(key) {
            Some(v) if value_as_f64(v).is_some() => RawKpi {
                value: value_as_f64(v),
                ..RawKpi::default()
            },
            Some(v) => object_from(v, key),
            None => RawKpi::default(),
        };
        map_kpi(&raw)
    };
    let [
        total_volume,
        active_leaders,
        new_leaders,
        average_growth,
        retention_rate,
        markets_covered,
        at_risk_leaders,
    ] = KpiSet::KEYS.map(kpi);
    KpiSet {
        total_volume,
        active_leaders,
        new_leaders,
        average_growth,
        retention_rate,
        markets_covered,
        at_risk_leaders,
    }
}

/// Adds period-over-period change to a series; the first point is `0`.
#[must_use]
pub fn map_volume_trend(points: Vec<RawVolumePoint>) -> Vec<VolumeTrendPoint> {
    let mut previous: Option<f64> = None;
    points
        .into_iter()
        .map(|point| {
            let volume = point.volume.unwrap_or(0.0);
            let change_percent = previous.map_or(0.0, |prev| percent_change(prev, volume));
            previous = Some(volume);
            VolumeTrendPoint {
                period: point.resolved_period().unwrap_or_default().to_string(),
                volume,
                change_percent,
            }
        })
        .collect()
}

#[must_use]
pub fn map_daily_closure(raw: &RawDailyClosure) -> DailyClosure {
    let volume_change_percent = round1(raw.volume_change_percent.unwrap_or(0.0));
    DailyClosure {
        date: raw.date.clone().unwrap_or_default(),
        total_volume: raw.total_volume.unwrap_or(0.0),
        order_count: u64::from(normalize_count(raw.order_count)),
        new_leaders: u64::from(normalize_count(raw.new_leaders)),
        volume_change_percent,
        trend: TrendDirection::from_change(volume_change_percent),
    }
}

#[must_use]
pub fn map_performance_row(raw: &RawLeader) -> LeaderPerformanceRow {
    LeaderPerformanceRow {
        id: leader_id(raw),
        name: leader_name(raw),
        role: role_label(raw.role.as_deref(), UNKNOWN),
        level: raw.level.map(|l| normalize_count(Some(l))),
        market: leader_market(raw),
        personal_volume: raw
            .personal_volume
            .or(raw.business_volume)
            .unwrap_or(0.0),
        team_volume: raw.team_volume.unwrap_or(0.0),
        growth_percent: growth(raw),
        status: map_leader_status(raw.status.as_deref()),
        team_size: normalize_count(raw.team_size),
    }
}

/// Grid rows never exceed the requested limit and the current page never
/// exceeds the page count.
#[must_use]
pub fn map_performance_grid(body: &Value, query: &ListQuery) -> LeaderPerformanceGrid {
    let rows = list_from::<RawLeader>(body, "leaders")
        .iter()
        .map(map_performance_row)
        .collect();
    let page = into_page(rows, body, query);
    LeaderPerformanceGrid {
        leaders: page.items,
        pagination: page.pagination,
    }
}

/// Reads `{"leader": {...}, "monthlyVolumes": [...]}`; the leader fields may
/// also sit at the top level.
#[must_use]
pub fn map_performance_detail(body: &Value) -> LeaderPerformanceDetail {
    let raw: RawLeader = object_from(body, "leader");
    LeaderPerformanceDetail {
        leader: map_performance_row(&raw),
        consistency: map_consistency(raw.consistency.as_deref()),
        monthly_volumes: map_volume_trend(list_from(body, "monthlyVolumes")),
        leg_strength: leg_strength(&raw),
    }
}

#[cfg(test)]
#[path = "bi_test.rs"]
mod tests;
