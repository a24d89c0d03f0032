use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RoutePoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            name: None,
        }
    }

    pub fn named(lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            name: Some(name.into()),
        }
    }

    /// Linear interpolation on both axes independently (not geodesic).
    pub fn interpolate(&self, other: &Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
            name: None,
        }
    }
}

/// Ordinal flood hazard tag on a segment: `None < Low < Medium < High < Extreme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloodRisk {
    None,
    Low,
    Medium,
    High,
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadType {
    Highway,
    Major,
    Local,
    Bridge,
    Tunnel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub start_point: RoutePoint,
    pub end_point: RoutePoint,
    /// Meters.
    pub distance: u32,
    /// Seconds.
    pub duration: u32,
    pub flood_risk: FloodRisk,
    pub road_type: RoadType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<RoutePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Unique within one result set only.
    pub id: String,
    pub name: String,
    pub start_location: RoutePoint,
    pub end_location: RoutePoint,
    pub segments: Vec<RouteSegment>,
    /// Meters. Authoritative total; segments are illustrative and may not sum to it.
    pub total_distance: u32,
    /// Seconds.
    pub total_duration: u32,
    /// 0-100, higher is safer.
    pub safety_score: u8,
    pub safety_issues: Vec<SafetyIssue>,
}

/// A route endpoint as supplied by a client: either a free-text place
/// name or an already resolved point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationRef {
    Point(RoutePoint),
    Name(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteQuery {
    pub start: LocationRef,
    pub end: LocationRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

/// Display bucket for a 0-100 safety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Safe,
    Warning,
    Danger,
}

impl SafetyLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Safe,
            50.. => Self::Warning,
            _ => Self::Danger,
        }
    }
}

pub fn format_distance(meters: u32) -> String {
    if meters < 1000 {
        format!("{meters} m")
    } else {
        format!("{:.1} km", meters as f64 / 1000.0)
    }
}

pub fn format_duration(seconds: u32) -> String {
    let minutes = (f64::from(seconds) / 60.0).round() as u32;
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{} h {} min", minutes / 60, minutes % 60)
    }
}
