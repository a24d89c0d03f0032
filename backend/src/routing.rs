use shared::{FloodRisk, RoadType, RoutePoint, RouteSegment};

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Assumed average road speed used for every duration estimate.
pub const AVERAGE_SPEED_KMH: f64 = 50.0;

/// Routes longer than this get five synthetic segments instead of three.
const LONG_ROUTE_THRESHOLD_M: u32 = 100_000;

/// Generation-time parameter selecting the segment-risk rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskProfile {
    Safe,
    Medium,
    Dangerous,
}

impl RiskProfile {
    /// Risk banding for externally supplied routes, keyed by their
    /// position in the result set.
    pub fn for_route_index(index: usize) -> Self {
        match index {
            0 => Self::Safe,
            1 => Self::Medium,
            _ => Self::Dangerous,
        }
    }
}

pub fn haversine_km(a: &RoutePoint, b: &RoutePoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Travel time in seconds at the fixed average speed.
pub fn travel_seconds(distance_m: u32) -> u32 {
    (f64::from(distance_m) / AVERAGE_SPEED_KMH * 3.6).round() as u32
}

/// Divide a route into equal-length segments along the straight line
/// between its endpoints and tag each one with a flood-risk level and
/// road type.
///
/// Segments are illustrative visualization data: their distances come
/// from an even split of `total_distance_m` and are not reconciled with
/// the route's reported totals. The final segment ends exactly at `end`
/// rather than at an interpolated approximation.
pub fn synthesize_segments(
    start: &RoutePoint,
    end: &RoutePoint,
    total_distance_m: u32,
    profile: RiskProfile,
) -> Vec<RouteSegment> {
    let count = if total_distance_m > LONG_ROUTE_THRESHOLD_M {
        5
    } else {
        3
    };

    let mut points = Vec::with_capacity(count + 1);
    points.push(start.clone());
    for i in 1..count {
        points.push(start.interpolate(end, i as f64 / count as f64));
    }
    points.push(end.clone());

    let segment_distance = total_distance_m / count as u32;
    let segment_duration = travel_seconds(segment_distance);

    points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| RouteSegment {
            start_point: pair[0].clone(),
            end_point: pair[1].clone(),
            distance: segment_distance,
            duration: segment_duration,
            flood_risk: flood_risk_for(profile, i, count),
            road_type: road_type_for(i),
        })
        .collect()
}

fn flood_risk_for(profile: RiskProfile, index: usize, count: usize) -> FloodRisk {
    match profile {
        // Every third segment dips into low risk.
        RiskProfile::Safe => {
            if index % 3 == 2 {
                FloodRisk::Low
            } else {
                FloodRisk::None
            }
        }
        // Alternating low/medium.
        RiskProfile::Medium => {
            if index % 2 == 1 {
                FloodRisk::Medium
            } else {
                FloodRisk::Low
            }
        }
        // Worsens by thirds toward the destination, modelling an
        // approach into a known flood zone.
        RiskProfile::Dangerous => match index * 3 / count {
            0 => FloodRisk::Medium,
            1 => FloodRisk::High,
            _ => FloodRisk::Extreme,
        },
    }
}

fn road_type_for(index: usize) -> RoadType {
    if index % 3 == 2 {
        RoadType::Highway
    } else if index % 2 == 1 {
        RoadType::Major
    } else {
        RoadType::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dhaka() -> RoutePoint {
        RoutePoint::new(23.8103, 90.4125)
    }

    fn khulna() -> RoutePoint {
        RoutePoint::new(22.8456, 89.5403)
    }

    #[test]
    fn test_haversine_same_point() {
        let point = RoutePoint::new(23.8, 90.4);
        assert_eq!(haversine_km(&point, &point), 0.0);
    }

    #[test]
    fn test_haversine_symmetry() {
        let a = dhaka();
        let b = khulna();
        assert_eq!(haversine_km(&a, &b), haversine_km(&b, &a));
    }

    #[test]
    fn test_haversine_dhaka_khulna_plausible() {
        let km = haversine_km(&dhaka(), &khulna());
        assert!((120.0..160.0).contains(&km), "got {km} km");
    }

    #[test]
    fn test_travel_seconds_at_fifty_kmh() {
        // 270 km at 50 km/h is 5.4 hours.
        assert_eq!(travel_seconds(270_000), 19_440);
        assert_eq!(travel_seconds(0), 0);
    }

    #[test]
    fn segment_count_switches_above_100km() {
        let segments = synthesize_segments(&dhaka(), &khulna(), 100_000, RiskProfile::Safe);
        assert_eq!(segments.len(), 3);
        let segments = synthesize_segments(&dhaka(), &khulna(), 100_001, RiskProfile::Safe);
        assert_eq!(segments.len(), 5);
    }

    #[test]
    fn segments_are_contiguous_and_pinned_to_endpoints() {
        let start = dhaka();
        let end = khulna();
        let segments = synthesize_segments(&start, &end, 270_000, RiskProfile::Dangerous);

        assert_eq!(segments.first().unwrap().start_point, start);
        assert_eq!(segments.last().unwrap().end_point, end);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end_point, pair[1].start_point);
        }
    }

    #[test]
    fn safe_profile_risk_table() {
        let risks: Vec<_> = synthesize_segments(&dhaka(), &khulna(), 50_000, RiskProfile::Safe)
            .into_iter()
            .map(|s| s.flood_risk)
            .collect();
        assert_eq!(risks, vec![FloodRisk::None, FloodRisk::None, FloodRisk::Low]);
    }

    #[test]
    fn medium_profile_alternates() {
        let risks: Vec<_> = synthesize_segments(&dhaka(), &khulna(), 270_000, RiskProfile::Medium)
            .into_iter()
            .map(|s| s.flood_risk)
            .collect();
        assert_eq!(
            risks,
            vec![
                FloodRisk::Low,
                FloodRisk::Medium,
                FloodRisk::Low,
                FloodRisk::Medium,
                FloodRisk::Low,
            ]
        );
    }

    #[test]
    fn dangerous_profile_worsens_toward_destination() {
        let risks: Vec<_> =
            synthesize_segments(&dhaka(), &khulna(), 270_000, RiskProfile::Dangerous)
                .into_iter()
                .map(|s| s.flood_risk)
                .collect();
        assert_eq!(risks.first(), Some(&FloodRisk::Medium));
        assert_eq!(risks.last(), Some(&FloodRisk::Extreme));
        for pair in risks.windows(2) {
            assert!(pair[0] <= pair[1], "risk must not improve: {risks:?}");
        }
    }

    #[test]
    fn road_type_cycles_by_index() {
        let roads: Vec<_> = synthesize_segments(&dhaka(), &khulna(), 50_000, RiskProfile::Safe)
            .into_iter()
            .map(|s| s.road_type)
            .collect();
        assert_eq!(roads, vec![RoadType::Local, RoadType::Major, RoadType::Highway]);
    }

    #[test]
    fn zero_length_route_still_synthesizes() {
        let point = RoutePoint::new(0.0, 0.0);
        let segments = synthesize_segments(&point, &point, 0, RiskProfile::Medium);
        assert_eq!(segments.len(), 3);
        for segment in &segments {
            assert_eq!(segment.distance, 0);
            assert_eq!(segment.duration, 0);
            assert_eq!(segment.start_point, point);
            assert_eq!(segment.end_point, point);
        }
    }

    // Property-based tests using proptest
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_point() -> impl Strategy<Value = RoutePoint> {
            (-90.0..=90.0, -180.0..=180.0).prop_map(|(lat, lon)| RoutePoint::new(lat, lon))
        }

        proptest! {
            #[test]
            fn prop_haversine_non_negative(a in valid_point(), b in valid_point()) {
                prop_assert!(haversine_km(&a, &b) >= 0.0);
            }

            #[test]
            fn prop_haversine_symmetric(a in valid_point(), b in valid_point()) {
                let ab = haversine_km(&a, &b);
                let ba = haversine_km(&b, &a);
                prop_assert!((ab - ba).abs() < 1e-10);
            }

            #[test]
            fn prop_haversine_same_point_is_zero(point in valid_point()) {
                prop_assert_eq!(haversine_km(&point, &point), 0.0);
            }

            #[test]
            fn prop_haversine_bounded_by_half_earth_circumference(
                a in valid_point(),
                b in valid_point()
            ) {
                let max_distance = std::f64::consts::PI * EARTH_RADIUS_KM;
                prop_assert!(haversine_km(&a, &b) <= max_distance + 0.1);
            }

            #[test]
            fn prop_segments_always_contiguous(
                a in valid_point(),
                b in valid_point(),
                distance in 0u32..2_000_000,
            ) {
                for profile in [RiskProfile::Safe, RiskProfile::Medium, RiskProfile::Dangerous] {
                    let segments = synthesize_segments(&a, &b, distance, profile);
                    prop_assert_eq!(&segments.first().unwrap().start_point, &a);
                    prop_assert_eq!(&segments.last().unwrap().end_point, &b);
                    for pair in segments.windows(2) {
                        prop_assert_eq!(&pair[0].end_point, &pair[1].start_point);
                    }
                }
            }
        }
    }
}
