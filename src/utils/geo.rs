//! Great-circle distance and the two location searches built on it.
//!
//! Searches are linear scans over every stored location. Branch and ATM tables
//! hold hundreds of rows, so there is no spatial index.

use std::cmp::Ordering;
use std::f64::consts::PI;

use serde::Serialize;

use crate::domain::DomainError;

/// Mean Earth radius.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distances below this are treated as the query point itself.
///
/// The law of cosines is ill-conditioned for near-identical points: an acos
/// argument of `1 - f64::EPSILON` already yields roughly 0.13 m.
pub const SELF_MATCH_TOLERANCE_KM: f64 = 0.001;

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Great-circle distance in kilometres between two points given in degrees,
/// using the spherical law of cosines.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = degrees_to_radians(lat1);
    let phi2 = degrees_to_radians(lat2);
    let delta_lambda = degrees_to_radians(lon2) - degrees_to_radians(lon1);

    let cosine = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos();
    cosine.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::CoordinateOutOfRange {
                field: "latitude",
                min: -90,
                max: 90,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::CoordinateOutOfRange {
                field: "longitude",
                min: -180,
                max: 180,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// For coordinates already range-checked by the store.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parses raw path segments.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, DomainError> {
        let latitude = parse_number("latitude", latitude)?;
        let longitude = parse_number("longitude", longitude)?;
        Self::new(latitude, longitude)
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

pub fn parse_radius_km(raw: &str) -> Result<f64, DomainError> {
    let radius = parse_number("radius", raw)?;
    if radius < 0.0 {
        return Err(DomainError::NegativeRadius);
    }
    Ok(radius)
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, DomainError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(DomainError::NotANumber { field })
}

/// A stored row with a position.
pub trait Located {
    type Id: Copy + PartialEq;

    fn id(&self) -> Self::Id;
    fn point(&self) -> GeoPoint;
}

/// A search hit paired with its distance from the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestQuery<Id> {
    pub limit: usize,
    /// Candidates at or beyond this distance are dropped before ranking.
    pub max_radius_km: Option<f64>,
    pub exclude_id: Option<Id>,
}

fn rank<T: Located>(rows: impl IntoIterator<Item = T>, origin: GeoPoint) -> Vec<Ranked<T>> {
    rows.into_iter()
        .map(|item| {
            let distance_km = origin.distance_to(&item.point());
            Ranked { item, distance_km }
        })
        .collect()
}

fn by_distance<T>(left: &Ranked<T>, right: &Ranked<T>) -> Ordering {
    left.distance_km.total_cmp(&right.distance_km)
}

/// Every row strictly closer than `radius_km` to `origin`, nearest first.
pub fn within_radius<T: Located>(
    rows: impl IntoIterator<Item = T>,
    origin: GeoPoint,
    radius_km: f64,
) -> Vec<Ranked<T>> {
    let mut hits = rank(rows, origin);
    hits.retain(|hit| hit.distance_km < radius_km);
    hits.sort_by(by_distance);
    hits
}

/// Up to `query.limit` rows closest to `origin`, nearest first.
///
/// Rows at the query point itself and the row named by `exclude_id` never
/// appear.
pub fn nearest<T: Located>(
    rows: impl IntoIterator<Item = T>,
    origin: GeoPoint,
    query: &NearestQuery<T::Id>,
) -> Vec<Ranked<T>> {
    let mut hits = rank(rows, origin);
    hits.retain(|hit| {
        hit.distance_km >= SELF_MATCH_TOLERANCE_KM
            && query.exclude_id != Some(hit.item.id())
            && query.max_radius_km.is_none_or(|cap| hit.distance_km < cap)
    });
    hits.sort_by(by_distance);
    hits.truncate(query.limit);
    hits
}
