//! Domain types shared by the rules engine, the upstream clients, and the
//! qualification pipeline.

use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Operational status reported by the places provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    Other(String),
}

impl BusinessStatus {
    /// Parse the provider's upper-snake status string (`"OPERATIONAL"`, ...).
    #[must_use]
    pub fn from_provider(raw: &str) -> Self {
        match raw {
            "OPERATIONAL" => Self::Operational,
            "CLOSED_TEMPORARILY" => Self::ClosedTemporarily,
            "CLOSED_PERMANENTLY" => Self::ClosedPermanently,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessStatus::Operational => write!(f, "OPERATIONAL"),
            BusinessStatus::ClosedTemporarily => write!(f, "CLOSED_TEMPORARILY"),
            BusinessStatus::ClosedPermanently => write!(f, "CLOSED_PERMANENTLY"),
            BusinessStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One opening interval. `day` is 0 (Sunday) through 6 (Saturday); times are
/// minutes past midnight. A `None` close means the interval has no end.
///
/// `open_minute` is `None` when the provider's times could not be read. Such
/// a period still belongs to the schedule but contributes no open time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningPeriod {
    pub day: u8,
    pub open_minute: Option<u16>,
    pub close_minute: Option<u16>,
}

impl OpeningPeriod {
    /// Build a period from provider-style `HHMM` integers (e.g. `930` = 09:30).
    #[must_use]
    pub fn from_hhmm(day: u8, open: u16, close: Option<u16>) -> Self {
        Self {
            day,
            open_minute: Some(hhmm_to_minutes(open)),
            close_minute: close.map(hhmm_to_minutes),
        }
    }

    /// A period whose times were unreadable.
    #[must_use]
    pub fn unreadable(day: u8) -> Self {
        Self {
            day,
            open_minute: None,
            close_minute: None,
        }
    }

    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.open_minute.is_some()
    }
}

/// Convert an `HHMM` integer into minutes past midnight.
#[must_use]
pub fn hhmm_to_minutes(hhmm: u16) -> u16 {
    (hhmm / 100) * 60 + hhmm % 100
}

/// Weekly opening schedule in the order the provider returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHoursSchedule {
    pub periods: Vec<OpeningPeriod>,
}

/// A business location as returned by the places provider.
///
/// Different lookups populate different subsets: text search fills
/// `postal_code`, nearby search fills `vicinity` and `business_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub location: Coordinate,
    pub postal_code: Option<String>,
    pub vicinity: Option<String>,
    pub categories: Vec<String>,
    pub business_status: Option<BusinessStatus>,
    pub opening_hours: Option<OpeningHoursSchedule>,
}

impl Place {
    #[must_use]
    pub fn is_operational(&self) -> bool {
        matches!(self.business_status, Some(BusinessStatus::Operational))
    }

    /// The vicinity (short street address), when present and non-blank.
    #[must_use]
    pub fn vicinity(&self) -> Option<&str> {
        self.vicinity.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// Category tags, display name, and hours from a place-details lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub display_name: Option<String>,
    pub categories: Vec<String>,
    pub opening_hours: Option<OpeningHoursSchedule>,
}

/// Population density for one ZIP code tabulation area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationDensity {
    pub population: f64,
    pub land_area_sq_meters: f64,
    /// Persons per square mile, rounded. Zero when the land area is zero.
    pub density: u64,
}

/// A bulk-scout candidate that passed the cheap rule subset.
///
/// Field names are the export format; keep them stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub address: String,
    pub place_id: String,
    pub lat: f64,
    pub lng: f64,
}

impl Lead {
    /// Build a lead from a place. Returns `None` when the place has no vicinity.
    #[must_use]
    pub fn from_place(place: &Place) -> Option<Self> {
        let address = place.vicinity()?;
        Some(Self {
            name: place.name.clone(),
            address: address.to_string(),
            place_id: place.place_id.clone(),
            lat: place.location.lat,
            lng: place.location.lng,
        })
    }
}
