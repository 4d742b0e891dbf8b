//! Conversion of raw Google payloads into core domain types.

use btmsite_core::{
    BusinessStatus, Coordinate, OpeningHoursSchedule, OpeningPeriod, Place, PlaceDetails,
};

use crate::types::{AddressComponent, OpeningHours, Period, PlaceResult};

/// Parse a provider `"HHMM"` string. Returns `None` for anything that is not
/// four digits describing a valid time of day.
#[must_use]
pub fn parse_hhmm(raw: &str) -> Option<u16> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u16 = raw.parse().ok()?;
    (value / 100 < 24 && value % 100 < 60).then_some(value)
}

fn readable_times(period: &Period) -> Option<(u16, Option<u16>)> {
    let open = period.open.time.as_deref().and_then(parse_hhmm)?;
    let close = match &period.close {
        None => None,
        Some(point) => Some(point.time.as_deref().and_then(parse_hhmm)?),
    };
    Some((open, close))
}

fn normalize_period(period: &Period) -> OpeningPeriod {
    match readable_times(period) {
        Some((open, close)) => OpeningPeriod::from_hhmm(period.open.day, open, close),
        None => {
            tracing::debug!(day = period.open.day, "opening period has unreadable time");
            OpeningPeriod::unreadable(period.open.day)
        }
    }
}

/// Convert the provider's opening-hours block. A block without `periods`
/// yields `None`. Every period is kept; unreadable ones are marked as such.
#[must_use]
pub fn normalize_opening_hours(hours: Option<&OpeningHours>) -> Option<OpeningHoursSchedule> {
    let periods = hours?.periods.as_ref()?;
    Some(OpeningHoursSchedule {
        periods: periods.iter().map(normalize_period).collect(),
    })
}

/// Short name of the `postal_code` address component, if any.
#[must_use]
pub fn postal_code(components: &[AddressComponent]) -> Option<String> {
    components
        .iter()
        .find(|c| c.types.iter().any(|t| t == "postal_code"))
        .map(|c| {
            if c.short_name.is_empty() {
                c.long_name.clone()
            } else {
                c.short_name.clone()
            }
        })
        .filter(|z| !z.trim().is_empty())
}

/// Convert a raw place record. Records missing an id, name, or location
/// cannot be evaluated and yield `None`.
#[must_use]
pub fn normalize_place(raw: PlaceResult) -> Option<Place> {
    let place_id = raw.place_id.filter(|id| !id.is_empty())?;
    let name = raw.name?;
    let location = raw.geometry.map(|g| Coordinate {
        lat: g.location.lat,
        lng: g.location.lng,
    })?;

    Some(Place {
        place_id,
        name,
        location,
        postal_code: postal_code(&raw.address_components),
        vicinity: raw.vicinity,
        categories: raw.types,
        business_status: raw.business_status.as_deref().map(BusinessStatus::from_provider),
        opening_hours: normalize_opening_hours(raw.opening_hours.as_ref()),
    })
}

#[must_use]
pub fn normalize_details(raw: PlaceResult) -> PlaceDetails {
    PlaceDetails {
        display_name: raw.name.filter(|n| !n.trim().is_empty()),
        opening_hours: normalize_opening_hours(raw.opening_hours.as_ref()),
        categories: raw.types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: serde_json::Value) -> PlaceResult {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    #[test]
    fn parse_hhmm_accepts_valid_times() {
        assert_eq!(parse_hhmm("0000"), Some(0));
        assert_eq!(parse_hhmm("0930"), Some(930));
        assert_eq!(parse_hhmm("2359"), Some(2359));
    }

    #[test]
    fn parse_hhmm_rejects_garbage() {
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm("930"), None);
        assert_eq!(parse_hhmm("2460"), None);
        assert_eq!(parse_hhmm("2500"), None);
        assert_eq!(parse_hhmm("ab12"), None);
    }

    #[test]
    fn postal_code_prefers_short_name() {
        let place = raw(serde_json::json!({
            "address_components": [
                { "long_name": "Atlanta", "short_name": "Atlanta", "types": ["locality"] },
                { "long_name": "30301", "short_name": "30301", "types": ["postal_code"] }
            ]
        }));
        assert_eq!(postal_code(&place.address_components).as_deref(), Some("30301"));
    }

    #[test]
    fn missing_postal_component_is_none() {
        let place = raw(serde_json::json!({
            "address_components": [
                { "long_name": "Atlanta", "short_name": "Atlanta", "types": ["locality"] }
            ]
        }));
        assert!(postal_code(&place.address_components).is_none());
    }

    #[test]
    fn normalize_place_maps_all_fields() {
        let place = normalize_place(raw(serde_json::json!({
            "place_id": "p1",
            "name": "Joe's Corner",
            "geometry": { "location": { "lat": 33.75, "lng": -84.39 } },
            "vicinity": "12 Peachtree St, Atlanta",
            "types": ["convenience_store", "store"],
            "business_status": "OPERATIONAL"
        })))
        .expect("complete record should normalize");
        assert_eq!(place.place_id, "p1");
        assert!(place.is_operational());
        assert_eq!(place.categories, vec!["convenience_store", "store"]);
        assert_eq!(place.vicinity(), Some("12 Peachtree St, Atlanta"));
    }

    #[test]
    fn normalize_place_without_geometry_is_none() {
        assert!(normalize_place(raw(serde_json::json!({
            "place_id": "p1",
            "name": "Nowhere"
        })))
        .is_none());
    }

    #[test]
    fn opening_hours_without_periods_is_none() {
        let details = normalize_details(raw(serde_json::json!({
            "name": "Joe's Corner",
            "opening_hours": { "open_now": true }
        })));
        assert!(details.opening_hours.is_none());
    }

    #[test]
    fn opening_hours_keep_open_ended_and_mark_unreadable() {
        let details = normalize_details(raw(serde_json::json!({
            "name": "Joe's Corner",
            "types": ["convenience_store"],
            "opening_hours": { "periods": [
                { "open": { "day": 0, "time": "0000" } },
                { "open": { "day": 1, "time": "0900" }, "close": { "day": 1, "time": "1730" } },
                { "open": { "day": 2, "time": "9am" }, "close": { "day": 2, "time": "1700" } }
            ]}
        })));
        let schedule = details.opening_hours.expect("periods present");
        assert_eq!(schedule.periods.len(), 3);
        assert_eq!(schedule.periods[0].close_minute, None);
        assert_eq!(schedule.periods[1].open_minute, Some(540));
        assert_eq!(schedule.periods[1].close_minute, Some(1050));
        assert_eq!(schedule.periods[2], OpeningPeriod::unreadable(2));
    }

    #[test]
    fn unreadable_close_marks_the_whole_period() {
        let details = normalize_details(raw(serde_json::json!({
            "opening_hours": { "periods": [
                { "open": { "day": 0, "time": "0000" } },
                { "open": { "day": 1, "time": "900" }, "close": { "day": 1, "time": "1700" } },
                { "open": { "day": 3, "time": "0900" }, "close": { "day": 3 } }
            ]}
        })));
        let schedule = details.opening_hours.expect("periods present");
        assert_eq!(schedule.periods.len(), 3);
        assert!(schedule.periods[0].is_readable());
        assert!(!schedule.periods[1].is_readable());
        assert!(!schedule.periods[2].is_readable());
    }
}
