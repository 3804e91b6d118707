//! Transformación de rutas guardadas a la forma que pinta el frontend
//!
//! `name` → `location`, `description` → `delivery`, `position` → `no`, y el
//! modo de entrega de cada parada se convierte en su etiqueta ("Alt 1", ...).

use chrono::{DateTime, SecondsFormat, Utc};

use crate::dto::route_dto::{LocationDisplay, QrCodeDisplay, RouteDisplay, ScheduleDisplay};
use crate::models::{DeliveryMode, DeliverySchedule, LocationWithChildren, QrCodeImage, RouteWithLocations};

fn to_iso(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

impl From<RouteWithLocations> for RouteDisplay {
    fn from(tree: RouteWithLocations) -> Self {
        let route = tree.route;

        let delivery = if route.description.is_empty() {
            route.delivery_mode.clone()
        } else {
            route.description
        };

        Self {
            id: route.id,
            code: route.code,
            location: route.name,
            delivery,
            shift: non_empty_or(route.shift, "AM"),
            delivery_mode: route.delivery_mode,
            region: route.region,
            active: route.active,
            last_update_time: route.updated_at,
            locations: tree.locations.into_iter().map(LocationDisplay::from).collect(),
        }
    }
}

impl From<LocationWithChildren> for LocationDisplay {
    fn from(tree: LocationWithChildren) -> Self {
        let loc = tree.location;

        Self {
            id: loc.id,
            no: loc.position,
            code: loc.code,
            location: loc.name.clone(),
            delivery: DeliveryMode::label_for_tag(&loc.delivery_mode).to_string(),
            delivery_mode: non_empty_or(loc.delivery_mode, DeliveryMode::DEFAULT_TAG),
            lat: loc.lat.unwrap_or_default(),
            lng: loc.lng.unwrap_or_default(),
            qr_code_images: tree.qr_code_images.into_iter().map(QrCodeDisplay::from).collect(),
            name: loc.name,
            address: loc.address,
            contact: loc.contact,
            notes: loc.notes,
            position: loc.position,
            active: loc.active,
            delivery_schedule: tree
                .delivery_schedule
                .into_iter()
                .map(ScheduleDisplay::from)
                .collect(),
        }
    }
}

impl From<QrCodeImage> for QrCodeDisplay {
    fn from(qr: QrCodeImage) -> Self {
        Self {
            id: qr.id,
            image_url: qr.image_url,
            destination_url: qr.destination_url,
            title: qr.title,
            position: qr.position,
        }
    }
}

impl From<DeliverySchedule> for ScheduleDisplay {
    fn from(schedule: DeliverySchedule) -> Self {
        Self {
            day: schedule.day,
            mode: schedule.mode,
            start_date: to_iso(schedule.start_date),
            end_date: to_iso(schedule.end_date),
        }
    }
}

/// Transforma una lista de rutas completas a su forma de presentación
pub fn to_display(routes: Vec<RouteWithLocations>) -> Vec<RouteDisplay> {
    routes.into_iter().map(RouteDisplay::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Route};
    use chrono::TimeZone;

    fn sample_route(description: &str, delivery_mode: &str) -> Route {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap();
        Route {
            id: "route-1".into(),
            code: "R1".into(),
            name: "Test Route".into(),
            description: description.into(),
            shift: "PM".into(),
            delivery_mode: delivery_mode.into(),
            region: "selangor".into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_location(delivery_mode: &str) -> Location {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap();
        Location {
            id: "loc-1".into(),
            route_id: "route-1".into(),
            code: "L1".into(),
            name: "Loc A".into(),
            address: "Jalan SS2".into(),
            contact: "03-1234567".into(),
            notes: String::new(),
            position: 4,
            delivery_mode: delivery_mode.into(),
            lat: Some("3.1073".into()),
            lng: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_route_field_renames() {
        let display = RouteDisplay::from(RouteWithLocations {
            route: sample_route("Main run", "daily"),
            locations: vec![],
        });

        assert_eq!(display.location, "Test Route");
        assert_eq!(display.delivery, "Main run");
        assert_eq!(display.shift, "PM");
        assert_eq!(display.last_update_time, Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_route_delivery_falls_back_to_mode() {
        let display = RouteDisplay::from(RouteWithLocations {
            route: sample_route("", "weekday"),
            locations: vec![],
        });
        assert_eq!(display.delivery, "weekday");
    }

    #[test]
    fn test_location_display_shape() {
        let schedule = DeliverySchedule {
            id: "s1".into(),
            location_id: "loc-1".into(),
            day: "Monday".into(),
            mode: "alt2".into(),
            start_date: Some(Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap()),
            end_date: None,
        };

        let display = LocationDisplay::from(LocationWithChildren {
            location: sample_location("alt2"),
            delivery_schedule: vec![schedule],
            qr_code_images: vec![],
        });

        assert_eq!(display.no, 4);
        assert_eq!(display.position, 4);
        assert_eq!(display.location, "Loc A");
        assert_eq!(display.name, "Loc A");
        assert_eq!(display.delivery, "Alt 2");
        assert_eq!(display.delivery_mode, "alt2");
        assert_eq!(display.lat, "3.1073");
        assert_eq!(display.lng, "");
        assert_eq!(
            display.delivery_schedule[0].start_date.as_deref(),
            Some("2025-01-06T00:00:00.000Z")
        );
        assert_eq!(display.delivery_schedule[0].end_date, None);
    }

    #[test]
    fn test_unknown_mode_is_shown_as_daily() {
        let display = LocationDisplay::from(LocationWithChildren {
            location: sample_location(""),
            delivery_schedule: vec![],
            qr_code_images: vec![],
        });
        assert_eq!(display.delivery, "Daily");
        assert_eq!(display.delivery_mode, "daily");
    }
}
