//! Normalizador de campos
//!
//! Único punto donde se traducen los alias que usa el frontend
//! (`location`/`name`, `delivery`/`description`, `no`/`position`) a los
//! registros canónicos que entienden los repositorios.
//!
//! Reglas:
//! - gana el primer alias si viene (no nulo), si no el segundo;
//! - los valores por defecto solo se aplican al crear;
//! - al actualizar, un campo ausente o nulo no se toca. La presencia se
//!   comprueba con `Option`, así `active: false` o `position: 0` sí se aplican.

use chrono::{DateTime, Utc};

use crate::dto::qr_code_dto::UpdateQrCodeRequest;
use crate::dto::route_dto::{LocationPayload, QrCodePayload, RoutePayload, SchedulePayload};
use crate::models::{DeliveryMode, Shift};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{parse_schedule_date, validate_not_empty};

pub const DEFAULT_LOCATION_NAME: &str = "Unnamed Location";
pub const REQUIRED_ROUTE_FIELDS: &str = "Code, location, and region are required";

/// Ruta lista para insertar
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoute {
    pub code: String,
    pub name: String,
    pub description: String,
    pub shift: Shift,
    pub delivery_mode: String,
    pub region: String,
    pub active: bool,
}

/// Cambios parciales sobre una ruta existente
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub shift: Option<Shift>,
    pub delivery_mode: Option<String>,
    pub active: Option<bool>,
}

/// Parada lista para insertar (valores por defecto ya aplicados)
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub code: String,
    pub name: String,
    pub address: String,
    pub contact: String,
    pub notes: String,
    pub position: i32,
    pub delivery_mode: String,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub active: bool,
}

/// Cambios parciales sobre una parada
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
    pub position: Option<i32>,
    pub delivery_mode: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub active: Option<bool>,
}

impl LocationPatch {
    /// Completa el patch con los valores por defecto de creación.
    /// `index` es la posición de la parada en la lista enviada.
    pub fn into_new(self, index: usize) -> NewLocation {
        NewLocation {
            code: self.code.unwrap_or_default(),
            name: self
                .name
                .unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string()),
            address: self.address.unwrap_or_default(),
            contact: self.contact.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            position: self
                .position
                .unwrap_or_else(|| i32::try_from(index).unwrap_or(i32::MAX)),
            delivery_mode: self
                .delivery_mode
                .unwrap_or_else(|| DeliveryMode::DEFAULT_TAG.to_string()),
            lat: self.lat,
            lng: self.lng,
            active: self.active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSchedule {
    pub day: String,
    pub mode: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQrCode {
    pub image_url: String,
    pub destination_url: String,
    pub title: String,
    pub position: i32,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QrCodePatch {
    pub image_url: Option<String>,
    pub destination_url: Option<String>,
    pub title: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
}

/// Parada deseada tal como la consume el reconciliador.
///
/// `schedules` / `qr_codes` en `None` significa "no tocar los hijos";
/// `Some(vec![])` significa "borrar todos".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationChanges {
    pub id: Option<String>,
    pub fields: LocationPatch,
    pub schedules: Option<Vec<NewSchedule>>,
    pub qr_codes: Option<Vec<NewQrCode>>,
}

/// Segundo alias aceptado para `address`
#[derive(Debug, Clone, Copy, PartialEq)]
enum AddressAlias {
    /// Dentro de una ruta, `delivery` es la etiqueta del modo y no se usa como dirección
    None,
    /// En PUT /locations/:id, `delivery` sustituye a `address`
    Delivery,
}

fn first_present<T>(primary: Option<T>, secondary: Option<T>) -> Option<T> {
    primary.or(secondary)
}

fn parse_shift(value: Option<String>) -> AppResult<Option<Shift>> {
    value
        .map(|s| s.parse::<Shift>().map_err(AppError::BadRequest))
        .transpose()
}

fn index_as_position(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

/// Normaliza el payload de POST /routes
pub fn normalize_route_create(payload: RoutePayload) -> AppResult<(NewRoute, Vec<LocationChanges>)> {
    let name = first_present(payload.location, payload.name);

    let (code, name, region) = match (payload.code, name, payload.region) {
        (Some(code), Some(name), Some(region))
            if validate_not_empty(&code).is_ok()
                && validate_not_empty(&name).is_ok()
                && validate_not_empty(&region).is_ok() =>
        {
            (code, name, region)
        }
        _ => return Err(AppError::BadRequest(REQUIRED_ROUTE_FIELDS.to_string())),
    };

    let route = NewRoute {
        code,
        name,
        description: first_present(payload.delivery, payload.description).unwrap_or_default(),
        shift: parse_shift(payload.shift)?.unwrap_or_default(),
        delivery_mode: payload.delivery_mode.unwrap_or_default(),
        region,
        active: payload.active.unwrap_or(true),
    };

    let locations = payload
        .locations
        .unwrap_or_default()
        .into_iter()
        .map(normalize_nested_location)
        .collect::<AppResult<Vec<_>>>()?;

    Ok((route, locations))
}

/// Normaliza el payload de PUT /routes/:id.
///
/// Devuelve `None` en la lista de paradas si el cliente no envió `locations`.
pub fn normalize_route_patch(
    payload: RoutePayload,
) -> AppResult<(RoutePatch, Option<Vec<LocationChanges>>)> {
    let patch = RoutePatch {
        code: payload.code,
        name: first_present(payload.location, payload.name),
        description: first_present(payload.delivery, payload.description),
        shift: parse_shift(payload.shift)?,
        delivery_mode: payload.delivery_mode,
        active: payload.active,
    };

    let locations = payload
        .locations
        .map(|locs| {
            locs.into_iter()
                .map(normalize_nested_location)
                .collect::<AppResult<Vec<_>>>()
        })
        .transpose()?;

    Ok((patch, locations))
}

/// Parada anidada en una ruta
pub fn normalize_nested_location(payload: LocationPayload) -> AppResult<LocationChanges> {
    normalize_location(payload, AddressAlias::None)
}

/// Parada enviada a PUT /locations/:id
pub fn normalize_standalone_location(payload: LocationPayload) -> AppResult<LocationChanges> {
    normalize_location(payload, AddressAlias::Delivery)
}

fn normalize_location(payload: LocationPayload, alias: AddressAlias) -> AppResult<LocationChanges> {
    let address = match alias {
        AddressAlias::None => payload.address,
        AddressAlias::Delivery => first_present(payload.delivery, payload.address),
    };

    let fields = LocationPatch {
        code: payload.code,
        name: first_present(payload.location, payload.name),
        address,
        contact: payload.contact,
        notes: payload.notes,
        position: first_present(payload.no, payload.position),
        delivery_mode: payload.delivery_mode,
        lat: payload.lat,
        lng: payload.lng,
        active: payload.active,
    };

    let schedules = payload.delivery_schedule.map(normalize_schedules).transpose()?;
    let qr_codes = payload.qr_code_images.map(normalize_qr_codes).transpose()?;

    Ok(LocationChanges {
        id: payload.id.filter(|id| !id.trim().is_empty()),
        fields,
        schedules,
        qr_codes,
    })
}

fn parse_optional_date(value: Option<String>, field: &str) -> AppResult<Option<DateTime<Utc>>> {
    match value {
        Some(raw) if !raw.trim().is_empty() => parse_schedule_date(&raw)
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {} '{}'", field, raw))),
        _ => Ok(None),
    }
}

fn normalize_schedules(schedules: Vec<SchedulePayload>) -> AppResult<Vec<NewSchedule>> {
    schedules
        .into_iter()
        .map(|schedule| {
            let (day, mode) = match (schedule.day, schedule.mode) {
                (Some(day), Some(mode)) => (day, mode),
                _ => {
                    return Err(AppError::BadRequest(
                        "Delivery schedule entries require day and mode".to_string(),
                    ))
                }
            };

            Ok(NewSchedule {
                day,
                mode,
                start_date: parse_optional_date(schedule.start_date, "startDate")?,
                end_date: parse_optional_date(schedule.end_date, "endDate")?,
            })
        })
        .collect()
}

fn normalize_qr_codes(qr_codes: Vec<QrCodePayload>) -> AppResult<Vec<NewQrCode>> {
    qr_codes
        .into_iter()
        .enumerate()
        .map(|(index, qr)| match (qr.image_url, qr.destination_url, qr.title) {
            (Some(image_url), Some(destination_url), Some(title)) => Ok(NewQrCode {
                image_url,
                destination_url,
                title,
                position: qr.position.unwrap_or_else(|| index_as_position(index)),
                active: true,
            }),
            _ => Err(AppError::BadRequest(
                "QR code entries require imageUrl, destinationUrl, and title".to_string(),
            )),
        })
        .collect()
}

/// Normaliza PUT /qrcodes/:id
pub fn normalize_qr_code_patch(request: UpdateQrCodeRequest) -> QrCodePatch {
    QrCodePatch {
        image_url: request.image_url,
        destination_url: request.destination_url,
        title: request.title,
        position: request.position,
        active: request.active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn route_payload(value: serde_json::Value) -> RoutePayload {
        serde_json::from_value(value).unwrap()
    }

    fn location_payload(value: serde_json::Value) -> LocationPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_prefers_location_over_name() {
        let (route, _) = normalize_route_create(route_payload(json!({
            "code": "R1",
            "location": "From location",
            "name": "From name",
            "region": "selangor"
        })))
        .unwrap();

        assert_eq!(route.name, "From location");
        assert_eq!(route.shift, Shift::Am);
        assert_eq!(route.description, "");
        assert!(route.active);
    }

    #[test]
    fn test_create_accepts_name_alias() {
        let (route, _) = normalize_route_create(route_payload(json!({
            "code": "R1",
            "name": "Named",
            "delivery": "Morning run",
            "shift": "PM",
            "region": "kuala-lumpur"
        })))
        .unwrap();

        assert_eq!(route.name, "Named");
        assert_eq!(route.description, "Morning run");
        assert_eq!(route.shift, Shift::Pm);
    }

    #[test]
    fn test_create_requires_code_location_region() {
        for body in [
            json!({ "location": "A", "region": "selangor" }),
            json!({ "code": "R1", "region": "selangor" }),
            json!({ "code": "R1", "location": "A" }),
            json!({ "code": "  ", "location": "A", "region": "selangor" }),
        ] {
            let err = normalize_route_create(route_payload(body)).unwrap_err();
            assert_eq!(err.public_message(), REQUIRED_ROUTE_FIELDS);
        }
    }

    #[test]
    fn test_create_rejects_unknown_shift() {
        let err = normalize_route_create(route_payload(json!({
            "code": "R1", "location": "A", "region": "selangor", "shift": "night"
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_location_defaults_only_on_create() {
        let changes = normalize_nested_location(location_payload(json!({ "code": "L1" }))).unwrap();
        assert_eq!(changes.fields.name, None);
        assert_eq!(changes.fields.delivery_mode, None);
        assert_eq!(changes.schedules, None);
        assert_eq!(changes.qr_codes, None);

        let new = changes.fields.into_new(3);
        assert_eq!(new.name, DEFAULT_LOCATION_NAME);
        assert_eq!(new.delivery_mode, "daily");
        assert_eq!(new.address, "");
        assert_eq!(new.contact, "");
        assert_eq!(new.notes, "");
        assert_eq!(new.position, 3);
        assert!(new.active);
    }

    #[test]
    fn test_falsy_values_are_present() {
        let changes = normalize_nested_location(location_payload(json!({
            "no": 0,
            "active": false,
            "notes": ""
        })))
        .unwrap();

        assert_eq!(changes.fields.position, Some(0));
        assert_eq!(changes.fields.active, Some(false));
        assert_eq!(changes.fields.notes, Some(String::new()));
    }

    #[test]
    fn test_no_wins_over_position() {
        let changes =
            normalize_nested_location(location_payload(json!({ "no": 2, "position": 7 }))).unwrap();
        assert_eq!(changes.fields.position, Some(2));

        let changes =
            normalize_nested_location(location_payload(json!({ "position": 7 }))).unwrap();
        assert_eq!(changes.fields.position, Some(7));
    }

    #[test]
    fn test_null_is_treated_as_absent() {
        let changes = normalize_nested_location(location_payload(json!({
            "location": null,
            "name": "Fallback",
            "active": null
        })))
        .unwrap();

        assert_eq!(changes.fields.name.as_deref(), Some("Fallback"));
        assert_eq!(changes.fields.active, None);
    }

    #[test]
    fn test_nested_location_ignores_delivery_label() {
        let changes = normalize_nested_location(location_payload(json!({
            "delivery": "Alt 1",
            "address": "Jalan SS2"
        })))
        .unwrap();
        assert_eq!(changes.fields.address.as_deref(), Some("Jalan SS2"));
    }

    #[test]
    fn test_standalone_location_accepts_delivery_as_address() {
        let changes = normalize_standalone_location(location_payload(json!({
            "delivery": "Seksyen 2",
            "address": "ignored"
        })))
        .unwrap();
        assert_eq!(changes.fields.address.as_deref(), Some("Seksyen 2"));
    }

    #[test]
    fn test_lat_lng_accept_numbers() {
        let changes = normalize_nested_location(location_payload(json!({
            "lat": 3.1073,
            "lng": "101.6067"
        })))
        .unwrap();
        assert_eq!(changes.fields.lat.as_deref(), Some("3.1073"));
        assert_eq!(changes.fields.lng.as_deref(), Some("101.6067"));
    }

    #[test]
    fn test_empty_schedule_list_is_kept() {
        let changes = normalize_nested_location(location_payload(json!({
            "id": "loc-1",
            "deliverySchedule": []
        })))
        .unwrap();
        assert_eq!(changes.id.as_deref(), Some("loc-1"));
        assert_eq!(changes.schedules, Some(vec![]));
    }

    #[test]
    fn test_schedule_dates() {
        let changes = normalize_nested_location(location_payload(json!({
            "deliverySchedule": [
                { "day": "Monday", "mode": "daily", "startDate": "2025-01-06", "endDate": "" },
                { "day": "Friday", "mode": "alt1" }
            ]
        })))
        .unwrap();

        let schedules = changes.schedules.unwrap();
        assert_eq!(schedules.len(), 2);
        assert!(schedules[0].start_date.is_some());
        assert!(schedules[0].end_date.is_none());
        assert!(schedules[1].start_date.is_none());
    }

    #[test]
    fn test_schedule_requires_day_and_mode() {
        let result = normalize_nested_location(location_payload(json!({
            "deliverySchedule": [{ "day": "Monday" }]
        })));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_qr_positions_default_to_index() {
        let changes = normalize_nested_location(location_payload(json!({
            "qrCodeImages": [
                { "id": 0, "imageUrl": "a.png", "destinationUrl": "https://a", "title": "A" },
                { "imageUrl": "b.png", "destinationUrl": "https://b", "title": "B", "position": 9 },
                { "imageUrl": "c.png", "destinationUrl": "https://c", "title": "C" }
            ]
        })))
        .unwrap();

        let positions: Vec<i32> = changes.qr_codes.unwrap().iter().map(|q| q.position).collect();
        assert_eq!(positions, vec![0, 9, 2]);
    }

    #[test]
    fn test_route_patch_only_present_fields() {
        let (patch, locations) =
            normalize_route_patch(route_payload(json!({ "active": false }))).unwrap();

        assert_eq!(
            patch,
            RoutePatch {
                active: Some(false),
                ..Default::default()
            }
        );
        assert!(locations.is_none());
    }

    #[test]
    fn test_route_patch_with_locations() {
        let (patch, locations) = normalize_route_patch(route_payload(json!({
            "description": "Updated",
            "locations": [{ "id": "a" }, { "location": "New stop" }]
        })))
        .unwrap();

        assert_eq!(patch.description.as_deref(), Some("Updated"));
        let locations = locations.unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].id.as_deref(), Some("a"));
        assert_eq!(locations[1].id, None);
    }
}
