//! Modos de entrega y turnos
//!
//! Los modos se guardan como texto plano en la base de datos (`daily`,
//! `alt1`, ...). Este módulo define los valores reconocidos y su etiqueta
//! de presentación.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Modo de entrega de una parada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Daily,
    Alt1,
    Alt2,
    Weekday,
    Weekend,
}

impl DeliveryMode {
    pub const DEFAULT_TAG: &'static str = "daily";

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Daily => "daily",
            DeliveryMode::Alt1 => "alt1",
            DeliveryMode::Alt2 => "alt2",
            DeliveryMode::Weekday => "weekday",
            DeliveryMode::Weekend => "weekend",
        }
    }

    /// Etiqueta mostrada en el frontend
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryMode::Daily => "Daily",
            DeliveryMode::Alt1 => "Alt 1",
            DeliveryMode::Alt2 => "Alt 2",
            DeliveryMode::Weekday => "Weekday",
            DeliveryMode::Weekend => "Weekend",
        }
    }

    /// Etiqueta para un tag guardado; los valores desconocidos se muestran como "Daily"
    pub fn label_for_tag(tag: &str) -> &'static str {
        tag.parse::<DeliveryMode>()
            .unwrap_or(DeliveryMode::Daily)
            .label()
    }
}

impl FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(DeliveryMode::Daily),
            "alt1" => Ok(DeliveryMode::Alt1),
            "alt2" => Ok(DeliveryMode::Alt2),
            "weekday" => Ok(DeliveryMode::Weekday),
            "weekend" => Ok(DeliveryMode::Weekend),
            other => Err(format!("Unknown delivery mode '{}'", other)),
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turno de la ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shift {
    #[default]
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Am => "AM",
            Shift::Pm => "PM",
        }
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AM" => Ok(Shift::Am),
            "PM" => Ok(Shift::Pm),
            other => Err(format!("Invalid shift '{}', expected AM or PM", other)),
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_known_tags() {
        assert_eq!(DeliveryMode::label_for_tag("daily"), "Daily");
        assert_eq!(DeliveryMode::label_for_tag("alt1"), "Alt 1");
        assert_eq!(DeliveryMode::label_for_tag("alt2"), "Alt 2");
        assert_eq!(DeliveryMode::label_for_tag("weekday"), "Weekday");
        assert_eq!(DeliveryMode::label_for_tag("weekend"), "Weekend");
    }

    #[test]
    fn test_unknown_tag_falls_back_to_daily() {
        assert_eq!(DeliveryMode::label_for_tag(""), "Daily");
        assert_eq!(DeliveryMode::label_for_tag("monthly"), "Daily");
        assert_eq!(DeliveryMode::label_for_tag("DAILY"), "Daily");
    }

    #[test]
    fn test_shift_parsing() {
        assert_eq!("PM".parse::<Shift>().unwrap(), Shift::Pm);
        assert_eq!(Shift::default().as_str(), "AM");
        assert!("night".parse::<Shift>().is_err());
    }
}
