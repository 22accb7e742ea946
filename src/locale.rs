//! Locale tables for date formatting.
//!
//! The phone can push a locale tag alongside a weather update; it takes
//! effect on the next date refresh. Only the weekday and month names are
//! localized - the face layout itself is locale-independent.

use chrono::Weekday;

/// Supported display locales. Unrecognized tags fall back to English.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Locale {
    #[default]
    English,
    German,
    French,
    Spanish,
}

impl Locale {
    /// Resolve a POSIX-style locale tag (`"de_DE"`, `"fr"`) by its
    /// language part.
    pub fn from_tag(tag: &str) -> Self {
        match tag.get(..2) {
            Some("en") => Locale::English,
            Some("de") => Locale::German,
            Some("fr") => Locale::French,
            Some("es") => Locale::Spanish,
            _ => Locale::English,
        }
    }

    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        WEEKDAYS[self as usize][weekday.num_days_from_monday() as usize]
    }

    /// Month name for a zero-based month index (0 = January).
    pub fn month_name(self, month0: usize) -> &'static str {
        MONTHS[self as usize].get(month0).copied().unwrap_or("?")
    }
}

// Monday-first, matching chrono's num_days_from_monday().
const WEEKDAYS: [[&str; 7]; 4] = [
    [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ],
    [
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
        "Sonntag",
    ],
    [
        "lundi",
        "mardi",
        "mercredi",
        "jeudi",
        "vendredi",
        "samedi",
        "dimanche",
    ],
    [
        "lunes",
        "martes",
        "miércoles",
        "jueves",
        "viernes",
        "sábado",
        "domingo",
    ],
];

const MONTHS: [[&str; 12]; 4] = [
    [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
];
