//! Weather-condition glyph selection.
//!
//! The face renders conditions with a Meteocons-style icon font whose
//! character codes map to weather symbols. The phone sends the leading
//! two characters of the OpenWeatherMap icon id (`"01"`..`"50"`);
//! day/night variants are folded together because the id buffer keeps
//! only those two characters.

/// Glyph character for a two-character icon id.
pub fn for_icon_id(id: &str) -> char {
    match id {
        "01" => 'B', // clear sky
        "02" => 'H', // few clouds
        "03" => 'N', // scattered clouds
        "04" => 'Y', // broken clouds
        "09" => 'R', // shower rain
        "10" => 'Q', // rain
        "11" => 'P', // thunderstorm
        "13" => 'W', // snow
        "50" => 'M', // mist
        _ => ')',    // n/a
    }
}
