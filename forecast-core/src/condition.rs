//! Maps provider condition texts onto the artwork shown next to a temperature.

use crate::model::Condition;

/// Display asset for a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    PartlyCloudy,
    ModerateRain,
    HeavyRain,
    Sun,
    Cloud,
    Mist,
    /// Anything the table does not know about.
    Other,
}

impl Asset {
    pub fn file_name(self) -> &'static str {
        match self {
            Asset::PartlyCloudy => "partlycloudy.png",
            Asset::ModerateRain | Asset::Other => "moderaterain.png",
            Asset::HeavyRain => "heavyrain.png",
            Asset::Sun => "sun.png",
            Asset::Cloud => "cloud.png",
            Asset::Mist => "mist.png",
        }
    }

    /// Single-glyph stand-in for terminals.
    pub fn glyph(self) -> &'static str {
        match self {
            Asset::PartlyCloudy => "⛅",
            Asset::ModerateRain | Asset::Other => "🌦",
            Asset::HeavyRain => "🌧",
            Asset::Sun => "☀",
            Asset::Cloud => "☁",
            Asset::Mist => "🌫",
        }
    }
}

/// Texts are matched exactly as WeatherAPI.com spells them.
fn lookup(text: &str) -> Option<Asset> {
    let asset = match text {
        "Partly cloudy" => Asset::PartlyCloudy,
        "Moderate rain"
        | "Patchy rain possible"
        | "Patchy rain nearby"
        | "Light rain"
        | "Moderate rain at times" => Asset::ModerateRain,
        "Heavy rain"
        | "Heavy rain at times"
        | "Moderate or heavy freezing rain"
        | "Moderate or heavy rain shower"
        | "Moderate or heavy rain with thunder" => Asset::HeavyRain,
        "Sunny" | "Clear" => Asset::Sun,
        "Overcast" | "Cloudy" => Asset::Cloud,
        "Mist" | "Fog" => Asset::Mist,
        _ => return None,
    };
    Some(asset)
}

/// Never fails: a missing condition, missing text or unknown text all give [`Asset::Other`].
pub fn map_condition(condition: Option<&Condition>) -> Asset {
    condition
        .and_then(|c| c.text.as_deref())
        .and_then(lookup)
        .unwrap_or(Asset::Other)
}
