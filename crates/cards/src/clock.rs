use std::time::{SystemTime, UNIX_EPOCH};

use cube_content::{
    CardContent, CardDescriptor, CardFragment, ContentError, ContentId, ContentResult, Properties,
};

use crate::props;

const ID: &str = "Clock";
const SECONDS_PER_DAY: u64 = 86_400;

/// Wall clock in UTC, 24h by default.
#[derive(Debug, Default)]
pub struct ClockCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HourFormat {
    H24,
    H12,
}

impl ClockCard {
    fn render_at(&self, properties: &Properties, seconds_of_day: u64) -> ContentResult<CardFragment> {
        let id = ContentId::new(ID);
        let format = match props::string(&id, properties, "format")? {
            None | Some("24h") => HourFormat::H24,
            Some("12h") => HourFormat::H12,
            Some(other) => {
                return Err(ContentError::invalid(
                    &id,
                    format!("unknown clock format `{other}`"),
                ))
            }
        };
        let title = props::string(&id, properties, "title")?.unwrap_or("Clock");

        let seconds = seconds_of_day % SECONDS_PER_DAY;
        let (h, m, s) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
        let time = match format {
            HourFormat::H24 => format!("{h:02}:{m:02}:{s:02} UTC"),
            HourFormat::H12 => {
                let suffix = if h < 12 { "AM" } else { "PM" };
                let h12 = match h % 12 {
                    0 => 12,
                    other => other,
                };
                format!("{h12}:{m:02}:{s:02} {suffix} UTC")
            }
        };

        Ok(CardFragment::new(id, title).line(time))
    }
}

impl CardContent for ClockCard {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(ID, "Clock", "Current time of day.")
    }

    fn render(&self, properties: &Properties) -> ContentResult<CardFragment> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.render_at(properties, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: serde_json::Value) -> Properties {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn formats_24h_by_default() {
        let fragment = ClockCard.render_at(&Properties::new(), 13 * 3600 + 5 * 60 + 9).unwrap();
        assert_eq!(fragment.lines, ["13:05:09 UTC"]);
        assert_eq!(fragment.title, "Clock");
    }

    #[test]
    fn formats_12h_on_request() {
        let p = props(json!({ "format": "12h", "title": "Local" }));
        let midnight = ClockCard.render_at(&p, 0).unwrap();
        assert_eq!(midnight.lines, ["12:00:00 AM UTC"]);
        assert_eq!(midnight.title, "Local");
        let afternoon = ClockCard.render_at(&p, SECONDS_PER_DAY + 15 * 3600).unwrap();
        assert_eq!(afternoon.lines, ["3:00:00 PM UTC"]);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = ClockCard
            .render_at(&props(json!({ "format": "36h" })), 0)
            .unwrap_err();
        assert!(matches!(err, ContentError::InvalidProperties { .. }));
        assert!(ClockCard.render_at(&props(json!({ "format": 12 })), 0).is_err());
    }
}
