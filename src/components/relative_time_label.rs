use chrono::{DateTime, Utc};
use yew::prelude::*;

use crate::format::compute_display;

#[derive(Properties, PartialEq)]
pub struct RelativeTimeLabelProps {
    /// Absolute timestamp, stored on the element as `data-timestamp`.
    pub timestamp: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Renders a `relative-time` span the page updater will keep current.
#[function_component(RelativeTimeLabel)]
pub fn relative_time_label(props: &RelativeTimeLabelProps) -> Html {
    let text = initial_text(&props.timestamp, Utc::now());

    html! {
        <span
            class={classes!("relative-time", props.class.clone())}
            data-timestamp={props.timestamp.clone()}
        >
            { text }
        </span>
    }
}

/// Text shown before the first refresh; the raw timestamp if it won't parse.
pub fn initial_text(timestamp: &str, now: DateTime<Utc>) -> String {
    compute_display(timestamp, now).unwrap_or_else(|_| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_timestamp;

    #[test]
    fn test_initial_text_formats_parseable_timestamp() {
        let now = parse_timestamp("2024-01-01 05:00:00").unwrap();
        assert_eq!(initial_text("2024-01-01 00:00:00", now), "5 hours ago");
    }

    #[test]
    fn test_initial_text_falls_back_to_raw() {
        assert_eq!(initial_text("last tuesday", Utc::now()), "last tuesday");
    }
}
