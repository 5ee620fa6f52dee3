use super::*;
use serde_json::json;

#[test]
fn default_is_light_with_identity_filter() {
    let theme = Theme::default();
    assert!(!theme.dark);
    assert_eq!(theme.filter, Filter::none());
    assert_eq!(theme.filter.value, "none");
}

#[test]
fn dark_inverted_pairs_the_flag_with_inversion() {
    let theme = Theme::dark_inverted();
    assert!(theme.dark);
    assert_eq!(theme.filter.kind, FilterKind::Invert);
    assert_eq!(theme.filter.value, "invert(1)");
}

#[test]
fn theme_serializes_to_the_stored_shape() {
    let value = serde_json::to_value(Theme::dark_inverted()).expect("serialize");
    assert_eq!(
        value,
        json!({"dark": true, "filter": {"type": "INVERT", "value": "invert(1)"}})
    );
}

#[test]
fn theme_json_round_trip() {
    let original = Theme {
        dark: true,
        filter: Filter { kind: FilterKind::HueRotate, value: "hue-rotate(90deg)".into() },
    };
    let json = serde_json::to_string(&original).expect("serialize");
    let restored: Theme = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, original);
}

#[test]
fn filter_kind_wire_names() {
    let cases = [
        (FilterKind::Blur, "BLUR"),
        (FilterKind::Brightness, "BRIGHTNESS"),
        (FilterKind::Contrast, "CONTRAST"),
        (FilterKind::DropShadow, "DROP_SHADOW"),
        (FilterKind::Grayscale, "GRAYSCALE"),
        (FilterKind::HueRotate, "HUE_ROTATE"),
        (FilterKind::Invert, "INVERT"),
        (FilterKind::None, "NONE"),
        (FilterKind::Opacity, "OPACITY"),
        (FilterKind::Saturate, "SATURATE"),
        (FilterKind::Sepia, "SEPIA"),
        (FilterKind::Url, "URL"),
    ];
    for (kind, name) in cases {
        assert_eq!(kind.as_str(), name);
        assert_eq!(serde_json::to_value(kind).expect("serialize"), json!(name));
    }
}

#[test]
fn unknown_filter_kind_fails_the_shape_check() {
    let result = serde_json::from_value::<Filter>(json!({"type": "SPARKLE", "value": "sparkle(1)"}));
    assert!(result.is_err());
}
