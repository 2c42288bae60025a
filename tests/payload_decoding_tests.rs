use approx::assert_relative_eq;
use chart_sync::core::{HoverPoint, RelayoutPatch};
use chart_sync::interaction::HoverEvent;
use chart_sync::SyncError;

#[test]
fn relayout_payload_with_indexed_range_keys() {
    let patch = RelayoutPatch::from_plotly_json(r#"{"xaxis.range[0]": 10.5, "xaxis.range[1]": 88}"#)
        .expect("decode relayout");

    let (low, high) = patch.bounds().expect("both bounds");
    assert_relative_eq!(low, 10.5);
    assert_relative_eq!(high, 88.0);
    assert_eq!(patch.autorange, None);
}

#[test]
fn relayout_payload_with_range_array_and_indexed_override() {
    let patch = RelayoutPatch::from_plotly_json(
        r#"{"xaxis.range": [1, 2], "xaxis.range[1]": 5, "yaxis.range": [0, 1]}"#,
    )
    .expect("decode relayout");

    assert_eq!(patch.bounds(), Some((1.0, 5.0)));
}

#[test]
fn relayout_payload_with_autorange() {
    let patch = RelayoutPatch::from_plotly_json(r#"{"xaxis.autorange": true}"#)
        .expect("decode relayout");

    assert!(patch.requests_autorange());
    assert_eq!(patch.bounds(), None);
}

#[test]
fn relayout_payload_for_other_axes_is_empty() {
    let patch = RelayoutPatch::from_plotly_json(r#"{"yaxis.range[0]": 3, "dragmode": "pan"}"#)
        .expect("decode relayout");

    assert!(patch.is_empty());
}

#[test]
fn partial_relayout_payload_has_no_bounds() {
    let patch =
        RelayoutPatch::from_plotly_json(r#"{"xaxis.range[0]": 3}"#).expect("decode relayout");

    assert_eq!(patch.low, Some(3.0));
    assert_eq!(patch.bounds(), None);
}

#[test]
fn malformed_relayout_payloads_are_rejected() {
    for input in [
        r#"{"xaxis.range": [1]}"#,
        r#"{"xaxis.range[0]": "ten"}"#,
        r#"{"xaxis.autorange": "yes"}"#,
        r#"[1, 2]"#,
        "not json",
    ] {
        let err = RelayoutPatch::from_plotly_json(input).expect_err(input);
        assert!(matches!(err, SyncError::InvalidData(_)), "{input}: {err}");
    }
}

#[test]
fn hover_payload_prefers_pointer_x_value() {
    let event = HoverEvent::from_plotly_json(
        r#"{
            "xvals": [42.5],
            "points": [{"x": 42.0, "pointIndex": 17}, {"x": 43.0, "pointIndex": 18}]
        }"#,
    )
    .expect("decode hover");

    assert_eq!(event.points.len(), 2);
    let point = event.primary_point().expect("first point");
    assert_relative_eq!(point.x_value, 42.5);
    assert_eq!(point.point_index, 17);
}

#[test]
fn hover_payload_falls_back_to_point_x() {
    let event = HoverEvent::from_plotly_json(r#"{"points": [{"x": 7.25, "pointIndex": 3}]}"#)
        .expect("decode hover");

    assert_eq!(event.primary_point(), Some(HoverPoint::new(7.25, 3)));
}

#[test]
fn hover_payload_without_points_decodes_to_empty_event() {
    let event = HoverEvent::from_plotly_json(r#"{"points": []}"#).expect("decode hover");

    assert!(event.primary_point().is_none());
}

#[test]
fn hover_point_without_any_x_value_is_rejected() {
    let err = HoverEvent::from_plotly_json(r#"{"points": [{"pointIndex": 3}]}"#)
        .expect_err("no x-value");

    assert!(matches!(err, SyncError::InvalidData(_)));
}

#[test]
fn later_hover_points_without_x_value_are_dropped() {
    let event = HoverEvent::from_plotly_json(
        r#"{"points": [{"x": 12.0, "pointIndex": 5}, {"pointIndex": 6}]}"#,
    )
    .expect("first point is usable");

    assert_eq!(event.points.len(), 1);
    assert_eq!(event.primary_point(), Some(HoverPoint::new(12.0, 5)));
}
