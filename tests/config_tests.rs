// Host-side tests for card configuration defaults and option merging.

use floating_card::core::{
    color_from_number, srgb_hex_to_linear, CardConfig, CardOptions, VisualizerError,
};

#[test]
fn defaults_match_documented_values() {
    let c = CardConfig::default();
    assert_eq!(c.card_width, 2.5);
    assert_eq!(c.card_height, 3.5);
    assert_eq!(c.card_depth, 0.05);
    assert_eq!(c.wobble_speed, 0.8);
    assert_eq!(c.wobble_amount, 0.08);
    assert_eq!(c.float_speed, 0.5);
    assert_eq!(c.float_amount, 0.1);
    assert_eq!(c.mouse_influence, 0.5);
    assert_eq!(c.interaction_duration, 0.0);
    assert_eq!(c.wobble_during_interaction_amount, 0.2);
    assert_eq!(c.glossiness, 0.9);
    assert_eq!(c.reflectivity, 0.7);
    assert_eq!(c.env_map_intensity, 1.2);
}

#[test]
fn empty_options_resolve_to_defaults() {
    assert_eq!(
        CardConfig::from_options(&CardOptions::default()),
        CardConfig::default()
    );
}

#[test]
fn merge_overwrites_only_present_fields() {
    let mut c = CardConfig::default();
    let changes = c.merge(&CardOptions {
        wobble_speed: Some(2.0),
        card_color: Some(0xff0000),
        ..Default::default()
    });
    assert_eq!(c.wobble_speed, 2.0);
    assert_eq!(c.card_color, 0xff0000);
    assert_eq!(c.wobble_amount, 0.08);
    assert!(changes.card_color);
    assert!(!changes.edge_color && !changes.glossiness);
    assert!(changes.any());
}

#[test]
fn non_material_merge_reports_no_material_changes() {
    let mut c = CardConfig::default();
    let changes = c.merge(&CardOptions {
        float_amount: Some(0.3),
        interaction_duration: Some(500.0),
        ..Default::default()
    });
    assert!(!changes.any());
    assert_eq!(c.interaction_duration, 500.0);
}

#[test]
fn degenerate_values_are_taken_as_given() {
    let c = CardConfig::from_options(&CardOptions {
        card_width: Some(-1.0),
        glossiness: Some(1.5),
        ..Default::default()
    });
    assert_eq!(c.card_width, -1.0);
    assert_eq!(c.glossiness, 1.5);
}

#[test]
fn options_parse_from_camel_case_json() {
    let opts: CardOptions = serde_json::from_str(
        r#"{"cardColor": 16711680, "wobbleDuringInteractionAmount": 0.5, "envMapIntensity": 2, "title": "ignored"}"#,
    )
    .unwrap();
    assert_eq!(opts.card_color, Some(0xff0000));
    assert_eq!(opts.wobble_during_interaction_amount, Some(0.5));
    assert_eq!(opts.env_map_intensity, Some(2.0));
    assert_eq!(opts.card_width, None);
}

#[test]
fn srgb_conversion_endpoints() {
    let white = srgb_hex_to_linear(0xffffff);
    let black = srgb_hex_to_linear(0x000000);
    assert!((white - glam::Vec3::ONE).length() < 1e-6);
    assert_eq!(black, glam::Vec3::ZERO);
    // Mid-grey is darker in linear space
    let grey = srgb_hex_to_linear(0x808080);
    assert!((grey.x - 0.2158).abs() < 1e-3);
}

#[test]
fn fractional_and_negative_colors_degrade_instead_of_failing() {
    let opts = CardOptions::deserialize_from(serde_json::json!({
        "cardColor": 16711680.7,
        "edgeColor": -1
    }))
    .unwrap();
    assert_eq!(opts.card_color, Some(0xff0000));
    assert_eq!(opts.edge_color, Some(0xffffff));
}

#[test]
fn color_numbers_wrap_to_24_bits() {
    assert_eq!(color_from_number(0x2196f3 as f64), 0x2196f3);
    assert_eq!(color_from_number(0x1_00ff00 as f64), 0x00ff00);
    assert_eq!(color_from_number(f64::NAN), 0);
    assert_eq!(color_from_number(f64::INFINITY), 0);
}

#[test]
fn mistyped_options_are_invalid_options() {
    let err = CardOptions::deserialize_from(serde_json::json!({ "wobbleSpeed": "fast" }))
        .unwrap_err();
    assert!(matches!(err, VisualizerError::InvalidOptions(_)));
}

#[test]
fn options_read_from_any_serde_source() {
    let opts = CardOptions::deserialize_from(serde_json::json!({
        "glossiness": 0.4,
        "interactionDuration": 250
    }))
    .unwrap();
    assert_eq!(opts.glossiness, Some(0.4));
    assert_eq!(opts.interaction_duration, Some(250.0));
    assert_eq!(opts.card_color, None);
}
