//! Property tests for the model invariants.

use pickolor::{format_color, parse_color, transform_color, ColorFormat, FormatRequest, TransformKind, Transformation};
use proptest::prelude::*;

fn any_step() -> impl Strategy<Value = Transformation> {
    prop_oneof![
        (-1.0_f64..=1.0).prop_map(Transformation::lighten),
        (-1.0_f64..=1.0).prop_map(Transformation::darken),
        (-1.0_f64..=1.0).prop_map(Transformation::saturate),
        (-1.0_f64..=1.0).prop_map(Transformation::desaturate),
        (-360.0_f64..=360.0).prop_map(Transformation::hue_shift),
        (-1.0_f64..=1.0).prop_map(Transformation::alpha),
    ]
}

fn four_digits(x: f64) -> bool {
    ((x * 10_000.0).round() - x * 10_000.0).abs() < 1e-6
}

proptest! {
    #[test]
    fn transforms_keep_channels_in_range(
        r in 0_u8..=255,
        g in 0_u8..=255,
        b in 0_u8..=255,
        steps in prop::collection::vec(any_step(), 0..8),
    ) {
        let base = parse_color(&format!("rgb({r}, {g}, {b})")).unwrap();
        let out = transform_color(&base, &steps).unwrap();
        prop_assert!((0.0..360.0).contains(&out.hue), "hue {}", out.hue);
        for x in [out.saturation, out.value, out.alpha] {
            prop_assert!((0.0..=1.0).contains(&x), "channel {x}");
            prop_assert!(four_digits(x), "channel {x} not rounded");
        }
        prop_assert_eq!(out.format, ColorFormat::Rgb);
    }

    #[test]
    fn hex_output_reparses_to_same_bytes(r in 0_u8..=255, g in 0_u8..=255, b in 0_u8..=255) {
        let hex = format!("#{r:02x}{g:02x}{b:02x}");
        let model = parse_color(&hex).unwrap();
        let text = format_color(&model, &FormatRequest::to(ColorFormat::Hex)).unwrap();
        prop_assert_eq!(text, hex);
    }

    #[test]
    fn out_of_range_unit_steps_fail(magnitude in 1.0001_f64..100.0, negative in any::<bool>()) {
        let magnitude = if negative { -magnitude } else { magnitude };
        let base = parse_color("#336699").unwrap();
        for kind in [TransformKind::Lighten, TransformKind::Saturate, TransformKind::Alpha] {
            prop_assert!(transform_color(&base, &[Transformation::new(kind, magnitude)]).is_err());
        }
    }
}
