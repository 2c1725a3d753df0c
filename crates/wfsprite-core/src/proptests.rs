use crate::axes::{VariationAxisController, AXES};
use crate::color::Color;
use crate::gradient::{Gradient, GradientKind};
use crate::sequence::tokenize;
use proptest::prelude::*;

// Property: list notation never yields empty or padded items
proptest! {
    #[test]
    fn prop_list_items_trimmed(s in "[a-z0-9 ,]{0,40}") {
        let items = tokenize(&s);
        if s.contains(',') {
            for item in &items {
                prop_assert!(!item.is_empty());
                prop_assert_eq!(item.trim(), item.as_str());
            }
        } else {
            prop_assert_eq!(items.len(), s.chars().count());
        }
    }
}

// Property: character mode loses nothing
proptest! {
    #[test]
    fn prop_character_mode_concatenates_back(s in "\\PC{0,20}") {
        prop_assume!(!s.contains(','));
        let items = tokenize(&s);
        prop_assert_eq!(items.concat(), s);
    }
}

// Property: any numeric input lands on the step grid inside the range
proptest! {
    #[test]
    fn prop_axis_values_normalized(axis_idx in 0usize..AXES.len(), raw in -5000.0f32..5000.0) {
        let axis = &AXES[axis_idx];
        let mut ctl = VariationAxisController::new();
        let value = ctl.set(axis.tag, &raw.to_string()).unwrap();
        prop_assert!(value >= axis.min && value <= axis.max);
        prop_assert_eq!(ctl.value(axis.tag), Some(value));

        if axis.tag == "ital" {
            prop_assert!(value == 0.0 || value == 1.0);
        } else if value > axis.min && value < axis.max {
            let steps = value as f64 / axis.step() as f64;
            prop_assert!((steps - steps.round()).abs() < 1e-3);
        }
    }
}

// Property: garbage never changes stored state
proptest! {
    #[test]
    fn prop_axis_rejects_non_numeric(raw in "[a-zA-Z_]{1,8}") {
        prop_assume!(raw.parse::<f32>().is_err());
        let mut ctl = VariationAxisController::new();
        ctl.enable();
        let before = ctl.clone();
        prop_assert!(ctl.set("wght", &raw).is_err());
        prop_assert_eq!(ctl, before);
    }
}

// Property: stops stay sorted and at least two survive any edit sequence
proptest! {
    #[test]
    fn prop_gradient_invariants(ops in prop::collection::vec((0u8..3, 0usize..6, -0.5f32..1.5), 0..30)) {
        let mut g = Gradient::two_color(GradientKind::Linear, Color::black(), Color::white());
        for (op, index, offset) in ops {
            match op {
                0 => {
                    g.add_stop(offset, Color::rgb(10, 20, 30));
                },
                1 => {
                    let _ = g.update_stop(index, Some(offset), None);
                },
                _ => {
                    let _ = g.remove_stop(index);
                },
            }
            prop_assert!(g.stops().len() >= 2);
            prop_assert!(g.stops().windows(2).all(|w| w[0].offset <= w[1].offset));
        }
        let resolved = g.resolved_stops().unwrap();
        prop_assert!(resolved.iter().all(|s| (0.0..=1.0).contains(&s.offset)));
    }
}
