use rand::Rng;
use regex::Regex;

// Unit vocabulary with plausible substitutes, checked in order.
static UNIT_ALTERNATIVES: &[(&str, [&str; 3])] = &[
    ("m/s", ["km/h", "cm/s", "m/s²"]),
    ("m/s²", ["m/s", "km/h²", "cm/s²"]),
    ("Newton", ["Joule", "Watt", "Pascal"]),
    ("Joule", ["Newton", "Watt", "Pascal"]),
    ("Watt", ["Joule", "Newton", "Ampere"]),
    ("Hz", ["dB", "m/s", "Pa"]),
    ("kg", ["N", "g", "lb"]),
];

static GENERIC_DISTRACTORS: &[&str] = &[
    "Cannot be determined",
    "None of the above",
    "All of the above",
    "Not applicable",
];

/// Produce exactly `n` plausible wrong answers for `correct`.
///
/// Strategies accumulate in order: unit substitution, numeric perturbation,
/// then the generic fallback list (repetition avoided while any unused
/// generic remains). The result is truncated to exactly `n`.
pub fn distractors(correct: &str, n: usize, rng: &mut impl Rng) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for (unit, alternatives) in UNIT_ALTERNATIVES {
        if !correct.contains(unit) {
            continue;
        }
        for alt in alternatives {
            if out.len() >= n {
                break;
            }
            let candidate = correct.replace(unit, alt);
            if candidate != correct {
                out.push(candidate);
            }
        }
    }

    if out.len() < n {
        let number = Regex::new(r"\d+\.?\d*").unwrap();
        if let Some(found) = number.find(correct) {
            if let Ok(value) = found.as_str().parse::<f64>() {
                for perturbed in [value * 2.0, value / 2.0, value + 10.0, value - 5.0] {
                    if perturbed > 0.0 && out.len() < n {
                        let candidate = correct.replace(found.as_str(), &format_number(perturbed));
                        if candidate != correct {
                            out.push(candidate);
                        }
                    }
                }
            }
        }
    }

    while out.len() < n {
        let generic = GENERIC_DISTRACTORS[rng.gen_range(0..GENERIC_DISTRACTORS.len())];
        let all_used = GENERIC_DISTRACTORS.iter().all(|g| out.iter().any(|d| d == g));
        if all_used || !out.iter().any(|d| d == generic) {
            out.push(generic.to_string());
        }
    }

    out.truncate(n);
    out
}

// Whole values render without a decimal point, others to one decimal place.
fn format_number(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

/// One structural edit that turns a formula into a wrong variant. When the
/// chosen edit does not apply, a random suffix guarantees the result still
/// differs from the input.
pub fn modify_formula(formula: &str, rng: &mut impl Rng) -> String {
    let modified = match rng.gen_range(0..6) {
        0 => formula.replace('×', "+"),
        1 => formula.replace('/', "×"),
        2 => formula.replace('+', "-"),
        3 => formula.replace('²', "³"),
        4 => format!("{formula} + 1"),
        _ => format!("2{formula}"),
    };

    if modified == formula {
        let suffixes = [" - 1", " + 2", "/2", "×2"];
        return format!("{formula}{}", suffixes[rng.gen_range(0..suffixes.len())]);
    }

    modified
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn unit_substitution_produces_unit_variants() {
        let result = distractors("10 m/s", 3, &mut rng());
        assert_eq!(result, vec!["10 km/h", "10 cm/s", "10 m/s²"]);
        assert!(result.iter().all(|d| d != "10 m/s"));
    }

    #[test]
    fn numeric_perturbation_covers_all_four_variations() {
        let result = distractors("The value is 20", 4, &mut rng());
        assert_eq!(
            result,
            vec![
                "The value is 40",
                "The value is 10",
                "The value is 30",
                "The value is 15"
            ]
        );
    }

    #[test]
    fn non_positive_perturbations_fall_back_to_generics() {
        // 4 - 5 goes negative, so only three numeric variants survive.
        let result = distractors("4", 4, &mut rng());
        assert_eq!(result.len(), 4);
        assert!(result.contains(&"8".to_string()));
        assert!(result.contains(&"2".to_string()));
        assert!(result.contains(&"14".to_string()));
        assert!(result.iter().any(|d| GENERIC_DISTRACTORS.contains(&d.as_str())));
    }

    #[test]
    fn fractional_values_render_to_one_decimal() {
        let result = distractors("5", 4, &mut rng());
        // 5 / 2 renders as 2.5, the whole values without a decimal point.
        assert!(result.contains(&"2.5".to_string()));
        assert!(result.contains(&"10".to_string()));
    }

    #[test]
    fn generics_avoid_repetition_while_possible() {
        let result = distractors("plain text answer", 4, &mut rng());
        assert_eq!(result.len(), 4);
        let unique: std::collections::HashSet<&String> = result.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn always_returns_exactly_n() {
        for n in 0..=4 {
            assert_eq!(distractors("42 m/s", n, &mut rng()).len(), n);
        }
    }

    #[test]
    fn modified_formula_always_differs_from_input() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_ne!(modify_formula("ma", &mut rng), "ma");
            assert_ne!(modify_formula("d/t", &mut rng), "d/t");
            assert_ne!(modify_formula("½mv²", &mut rng), "½mv²");
        }
    }

    #[test]
    fn modify_formula_applies_structural_edits() {
        let mut found_swap = false;
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            if modify_formula("d/t", &mut rng) == "d×t" {
                found_swap = true;
                break;
            }
        }
        assert!(found_swap);
    }
}
