//! Tests for schema walking and the `env_schema!` descriptor table.

use chrono::{DateTime, TimeZone, Utc};

use crate::env_schema;

use super::{Binding, EnvSchema, Environment, resolve_with};

fn env(pairs: &[(&str, &str)]) -> Environment {
    pairs.iter().copied().collect()
}

mod rule_table {
    use super::*;

    #[derive(Debug, Default)]
    struct Rules {
        plain: String,
        listed: Vec<String>,
        stamped: DateTime<Utc>,
        described: u32,
    }

    env_schema!(Rules {
        plain: value,
        listed: value(env = "LISTED", separator = ";"),
        stamped: value(env = "STAMPED", layout = "%Y-%m-%d %H:%M:%S %z"),
        described: value(env = "DESCRIBED", default = "7", describe = "a small number"),
    });

    #[test]
    fn rules_are_reflected_in_descriptors() {
        let mut rules = Rules::default();
        let bindings = rules.bindings();

        assert_eq!(bindings[0].field(), "plain");
        assert!(bindings[0].env_names().is_empty());

        assert_eq!(bindings[1].env_names(), ["LISTED"]);

        assert_eq!(bindings[3].default_value(), Some("7"));
        assert_eq!(bindings[3].description(), Some("a small number"));
        assert!(!bindings[3].is_required());
    }

    #[test]
    fn separator_rule_applies_to_values() {
        let mut rules = Rules::default();
        resolve_with(&mut rules, "", &env(&[("LISTED", "a;b,c")])).unwrap();
        assert_eq!(rules.listed, ["a", "b,c"]);
    }

    #[test]
    fn layout_rule_applies_to_timestamps() {
        let mut rules = Rules::default();
        resolve_with(&mut rules, "", &env(&[("STAMPED", "2024-03-01 12:00:00 +0000")]))
            .unwrap();
        assert_eq!(
            rules.stamped,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn field_without_env_rule_is_not_environment_bindable() {
        let mut rules = Rules::default();
        resolve_with(&mut rules, "", &env(&[("PLAIN", "ignored")])).unwrap();
        assert_eq!(rules.plain, "");
    }
}

mod skipped_fields {
    use super::*;

    #[derive(Debug, Default)]
    struct Partial {
        bound: String,
        unbound: String,
    }

    // `unbound` is deliberately absent from the table.
    env_schema!(Partial {
        bound: value(env = "BOUND"),
    });

    #[test]
    fn unlisted_fields_are_skipped_silently() {
        let mut config = Partial {
            bound: String::new(),
            unbound: "untouched".to_owned(),
        };
        resolve_with(&mut config, "", &env(&[("BOUND", "set"), ("UNBOUND", "set")]))
            .unwrap();
        assert_eq!(config.bound, "set");
        assert_eq!(config.unbound, "untouched");
    }
}

mod handwritten_impl {
    use super::*;

    #[derive(Debug, Default)]
    struct Manual {
        primary: String,
        fallback: String,
    }

    // A hand-written walk can compute rules the macro table cannot.
    impl EnvSchema for Manual {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            vec![
                Binding::value("primary", &mut self.primary).with_env("PRIMARY"),
                Binding::value("fallback", &mut self.fallback)
                    .with_env("FALLBACK")
                    .with_default("none"),
            ]
        }
    }

    #[test]
    fn handwritten_schema_resolves_like_a_generated_one() {
        let mut config = Manual::default();
        resolve_with(&mut config, "", &env(&[("PRIMARY", "p")])).unwrap();
        assert_eq!(config.primary, "p");
        assert_eq!(config.fallback, "none");
    }
}

mod trailing_commas {
    use super::*;

    #[derive(Debug, Default)]
    struct Trailing {
        one: String,
    }

    // Trailing commas inside the rule list and the field list both parse.
    env_schema!(Trailing {
        one: value(env = "ONE",),
    });

    #[test]
    fn table_with_trailing_commas_works() {
        let mut config = Trailing::default();
        resolve_with(&mut config, "", &env(&[("ONE", "1")])).unwrap();
        assert_eq!(config.one, "1");
    }
}
