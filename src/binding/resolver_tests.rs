//! Tests for the resolution driver.

use std::collections::HashMap;
use std::time::Duration;

use crate::env_schema;

use super::{BindError, Binding, BoxError, CoerceError, EnvSchema, Environment, SetValue,
    resolve_with};

#[derive(Debug, Default)]
struct LeafConfig {
    host: String,
    port: u16,
    debug: bool,
    timeout: Duration,
    tags: Vec<String>,
    headers: HashMap<String, String>,
}

env_schema!(LeafConfig {
    host: value(env = "HOST,SERVER_HOST", default = "localhost"),
    port: value(env = "PORT", default = "8080"),
    debug: value(env = "DEBUG"),
    timeout: value(env = "TIMEOUT", default = "30s"),
    tags: value(env = "TAGS"),
    headers: value(env = "HEADERS"),
});

fn env(pairs: &[(&str, &str)]) -> Environment {
    pairs.iter().copied().collect()
}

mod precedence {
    use super::*;

    #[test]
    fn env_value_wins_over_default() {
        let mut config = LeafConfig::default();
        resolve_with(&mut config, "", &env(&[("HOST", "example.com")])).unwrap();
        assert_eq!(config.host, "example.com");
    }

    #[test]
    fn default_applies_when_slot_is_zero() {
        let mut config = LeafConfig::default();
        resolve_with(&mut config, "", &env(&[])).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn default_never_overwrites_prepopulated_slot() {
        // Simulates a value sourced from a config file before the pass.
        let mut config = LeafConfig {
            host: "from-file".to_owned(),
            ..LeafConfig::default()
        };
        resolve_with(&mut config, "", &env(&[])).unwrap();
        assert_eq!(config.host, "from-file");
    }

    #[test]
    fn env_value_overwrites_prepopulated_slot() {
        let mut config = LeafConfig {
            host: "from-file".to_owned(),
            ..LeafConfig::default()
        };
        resolve_with(&mut config, "", &env(&[("HOST", "from-env")])).unwrap();
        assert_eq!(config.host, "from-env");
    }

    #[test]
    fn field_without_value_is_left_untouched() {
        let mut config = LeafConfig::default();
        resolve_with(&mut config, "", &env(&[])).unwrap();
        assert!(!config.debug);
        assert!(config.tags.is_empty());
    }

    #[test]
    fn empty_env_value_still_wins() {
        // Presence decides, not content: an empty variable overrides.
        let mut config = LeafConfig {
            host: "from-file".to_owned(),
            ..LeafConfig::default()
        };
        resolve_with(&mut config, "", &env(&[("HOST", "")])).unwrap();
        assert_eq!(config.host, "");
    }
}

mod candidate_names {
    use super::*;

    #[test]
    fn first_match_wins_in_declaration_order() {
        let mut config = LeafConfig::default();
        let variables = env(&[("HOST", "first"), ("SERVER_HOST", "second")]);
        resolve_with(&mut config, "", &variables).unwrap();
        assert_eq!(config.host, "first");
    }

    #[test]
    fn later_candidates_are_consulted() {
        let mut config = LeafConfig::default();
        resolve_with(&mut config, "", &env(&[("SERVER_HOST", "second")])).unwrap();
        assert_eq!(config.host, "second");
    }

    #[test]
    fn prefix_is_prepended_to_every_candidate() {
        let mut config = LeafConfig::default();
        let variables = env(&[("APP_HOST", "prefixed"), ("HOST", "bare")]);
        resolve_with(&mut config, "APP_", &variables).unwrap();
        assert_eq!(config.host, "prefixed");
    }
}

mod required {
    use super::*;

    #[derive(Debug, Default)]
    struct RequiredConfig {
        token: String,
    }

    env_schema!(RequiredConfig {
        token: value(env = "TOKEN", required),
    });

    #[derive(Debug, Default)]
    struct RequiredWithDefault {
        token: String,
    }

    env_schema!(RequiredWithDefault {
        token: value(env = "TOKEN", default = "fallback", required),
    });

    #[test]
    fn missing_required_field_fails() {
        let mut config = RequiredConfig::default();
        let err = resolve_with(&mut config, "", &env(&[])).unwrap_err();
        assert!(matches!(err, BindError::MissingRequired { field: "token" }));
    }

    #[test]
    fn required_field_satisfied_by_env() {
        let mut config = RequiredConfig::default();
        resolve_with(&mut config, "", &env(&[("TOKEN", "secret")])).unwrap();
        assert_eq!(config.token, "secret");
    }

    #[test]
    fn required_field_satisfied_by_nonzero_slot() {
        let mut config = RequiredConfig {
            token: "from-file".to_owned(),
        };
        resolve_with(&mut config, "", &env(&[])).unwrap();
        assert_eq!(config.token, "from-file");
    }

    #[test]
    fn required_wins_over_default() {
        // A required field does not fall back to its declared default.
        let mut config = RequiredWithDefault::default();
        let err = resolve_with(&mut config, "", &env(&[])).unwrap_err();
        assert!(matches!(err, BindError::MissingRequired { field: "token" }));
    }
}

mod failures {
    use super::*;

    #[test]
    fn coercion_failure_names_field_and_raw_value() {
        let mut config = LeafConfig::default();
        let err = resolve_with(&mut config, "", &env(&[("PORT", "not-a-port")])).unwrap_err();
        match err {
            BindError::Coercion { field, raw, source } => {
                assert_eq!(field, "port");
                assert_eq!(raw, "not-a-port");
                assert!(matches!(source, CoerceError::InvalidInt { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pass_aborts_at_first_failing_field() {
        let mut config = LeafConfig::default();
        let variables = env(&[("PORT", "oops"), ("TAGS", "a,b")]);
        let err = resolve_with(&mut config, "", &variables).unwrap_err();
        assert!(matches!(err, BindError::Coercion { field: "port", .. }));
        // The field after the failing one was never reached.
        assert!(config.tags.is_empty());
        // The field before it was.
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn duration_field_rejects_bare_integer() {
        let mut config = LeafConfig::default();
        let err = resolve_with(&mut config, "", &env(&[("TIMEOUT", "5")])).unwrap_err();
        assert!(matches!(
            err,
            BindError::Coercion {
                field: "timeout",
                source: CoerceError::InvalidDuration { .. },
                ..
            }
        ));
    }

    #[test]
    fn map_field_reports_invalid_entry() {
        let mut config = LeafConfig::default();
        let err = resolve_with(&mut config, "", &env(&[("HEADERS", "bad")])).unwrap_err();
        assert!(matches!(
            err,
            BindError::Coercion {
                source: CoerceError::InvalidMapEntry(_),
                ..
            }
        ));
    }
}

mod nesting {
    use super::*;

    #[derive(Debug, Default)]
    struct Inner {
        name: String,
    }

    env_schema!(Inner {
        name: value(env = "INNER_NAME", default = "inner"),
    });

    #[derive(Debug, Default)]
    struct Middle {
        inner: Inner,
        level: u8,
    }

    env_schema!(Middle {
        inner: nested,
        level: value(env = "LEVEL"),
    });

    #[derive(Debug, Default)]
    struct Outer {
        label: String,
        middle: Middle,
    }

    env_schema!(Outer {
        label: value(env = "LABEL"),
        middle: nested,
    });

    #[test]
    fn two_levels_flatten_into_one_pass() {
        let mut config = Outer::default();
        let variables = env(&[("LABEL", "top"), ("INNER_NAME", "deep"), ("LEVEL", "2")]);
        resolve_with(&mut config, "", &variables).unwrap();
        assert_eq!(config.label, "top");
        assert_eq!(config.middle.inner.name, "deep");
        assert_eq!(config.middle.level, 2);
    }

    #[test]
    fn innermost_names_resolve_independently_of_outer_fields() {
        let mut config = Outer::default();
        resolve_with(&mut config, "", &env(&[])).unwrap();
        assert_eq!(config.middle.inner.name, "inner");
        assert_eq!(config.label, "");
    }

    #[test]
    fn prefix_applies_at_every_depth() {
        let mut config = Outer::default();
        resolve_with(&mut config, "APP_", &env(&[("APP_INNER_NAME", "deep")])).unwrap();
        assert_eq!(config.middle.inner.name, "deep");
    }
}

mod custom_setter {
    use super::*;

    /// A comma-free CSV-ish type with its own parsing rules.
    #[derive(Debug, Default)]
    struct UpperList {
        items: Vec<String>,
    }

    impl SetValue for UpperList {
        fn set_value(&mut self, raw: &str) -> Result<(), BoxError> {
            if raw.contains(' ') {
                return Err("spaces are not allowed".into());
            }
            self.items = raw.split('|').map(str::to_uppercase).collect();
            Ok(())
        }

        fn is_unset(&self) -> bool {
            self.items.is_empty()
        }
    }

    #[derive(Debug, Default)]
    struct CustomConfig {
        list: UpperList,
    }

    env_schema!(CustomConfig {
        list: custom(env = "LIST", default = "a|b"),
    });

    #[test]
    fn custom_setter_supersedes_builtin_coercion() {
        let mut config = CustomConfig::default();
        resolve_with(&mut config, "", &env(&[("LIST", "x|y")])).unwrap();
        assert_eq!(config.list.items, ["X", "Y"]);
    }

    #[test]
    fn custom_setter_error_is_passed_through() {
        let mut config = CustomConfig::default();
        let err = resolve_with(&mut config, "", &env(&[("LIST", "x y")])).unwrap_err();
        match err {
            BindError::Coercion { field, source, .. } => {
                assert_eq!(field, "list");
                assert!(matches!(source, CoerceError::Custom(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unset_custom_slot_takes_default() {
        let mut config = CustomConfig::default();
        resolve_with(&mut config, "", &env(&[])).unwrap();
        assert_eq!(config.list.items, ["A", "B"]);
    }

    #[test]
    fn set_custom_slot_keeps_its_value() {
        let mut config = CustomConfig::default();
        config
            .list
            .set_value("keep")
            .expect("direct set_value should succeed");
        resolve_with(&mut config, "", &env(&[])).unwrap();
        assert_eq!(config.list.items, ["KEEP"]);
    }
}

mod boxed_schema {
    use super::*;

    #[test]
    fn boxed_target_dereferences_transparently() {
        let mut config = Box::new(LeafConfig::default());
        resolve_with(&mut config, "", &env(&[("HOST", "boxed")])).unwrap();
        assert_eq!(config.host, "boxed");
    }
}

mod descriptors {
    use super::*;

    #[test]
    fn walk_is_ordered_and_flat() {
        let mut config = LeafConfig::default();
        let names: Vec<&str> = config.bindings().iter().map(Binding::field).collect();
        assert_eq!(
            names,
            ["host", "port", "debug", "timeout", "tags", "headers"]
        );
    }

    #[test]
    fn candidate_list_is_split_on_commas() {
        let mut config = LeafConfig::default();
        let bindings = config.bindings();
        assert_eq!(bindings[0].env_names(), ["HOST", "SERVER_HOST"]);
    }
}
