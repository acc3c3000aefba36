use std::collections::HashMap;

use casegrid_core::{
    case_fields, generate_cases, CaseFields, CaseTable, CollectingSink, ConfigError, GenError,
    Generator, GeneratorConfig, PanicSink,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Flags {
    enabled: bool,
    size: i32,
    aux: i32,
}

impl CaseTable for Flags {
    fn case_fields<'a>() -> CaseFields<'a, Self>
    where
        Self: 'a,
    {
        CaseFields::new()
            .field("enabled", "[true, false]", |c: &mut Flags| &mut c.enabled)
            .field("size", "[1, 2]", |c: &mut Flags| &mut c.size)
    }
}

fn flags(enabled: bool, size: i32, aux: i32) -> Flags {
    Flags { enabled, size, aux }
}

#[test]
fn test_lexicographic_order() {
    let mut tc = Flags::default();
    let mut generated = Vec::new();
    let mut gen = generate_cases(&mut tc);
    while gen.next() {
        generated.push(gen.record().clone());
    }

    let expected = vec![
        flags(true, 1, 0),
        flags(true, 2, 0),
        flags(false, 1, 0),
        flags(false, 2, 0),
    ];
    assert_eq!(generated, expected);
}

#[test]
fn test_untouched_fields_keep_value() {
    let mut generated = Vec::new();
    for aux in 1..=3 {
        let mut tc = Flags {
            aux,
            ..Flags::default()
        };
        generated.extend(Generator::for_record(&mut tc).collect_cases());
    }

    assert_eq!(generated.len(), 12);
    assert_eq!(generated[0], flags(true, 1, 1));
    assert_eq!(generated[5], flags(true, 2, 2));
    assert_eq!(generated[11], flags(false, 2, 3));
    for (i, case) in generated.iter().enumerate() {
        assert_eq!(case.aux, i as i32 / 4 + 1);
    }
}

#[test]
fn test_record_holds_last_combination_after_exhaustion() {
    let mut tc = flags(false, 0, 5);
    {
        let mut gen = generate_cases(&mut tc);
        while gen.next() {}
        assert!(!gen.next());
    }
    assert_eq!(tc, flags(false, 2, 5));
}

#[test]
fn test_product_size() {
    #[derive(Debug, Default, Clone)]
    struct Wide {
        a: u8,
        b: String,
        c: f64,
        d: bool,
    }

    let fields = case_fields!(Wide {
        a: "[1, 2, 3]",
        b: r#"["x", "y"]"#,
        c: "[0.5, 1.5, 2.5, 3.5]",
        d: "[true, false]",
    });

    let mut tc = Wide::default();
    let mut gen = Generator::new(&mut tc, fields, PanicSink);
    assert_eq!(gen.combinations_total(), 48);
    let mut count = 0;
    while gen.next() {
        count += 1;
    }
    assert_eq!(count, 48);
}

#[test]
fn test_no_candidate_fields() {
    #[derive(Debug, Default)]
    struct Plain {
        value: i32,
    }

    let mut tc = Plain { value: 7 };
    let mut gen = Generator::new(&mut tc, CaseFields::new(), PanicSink);
    assert!(!gen.next());
    assert_eq!(gen.combinations_total(), 0);
    assert_eq!(gen.record().value, 7);
}

#[test]
fn test_empty_candidate_list_yields_nothing() {
    let fields = CaseFields::new()
        .field("enabled", "[true, false]", |c: &mut Flags| &mut c.enabled)
        .field("size", "[]", |c: &mut Flags| &mut c.size);
    let mut tc = flags(false, 9, 0);
    let mut gen = Generator::new(&mut tc, fields, PanicSink);
    assert!(!gen.next());
    assert_eq!(gen.record(), &flags(false, 9, 0));
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Complex {
    slice: Vec<i32>,
    kv: HashMap<String, i32>,
}

impl CaseTable for Complex {
    fn case_fields<'a>() -> CaseFields<'a, Self>
    where
        Self: 'a,
    {
        case_fields!(Complex {
            slice: "[[1,2,3],[9,8],[0]]",
            kv: r#"[{"one":1, "two":2}, {"zero":0}]"#,
        })
    }
}

fn map(entries: &[(&str, i32)]) -> HashMap<String, i32> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_complex_types() {
    let mut tc = Complex::default();
    let generated = generate_cases(&mut tc).collect_cases();

    let a1 = vec![1, 2, 3];
    let a2 = vec![9, 8];
    let a3 = vec![0];
    let m1 = map(&[("one", 1), ("two", 2)]);
    let m2 = map(&[("zero", 0)]);

    let expected: Vec<Complex> = [
        (&a1, &m1),
        (&a1, &m2),
        (&a2, &m1),
        (&a2, &m2),
        (&a3, &m1),
        (&a3, &m2),
    ]
    .into_iter()
    .map(|(slice, kv)| Complex {
        slice: slice.clone(),
        kv: kv.clone(),
    })
    .collect();
    assert_eq!(generated, expected);
}

#[test]
fn test_container_independence() {
    let mut tc = Complex::default();
    let mut gen = generate_cases(&mut tc);

    assert!(gen.next());
    let mut first = gen.record().clone();
    assert!(gen.next());
    let second = gen.record().clone();

    // Both combinations share the same slice candidate.
    assert_eq!(first.slice, second.slice);
    first.slice.push(100);
    first.kv.insert("extra".into(), 1);
    assert_eq!(second.slice, vec![1, 2, 3]);
    assert_eq!(gen.record().slice, vec![1, 2, 3]);

    let rest = gen.collect_cases();
    assert_eq!(rest.len(), 4);
    assert_eq!(rest[0].slice, vec![9, 8]);
    assert!(rest.iter().all(|c| !c.kv.contains_key("extra")));
}

#[test]
fn test_reassignment_builds_fresh_container() {
    let mut tc = Complex::default();
    let mut gen = generate_cases(&mut tc);
    assert!(gen.next());
    let before = gen.record().slice.as_ptr();
    gen.reset();
    assert!(gen.next());
    // Same candidate, new allocation.
    assert_eq!(gen.record().slice, vec![1, 2, 3]);
    assert_ne!(gen.record().slice.as_ptr(), before);
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Nested {
    enabled: bool,
    slice: Vec<Vec<i32>>,
    kv: HashMap<String, Vec<i32>>,
}

fn nested_fields() -> CaseFields<'static, Nested> {
    let literals: HashMap<String, String> =
        serde_json::from_str(include_str!("fixtures/nested_candidates.json")).unwrap();
    CaseFields::new()
        .field("enabled", literals["enabled"].clone(), |c: &mut Nested| &mut c.enabled)
        .field("slice", literals["slice"].clone(), |c: &mut Nested| &mut c.slice)
        .field("kv", literals["kv"].clone(), |c: &mut Nested| &mut c.kv)
}

#[test]
fn test_nested_complex_types() {
    let mut tc = Nested::default();
    let generated = Generator::new(&mut tc, nested_fields(), PanicSink).collect_cases();

    let a1 = vec![vec![1], vec![2, 3]];
    let a2 = vec![vec![9], vec![8]];
    let m1: HashMap<String, Vec<i32>> = [("1-2", vec![1, 2]), ("3-4", vec![3, 4])]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let m2: HashMap<String, Vec<i32>> = [("5-7".to_string(), vec![5, 6, 7])].into_iter().collect();

    let mut expected = Vec::new();
    for enabled in [true, false] {
        for slice in [&a1, &a2] {
            for kv in [&m1, &m2] {
                expected.push(Nested {
                    enabled,
                    slice: slice.clone(),
                    kv: kv.clone(),
                });
            }
        }
    }
    assert_eq!(generated, expected);
}

#[test]
fn test_shape_mismatch_is_reported() {
    let sink = CollectingSink::new();
    let fields = CaseFields::new().field("slice", "[5]", |c: &mut Complex| &mut c.slice);
    let mut tc = Complex {
        slice: vec![42],
        ..Complex::default()
    };
    let mut gen = Generator::new(&mut tc, fields, sink.clone());
    assert!(!gen.next());
    assert!(gen.is_failed());
    assert_eq!(gen.record().slice, vec![42]);

    let errors = sink.take();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        GenError::Assign { field, source } => {
            assert_eq!(field, "slice");
            assert!(source.is_shape_mismatch());
        }
        other => panic!("expected Assign error, got {other:?}"),
    }
}

#[test]
#[should_panic(expected = "field 'slice'")]
fn test_shape_mismatch_panics_with_default_sink() {
    let fields = CaseFields::new().field("slice", "[5]", |c: &mut Complex| &mut c.slice);
    let mut tc = Complex::default();
    let mut gen = Generator::new(&mut tc, fields, PanicSink);
    gen.next();
}

#[test]
fn test_conversion_error_names_types() {
    let sink = CollectingSink::new();
    let fields = CaseFields::new()
        .field("enabled", "[true]", |c: &mut Flags| &mut c.enabled)
        .field("size", r#"[1, "two"]"#, |c: &mut Flags| &mut c.size);
    let mut tc = Flags::default();
    let mut gen = Generator::new(&mut tc, fields, sink.clone());
    assert!(gen.next());
    assert!(!gen.next());

    let errors = sink.take();
    assert_eq!(
        errors[0].to_string(),
        "field 'size': cannot convert value '\"two\"' of type 'string' to type 'i32'"
    );
    assert_eq!(errors[0].field(), Some("size"));
}

#[test]
fn test_fractional_into_integer_is_rejected() {
    let fields = CaseFields::new().field("size", "[1.5]", |c: &mut Flags| &mut c.size);
    let mut tc = Flags::default();
    let mut gen = Generator::new(&mut tc, fields, CollectingSink::new());
    let result = gen.try_next();
    assert!(matches!(result, Err(GenError::Assign { .. })));
}

#[test]
fn test_decode_failure_at_construction() {
    let sink = CollectingSink::new();
    let fields = CaseFields::new().field("size", "[1, 2", |c: &mut Flags| &mut c.size);
    let mut tc = Flags::default();
    let mut gen = Generator::new(&mut tc, fields, sink.clone());
    assert!(gen.is_failed());
    assert!(!gen.next());

    let errors = sink.take();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        GenError::Config(ConfigError::Decode { field, .. }) if field == "size"
    ));
}

#[test]
fn test_try_new_returns_config_error() {
    let fields = CaseFields::new().field("size", r#"{"a": 1}"#, |c: &mut Flags| &mut c.size);
    let mut tc = Flags::default();
    let result = Generator::try_new(&mut tc, fields, &GeneratorConfig::default(), PanicSink);
    assert!(matches!(result, Err(ConfigError::Decode { .. })));
}

#[test]
fn test_config_limit_from_fixture() {
    let config = GeneratorConfig::from_json(include_str!("fixtures/generator_config.json")).unwrap();
    assert_eq!(config.max_combinations, Some(8));

    let mut tc = Nested::default();
    assert!(Generator::try_new(&mut tc, nested_fields(), &config, PanicSink).is_ok());

    let tight = GeneratorConfig {
        max_combinations: Some(7),
    };
    let result = Generator::try_new(&mut tc, nested_fields(), &tight, PanicSink);
    assert!(matches!(
        result,
        Err(ConfigError::TooManyCombinations { total: 8, limit: 7 })
    ));
}

#[test]
fn test_config_defaults() {
    let config = GeneratorConfig::from_json("{}").unwrap();
    assert_eq!(config, GeneratorConfig::default());
    assert!(GeneratorConfig::from_json("not json").is_err());
    assert_eq!(GeneratorConfig::unlimited().max_combinations, None);
    assert_eq!(GeneratorConfig::default().max_combinations, None);
    assert_eq!(GeneratorConfig::with_limit(3).max_combinations, Some(3));
}

fn int_literal(count: i32) -> String {
    let items: Vec<String> = (0..count).map(|i| i.to_string()).collect();
    format!("[{}]", items.join(","))
}

#[test]
fn test_large_product_accepted_by_default() {
    let sink = CollectingSink::new();
    let fields = CaseFields::new()
        .field("size", int_literal(1001), |c: &mut Flags| &mut c.size)
        .field("aux", int_literal(1000), |c: &mut Flags| &mut c.aux);
    let mut tc = Flags::default();
    let mut gen = Generator::new(&mut tc, fields, sink.clone());

    assert_eq!(gen.combinations_total(), 1_001_000);
    assert!(gen.next());
    assert!(gen.next());
    assert!(!gen.is_failed());
    assert!(sink.is_empty());
    assert_eq!(*gen.record(), flags(false, 0, 1));
}

#[derive(Debug, Clone, PartialEq)]
struct Labeled<'n> {
    name: &'n str,
    size: u8,
}

impl CaseTable for Labeled<'_> {
    fn case_fields<'a>() -> CaseFields<'a, Self>
    where
        Self: 'a,
    {
        CaseFields::new().field("size", "[1, 2]", |c: &mut Self| &mut c.size)
    }
}

#[test]
fn test_record_with_borrowed_fields() {
    let name = String::from("local");
    let mut tc = Labeled {
        name: &name,
        size: 0,
    };
    let cases = generate_cases(&mut tc).collect_cases();

    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0], Labeled { name: "local", size: 1 });
    assert_eq!(cases[1], Labeled { name: "local", size: 2 });
}
