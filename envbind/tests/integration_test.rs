//! Integration tests

use envbind::{
    parse, parse_with_parsers, parse_with_prefix, parse_with_prefix_and_parsers, BoxError, Env,
    Error, Json, Loader, MapEnvironment, Parsers, TextDecoder, Value,
};
use serial_test::serial;
use std::env;
use std::time::Duration;
use url::Url;

#[derive(Debug, Default, Env)]
struct BasicConfig {
    #[env = "HOME_DIR"]
    pub home: String,

    #[env = "PORT"]
    #[env_default = "3000"]
    pub port: u16,

    #[env = "DEBUG"]
    pub debug: bool,

    #[env = "RATIO"]
    pub ratio: f32,

    #[env = "OFFSET"]
    pub offset: i64,
}

#[test]
#[serial]
fn test_basic_config() {
    env::set_var("HOME_DIR", "/home/app");
    env::set_var("PORT", "8080");
    env::set_var("DEBUG", "true");
    env::set_var("RATIO", "0.5");
    env::set_var("OFFSET", "-42");

    let mut config = BasicConfig::default();
    parse(&mut config).unwrap();
    assert_eq!(config.home, "/home/app");
    assert_eq!(config.port, 8080);
    assert!(config.debug);
    assert_eq!(config.ratio, 0.5);
    assert_eq!(config.offset, -42);

    for key in ["HOME_DIR", "PORT", "DEBUG", "RATIO", "OFFSET"] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_default_used_when_absent() {
    env::remove_var("PORT");

    let mut config = BasicConfig::default();
    parse(&mut config).unwrap();
    assert_eq!(config.port, 3000);
}

#[test]
#[serial]
fn test_empty_value_overrides_default_with_zero() {
    env::set_var("PORT", "");

    let mut config = BasicConfig::default();
    parse(&mut config).unwrap();
    assert_eq!(config.port, 0);

    env::remove_var("PORT");
}

#[test]
#[serial]
fn test_empty_value_leaves_field_untouched() {
    env::set_var("HOME_DIR", "");

    let mut config = BasicConfig {
        home: "preset".into(),
        ..BasicConfig::default()
    };
    parse(&mut config).unwrap();
    assert_eq!(config.home, "preset");

    env::remove_var("HOME_DIR");
}

#[test]
#[serial]
fn test_parse_error() {
    env::set_var("PORT", "not_a_number");

    let mut config = BasicConfig::default();
    let err = parse(&mut config).unwrap_err();
    match err {
        Error::Parse {
            field, type_name, ..
        } => {
            assert_eq!(field, "port");
            assert!(type_name.contains("u16"));
        }
        other => panic!("Expected Parse error, got {other:?}"),
    }

    env::remove_var("PORT");
}

#[derive(Debug, Default, Env)]
struct RequiredConfig {
    #[env = "API_TOKEN,required"]
    pub token: String,

    #[env = "API_REGION,required"]
    #[env_default = "eu"]
    pub region: String,
}

#[test]
#[serial]
fn test_missing_required_names_key() {
    env::remove_var("API_TOKEN");
    env::set_var("API_REGION", "us");

    let err = parse(&mut RequiredConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Missing { ref key } if key == "API_TOKEN"));
    assert_eq!(
        err.to_string(),
        r#"env: required environment variable "API_TOKEN" is not set"#
    );

    env::remove_var("API_REGION");
}

#[test]
#[serial]
fn test_required_accepts_empty_value() {
    env::set_var("API_TOKEN", "");
    env::set_var("API_REGION", "us");

    let mut config = RequiredConfig::default();
    parse(&mut config).unwrap();
    assert_eq!(config.token, "");
    assert_eq!(config.region, "us");

    env::remove_var("API_TOKEN");
    env::remove_var("API_REGION");
}

#[test]
#[serial]
fn test_default_does_not_satisfy_required() {
    env::set_var("API_TOKEN", "t");
    env::remove_var("API_REGION");

    let err = parse(&mut RequiredConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Missing { ref key } if key == "API_REGION"));

    env::remove_var("API_TOKEN");
}

#[derive(Debug, Default, Env)]
struct FileConfig {
    #[env = "SECRET_PATH,file"]
    pub secret: String,
}

#[test]
#[serial]
fn test_file_based_value() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "hello").unwrap();
    env::set_var("SECRET_PATH", temp_file.path());

    let mut config = FileConfig::default();
    parse(&mut config).unwrap();
    assert_eq!(config.secret, "hello");

    env::remove_var("SECRET_PATH");
}

#[test]
#[serial]
fn test_file_not_found() {
    env::set_var("SECRET_PATH", "/nonexistent/file/path");

    let err = parse(&mut FileConfig::default()).unwrap_err();
    match &err {
        Error::FileRead { key, path, .. } => {
            assert_eq!(key, "SECRET_PATH");
            assert_eq!(path, "/nonexistent/file/path");
        }
        other => panic!("Expected FileRead error, got {other:?}"),
    }
    assert!(err.to_string().contains("/nonexistent/file/path"));

    env::remove_var("SECRET_PATH");
}

#[derive(Debug, Default, Env)]
struct ExpandConfig {
    #[env = "DATA_DIR"]
    #[env_default = "${BASE_DIR}/data"]
    #[env_expand = "True"]
    pub data_dir: String,

    #[env = "RAW_DIR"]
    #[env_default = "${BASE_DIR}/raw"]
    pub raw_dir: String,
}

#[test]
#[serial]
fn test_expand() {
    env::set_var("BASE_DIR", "/srv");
    env::remove_var("DATA_DIR");
    env::remove_var("RAW_DIR");

    let mut config = ExpandConfig::default();
    parse(&mut config).unwrap();
    assert_eq!(config.data_dir, "/srv/data");
    assert_eq!(config.raw_dir, "${BASE_DIR}/raw");

    env::set_var("DATA_DIR", "$BASE_DIR/override");
    parse(&mut config).unwrap();
    assert_eq!(config.data_dir, "/srv/override");

    env::remove_var("BASE_DIR");
    env::remove_var("DATA_DIR");
}

#[derive(Debug, Default, Env)]
struct ListConfig {
    #[env = "LIST"]
    #[env_separator = ":"]
    pub numbers: Vec<i32>,

    #[env = "NAMES"]
    pub names: Vec<String>,

    #[env = "TIMEOUTS"]
    pub timeouts: Vec<Duration>,

    #[env = "BOXED"]
    pub boxed: Vec<Box<u8>>,
}

#[test]
#[serial]
fn test_sequences() {
    env::set_var("LIST", "1:2:3");
    env::set_var("NAMES", "a,b , c");
    env::set_var("TIMEOUTS", "1s,250ms");
    env::set_var("BOXED", "7,8");

    let mut config = ListConfig::default();
    parse(&mut config).unwrap();
    assert_eq!(config.numbers, vec![1, 2, 3]);
    assert_eq!(config.names, vec!["a", "b ", " c"]);
    assert_eq!(
        config.timeouts,
        vec![Duration::from_secs(1), Duration::from_millis(250)]
    );
    assert_eq!(config.boxed, vec![Box::new(7), Box::new(8)]);

    for key in ["LIST", "NAMES", "TIMEOUTS", "BOXED"] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_malformed_element_leaves_sequence_unset() {
    env::set_var("LIST", "1:x:3");

    let mut config = ListConfig {
        numbers: vec![42],
        ..ListConfig::default()
    };
    let err = parse(&mut config).unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(config.numbers, vec![42]);

    env::remove_var("LIST");
}

#[derive(Debug, Default, Env)]
struct Sub {
    #[env = "X"]
    pub x: String,

    #[env = "Y"]
    #[env_default = "fallback"]
    pub y: String,
}

#[derive(Debug, Default, Env)]
struct Outer {
    #[env_prefix = "SUB_"]
    pub sub: Sub,

    #[env_prefix = "OPT_"]
    pub optional: Option<Sub>,

    #[env_prefix = "BOX_"]
    pub boxed: Box<Sub>,
}

#[test]
#[serial]
fn test_nested_prefix() {
    env::set_var("SUB_X", "plain");
    env::set_var("OUTER_SUB_X", "prefixed");

    let mut config = Outer::default();
    parse(&mut config).unwrap();
    assert_eq!(config.sub.x, "plain");
    assert_eq!(config.sub.y, "fallback");

    let mut config = Outer::default();
    parse_with_prefix("OUTER_", &mut config).unwrap();
    assert_eq!(config.sub.x, "prefixed");

    env::remove_var("SUB_X");
    env::remove_var("OUTER_SUB_X");
}

#[test]
#[serial]
fn test_optional_record_bound_only_when_present() {
    env::set_var("OPT_X", "from-env");
    env::set_var("BOX_X", "boxed");

    let mut config = Outer::default();
    parse(&mut config).unwrap();
    assert!(config.optional.is_none());
    assert_eq!(config.boxed.x, "boxed");

    let mut config = Outer {
        optional: Some(Sub::default()),
        ..Outer::default()
    };
    parse(&mut config).unwrap();
    assert_eq!(config.optional.as_ref().unwrap().x, "from-env");

    env::remove_var("OPT_X");
    env::remove_var("BOX_X");
}

#[derive(Debug, Default, Env)]
struct Keyed {
    #[env = "X"]
    pub x: String,
}

#[derive(Debug, Default, Env)]
struct KeyedOuter {
    #[env = "INNER"]
    #[env_prefix = "INNER_"]
    pub inner: Keyed,
}

#[test]
#[serial]
fn test_record_with_own_value_needs_a_parser() {
    env::set_var("INNER", "something");

    let err = parse(&mut KeyedOuter::default()).unwrap_err();
    assert!(matches!(err, Error::NoParser { ref field, .. } if field == "inner"));

    let parsers = Parsers::new().with(|raw: &str| {
        Ok::<_, BoxError>(Keyed {
            x: raw.to_uppercase(),
        })
    });
    let mut config = KeyedOuter::default();
    parse_with_parsers(&mut config, &parsers).unwrap();
    assert_eq!(config.inner.x, "SOMETHING");

    env::remove_var("INNER");
}

#[derive(Debug, Default, Env)]
struct BoxedKeyed {
    #[env = "BOXED"]
    #[env_prefix = "BOXED_"]
    pub boxed: Box<Keyed>,
}

#[test]
fn test_boxed_record_is_descended_into_directly() {
    let env: MapEnvironment = [("BOXED", "something"), ("BOXED_X", "inner")]
        .into_iter()
        .collect();

    let mut config = BoxedKeyed::default();
    Loader::new(&env).load(&mut config).unwrap();
    assert_eq!(config.boxed.x, "inner");
}

#[derive(Debug, Default, Env)]
struct ValueObjects {
    #[env = "ENDPOINT"]
    pub endpoint: Option<Url>,

    #[env = "TIMEOUT"]
    pub timeout: Duration,

    #[env = "RETRY"]
    pub retry: Option<Duration>,
}

#[test]
#[serial]
fn test_value_objects() {
    env::set_var("ENDPOINT", "https://example.com/api");
    env::set_var("TIMEOUT", "1m30s");
    env::remove_var("RETRY");

    let mut config = ValueObjects::default();
    parse(&mut config).unwrap();
    assert_eq!(config.endpoint.unwrap().path(), "/api");
    assert_eq!(config.timeout, Duration::from_secs(90));
    assert_eq!(config.retry, None);

    env::set_var("ENDPOINT", "::not a url::");
    let err = parse(&mut ValueObjects::default()).unwrap_err();
    assert!(err.to_string().contains("unable to parse URL"));

    env::remove_var("ENDPOINT");
    env::remove_var("TIMEOUT");
}

#[test]
#[serial]
fn test_custom_parser_overrides_builtin() {
    env::set_var("TIMEOUT", "90");
    env::remove_var("ENDPOINT");

    let parsers =
        Parsers::new().with(|raw: &str| raw.parse::<u64>().map(Duration::from_secs));

    let mut config = ValueObjects::default();
    parse_with_parsers(&mut config, &parsers).unwrap();
    assert_eq!(config.timeout, Duration::from_secs(90));

    // The built-in parser wants a unit.
    assert!(parse(&mut ValueObjects::default()).is_err());

    env::remove_var("TIMEOUT");
}

#[derive(Debug, Default, PartialEq)]
struct Percent(u8);

impl Value for Percent {}

fn percent(raw: &str) -> Result<Percent, BoxError> {
    let digits = raw.strip_suffix('%').ok_or("expected a percentage")?;
    Ok(Percent(digits.parse()?))
}

#[derive(Debug, Default, Env)]
struct Limits {
    #[env = "CPU"]
    pub cpu: Percent,

    #[env = "MEM"]
    pub memory: Option<Percent>,
}

#[derive(Debug, Default, Env)]
struct Service {
    #[env = "NAME"]
    pub name: String,

    #[env_prefix = "LIMITS_"]
    pub limits: Limits,
}

#[test]
#[serial]
fn test_prefix_and_custom_parsers_reach_nested_records() {
    env::set_var("SVC_NAME", "api");
    env::set_var("SVC_LIMITS_CPU", "75%");
    env::set_var("SVC_LIMITS_MEM", "50%");

    let parsers = Parsers::new().with(percent);
    let mut service = Service::default();
    parse_with_prefix_and_parsers("SVC_", &mut service, &parsers).unwrap();
    assert_eq!(service.name, "api");
    assert_eq!(service.limits.cpu, Percent(75));
    assert_eq!(service.limits.memory, Some(Percent(50)));

    let err = parse_with_prefix("SVC_", &mut Service::default()).unwrap_err();
    assert!(matches!(err, Error::NoParser { ref field, .. } if field == "cpu"));

    env::set_var("SVC_LIMITS_CPU", "75");
    let err = parse_with_prefix_and_parsers("SVC_", &mut Service::default(), &parsers).unwrap_err();
    assert!(err.is_parse_error());

    for key in ["SVC_NAME", "SVC_LIMITS_CPU", "SVC_LIMITS_MEM"] {
        env::remove_var(key);
    }
}

#[test]
fn test_loader_with_added_parser() {
    let env: MapEnvironment = [("SVC_NAME", "worker"), ("SVC_LIMITS_CPU", "10%")]
        .into_iter()
        .collect();

    let mut service = Service::default();
    Loader::new(&env)
        .prefix("SVC_")
        .parser(percent)
        .load(&mut service)
        .unwrap();
    assert_eq!(service.name, "worker");
    assert_eq!(service.limits.cpu, Percent(10));
    assert_eq!(service.limits.memory, None);
}

#[derive(Debug, Default, Env)]
struct Floats {
    #[env = "SINGLE"]
    pub single: f32,

    #[env = "DOUBLE"]
    pub double: f64,
}

#[test]
fn test_float_overflow_is_a_parse_error() {
    let env: MapEnvironment = [("SINGLE", "1e39")].into_iter().collect();
    let mut floats = Floats::default();
    let err = Loader::new(&env).load(&mut floats).unwrap_err();
    assert!(matches!(err, Error::Parse { ref field, .. } if field == "single"));
    assert_eq!(floats.single, 0.0);

    let env: MapEnvironment = [("DOUBLE", "1e400")].into_iter().collect();
    let err = Loader::new(&env).load(&mut Floats::default()).unwrap_err();
    assert!(matches!(err, Error::Parse { ref field, .. } if field == "double"));

    let env: MapEnvironment = [("SINGLE", "-inf"), ("DOUBLE", "1e39")].into_iter().collect();
    let mut floats = Floats::default();
    Loader::new(&env).load(&mut floats).unwrap();
    assert_eq!(floats.single, f32::NEG_INFINITY);
    assert_eq!(floats.double, 1e39);
}

#[derive(Debug, Default, Env)]
struct Wrapper<T> {
    #[env = "WRAPPED"]
    pub inner: T,

    #[env = "WRAPPED_LIST"]
    pub list: Vec<T>,
}

#[test]
fn test_generic_record() {
    let env: MapEnvironment = [("WRAPPED", "7"), ("WRAPPED_LIST", "1,2")]
        .into_iter()
        .collect();

    let mut wrapper = Wrapper::<u16>::default();
    Loader::new(&env).load(&mut wrapper).unwrap();
    assert_eq!(wrapper.inner, 7);
    assert_eq!(wrapper.list, vec![1, 2]);
}

#[derive(Debug, Default, PartialEq)]
enum Level {
    #[default]
    Info,
    Warn,
}

impl Value for Level {
    fn text_decoder() -> Option<TextDecoder<Self>> {
        Some(|text| match text {
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            other => Err(format!("unknown level {other:?}").into()),
        })
    }
}

#[derive(Debug, Default, Env)]
struct TextConfig {
    #[env = "LEVEL"]
    pub level: Level,

    #[env = "LEVELS"]
    #[env_separator = "|"]
    pub levels: Vec<Box<Level>>,

    #[env = "LABELS"]
    pub labels: Json<Vec<String>>,
}

#[test]
#[serial]
fn test_text_decodable_values() {
    env::set_var("LEVEL", "warn");
    env::set_var("LEVELS", "info|warn");
    env::set_var("LABELS", r#"["a","b"]"#);

    let mut config = TextConfig::default();
    parse(&mut config).unwrap();
    assert_eq!(config.level, Level::Warn);
    assert_eq!(config.levels, vec![Box::new(Level::Info), Box::new(Level::Warn)]);
    assert_eq!(*config.labels, vec!["a", "b"]);

    env::set_var("LEVEL", "loud");
    let err = parse(&mut TextConfig::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            r#"env: parse error on field "level" of type "{}": unknown level "loud""#,
            std::any::type_name::<Level>()
        )
    );

    for key in ["LEVEL", "LEVELS", "LABELS"] {
        env::remove_var(key);
    }
}

#[derive(Debug, Default, Env)]
struct BogusTag {
    #[env = "BOGUS,bogus"]
    pub value: String,
}

#[test]
#[serial]
fn test_unknown_tag_option() {
    env::remove_var("BOGUS");
    let err = parse(&mut BogusTag::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOption { ref option } if option == "bogus"));

    env::set_var("BOGUS", "set");
    let err = parse(&mut BogusTag::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOption { .. }));

    env::remove_var("BOGUS");
}

#[test]
fn test_not_a_record() {
    let mut number = 5u32;
    assert!(matches!(parse(&mut number), Err(Error::NotARecord)));

    let mut text = String::new();
    assert!(matches!(
        parse_with_prefix_and_parsers("APP_", &mut text, &Parsers::new()),
        Err(Error::NotARecord)
    ));
}

#[derive(Debug, Default, Env)]
struct PrivateField {
    #[env = "VISIBLE"]
    pub visible: String,

    #[env = "INVISIBLE,required"]
    hidden: String,
}

#[test]
#[serial]
fn test_private_fields_are_skipped() {
    env::set_var("VISIBLE", "yes");
    env::remove_var("INVISIBLE");

    let mut config = PrivateField::default();
    parse(&mut config).unwrap();
    assert_eq!(config.visible, "yes");
    assert_eq!(config.hidden, "");

    env::remove_var("VISIBLE");
}

#[test]
#[serial]
fn test_first_error_stops_binding() {
    env::set_var("HOME_DIR", "/first");
    env::set_var("PORT", "bad");
    env::set_var("DEBUG", "true");

    let mut config = BasicConfig::default();
    assert!(parse(&mut config).is_err());
    assert_eq!(config.home, "/first");
    assert!(!config.debug);

    for key in ["HOME_DIR", "PORT", "DEBUG"] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_from_env() {
    env::set_var("HOME_DIR", "/from-env");

    let config: BasicConfig = envbind::from_env().unwrap();
    assert_eq!(config.home, "/from-env");
    assert_eq!(config.port, 3000);

    env::remove_var("HOME_DIR");
}
