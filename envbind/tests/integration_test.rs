//! Integration tests

use std::collections::HashMap;
use std::env;

use envbind::{Bind, BindError, BoxError, DecodeEnv, EnvParser};
use serial_test::serial;

#[derive(Debug, Default, Clone, PartialEq)]
struct Node {
    id: u32,
    addr: String,
}

impl DecodeEnv for Node {
    fn decode_env(&mut self, text: &str) -> Result<(), BoxError> {
        let (id, addr) = text.split_once('=').ok_or("invalid node format")?;
        self.id = id.trim().parse()?;
        self.addr = addr.trim().to_string();
        Ok(())
    }
}

envbind::impl_bind_via_decoder!(Node);

#[derive(Debug, Default, Clone, PartialEq, Bind)]
struct Config {
    #[env("inline")]
    base: BaseConfig,

    #[env("PROJNAME;required")]
    project_name: String,

    #[env("PROJID;default: 1")]
    project_id: i64,

    #[env("VERSION")]
    version: i32,

    #[env("VERSION")]
    version_ptr: Option<i32>,

    #[env("TIMEOUT;gte: 5;lte: 10")]
    timeout: u64,

    #[env("PEERS;required")]
    peers: Vec<Node>,

    #[env("IDS;default: 1,2,3")]
    ids: Vec<i64>,

    #[env("IDMAP")]
    id_map: HashMap<i32, String>,

    #[env("PEERSMAP")]
    peers_map: HashMap<i32, Node>,

    #[env("SERVER")]
    server: Option<ServerConfig>,

    #[env("LOG")]
    log: LogConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Bind)]
struct BaseConfig {
    #[env("NODE")]
    node: i32,
}

#[derive(Debug, Default, Clone, PartialEq, Bind)]
struct ServerConfig {
    #[env("ID")]
    id: u32,

    #[env("PORT")]
    port: i32,

    #[env("MULTISERVER")]
    multi_server: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Bind)]
struct LogConfig {
    #[env("LEVEL;default: debug")]
    level: String,

    #[env("PATH")]
    path: Option<String>,
}

fn set_comprehensive_env() {
    env::set_var("ENV_NODE", "1");
    env::set_var("ENV_PROJNAME", "envbind");
    env::set_var("ENV_LOG_PATH", "data");
    env::set_var("ENV_IDMAP", "1:127.0.0.1:8000|2:127.0.0.1:8001");
    env::set_var("ENV_PEERSMAP", "1:1=127.0.0.1:8000|2:2=127.0.0.1:8001");
    env::set_var("ENV_TIMEOUT", "7");
    env::set_var("ENV_PEERS", "1=127.0.0.1:8080,2=127.0.0.1:8081");
    env::set_var("ENV_VERSION", "1");
    env::remove_var("ENV_PROJID");
    env::remove_var("ENV_IDS");
    env::remove_var("ENV_SERVER_ID");
    env::remove_var("ENV_SERVER_PORT");
    env::remove_var("ENV_SERVER_MULTISERVER");
    env::remove_var("ENV_LOG_LEVEL");
}

fn clear_comprehensive_env() {
    for name in [
        "ENV_NODE",
        "ENV_PROJNAME",
        "ENV_LOG_PATH",
        "ENV_IDMAP",
        "ENV_PEERSMAP",
        "ENV_TIMEOUT",
        "ENV_PEERS",
        "ENV_VERSION",
    ] {
        env::remove_var(name);
    }
}

fn preset_config() -> Config {
    Config {
        project_id: 10,
        server: Some(ServerConfig {
            id: 1,
            multi_server: true,
            ..Default::default()
        }),
        ids: vec![5, 6, 7],
        ..Default::default()
    }
}

#[test]
#[serial]
fn test_comprehensive_binding() {
    set_comprehensive_env();

    let mut config = preset_config();
    EnvParser::new().start(&mut config).unwrap();

    // Inline field: NODE attaches directly under the prefix.
    assert_eq!(config.base.node, 1);
    assert_eq!(config.project_name, "envbind");
    // Pre-populated value beats the tag default when the env has nothing.
    assert_eq!(config.project_id, 10);
    assert_eq!(config.version, 1);
    assert_eq!(config.version_ptr, Some(1));
    assert_eq!(config.timeout, 7);

    let server = config.server.as_ref().unwrap();
    assert_eq!(server.id, 1);
    assert!(server.multi_server);
    assert_eq!(server.port, 0);

    assert_eq!(config.log.level, "debug");
    assert_eq!(config.log.path.as_deref(), Some("data"));

    // Pre-populated sequence survives an absent env value and its default.
    assert_eq!(config.ids, vec![5, 6, 7]);

    assert_eq!(config.id_map.len(), 2);
    assert_eq!(config.id_map[&1], "127.0.0.1:8000");
    assert_eq!(config.id_map[&2], "127.0.0.1:8001");

    assert_eq!(config.peers_map.len(), 2);
    assert_eq!(config.peers_map[&1].id, 1);
    assert_eq!(config.peers_map[&1].addr, "127.0.0.1:8000");
    assert_eq!(config.peers_map[&2].addr, "127.0.0.1:8001");

    assert_eq!(
        config.peers,
        vec![
            Node {
                id: 1,
                addr: "127.0.0.1:8080".to_string()
            },
            Node {
                id: 2,
                addr: "127.0.0.1:8081".to_string()
            },
        ]
    );

    clear_comprehensive_env();
}

#[test]
#[serial]
fn test_second_pass_is_idempotent() {
    set_comprehensive_env();

    let parser = EnvParser::new();
    let mut config = preset_config();
    parser.start(&mut config).unwrap();

    let first = config.clone();
    parser.start(&mut config).unwrap();
    assert_eq!(config, first);

    clear_comprehensive_env();
}

#[derive(Debug, Default, Bind)]
struct RequiredConfig {
    #[env("PROJNAME;required")]
    project_name: String,
}

#[test]
#[serial]
fn test_required_field_missing() {
    env::remove_var("ENV_PROJNAME");

    let mut config = RequiredConfig::default();
    let err = EnvParser::new().start(&mut config).unwrap_err();
    assert!(matches!(err, BindError::Required { name } if name == "ENV_PROJNAME"));
}

#[test]
#[serial]
fn test_required_satisfied_by_preset_value() {
    env::remove_var("ENV_PROJNAME");

    let mut config = RequiredConfig {
        project_name: "aaa".to_string(),
    };
    EnvParser::new().start(&mut config).unwrap();
    assert_eq!(config.project_name, "aaa");
}

#[test]
#[serial]
fn test_required_satisfied_by_environment() {
    env::set_var("ENV_PROJNAME", "aaa");

    let mut config = RequiredConfig::default();
    EnvParser::new().start(&mut config).unwrap();
    assert_eq!(config.project_name, "aaa");

    env::remove_var("ENV_PROJNAME");
}

#[test]
#[serial]
fn test_keyed_name_clause() {
    #[derive(Debug, Default, Bind)]
    struct NamedConfig {
        #[env("name: NAME")]
        name: String,

        #[env("AGE")]
        age: i32,
    }

    env::set_var("ENV_NAME", "aaa");
    env::set_var("ENV_AGE", "18");

    let config: NamedConfig = EnvParser::new().load().unwrap();
    assert_eq!(config.name, "aaa");
    assert_eq!(config.age, 18);

    env::remove_var("ENV_NAME");
    env::remove_var("ENV_AGE");
}

#[derive(Debug, Default, Bind)]
struct BoundedConfig {
    #[env("SCORE;gte: 5;lte: 10")]
    score: f64,
}

#[test]
#[serial]
fn test_bounds_accept_closed_interval() {
    for value in ["5", "7.5", "10"] {
        env::set_var("ENV_SCORE", value);
        let config: BoundedConfig = EnvParser::new().load().unwrap();
        assert_eq!(config.score, value.parse::<f64>().unwrap());
    }
    env::remove_var("ENV_SCORE");
}

#[test]
#[serial]
fn test_bounds_reject_out_of_interval() {
    for value in ["4.999", "10.001"] {
        env::set_var("ENV_SCORE", value);
        let err = EnvParser::new().load::<BoundedConfig>().unwrap_err();
        assert!(matches!(err, BindError::Range { .. }), "value {value}");
    }
    env::remove_var("ENV_SCORE");
}

#[test]
#[serial]
fn test_sequence_pieces_are_trimmed() {
    #[derive(Debug, Default, Bind)]
    struct SeqConfig {
        #[env("IDS")]
        ids: Vec<i64>,
    }

    env::set_var("ENV_IDS", "1, 2 ,3");

    let config: SeqConfig = EnvParser::new().load().unwrap();
    assert_eq!(config.ids, vec![1, 2, 3]);

    env::remove_var("ENV_IDS");
}

#[derive(Debug, Default, Bind)]
struct SeqRequiredConfig {
    #[env("IDS;required")]
    ids: Vec<i64>,
}

#[test]
#[serial]
fn test_required_sequence_without_value_fails() {
    env::remove_var("ENV_IDS");

    let err = EnvParser::new().load::<SeqRequiredConfig>().unwrap_err();
    assert!(matches!(err, BindError::Required { .. }));
}

#[test]
#[serial]
fn test_required_sequence_satisfied_by_preset() {
    env::remove_var("ENV_IDS");

    let mut config = SeqRequiredConfig { ids: vec![42] };
    EnvParser::new().start(&mut config).unwrap();
    assert_eq!(config.ids, vec![42]);
}

#[derive(Debug, Default, Bind)]
struct MapConfig {
    #[env("IDMAP")]
    id_map: HashMap<i64, String>,
}

#[test]
#[serial]
fn test_map_round_trip() {
    env::set_var("ENV_IDMAP", "1:a|2:b");

    let config: MapConfig = EnvParser::new().load().unwrap();
    assert_eq!(config.id_map.len(), 2);
    assert_eq!(config.id_map[&1], "a");
    assert_eq!(config.id_map[&2], "b");

    env::remove_var("ENV_IDMAP");
}

#[test]
#[serial]
fn test_map_entry_without_separator_fails() {
    env::set_var("ENV_IDMAP", "1:a|2");

    let err = EnvParser::new().load::<MapConfig>().unwrap_err();
    assert!(matches!(err, BindError::TagSyntax { directive, .. } if directive == "2"));

    env::remove_var("ENV_IDMAP");
}

#[test]
#[serial]
fn test_decoder_failure_is_wrapped() {
    #[derive(Debug, Default, Bind)]
    struct PeerConfig {
        #[env("PEERS")]
        peers: Vec<Node>,
    }

    env::set_var("ENV_PEERS", "not-a-node");

    let err = EnvParser::new().load::<PeerConfig>().unwrap_err();
    assert!(matches!(err, BindError::Decode { name, .. } if name == "ENV_PEERS"));

    env::remove_var("ENV_PEERS");
}

#[test]
#[serial]
fn test_parse_failure_names_key_and_type() {
    #[derive(Debug, Default, Bind)]
    struct PortConfig {
        #[env("PORT")]
        port: u16,
    }

    env::set_var("ENV_PORT", "http");

    let err = EnvParser::new().load::<PortConfig>().unwrap_err();
    match err {
        BindError::Parse { name, type_name, .. } => {
            assert_eq!(name, "ENV_PORT");
            assert_eq!(type_name, "u16");
        }
        other => panic!("expected parse error, got {other:?}"),
    }

    env::remove_var("ENV_PORT");
}

#[test]
#[serial]
fn test_prefix_and_split_char_options() {
    #[derive(Debug, Default, Bind)]
    struct ServiceConfig {
        #[env("HTTP")]
        http: HttpConfig,
    }

    #[derive(Debug, Default, Bind)]
    struct HttpConfig {
        #[env("PORT")]
        port: u16,
    }

    env::set_var("MYAPP__HTTP__PORT", "9090");

    let config: ServiceConfig = EnvParser::new()
        .with_prefix("MYAPP")
        .with_split_char("__")
        .load()
        .unwrap();
    assert_eq!(config.http.port, 9090);

    env::remove_var("MYAPP__HTTP__PORT");
}

#[test]
#[serial]
fn test_environment_overrides_preset_scalar() {
    #[derive(Debug, Default, Bind)]
    struct LevelConfig {
        #[env("LEVEL")]
        level: String,
    }

    env::set_var("ENV_LEVEL", "warn");

    let mut config = LevelConfig {
        level: "info".to_string(),
    };
    EnvParser::new().start(&mut config).unwrap();
    assert_eq!(config.level, "warn");

    env::remove_var("ENV_LEVEL");
}

#[test]
#[serial]
fn test_complex_scalar() {
    use envbind::num_complex::Complex64;

    #[derive(Debug, Default, Bind)]
    struct SignalConfig {
        #[env("GAIN")]
        gain: Complex64,
    }

    env::set_var("ENV_GAIN", "1+2i");

    let config: SignalConfig = EnvParser::new().load().unwrap();
    assert_eq!(config.gain, Complex64::new(1.0, 2.0));

    env::remove_var("ENV_GAIN");
}

#[test]
#[serial]
fn test_scalar_at_root_is_untouched() {
    let mut value = String::new();
    EnvParser::new().start(&mut value).unwrap();
    assert!(value.is_empty());
}

#[test]
#[serial]
fn test_untagged_fields_are_skipped() {
    #[derive(Debug, Default, Bind)]
    struct PartialConfig {
        #[env("NAME")]
        name: String,

        // No directive: takes no part in binding.
        scratch: Vec<u8>,
    }

    env::set_var("ENV_NAME", "partial");

    let config: PartialConfig = EnvParser::new().load().unwrap();
    assert_eq!(config.name, "partial");
    assert!(config.scratch.is_empty());

    env::remove_var("ENV_NAME");
}
