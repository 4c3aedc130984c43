use std::io::Write;

use port_pid::{Platform, config::AppConfig};

fn parse(raw: &str) -> AppConfig {
    toml::from_str::<AppConfig>(raw).expect("config must parse")
}

#[test]
fn platform_override_wins_over_detection() {
    let cfg = parse(
        r#"[lookup]
platform = "macos"
"#,
    );
    assert_eq!(cfg.platform(), Platform::Macos);

    let cfg = parse(
        r#"[lookup]
platform = "other"
"#,
    );
    assert_eq!(cfg.platform(), Platform::Other);
}

#[test]
fn missing_lookup_section_detects_host() {
    let cfg = parse(
        r#"[commands]
ss = "/usr/sbin/ss"
"#,
    );
    assert_eq!(cfg.platform(), Platform::current());
    assert_eq!(cfg.commands.ss, "/usr/sbin/ss");
    assert_eq!(cfg.commands.netstat, "netstat");
}

#[test]
fn unknown_platform_is_rejected() {
    let raw = r#"[lookup]
platform = "plan9"
"#;
    assert!(toml::from_str::<AppConfig>(raw).is_err());
}

#[test]
fn unknown_keys_are_rejected() {
    let raw = r#"[commands]
lsof = "lsof"
"#;
    assert!(toml::from_str::<AppConfig>(raw).is_err());
}

#[test]
fn validate_rejects_empty_programs() {
    for raw in [
        "[commands]\nnetstat = \"\"\n",
        "[commands]\nss = \"   \"\n",
    ] {
        assert!(parse(raw).validate().is_err(), "{raw}");
    }
}

#[test]
fn load_from_path_reads_and_validates() {
    let dir = std::env::temp_dir().join(format!("port-pid-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");

    let good = dir.join("good.toml");
    std::fs::File::create(&good)
        .and_then(|mut f| f.write_all(b"[lookup]\nplatform = \"linux\"\n"))
        .expect("write good config");
    let cfg = AppConfig::load_from_path(&good).expect("good config loads");
    assert_eq!(cfg.platform(), Platform::Linux);

    let bad = dir.join("bad.toml");
    std::fs::File::create(&bad)
        .and_then(|mut f| f.write_all(b"[commands]\nss = \"\"\n"))
        .expect("write bad config");
    assert!(AppConfig::load_from_path(&bad).is_err());

    assert!(AppConfig::load_from_path(&dir.join("missing.toml")).is_err());

    let _ = std::fs::remove_dir_all(&dir);
}
