//! Loading configuration from files and the environment.

use cas_login::config::{CasConfig, TicketConfig};
use cas_login::Error;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn from_file_reads_both_sections() {
    let file = write_config(
        r#"
[login]
cookie_name = "CASTGC"
issue_login_tickets = false

[tickets]
ticket_granting_ttl_secs = 3600
service_ticket_ttl_secs = 60
"#,
    );

    let config = CasConfig::from_file(file.path()).unwrap();
    assert_eq!(config.login.cookie_name, "CASTGC");
    assert!(!config.login.issue_login_tickets);
    assert_eq!(config.tickets.ticket_granting_ttl_secs, 3600);
    assert_eq!(config.tickets.service_ticket_ttl_secs, 60);
}

#[test]
fn from_file_rejects_empty_cookie_name() {
    let file = write_config("[login]\ncookie_name = \"  \"\n");
    let err = CasConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn from_file_reports_malformed_toml() {
    let file = write_config("[login\ncookie_name = ");
    let err = CasConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("TOML parse error"));
}

#[test]
fn environment_overrides_file_values() {
    // Only this test touches CAS_LT_TTL_SECS.
    let file = write_config("[tickets]\nlogin_ticket_ttl_secs = 120\n");

    std::env::set_var("CAS_LT_TTL_SECS", "45");
    let overridden = CasConfig::from_file(file.path());
    std::env::set_var("CAS_LT_TTL_SECS", "not-a-number");
    let unparsable = CasConfig::from_file(file.path());
    std::env::remove_var("CAS_LT_TTL_SECS");

    assert_eq!(overridden.unwrap().tickets.login_ticket_ttl_secs, 45);
    assert_eq!(unparsable.unwrap().tickets.login_ticket_ttl_secs, 120);
}

#[test]
fn empty_file_yields_defaults() {
    let file = write_config("");
    let config = CasConfig::from_file(file.path()).unwrap();
    assert_eq!(config.tickets.service_ticket_ttl_secs, TicketConfig::default().service_ticket_ttl_secs);
    assert_eq!(config.tickets.ticket_granting_ttl_secs, 28_800);
}
