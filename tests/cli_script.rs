mod common;

use std::fs;

use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;

#[test]
fn play_while_locked_opens_the_form() {
    let home = common::home();
    common::script(home.path(), "play\nexit\n")
        .success()
        .stdout(contains("[!] Fill in the form to watch the video."))
        .stdout(contains("Get Instant Access"))
        .stdout(contains("Full Name *: <John Doe>"))
        .stdout(contains("[ Watch Now ]"));
}

#[test]
fn empty_submit_lists_every_error() {
    let home = common::home();
    common::script(home.path(), "submit\n")
        .success()
        .stdout(contains("[x] name: Full Name is required"))
        .stdout(contains("[x] email: Email Address is required"));
    assert!(!home.path().join("leads.json").exists());
}

#[test]
fn blur_reports_errors_in_the_active_locale() {
    let home = common::home();
    let input = "locale es\nset name J\nblur name\nset email nope\nblur email\n";
    common::script(home.path(), input)
        .success()
        .stdout(contains("Locale set to es."))
        .stdout(contains(
            "[x] name: Nombre Completo debe tener al menos 2 caracteres",
        ))
        .stdout(contains(
            "[x] email: Por favor, introduce un correo electrónico válido",
        ));

    let config = fs::read_to_string(home.path().join("config").join("config.json")).unwrap();
    assert!(config.contains("\"locale\": \"es\""));
}

#[test]
fn valid_submit_stores_lead_and_unlocks_playback() {
    let home = common::home();
    let input = "set name \"Jane Doe\"\nset email jane@example.com\nsubmit\nstatus\nplay\n";
    common::script(home.path(), input)
        .success()
        .stdout(contains("[ok] Thanks! Lead").and(contains("saved.")))
        .stdout(contains("Gate        : unlocked"))
        .stdout(contains("[i] Paused."));

    let stored: Value =
        serde_json::from_str(&fs::read_to_string(home.path().join("leads.json")).unwrap())
            .unwrap();
    let leads = stored.as_array().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["name"], "Jane Doe");
    assert_eq!(leads[0]["email"], "jane@example.com");
}

#[test]
fn submit_after_unlock_is_refused() {
    let home = common::home();
    let input = "set name Jane\nset email jane@example.com\nsubmit\nsubmit\n";
    common::script(home.path(), input)
        .success()
        .stdout(contains("[x]").and(contains("already been submitted")));
}

#[test]
fn close_discards_values() {
    let home = common::home();
    common::script(home.path(), "set name Jane\nclose\nshow\n")
        .success()
        .stdout(contains("[i] Form closed."))
        .stdout(contains("Full Name *: <John Doe>"));
}

#[test]
fn cta_uses_configured_booking_link() {
    let home = common::home();
    common::script(home.path(), "cta\n")
        .success()
        .stdout(contains("No booking link configured"));

    common::script(
        home.path(),
        "config scheduling_url https://calendly.com/acme/intro\ncta\n",
    )
    .success()
    .stdout(contains("Opening https://calendly.com/acme/intro"));
}

#[test]
fn open_gate_plays_without_form() {
    let home = common::home();
    common::write_config(home.path(), r#"{ "locale": "en", "require_form": false }"#);
    common::script(home.path(), "play\nmute\n")
        .success()
        .stdout(contains("[ok] Playing").and(contains("(muted)")))
        .stdout(contains("[i] Sound on."));
}

#[test]
fn messages_prints_locale_table_with_fallback() {
    let home = common::home();
    let output = common::script(home.path(), "messages fr\n")
        .success()
        .get_output()
        .stdout
        .clone();
    let table: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(table["required"], "{field} est requis");
    assert_eq!(table.as_object().unwrap().len(), 8);

    common::script(home.path(), "messages xx\n")
        .success()
        .stdout(contains("\"email\": \"Please enter a valid email address\""));
}

#[test]
fn validate_checks_a_values_file() {
    let home = common::home();
    let values = home.path().join("values.json");
    fs::write(&values, r#"{ "name": "A", "email": "a@b.co" }"#).unwrap();

    common::script(
        home.path(),
        &format!("validate {} pt\n", values.display()),
    )
    .success()
    .stdout(contains("1 field(s) failed validation."))
    .stdout(contains("Nome Completo deve ter pelo menos 2 caracteres"));
}

#[test]
fn custom_schema_is_loaded_from_config() {
    let home = common::home();
    let schema = home.path().join("schema.json");
    fs::write(
        &schema,
        r#"{
            "submitLabel": { "en": "Book my call", "es": "Agendar" },
            "fields": [
                { "name": "phone", "type": "tel", "required": true,
                  "label": { "en": "WhatsApp", "es": "WhatsApp" } }
            ]
        }"#,
    )
    .unwrap();

    let input = format!(
        "config schema_path {}\nset phone 12\nsubmit\nshow\n",
        schema.display()
    );
    common::script(home.path(), &input)
        .success()
        .stdout(contains("[x] phone: Please enter a valid phone number"))
        .stdout(contains("[ Book my call ]"));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = common::home();
    common::script(home.path(), "sbumit\nhelp\n")
        .success()
        .stdout(contains("Unknown command `sbumit`"))
        .stdout(contains("Suggestion: `submit`?"))
        .stdout(contains("Available commands"));
}

#[test]
fn version_prints_package_version() {
    let home = common::home();
    common::script(home.path(), "version\n")
        .success()
        .stdout(contains(format!("vsl {}", env!("CARGO_PKG_VERSION"))));
}
