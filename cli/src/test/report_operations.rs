#![allow(clippy::unwrap_used)]

use predicates::prelude::*;

use super::test_context::TestDb;

#[test]
fn test_report_create_simple() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "create", "--title", "Patrouille de nuit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved successfully (6)"));

    let reports = db.working_set();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, 6);
    assert_eq!(reports[0].title, "Patrouille de nuit");
    assert_eq!(reports[0].job, "lspd");
    assert!(reports[0].timestamp > 0);
}

#[test]
fn test_report_create_defaults() {
    let db = TestDb::new();

    db.cmd().args(["report", "create"]).assert().success();

    let reports = db.working_set();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].title, mdt_core::models::DEFAULT_TITLE);
    assert_eq!(reports[0].description, mdt_core::models::DESCRIPTION_TEMPLATE);
    assert_eq!(reports[0].report_type, mdt_core::models::UNTYPED_LABEL);
}

#[test]
fn test_report_create_with_tags() {
    let db = TestDb::new();

    db.cmd()
        .args([
            "report",
            "create",
            "--title",
            "Saisie de stupéfiants",
            "--tag",
            "LSPD,Délit majeur",
        ])
        .assert()
        .success();

    let reports = db.working_set();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].tags, vec!["LSPD", "Délit majeur"]);
    // Without an explicit type the first tag stands in
    assert_eq!(reports[0].report_type, "LSPD");
}

#[test]
fn test_report_create_resolves_officers() {
    let db = TestDb::new();

    db.cmd()
        .args([
            "report",
            "create",
            "--title",
            "Contrôle routier",
            "--officer",
            "1",
            "--officer",
            "Sgt. Nobody",
        ])
        .assert()
        .success();

    let reports = db.working_set();
    assert_eq!(
        reports[0].officers_involved,
        vec!["Agent Smith (12345)", "Sgt. Nobody"]
    );
}

#[test]
fn test_report_list_shows_own_service_seeds() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vol à main armée - Fleeca Bank"))
        .stdout(predicate::str::contains("Admission urgence").not());
}

#[test]
fn test_report_list_includes_tagged_reports() {
    // DOJ sees its own seed and the federal case tagged for it
    let db = TestDb::with_actor("doj", 2);

    db.cmd()
        .args(["report", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ordonnance du tribunal"))
        .stdout(predicate::str::contains("Blanchiment d'argent"))
        .stdout(predicate::str::contains("Vol à main armée").not());
}

#[test]
fn test_report_list_empty_for_service_without_reports() {
    let db = TestDb::with_actor("mairie", 5);

    db.cmd()
        .args(["report", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reports available"));
}

#[test]
fn test_report_list_search_term() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "create", "--title", "Patrouille de nuit"])
        .assert()
        .success();

    db.cmd()
        .args(["report", "list", "patrouille"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Patrouille de nuit"))
        .stdout(predicate::str::contains("Vol à main armée").not());

    db.cmd()
        .args(["report", "list", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reports found for this search"));
}

#[test]
fn test_report_list_most_recent_first() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "create", "--title", "Rapport du jour"])
        .assert()
        .success();

    let output = db
        .cmd()
        .args(["report", "list", "--output", "json"])
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let reports = json.as_array().unwrap();
    // The fresh report outranks every seed timestamp
    assert_eq!(reports[0]["title"], "Rapport du jour");
}

#[test]
fn test_report_list_json_uses_wire_keys() {
    let db = TestDb::new();

    db.cmd()
        .args([
            "report",
            "create",
            "--title",
            "Fourrière",
            "--vehicle",
            "Sultan RS - 58ABC213",
        ])
        .assert()
        .success();

    let output = db
        .cmd()
        .args(["report", "list", "--output", "json"])
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let reports = json.as_array().unwrap();
    let created = reports
        .iter()
        .find(|r| r["title"] == "Fourrière")
        .unwrap();
    assert_eq!(created["vehiculesInvolved"][0], "Sultan RS - 58ABC213");
    assert!(created["type"].is_string());
    assert!(created["listImg"].is_array());
}

#[test]
fn test_report_show_seed() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vol à main armée - Fleeca Bank"))
        .stdout(predicate::str::contains("LSPD - Report ID: 1"));
}

#[test]
fn test_report_show_unknown_fails() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "show", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Report 999 not found"));
}

#[test]
fn test_report_show_invisible_fails() {
    // The paramedic service has no claim on a police report
    let db = TestDb::with_actor("lsdph", 4);

    db.cmd()
        .args(["report", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Report 1 not found"));
}

#[test]
fn test_report_edit_preserves_id_and_timestamp() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "create", "--title", "Premier titre"])
        .assert()
        .success();

    let before = db.working_set();
    let created_at = before[0].timestamp;

    db.cmd()
        .args(["report", "edit", "6", "--title", "Titre corrigé"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved successfully (6)"));

    let after = db.working_set();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, 6);
    assert_eq!(after[0].title, "Titre corrigé");
    assert_eq!(after[0].timestamp, created_at);
}

#[test]
fn test_report_edit_seed_shadows_it() {
    let db = TestDb::with_actor("lsdph", 4);

    db.cmd()
        .args(["report", "edit", "2", "--title", "Réadmission - suivi"])
        .assert()
        .success();

    // The seed itself is immutable, the working set carries the override
    let reports = db.working_set();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, 2);
    assert_eq!(reports[0].title, "Réadmission - suivi");
    assert!(db.deleted_ids().is_empty());

    db.cmd()
        .args(["report", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Réadmission - suivi"))
        .stdout(predicate::str::contains("Admission urgence").not());
}

#[test]
fn test_report_edit_requires_grade() {
    let db = TestDb::with_actor("lspd", 1);

    db.cmd()
        .args(["report", "edit", "1", "--title", "Tentative"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("edit requires grade 2"));

    assert!(db.working_set().is_empty());
}

#[test]
fn test_report_delete_requires_grade() {
    let db = TestDb::with_actor("lspd", 3);

    db.cmd()
        .args(["report", "delete", "--yes", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delete requires grade 4"));

    assert!(db.deleted_ids().is_empty());
}

#[test]
fn test_report_delete_seed() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "delete", "--yes", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report 1 deleted"));

    assert_eq!(db.deleted_ids(), vec![1]);

    // The only report visible to the service is gone
    db.cmd()
        .args(["report", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reports available"));
}

#[test]
fn test_report_delete_multiple() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "create", "--title", "Premier"])
        .assert()
        .success();
    db.cmd()
        .args(["report", "create", "--title", "Second"])
        .assert()
        .success();

    db.cmd()
        .args(["report", "delete", "--yes", "6", "7"])
        .assert()
        .success();

    assert!(db.working_set().is_empty());
    assert_eq!(db.deleted_ids(), vec![6, 7]);
}

#[test]
fn test_report_delete_unknown_fails() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "delete", "--yes", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no report with id 999"));
}

#[test]
fn test_deleted_ids_are_not_reused() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "create", "--title", "Éphémère"])
        .assert()
        .success();
    db.cmd()
        .args(["report", "delete", "--yes", "6"])
        .assert()
        .success();

    // The next create must not resurrect the tombstoned id
    db.cmd()
        .args(["report", "create", "--title", "Suivant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved successfully (7)"));
}

#[test]
fn test_legacy_seed_renders_without_date() {
    // The accident seed predates the type and timestamp fields
    let db = TestDb::with_actor("lsfd", 1);

    db.cmd()
        .args(["report", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Accident de la route"))
        .stdout(predicate::str::contains("Unknown date"));

    let output = db
        .cmd()
        .args(["report", "list", "--output", "json"])
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let reports = json.as_array().unwrap();
    let accident = reports.iter().find(|r| r["id"] == 4).unwrap();
    assert_eq!(accident["type"], "LSFD");
    assert_eq!(accident["timestamp"], 0);
}

#[test]
fn test_report_tags_lists_service_vocabulary() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "tags"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Délit majeur"))
        .stdout(predicate::str::contains("Medical Report").not());
}

#[test]
fn test_profile_use_then_current() {
    let db = TestDb::new();

    db.cmd()
        .args(["profile", "use", "patrol"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Created new profile: patrol")
                .and(predicate::str::contains("Switched to profile: patrol")),
        );

    db.cmd()
        .args(["profile", "current"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current profile: patrol"));

    db.cmd()
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* patrol"));
}

#[test]
fn test_services_lists_capabilities() {
    let db = TestDb::new();

    // The city hall terminal has no report desk, the hospital no warrant
    // board. The acting service is starred.
    db.cmd()
        .args(["services"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* lspd"))
        .stdout(predicate::str::contains(
            "Los Santos Police Department (reports, warrants, penalties)",
        ))
        .stdout(predicate::str::contains(
            "Mairie de Los Santos (warrants, penalties)",
        ))
        .stdout(predicate::str::contains(
            "Los Santos Department of Public Health (reports)",
        ));
}

#[test]
fn test_config_shows_acting_service() {
    let db = TestDb::with_actor("fib", 2);

    db.cmd()
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""job": "fib""#))
        .stdout(predicate::str::contains(r#""grade": 2"#));
}

#[test]
fn test_users_search() {
    let db = TestDb::new();

    db.cmd()
        .args(["users", "search", "smith"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Agent Smith (12345)"))
        .stdout(predicate::str::contains("Dr. Wilson").not());
}

#[test]
fn test_users_list_by_job() {
    let db = TestDb::new();

    db.cmd()
        .args(["users", "list", "--job", "lspd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Agent Smith"))
        .stdout(predicate::str::contains("Paul Martin"))
        .stdout(predicate::str::contains("Dr. Wilson").not());
}

#[test]
fn test_sync_without_bridge_keeps_local() {
    let db = TestDb::new();

    db.cmd()
        .args(["report", "create", "--title", "Avant synchronisation"])
        .assert()
        .success();

    db.cmd()
        .args(["sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Host unreachable, keeping the local working set",
        ));

    assert_eq!(db.working_set().len(), 1);
}

#[test]
fn test_close_without_bridge_succeeds() {
    let db = TestDb::new();

    db.cmd().args(["close"]).assert().success();
}
