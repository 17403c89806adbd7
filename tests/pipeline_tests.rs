// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end runs of the rename → messages → render pipeline

use i18n_template::config::TemplateSet;
use i18n_template::{Config, Pipeline};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir should create");
        fs::create_dir_all(dir.path().join("templates")).expect("templates dir should create");
        Self { dir }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir should create");
        }
        fs::write(path, contents).expect("file should write");
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|err| panic!("reading {}: {}", relative, err))
    }

    fn config(&self) -> Config {
        Config {
            locales: vec!["en".into(), "fr".into()],
            default_locale: Some("en".into()),
            messages_path: self.path("messages"),
            base_path: Some(self.path("templates")),
            templates: vec![TemplateSet::new(
                vec![self.path("templates")],
                self.path("dist"),
            )],
            ..Config::default()
        }
    }

    fn run(&self, config: Config) -> i18n_template::types::RunSummary {
        Pipeline::new(config)
            .expect("config should validate")
            .run()
            .expect("pipeline should run")
    }
}

#[test]
fn scenario_a_new_key_gets_empty_entry_and_falls_back() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "Hello [[greet]]!");

    let summary = ws.run(ws.config());

    assert_eq!(ws.read("messages/messages_fr.csv"), "greet,");
    assert_eq!(ws.read("dist/fr/index.html"), "Hello greet!");
    assert_eq!(ws.read("dist/en/index.html"), "Hello greet!");
    assert!(
        !ws.path("messages/messages_en.csv").exists(),
        "default locale never gets a catalog"
    );

    let messages = summary.messages.expect("messages stage should run");
    assert_eq!(messages.keys, 1);
    assert_eq!(messages.untranslated.len(), 1);
    assert_eq!(messages.untranslated[0].key, "greet");
}

#[test]
fn scenario_b_translated_message_is_substituted() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "Hello [[greet]]!");
    ws.write("messages/messages_fr.csv", "greet,Bonjour");

    ws.run(ws.config());

    assert_eq!(ws.read("dist/fr/index.html"), "Hello Bonjour!");
    assert_eq!(ws.read("dist/en/index.html"), "Hello greet!");
}

#[test]
fn scenario_c_messages_are_html_escaped() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "<p>[[greet]]</p>");
    ws.write("messages/messages_fr.csv", "greet,<b>Bonjour</b>");

    ws.run(ws.config());
    assert_eq!(ws.read("dist/fr/index.html"), "<p>&lt;b&gt;Bonjour&lt;/b&gt;</p>");

    let raw = Config {
        html_escape: false,
        force_refresh: true,
        ..ws.config()
    };
    ws.run(raw);
    assert_eq!(ws.read("dist/fr/index.html"), "<p><b>Bonjour</b></p>");
}

#[test]
fn scenario_d_rename_rewrites_templates_and_catalogs() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "Hello [[greet]]! [[greet]]");
    ws.write("messages/messages_fr.csv", "greet,Bonjour");
    ws.write("messages/keys.csv", "greet,greeting");

    let summary = ws.run(ws.config());

    assert_eq!(ws.read("templates/index.html"), "Hello [[greeting]]! [[greeting]]");
    assert_eq!(ws.read("messages/messages_fr.csv"), "greeting,Bonjour");
    assert_eq!(ws.read("messages/keys.csv"), "greeting,");
    assert_eq!(ws.read("dist/fr/index.html"), "Hello Bonjour! Bonjour");

    let rename = summary.rename.expect("rename stage should run");
    assert_eq!(rename.renames, vec![("greet".to_string(), "greeting".to_string())]);
    assert_eq!(rename.templates_updated.len(), 1);
    assert_eq!(rename.catalogs_updated.len(), 1);
}

#[test]
fn scenario_e_orphaned_empty_keys_kept_when_removal_disabled() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]]");
    ws.write("messages/messages_fr.csv", "greet,Bonjour\nold.key,");

    let keep = Config {
        remove_empty_keys: false,
        ..ws.config()
    };
    ws.run(keep);
    assert_eq!(ws.read("messages/messages_fr.csv"), "greet,Bonjour\nold.key,");

    ws.run(ws.config());
    assert_eq!(ws.read("messages/messages_fr.csv"), "greet,Bonjour");
}

#[test]
fn translated_orphans_survive_reconciliation() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[current]]");
    ws.write("messages/messages_fr.csv", "retired,Ancien texte");

    ws.run(ws.config());

    assert_eq!(
        ws.read("messages/messages_fr.csv"),
        "retired,Ancien texte\ncurrent,"
    );
}

#[test]
fn second_run_leaves_catalogs_unchanged() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[a]] [[b]]");
    ws.write("templates/about.html", "[[b]] [[c, with comma]]");
    ws.write("messages/messages_fr.csv", "b,Bé\nstale,");

    let first = ws.run(ws.config());
    let after_first = ws.read("messages/messages_fr.csv");
    let second = ws.run(ws.config());

    assert_eq!(ws.read("messages/messages_fr.csv"), after_first);
    assert_eq!(
        first.messages.expect("messages stage").catalogs_written.len(),
        1
    );
    assert!(second
        .messages
        .expect("messages stage")
        .catalogs_written
        .is_empty());
}

#[test]
fn rename_leaves_untouched_templates_alone() {
    let ws = Workspace::new();
    ws.write("templates/a.html", "[[greet]]");
    ws.write("templates/b.html", "[[other]]");
    ws.write("messages/keys.csv", "greet,greeting\nother,");

    let old = filetime::FileTime::from_unix_time(1_000_000_000, 0);
    filetime::set_file_mtime(ws.path("templates/b.html"), old).expect("mtime should set");

    let config = Config {
        skip_messages_runner: true,
        skip_template_runner: true,
        ..ws.config()
    };
    let summary = ws.run(config);

    let mtime = filetime::FileTime::from_last_modification_time(
        &fs::metadata(ws.path("templates/b.html")).expect("metadata"),
    );
    assert_eq!(mtime, old);
    assert_eq!(ws.read("templates/a.html"), "[[greeting]]");
    assert_eq!(
        summary.rename.expect("rename stage").templates_updated,
        vec![ws.path("templates/a.html")]
    );
    assert_eq!(
        ws.read("messages/keys.csv"),
        "greet,greeting\nother,",
        "keys.csv is only regenerated by the messages stage"
    );
}

#[test]
fn rename_leaves_catalogs_without_the_old_key_alone() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]] [[bye]]");
    ws.write("messages/messages_fr.csv", "greet,Bonjour\nbye,Au revoir");
    ws.write("messages/messages_de.csv", "bye,Tschüss");
    ws.write("messages/messages_it.csv", "greet,\nbye,Ciao");
    ws.write("messages/keys.csv", "greet,greeting\nbye,");

    let old = filetime::FileTime::from_unix_time(1_000_000_000, 0);
    for locale in ["de", "it"] {
        let path = ws.path(&format!("messages/messages_{}.csv", locale));
        filetime::set_file_mtime(path, old).expect("mtime should set");
    }

    let config = Config {
        locales: vec!["en".into(), "fr".into(), "de".into(), "it".into()],
        skip_messages_runner: true,
        skip_template_runner: true,
        ..ws.config()
    };
    let summary = ws.run(config);

    let rename = summary.rename.expect("rename stage");
    assert_eq!(rename.catalogs_updated, vec![ws.path("messages/messages_fr.csv")]);
    assert_eq!(ws.read("messages/messages_fr.csv"), "bye,Au revoir\ngreeting,Bonjour");
    for locale in ["de", "it"] {
        let path = ws.path(&format!("messages/messages_{}.csv", locale));
        let mtime =
            filetime::FileTime::from_last_modification_time(&fs::metadata(path).expect("metadata"));
        assert_eq!(mtime, old, "{} catalog should not be rewritten", locale);
    }
    assert_eq!(ws.read("messages/messages_it.csv"), "greet,\nbye,Ciao");
}

#[test]
fn rename_keeps_template_bom() {
    let ws = Workspace::new();
    fs::write(ws.path("templates/index.html"), b"\xEF\xBB\xBF[[greet]]").expect("template");
    ws.write("messages/keys.csv", "greet,greeting");

    ws.run(ws.config());

    assert_eq!(
        fs::read(ws.path("templates/index.html")).expect("template should read"),
        b"\xEF\xBB\xBF[[greeting]]"
    );
}

#[test]
fn missing_keys_fall_back_escaped() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "<p>[[greet]] [[a<b]]</p>");
    ws.write("messages/messages_fr.csv", "greet,Bonjour");

    ws.run(ws.config());

    assert_eq!(ws.read("dist/fr/index.html"), "<p>Bonjour a&lt;b</p>");
    assert_eq!(ws.read("dist/en/index.html"), "<p>greet a&lt;b</p>");
}

#[test]
fn keys_catalog_values_are_cleared_after_a_run() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]] [[bye]]");
    ws.write("messages/keys.csv", "greet,greeting\nbye,");

    ws.run(ws.config());
    assert_eq!(ws.read("messages/keys.csv"), "greeting,\nbye,");

    // The rename request is consumed; a second run changes nothing.
    let summary = ws.run(ws.config());
    assert!(summary.rename.expect("rename stage").renames.is_empty());
    assert_eq!(ws.read("templates/index.html"), "[[greeting]] [[bye]]");
}

#[test]
fn untranslated_report_lists_blank_keys_per_catalog() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]] [[bye]]");
    ws.write("messages/messages_fr.csv", "greet,Bonjour");
    let config = Config {
        locales: vec!["en".into(), "fr".into(), "de".into()],
        ..ws.config()
    };

    ws.run(config.clone());

    let report = ws.read("messages/empty_messages.log");
    let fr = ws.path("messages/messages_fr.csv");
    let de = ws.path("messages/messages_de.csv");
    assert!(report.contains(&format!("* FILE: {}\n\nbye\n", fr.display())));
    assert!(report.contains(&format!("* FILE: {}\n\ngreet\nbye\n", de.display())));

    ws.write("messages/messages_fr.csv", "greet,Bonjour\nbye,Au revoir");
    ws.write("messages/messages_de.csv", "greet,Hallo\nbye,Tschüss");
    ws.run(config);
    assert!(!ws.path("messages/empty_messages.log").exists());
}

#[test]
fn json_exports_every_extracted_key() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]] [[bye]]");
    ws.write("messages/messages_fr.csv", "bye,Au revoir\nunused,Rien");
    let config = Config {
        json_path: Some(ws.path("public/i18n")),
        ..ws.config()
    };

    let summary = ws.run(config);

    let json: serde_json::Value =
        serde_json::from_str(&ws.read("public/i18n/messages_fr.json")).expect("valid JSON");
    assert_eq!(json, serde_json::json!({"greet": "", "bye": "Au revoir"}));
    assert!(!ws.path("public/i18n/messages_en.json").exists());
    assert_eq!(summary.messages.expect("messages stage").json_exports.len(), 1);
}

#[test]
fn missing_templates_are_skipped() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]]");
    let config = Config {
        templates: vec![TemplateSet::new(
            vec![ws.path("templates/index.html"), ws.path("templates/gone.html")],
            ws.path("dist"),
        )],
        ..ws.config()
    };

    let summary = ws.run(config);

    assert_eq!(ws.read("dist/fr/index.html"), "greet");
    assert!(!ws.path("dist/fr/gone.html").exists());
    assert_eq!(
        summary.messages.expect("messages stage").missing_templates,
        vec![ws.path("templates/gone.html")]
    );
    assert_eq!(summary.render.expect("render stage").missing_templates, 2);
}

#[test]
fn without_default_locale_every_locale_has_a_catalog() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]]");
    ws.write("messages/keys.csv", "greet,");
    let config = Config {
        default_locale: None,
        ..ws.config()
    };

    ws.run(config);

    assert_eq!(ws.read("messages/messages_en.csv"), "greet,");
    assert_eq!(ws.read("messages/messages_fr.csv"), "greet,");
    assert!(!ws.path("messages/keys.csv").exists());
}

#[test]
fn no_keys_removes_keys_catalog() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "no placeholders here");
    ws.write("messages/keys.csv", "old,");

    ws.run(ws.config());

    assert!(!ws.path("messages/keys.csv").exists());
    assert_eq!(ws.read("dist/fr/index.html"), "no placeholders here");
}

#[test]
fn skipped_stages_do_not_run() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]]");
    let config = Config {
        skip_key_runner: true,
        skip_messages_runner: true,
        skip_template_runner: true,
        ..ws.config()
    };

    let summary = ws.run(config);

    assert!(summary.stages_run.is_empty());
    assert!(!ws.path("messages").exists());
    assert!(!ws.path("dist").exists());
}

#[test]
fn keys_and_status_do_not_write() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]] [[bye]]");
    ws.write("messages/messages_fr.csv", "greet,Bonjour\nold,Vieux");
    let pipeline = Pipeline::new(ws.config()).expect("config should validate");

    assert_eq!(pipeline.keys().expect("keys"), vec!["greet", "bye"]);

    let statuses = pipeline.status().expect("status");
    assert_eq!(statuses.len(), 2);
    let en = &statuses[0];
    assert_eq!(en.locale, "en");
    assert!(en.catalog.is_none());
    assert_eq!(en.stale_outputs, 1);
    let fr = &statuses[1];
    assert_eq!((fr.missing, fr.untranslated, fr.orphaned), (1, 1, 1));
    assert_eq!(fr.stale_outputs, 1);

    assert_eq!(ws.read("messages/messages_fr.csv"), "greet,Bonjour\nold,Vieux");
    assert!(!ws.path("dist").exists());
}

#[test]
fn custom_transform_rewrites_destinations() {
    let ws = Workspace::new();
    ws.write("templates/index.html", "[[greet]]");

    Pipeline::new(ws.config())
        .expect("config should validate")
        .with_transform(|path: &Path| path.with_extension("htm"))
        .run()
        .expect("pipeline should run");

    assert_eq!(ws.read("dist/fr/index.htm"), "greet");
    assert!(!ws.path("dist/fr/index.html").exists());
}
