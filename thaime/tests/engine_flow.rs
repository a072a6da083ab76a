use std::io::{Cursor, Write};
use std::sync::Arc;
use thaime::dictionary::{self, DictionaryFormat, LexEntry};
use thaime::{create_engine, EngineFactory, ThaimeConfig};
use thaime_core::{KeyEvent, Mode, Session};

fn type_str(s: &mut Session, text: &str) -> String {
    text.chars()
        .map(|ch| s.handle_key(KeyEvent::char(ch)).committed_text())
        .collect()
}

#[test]
fn kedmanee_engine_remaps_golden_keys() {
    let engine = create_engine(&ThaimeConfig::default());
    let factory = EngineFactory::new(Arc::new(engine));
    let mut s = factory.create_engine("thaime-kedmanee").unwrap();
    assert_eq!(type_str(&mut s, "asdf1"), "ฟหกดๅ");
    assert_eq!(type_str(&mut s, "hello"), "้ำสสน");
}

#[test]
fn phonetic_engine_uses_demo_dictionary() {
    let engine = create_engine(&ThaimeConfig::default());
    let mut s = engine.create_session_for("thaime-phonetic").unwrap();
    assert_eq!(type_str(&mut s, "sawasdee"), "");
    let r = s.handle_key(KeyEvent::press(
        thaime_core::keysym::RETURN,
        thaime_core::Modifiers::NONE,
    ));
    assert_eq!(r.committed_text(), "สวัสดี");
}

#[test]
fn tsv_dictionary_is_loaded_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.tsv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "# test dictionary").unwrap();
    writeln!(f, "maew\tแมว\t10").unwrap();
    writeln!(f, "maew\tแม้ว\t20").unwrap();
    drop(f);

    let config = ThaimeConfig {
        dictionary: Some(path),
        ..ThaimeConfig::default()
    };
    let engine = create_engine(&config);
    let mut s = engine.create_session_with_mode(Mode::Phonetic);
    type_str(&mut s, "maew");
    let top = s.composition().unwrap().current_candidate().unwrap().text.clone();
    assert_eq!(top, "แม้ว");
    assert!(engine.index().lookup("sawasdee").is_empty());
}

#[test]
fn unreadable_dictionary_degrades_to_raw_commits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let config = ThaimeConfig {
        dictionary: Some(path),
        ..ThaimeConfig::default()
    };
    let engine = create_engine(&config);
    assert!(engine.index().is_empty());

    let mut s = engine.create_session_with_mode(Mode::Phonetic);
    type_str(&mut s, "sawasdee");
    let r = s.handle_key(KeyEvent::press(
        thaime_core::keysym::SPACE,
        thaime_core::Modifiers::NONE,
    ));
    assert_eq!(r.committed_text(), "sawasdee ");
}

#[test]
fn compiled_dictionary_loads_by_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut groups = dictionary::Groups::new();
    groups.insert(
        "khao".to_string(),
        vec![LexEntry::new("ข้าว", 50.0), LexEntry::new("เขา", 80.0)],
    );
    dictionary::write_compiled(&groups, dir.path()).unwrap();

    let index = dictionary::load(dir.path(), DictionaryFormat::Auto).unwrap();
    let entries = index.lookup("khao");
    assert_eq!(entries[0].text, "เขา");
    assert_eq!(entries[1].text, "ข้าว");
}

#[test]
fn host_script_produces_notifications() {
    let mut config = ThaimeConfig::default();
    config.base_mut().mode_shortcuts = true;
    let engine = create_engine(&config);
    let mut s = engine.create_session();
    let script = "mode:phonetic\ntext:ka Down Space\nCtrl+2 a\nbogus-key\nquit\nignored\n";
    let mut out = Vec::new();
    thaime::host::run(&mut s, Cursor::new(script), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("mode phonetic"));
    assert!(out.contains("preedit: ka (caret 2)"));
    assert!(out.contains("candidates: 1.ค่ะ 2.คะ*"));
    assert!(out.contains("commit: \"คะ\""));
    assert!(out.contains("commit: \" \""));
    assert!(out.contains("commit: \"ฟ\""));
    assert!(out.contains("error: unknown key: bogus-key"));
    assert!(!out.contains("ignored"));
    assert_eq!(s.mode(), Mode::Remap);
}
