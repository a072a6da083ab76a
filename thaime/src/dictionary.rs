//! Phonetic dictionary loading.
//!
//! A dictionary maps a romanized prefix to weighted Thai output texts. Three
//! on-disk formats are understood:
//!
//! - JSON: `{"sawasdee": [["สวัสดี", 100], ...], ...}`. Entries may also be
//!   objects: `{"text": "สวัสดี", "weight": 100}`.
//! - TSV: one `prefix<TAB>text<TAB>weight` triple per line. Blank lines and
//!   lines starting with `#` are skipped.
//! - Compiled: `lexicon.fst` (prefix → payload slot) next to
//!   `lexicon.bincode` (the payload vector), as written by `write_compiled`
//!   and the `convert_table` tool.
//!
//! Loading happens once, before any session exists. A dictionary that cannot
//! be read is never fatal: `load_or_empty` logs a warning and returns an
//! empty index, so phonetic mode still works and commits raw prefixes.

use fst::{Map, MapBuilder, Streamer};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thaime_core::{CandidateEntry, CandidateIndex};
use tracing::{debug, info, warn};

/// Prefix → entries, ordered by prefix. Within a prefix, entries keep the
/// order they appeared in the source.
pub type Groups = BTreeMap<String, Vec<LexEntry>>;

pub const FST_FILE: &str = "lexicon.fst";
pub const PAYLOAD_FILE: &str = "lexicon.bincode";

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fst error: {0}")]
    Fst(#[from] fst::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("cannot tell the dictionary format of {}", .0.display())]
    UnknownFormat(PathBuf),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// On-disk dictionary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryFormat {
    /// Pick by file extension (`.json`, `.tsv`/`.txt`, `.fst` or a directory
    /// holding the compiled pair).
    #[default]
    Auto,
    Json,
    Tsv,
    Fst,
}

impl DictionaryFormat {
    /// Resolve `Auto` against `path`.
    pub fn resolve(self, path: &Path) -> Result<DictionaryFormat, DictionaryError> {
        if self != DictionaryFormat::Auto {
            return Ok(self);
        }
        if path.is_dir() {
            return Ok(DictionaryFormat::Fst);
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(DictionaryFormat::Json),
            Some("tsv") | Some("txt") => Ok(DictionaryFormat::Tsv),
            Some("fst") => Ok(DictionaryFormat::Fst),
            _ => Err(DictionaryError::UnknownFormat(path.to_path_buf())),
        }
    }
}

/// Payload entry, shared by every format and stored as-is in the bincode file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LexEntry {
    pub text: String,
    pub weight: f64,
}

impl LexEntry {
    pub fn new<T: Into<String>>(text: T, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

impl From<LexEntry> for CandidateEntry {
    fn from(e: LexEntry) -> Self {
        CandidateEntry::new(e.text, e.weight)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawJsonEntry {
    Pair(String, f64),
    Object { text: String, weight: f64 },
}

impl From<RawJsonEntry> for LexEntry {
    fn from(raw: RawJsonEntry) -> Self {
        match raw {
            RawJsonEntry::Pair(text, weight) | RawJsonEntry::Object { text, weight } => {
                LexEntry { text, weight }
            }
        }
    }
}

/// JSON dictionary object, folded into `Groups` while it is read so that
/// case variants of a prefix merge in document order.
struct JsonGroups(Groups);

impl<'de> Deserialize<'de> for JsonGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = JsonGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping prefixes to entry lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonGroups, A::Error> {
                let mut groups = Groups::new();
                while let Some((prefix, entries)) = map.next_entry::<String, Vec<RawJsonEntry>>()? {
                    groups
                        .entry(group_key(&prefix))
                        .or_default()
                        .extend(entries.into_iter().map(LexEntry::from));
                }
                Ok(JsonGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// Key a prefix the way the index will: trimmed and lowercased.
fn group_key(prefix: &str) -> String {
    prefix.trim().to_lowercase()
}

/// Build an index from parsed groups.
pub fn index_from_groups(groups: Groups) -> CandidateIndex {
    CandidateIndex::from_groups(groups)
}

/// Read groups from `path` without building an index.
pub fn read_groups<P: AsRef<Path>>(
    path: P,
    format: DictionaryFormat,
) -> Result<Groups, DictionaryError> {
    let path = path.as_ref();
    match format.resolve(path)? {
        DictionaryFormat::Json => {
            let content = fs::read_to_string(path)?;
            parse_json_str(&content)
        }
        DictionaryFormat::Tsv => parse_tsv(BufReader::new(File::open(path)?)),
        DictionaryFormat::Fst => {
            let (fst_path, payload_path) = compiled_paths(path);
            read_compiled(&fst_path, &payload_path)
        }
        DictionaryFormat::Auto => Err(DictionaryError::UnknownFormat(path.to_path_buf())),
    }
}

/// Load a dictionary into a `CandidateIndex`.
pub fn load<P: AsRef<Path>>(
    path: P,
    format: DictionaryFormat,
) -> Result<CandidateIndex, DictionaryError> {
    let path = path.as_ref();
    let groups = read_groups(path, format)?;
    let index = index_from_groups(groups);
    info!(path = %path.display(), prefixes = index.len(), "dictionary loaded");
    Ok(index)
}

/// Load a dictionary, falling back to an empty index on any error.
pub fn load_or_empty<P: AsRef<Path>>(path: P, format: DictionaryFormat) -> CandidateIndex {
    let path = path.as_ref();
    match load(path, format) {
        Ok(index) => index,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "dictionary unavailable, using empty index");
            CandidateIndex::new()
        }
    }
}

pub fn parse_json_str(content: &str) -> Result<Groups, DictionaryError> {
    let JsonGroups(groups) = serde_json::from_str(content)?;
    Ok(groups)
}

/// Parse `prefix<TAB>text<TAB>weight` lines. Entries keep file order within
/// a prefix.
pub fn parse_tsv<R: BufRead>(reader: R) -> Result<Groups, DictionaryError> {
    let mut groups = Groups::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (prefix, text, weight) = parse_tsv_line(trimmed).ok_or_else(|| {
            DictionaryError::Malformed {
                line: i + 1,
                reason: format!("expected prefix<TAB>text<TAB>weight, got {:?}", trimmed),
            }
        })?;
        groups
            .entry(group_key(prefix))
            .or_default()
            .push(LexEntry::new(text, weight));
    }
    Ok(groups)
}

fn parse_tsv_line(line: &str) -> Option<(&str, &str, f64)> {
    let mut parts = line.split('\t');
    let prefix = parts.next()?.trim();
    let text = parts.next()?;
    let weight = parts.next()?.trim().parse::<f64>().ok()?;
    if prefix.is_empty() {
        return None;
    }
    Some((prefix, text, weight))
}

/// `lexicon.fst`/`lexicon.bincode` locations for a compiled dictionary given
/// either its directory or its `.fst` file.
pub fn compiled_paths(path: &Path) -> (PathBuf, PathBuf) {
    if path.is_dir() {
        (path.join(FST_FILE), path.join(PAYLOAD_FILE))
    } else {
        (path.to_path_buf(), path.with_extension("bincode"))
    }
}

/// Read a compiled dictionary back into groups.
pub fn read_compiled(fst_path: &Path, payload_path: &Path) -> Result<Groups, DictionaryError> {
    let map = Map::new(fs::read(fst_path)?)?;
    let payloads: Vec<Vec<LexEntry>> =
        bincode::deserialize_from(BufReader::new(File::open(payload_path)?))?;
    debug!(
        keys = map.len(),
        payloads = payloads.len(),
        "read compiled dictionary"
    );

    let mut groups = Groups::new();
    let mut stream = map.stream();
    while let Some((key, slot)) = stream.next() {
        let prefix = String::from_utf8(key.to_vec()).map_err(|_| DictionaryError::Malformed {
            line: 0,
            reason: format!("non UTF-8 key in {}", fst_path.display()),
        })?;
        let entries = payloads
            .get(slot as usize)
            .cloned()
            .ok_or_else(|| DictionaryError::Malformed {
                line: 0,
                reason: format!("key {:?} points past the payload table", prefix),
            })?;
        groups.insert(prefix, entries);
    }
    Ok(groups)
}

/// Write `groups` as `lexicon.fst` + `lexicon.bincode` under `out_dir`.
///
/// Each key maps to the position of its entry list in the payload vector.
pub fn write_compiled(groups: &Groups, out_dir: &Path) -> Result<(), DictionaryError> {
    fs::create_dir_all(out_dir)?;
    let fst_path = out_dir.join(FST_FILE);
    let payload_path = out_dir.join(PAYLOAD_FILE);

    let mut builder = MapBuilder::new(BufWriter::new(File::create(&fst_path)?))?;
    let mut payloads: Vec<&Vec<LexEntry>> = Vec::with_capacity(groups.len());
    for (slot, (prefix, entries)) in groups.iter().enumerate() {
        builder.insert(prefix, slot as u64)?;
        payloads.push(entries);
    }
    builder.finish()?;

    let mut out = BufWriter::new(File::create(&payload_path)?);
    bincode::serialize_into(&mut out, &payloads)?;
    out.flush()?;
    info!(
        dir = %out_dir.display(),
        prefixes = groups.len(),
        "wrote compiled dictionary"
    );
    Ok(())
}

/// Small built-in dictionary used when no dictionary is configured.
pub fn demo_groups() -> Groups {
    let raw: &[(&str, &[(&str, f64)])] = &[
        ("sawasdee", &[("สวัสดี", 100.0)]),
        ("sawatdee", &[("สวัสดี", 100.0)]),
        ("khob", &[("ขอบ", 50.0)]),
        ("khobkhun", &[("ขอบคุณ", 100.0)]),
        ("ka", &[("ค่ะ", 90.0), ("คะ", 80.0), ("กา", 40.0), ("ก้า", 10.0)]),
        ("krub", &[("ครับ", 100.0)]),
        ("khrap", &[("ครับ", 100.0)]),
        (
            "mai",
            &[
                ("ไม่", 100.0),
                ("ใหม่", 90.0),
                ("ไหม", 80.0),
                ("ไม้", 60.0),
                ("มัย", 20.0),
                ("ไหม้", 10.0),
            ],
        ),
        ("thai", &[("ไทย", 100.0), ("ไท", 30.0)]),
        ("rak", &[("รัก", 100.0)]),
        ("sabai", &[("สบาย", 100.0)]),
        ("chai", &[("ใช่", 90.0), ("ใจ", 70.0), ("ชัย", 30.0)]),
        ("pai", &[("ไป", 100.0)]),
        ("dee", &[("ดี", 100.0)]),
        ("nam", &[("น้ำ", 100.0), ("นำ", 40.0)]),
        ("phasa", &[("ภาษา", 100.0)]),
    ];
    raw.iter()
        .map(|(prefix, entries)| {
            (
                prefix.to_string(),
                entries.iter().map(|(t, w)| LexEntry::new(*t, *w)).collect(),
            )
        })
        .collect()
}

pub fn demo_index() -> CandidateIndex {
    index_from_groups(demo_groups())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_json_pairs_and_objects() {
        let groups = parse_json_str(
            r#"{"ka": [["ค่ะ", 90], ["คะ", 80.5]], "dee": [{"text": "ดี", "weight": 3}]}"#,
        )
        .unwrap();
        assert_eq!(groups["ka"], vec![LexEntry::new("ค่ะ", 90.0), LexEntry::new("คะ", 80.5)]);
        assert_eq!(groups["dee"], vec![LexEntry::new("ดี", 3.0)]);
    }

    #[test]
    fn test_case_variant_prefixes_merge_in_file_order() {
        let groups =
            parse_json_str(r#"{"ka": [["คะ", 50]], "KA": [["ค่ะ", 50]], " Ka ": [["กา", 10]]}"#)
                .unwrap();
        assert_eq!(groups.len(), 1);
        let texts: Vec<&str> = groups["ka"].iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["คะ", "ค่ะ", "กา"]);

        // equal weights: the earlier line wins the tie
        let index = index_from_groups(groups);
        assert_eq!(index.lookup("ka")[0].text, "คะ");

        let groups = parse_tsv(Cursor::new("KA\tค่ะ\t5\nka\tคะ\t5\n")).unwrap();
        assert_eq!(groups["ka"][0].text, "ค่ะ");
        assert_eq!(groups["ka"][1].text, "คะ");
    }

    #[test]
    fn test_parse_json_malformed() {
        assert!(matches!(parse_json_str("[1, 2]"), Err(DictionaryError::Json(_))));
        assert!(parse_json_str(r#"{"ka": [["ค่ะ", "heavy"]]}"#).is_err());
    }

    #[test]
    fn test_parse_tsv() {
        let src = "# comment\nka\tค่ะ\t90\n\nka\tคะ\t80\ndee\tดี\t1.5\n";
        let groups = parse_tsv(Cursor::new(src)).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["ka"][1], LexEntry::new("คะ", 80.0));
        assert_eq!(groups["dee"][0].weight, 1.5);
    }

    #[test]
    fn test_parse_tsv_reports_line() {
        let err = parse_tsv(Cursor::new("ka\tค่ะ\t90\nbroken line\n")).unwrap_err();
        match err {
            DictionaryError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_format_resolution() {
        let f = DictionaryFormat::Auto;
        assert_eq!(f.resolve(Path::new("d.json")).unwrap(), DictionaryFormat::Json);
        assert_eq!(f.resolve(Path::new("d.TSV")).unwrap(), DictionaryFormat::Tsv);
        assert_eq!(f.resolve(Path::new("d.fst")).unwrap(), DictionaryFormat::Fst);
        assert!(f.resolve(Path::new("d.csv")).is_err());
        assert_eq!(
            DictionaryFormat::Tsv.resolve(Path::new("d.csv")).unwrap(),
            DictionaryFormat::Tsv
        );
    }

    #[test]
    fn test_demo_index() {
        let index = demo_index();
        assert_eq!(index.lookup("sawasdee")[0].text, "สวัสดี");
        assert_eq!(index.lookup("mai").len(), 6);
        assert!(index.lookup("zzz").is_empty());
    }

    #[test]
    fn test_compiled_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let groups = demo_groups();
        write_compiled(&groups, dir.path()).unwrap();
        let back = read_groups(dir.path(), DictionaryFormat::Auto).unwrap();
        assert_eq!(back, groups);
    }

    #[test]
    fn test_load_or_empty_on_missing_file() {
        let index = load_or_empty("/nonexistent/thaime.json", DictionaryFormat::Auto);
        assert!(index.is_empty());
    }
}
