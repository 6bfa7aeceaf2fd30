use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use wldata::prelude::*;

/// Stand-in for the external serializer: records every call and writes
/// whatever JSON was registered for the base path
#[derive(Clone, Default)]
struct FakeSerializer {
    calls: Rc<RefCell<Vec<PathBuf>>>,
    outputs: Rc<RefCell<HashMap<PathBuf, Value>>>,
}

impl FakeSerializer {
    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn will_write(&self, base: PathBuf, value: Value) {
        self.outputs.borrow_mut().insert(base, value);
    }
}

impl Serializer for FakeSerializer {
    fn serialize(&self, base_path: &Path) -> wldata::Result<()> {
        self.calls.borrow_mut().push(base_path.to_path_buf());
        if let Some(value) = self.outputs.borrow().get(base_path) {
            let mut json = base_path.as_os_str().to_owned();
            json.push(".json");
            fs::write(json, value.to_string())?;
        }
        Ok(())
    }
}

struct Fixture {
    dir: TempDir,
    serializer: FakeSerializer,
    data: WlData,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let serializer = FakeSerializer::default();
        let data = WlData::with_serializer(dir.path(), serializer.clone());
        Self { dir, serializer, data }
    }

    fn base(&self, name: &str) -> PathBuf {
        self.dir.path().join(name.trim_start_matches('/'))
    }

    fn file(&self, name: &str, ext: &str, content: &str) {
        let path = PathBuf::from(format!("{}.{ext}", self.base(name).display()));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn json(&self, name: &str, value: &Value) {
        self.file(name, "json", &value.to_string());
    }

    fn raw(&self, name: &str) {
        self.file(name, "uasset", "");
    }
}

// ==================== Asset cache ====================

#[test]
fn test_cache_idempotence() {
    let mut fx = Fixture::new();
    fx.raw("/Game/Thing");
    fx.serializer.will_write(
        fx.base("/Game/Thing"),
        json!([{"export_type": "Thing", "_apoc_data_ver": 27}]),
    );

    let first = fx.data.get_data("/Game/Thing").unwrap().unwrap();
    let second = fx.data.get_data("/Game/Thing").unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fx.serializer.call_count(), 1);
    assert_eq!(fx.data.cache_stats().hits, 1);
}

#[test]
fn test_export_index_zero_never_loads() {
    let mut fx = Fixture::new();
    fx.json("/Game/Thing", &json!([{"export_type": "Thing"}]));

    assert!(fx.data.export_by_index("/Game/Thing", 0).unwrap().is_none());
    assert!(fx.data.export_by_index("/Game/Missing", 0).unwrap().is_none());
    assert_eq!(fx.data.cache_stats().misses, 0);
    assert_eq!(fx.serializer.call_count(), 0);
}

#[test]
fn test_stale_serialization_is_regenerated_once() {
    let mut fx = Fixture::new();
    fx.raw("/Game/Old");
    fx.json("/Game/Old", &json!([{"export_type": "Thing", "_apoc_data_ver": 20}]));
    fx.serializer.will_write(
        fx.base("/Game/Old"),
        json!([{"export_type": "Thing", "_apoc_data_ver": 27}]),
    );

    let asset = fx.data.get_data("/Game/Old").unwrap().unwrap();
    assert_eq!(asset.data_version(), Some(27));
    assert_eq!(fx.serializer.call_count(), 1);
}

#[test]
fn test_current_serialization_is_not_regenerated() {
    let mut fx = Fixture::new();
    fx.raw("/Game/New");
    fx.json("/Game/New", &json!([{"export_type": "Thing", "_apoc_data_ver": 27}]));

    fx.data.get_data("/Game/New").unwrap().unwrap();
    assert_eq!(fx.serializer.call_count(), 0);
}

#[test]
fn test_json_only_tree_skips_version_check() {
    let mut fx = Fixture::new();
    fx.json("/Game/Archived", &json!([{"export_type": "Thing", "_apoc_data_ver": 3}]));

    let asset = fx.data.get_data("/Game/Archived").unwrap().unwrap();
    assert_eq!(asset.data_version(), Some(3));
    assert_eq!(fx.serializer.call_count(), 0);
}

#[test]
fn test_still_stale_after_regeneration_is_fatal() {
    let mut fx = Fixture::new();
    fx.raw("/Game/Stuck");
    fx.json("/Game/Stuck", &json!([{"_apoc_data_ver": 20}]));

    let err = fx.data.get_data("/Game/Stuck").unwrap_err();
    assert!(matches!(err, Error::StaleSerialization { found: Some(20), required: 27, .. }));

    // Nothing was cached, so the next request tries again
    assert!(fx.data.get_data("/Game/Stuck").is_err());
    assert_eq!(fx.serializer.call_count(), 2);
}

#[test]
fn test_missing_serializer_is_fatal_and_uncached() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Game")).unwrap();
    fs::write(dir.path().join("Game/Thing.uasset"), b"").unwrap();

    let mut data = WlData::with_serializer(
        dir.path(),
        ProcessSerializer::new(dir.path().join("no-such-serializer")),
    );
    for _ in 0..2 {
        let err = data.get_data("/Game/Thing").unwrap_err();
        assert!(matches!(err, Error::SerializerNotFound { .. }));
    }
    assert_eq!(data.cache_stats().hits, 0);
}

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_failing_serializer_is_fatal_and_uncached() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Game")).unwrap();
    fs::write(dir.path().join("Game/Thing.uasset"), b"").unwrap();
    let script = dir.path().join("serializer.sh");
    write_script(&script, "echo 'cannot parse asset' >&2\nexit 1");

    let mut data = WlData::with_serializer(dir.path(), ProcessSerializer::new(&script));
    for _ in 0..2 {
        match data.get_data("/Game/Thing").unwrap_err() {
            Error::SerializerFailed { base, stderr, .. } => {
                assert_eq!(base, dir.path().join("Game/Thing"));
                assert_eq!(stderr, "cannot parse asset");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(data.cache_stats().hits, 0);
    assert_eq!(data.cache_stats().misses, 2);

    // Once the serializer works, the same object loads on the next request
    write_script(
        &script,
        r#"printf '[{"export_type": "Thing", "_apoc_data_ver": 27}]' > "$2.json""#,
    );
    let asset = data.get_data("/Game/Thing").unwrap().unwrap();
    assert_eq!(asset.export(1).unwrap().export_type(), "Thing");
    assert_eq!(data.cache_stats().hits, 0);
}

#[test]
fn test_from_config_requires_filesystem() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wldata.toml");

    assert!(matches!(Config::load_from(&path), Err(Error::ConfigCreated { .. })));
    assert!(matches!(Config::load_from(&path), Err(Error::ConfigIncomplete { .. })));

    let err = WlData::from_config(Config::new(wldata::config::PLACEHOLDER, "/bin/true")).err().unwrap();
    assert!(matches!(err, Error::ConfigIncomplete { .. }));
}

// ==================== Navigation ====================

#[test]
fn test_find_is_case_insensitive() {
    let fx = Fixture::new();
    fx.raw("/Game/Data/DS_Foo");
    fx.raw("/Game/Data/Sub/ds_bar");
    fx.raw("/Game/Data/Other");

    let mut found: Vec<_> = fx.data.find("/Game", "ds_", false).collect();
    found.sort();
    assert_eq!(found, vec!["/Game/Data/DS_Foo", "/Game/Data/Sub/ds_bar"]);

    let mut upper: Vec<_> = fx.data.find("/Game", "DS_", false).collect();
    upper.sort();
    assert_eq!(upper, found);
}

#[test]
fn test_find_data_and_glob_data_keep_unserializable() {
    let mut fx = Fixture::new();
    fx.raw("/Game/Gear/Balance_A");
    fx.raw("/Game/Gear/Balance_B");
    fx.json("/Game/Gear/Balance_A", &json!([{"export_type": "Balance", "_apoc_data_ver": 27}]));

    let summarize = |mut pairs: Vec<(String, Option<Arc<Asset>>)>| {
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
            .into_iter()
            .map(|(name, asset)| (name, asset.is_some()))
            .collect::<Vec<_>>()
    };
    let expected = vec![
        ("/Game/Gear/Balance_A".to_string(), true),
        ("/Game/Gear/Balance_B".to_string(), false),
    ];

    assert_eq!(summarize(fx.data.find_data("/Game/Gear", "balance_").unwrap()), expected);
    assert_eq!(summarize(fx.data.glob_data("/Game/Gear/Balance_*").unwrap()), expected);

    // Balance_B was only handed to the serializer once, then cached as absent
    assert_eq!(fx.serializer.call_count(), 1);
}

// ==================== BVC ====================

#[test]
fn test_bvc_base_and_table_override() {
    let mut fx = Fixture::new();
    fx.json("/Game/DT", &json!([{"export_type": "DataTable", "Row": {"Col": 5}}]));

    let plain = Bvc::constant(10.0).with_scale(2.0);
    assert_eq!(fx.data.resolve_bvc(&plain).unwrap(), 20.0);

    let table = plain.with_data_table(DataTableValue::new("/Game/DT", "Row", "Col"));
    assert_eq!(fx.data.resolve_bvc(&table).unwrap(), 10.0);
}

#[test]
fn test_nested_table_values_are_rounded() {
    let mut fx = Fixture::new();
    fx.json(
        "/Game/DT",
        &json!([{
            "export_type": "DataTable",
            "Row": {"Col": {"BaseValueConstant": 2, "BaseValueScale": 0.123_456_789}},
        }]),
    );

    let bvc = Bvc::default().with_data_table(DataTableValue::new("/Game/DT", "Row", "Col"));
    assert_eq!(fx.data.resolve_bvc(&bvc).unwrap(), 0.246_914);
}

#[test]
fn test_bvc_struct_from_json() {
    let mut fx = Fixture::new();
    let value = fx
        .data
        .resolve_bvc_struct(
            &json!({
                "BaseValueConstant": 4,
                "BaseValueAttribute": ["Att", "/Game/PatchDLC/Indigo4/GameData/Attributes/PlayerClass/Att_Licensed_Shaman"],
                "AttributeInitializer": ["Init", "/Game/GameData/Loot/CharacterWeighting/Init_CharacterWeight_Armor_PetClasses_StatWeight"],
                "BaseValueScale": 3,
            }),
            None,
        )
        .unwrap();
    assert_eq!(value, 3.0);
}

// ==================== Categories ====================

fn write_part(fx: &Fixture, name: &str) {
    fx.json(name, &json!([{"export_type": "BPInvPart_Generic_C"}]));
}

#[test]
fn test_category_tie_without_tie_break_has_no_label() {
    let mut fx = Fixture::new();
    for part in ["/G/Part_X_Mag_1", "/G/Part_X_Sight_1"] {
        write_part(&fx, part);
    }
    let parts = ["/G/Part_X_Mag_1", "/G/Part_X_Sight_1"];

    assert_eq!(fx.data.parts_category(&parts, "/Game/Gear/Weapons/Balance_Plain", 3).unwrap(), None);
}

#[test]
fn test_category_tie_break_table() {
    let mut fx = Fixture::new();
    for part in ["/G/Part_X_Mag_1", "/G/Part_X_Sight_1"] {
        write_part(&fx, part);
    }
    let parts = ["/G/Part_X_Mag_1", "/G/Part_X_Sight_1"];
    let donkey = "/Game/Gear/Weapons/AssaultRifles/Vladof/_Shared/_Design/_Unique/Donkey/Balance/Balance_AR_VLA_Donkey";

    assert_eq!(fx.data.parts_category(&parts, donkey, 10).unwrap().as_deref(), Some("RAIL"));
    assert_eq!(fx.data.parts_category(&parts, donkey, 4).unwrap(), None);
}

#[test]
fn test_category_guesses_are_memoized() {
    let mut fx = Fixture::new();
    write_part(&fx, "/G/Part_X_Mag_1");

    assert_eq!(fx.data.guess_part_category("/G/Part_X_Mag_1").unwrap().as_deref(), Some("MAGAZINE"));
    let stats = fx.data.cache_stats();
    assert_eq!(fx.data.guess_part_category("/G/Part_X_Mag_1").unwrap().as_deref(), Some("MAGAZINE"));
    assert_eq!(fx.data.cache_stats(), stats);
}

// ==================== Expansions ====================

fn write_expansions(fx: &Fixture) {
    fx.raw("/Game/Exp/EXPD_Deps");
    fx.json(
        "/Game/Exp/EXPD_Deps",
        &json!([{
            "export_type": "InventoryExcludersExpansionData",
            "_apoc_data_ver": 27,
            "TargetParts": [["Part_T", "/Game/Part_T"]],
            "Dependencies": [["Dep", "/Game/Dep"]],
            "Excluders": [["Excl", "/Game/Excl"]],
        }]),
    );
    fx.raw("/Game/Exp/EXPD_Parts");
    fx.json(
        "/Game/Exp/EXPD_Parts",
        &json!([{
            "export_type": "InventoryPartSetExpansionData",
            "_apoc_data_ver": 27,
            "InventoryPartSet": ["PartSet", "/Game/PartSet"],
            "ActorPartLists": [{
                "PartTypeEnum": "Barrel",
                "Parts": [{"PartData": ["P", "/Game/P"], "Weight": {"BaseValueConstant": 1}}],
            }],
        }]),
    );
    fx.raw("/Game/Exp/EXPD_Pool");
    fx.json(
        "/Game/Exp/EXPD_Pool",
        &json!([{"export_type": "ItemPoolExpansionData", "_apoc_data_ver": 27}]),
    );
}

#[test]
fn test_expansions_load_once() {
    let mut fx = Fixture::new();
    write_expansions(&fx);

    fx.data.ensure_expansions_loaded().unwrap();
    let stats = fx.data.cache_stats();
    fx.data.ensure_expansions_loaded().unwrap();
    assert_eq!(fx.data.cache_stats(), stats);

    let parts = fx.data.expansion_parts().unwrap();
    let partset = &parts["/Game/PartSet"];
    assert_eq!(partset.contributions[0].expansion, "/Game/Exp/EXPD_Parts");
    assert_eq!(partset.part_names().collect::<Vec<_>>(), vec!["/Game/P"]);

    let deps = fx.data.expansion_dependencies().unwrap();
    let target = &deps["/Game/Part_T"];
    assert!(target.dependencies.contains("/Game/Dep"));
    assert!(target.excluders.contains("/Game/Excl"));
    assert_eq!(fx.data.cache_stats(), stats);
}

#[test]
fn test_unknown_expansion_is_fatal() {
    let mut fx = Fixture::new();
    fx.raw("/Game/EXPD_Weird");
    fx.json("/Game/EXPD_Weird", &json!([{"export_type": "MysteryExpansionData", "_apoc_data_ver": 27}]));

    let err = fx.data.ensure_expansions_loaded().unwrap_err();
    assert!(matches!(err, Error::UnknownExpansion { ref kind, .. } if kind == "MysteryExpansionData"));
}

// ==================== References ====================

#[test]
fn test_references_from_configured_database() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("refs.sqlite3");
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "create table ttwlobject (id integer primary key, name text);
         create table ttwlrefs (from_obj integer, to_obj integer);
         insert into ttwlobject values (1, '/Game/Balance_A'), (2, '/Game/Part_X');
         insert into ttwlrefs values (1, 2);",
    )
    .unwrap();
    drop(conn);

    let data_dir = dir.path().join("data");
    fs::create_dir_all(data_dir.join("Game")).unwrap();
    fs::write(data_dir.join("Game/Balance_A.json"), r#"[{"export_type": "Balance"}]"#).unwrap();

    let config = Config::new(data_dir.to_string_lossy(), "/nonexistent/serializer")
        .with_dbfile(db_path.to_string_lossy());
    let mut data = WlData::from_config(config).unwrap();

    assert_eq!(data.refs_from("/Game/Balance_A").unwrap(), vec!["/Game/Part_X"]);
    let to = data.refs_to_data("/Game/Part_X").unwrap();
    assert_eq!(to.len(), 1);
    assert_eq!(to[0].0, "/Game/Balance_A");
    assert!(to[0].1.is_some());
    assert_eq!(data.refs_objects_by_short_name("Part_X").unwrap(), vec!["/Game/Part_X"]);
}

#[test]
fn test_references_need_database_config() {
    let dir = tempdir().unwrap();
    let config = Config::new(dir.path().to_string_lossy(), "/nonexistent/serializer");
    let mut data = WlData::from_config(config).unwrap();
    assert!(matches!(data.refs_to("/Game/X"), Err(Error::ConfigIncomplete { .. })));

    let config = Config::new(dir.path().to_string_lossy(), "/nonexistent/serializer")
        .with_dbfile(dir.path().join("missing.sqlite3").to_string_lossy());
    let mut data = WlData::from_config(config).unwrap();
    assert!(matches!(data.refs_to("/Game/X"), Err(Error::ReferenceDbMissing(_))));

    let mut bare = WlData::with_serializer(dir.path(), FakeSerializer::default());
    let err = bare.refs_from("/Game/X").unwrap_err();
    assert!(matches!(err, Error::ReferencesNotConfigured));
    assert!(err.to_string().contains("\"database\" section"));
}
