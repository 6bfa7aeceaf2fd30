//! Object cross-references
//!
//! References between objects come from a prebuilt SQLite database with two
//! tables: `ttwlobject(id, name)` and `ttwlrefs(from_obj, to_obj)`.

use std::path::Path;
use std::sync::Arc;

use rusqlite::{params, Connection, OpenFlags};

use crate::data::{Asset, WlData};
use crate::error::{Error, Result};

/// Source of object cross-references
pub trait ReferenceStore {
    /// Objects that reference `name`
    fn references_to(&self, name: &str) -> Result<Vec<String>>;

    /// Objects that `name` references
    fn references_from(&self, name: &str) -> Result<Vec<String>>;

    /// Objects whose last path component is `short_name`
    fn objects_by_short_name(&self, short_name: &str) -> Result<Vec<String>>;
}

const REFS_TO_SQL: &str = "select o2.name
    from ttwlobject o, ttwlrefs r, ttwlobject o2
    where o.name = ?1 and o.id = r.to_obj and o2.id = r.from_obj";

const REFS_FROM_SQL: &str = "select o2.name
    from ttwlobject o, ttwlrefs r, ttwlobject o2
    where o.name = ?1 and o.id = r.from_obj and o2.id = r.to_obj";

const SHORT_NAME_SQL: &str = "select name from ttwlobject where name like ?1";

/// The SQLite reference database
pub struct SqliteReferences {
    conn: Connection,
}

impl SqliteReferences {
    /// Open the database at `path`, read-only
    ///
    /// # Errors
    /// Returns [`Error::ReferenceDbMissing`] if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ReferenceDbMissing(path.to_path_buf()));
        }
        tracing::debug!("Opening reference database {}", path.display());
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn names(&self, sql: &str, param: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params![param], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
    }
}

impl ReferenceStore for SqliteReferences {
    fn references_to(&self, name: &str) -> Result<Vec<String>> {
        self.names(REFS_TO_SQL, name)
    }

    fn references_from(&self, name: &str) -> Result<Vec<String>> {
        self.names(REFS_FROM_SQL, name)
    }

    fn objects_by_short_name(&self, short_name: &str) -> Result<Vec<String>> {
        self.names(SHORT_NAME_SQL, &format!("%/{short_name}"))
    }
}

impl WlData {
    /// The reference store, opening the configured database on first use
    ///
    /// # Errors
    /// Fails if the `[database]` config section isn't filled in or the
    /// database file doesn't exist.
    pub fn references(&mut self) -> Result<&dyn ReferenceStore> {
        let store: Box<dyn ReferenceStore> = match self.references.take() {
            Some(store) => store,
            None => Box::new(self.open_reference_db()?),
        };
        Ok(&**self.references.insert(store))
    }

    fn open_reference_db(&self) -> Result<SqliteReferences> {
        let Some(config) = self.config() else {
            return Err(Error::ReferencesNotConfigured);
        };
        config.require_database()?;
        SqliteReferences::open(&config.dbfile())
    }

    /// Objects that reference `obj_name`
    pub fn refs_to(&mut self, obj_name: &str) -> Result<Vec<String>> {
        self.references()?.references_to(obj_name)
    }

    /// Objects that `obj_name` references
    pub fn refs_from(&mut self, obj_name: &str) -> Result<Vec<String>> {
        self.references()?.references_from(obj_name)
    }

    /// Objects whose last path component is `short_name`
    pub fn refs_objects_by_short_name(&mut self, short_name: &str) -> Result<Vec<String>> {
        self.references()?.objects_by_short_name(short_name)
    }

    /// [`refs_to`](Self::refs_to), paired with each object's data
    pub fn refs_to_data(&mut self, obj_name: &str) -> Result<Vec<(String, Option<Arc<Asset>>)>> {
        let names = self.refs_to(obj_name)?;
        self.pair_with_data(names)
    }

    /// [`refs_from`](Self::refs_from), paired with each object's data
    pub fn refs_from_data(&mut self, obj_name: &str) -> Result<Vec<(String, Option<Arc<Asset>>)>> {
        let names = self.refs_from(obj_name)?;
        self.pair_with_data(names)
    }
}
