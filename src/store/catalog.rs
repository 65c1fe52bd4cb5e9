use anyhow::{anyhow, bail, Context, Result};
use rusqlite::{params, params_from_iter, types::Value, Connection};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{columns, Collection, ContentQuery, ContentStore, Cursor};
use crate::model::types::ContentUri;
use crate::utils::log_debug;

/// One file to record in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub display_name: String,
    pub size: Option<u64>,
    pub mime_type: String,
    /// Unix seconds; only used the first time a path is recorded
    pub date_added: i64,
}

/// SQLite catalog of media files and contacts
pub struct CatalogDb {
    conn: Mutex<Connection>,
}

impl CatalogDb {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open catalog at {}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS files (
                _id INTEGER PRIMARY KEY AUTOINCREMENT,
                _data TEXT NOT NULL UNIQUE,
                _display_name TEXT,
                _size INTEGER,
                mime_type TEXT NOT NULL,
                date_added INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS files_date_added ON files (date_added);

            CREATE TABLE IF NOT EXISTS contacts (
                _id INTEGER PRIMARY KEY AUTOINCREMENT,
                display_name TEXT,
                number TEXT,
                UNIQUE (display_name, number)
            );
            ",
        )?;

        Ok(CatalogDb {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("catalog connection lock poisoned"))
    }

    /// Insert or refresh a file; an existing path keeps its `date_added`
    pub fn upsert_file(&self, record: &FileRecord) -> Result<i64> {
        let conn = self.lock()?;
        let path = record.path.to_string_lossy().into_owned();

        conn.execute(
            "INSERT INTO files (_data, _display_name, _size, mime_type, date_added)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(_data) DO UPDATE SET
                _display_name = excluded._display_name,
                _size = excluded._size,
                mime_type = excluded.mime_type",
            params![
                &path,
                &record.display_name,
                record.size.map(|s| s as i64),
                &record.mime_type,
                record.date_added,
            ],
        )?;

        let id = conn.query_row(
            "SELECT _id FROM files WHERE _data = ?1",
            params![&path],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    /// Insert a contact unless the same name/number pair already exists
    pub fn upsert_contact(&self, name: Option<&str>, number: Option<&str>) -> Result<()> {
        // UNIQUE treats NULLs as distinct, so match with IS
        self.lock()?.execute(
            "INSERT INTO contacts (display_name, number)
             SELECT ?1, ?2
             WHERE NOT EXISTS (
                SELECT 1 FROM contacts WHERE display_name IS ?1 AND number IS ?2
             )",
            params![name, number],
        )?;
        Ok(())
    }

    /// Remove catalog rows whose file no longer exists on disk
    pub fn prune_missing_files(&self) -> Result<usize> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT _id, _data FROM files")?;
        let missing: Vec<i64> = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|(_, path)| !Path::new(path).exists())
            .map(|(id, _)| id)
            .collect();

        let tx = conn.unchecked_transaction()?;
        for id in &missing {
            tx.execute("DELETE FROM files WHERE _id = ?1", params![id])?;
        }
        tx.commit()?;

        Ok(missing.len())
    }

    /// Number of items in a collection
    pub fn count(&self, collection: Collection) -> Result<usize> {
        let sql = match base_filter(collection) {
            Some(filter) => format!("SELECT COUNT(*) FROM {} WHERE {}", table(collection), filter),
            None => format!("SELECT COUNT(*) FROM {}", table(collection)),
        };
        let count: i64 = self.lock()?.query_row(&sql, [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }

    fn run_query(&self, query: &ContentQuery) -> Result<Cursor> {
        let sql = build_sql(query)?;
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let width = query.projection.len();

        let rows = stmt
            .query_map(params_from_iter(query.selection_args.iter()), |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<Result<Vec<_>, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let columns = query.projection.iter().map(|c| c.to_string()).collect();
        Ok(Cursor::new(columns, rows))
    }

    fn lookup_path(&self, uri: &ContentUri) -> Result<Option<PathBuf>> {
        let Some(collection) = Collection::for_uri(uri) else {
            return Ok(None);
        };
        if collection == Collection::ContactPhones {
            return Ok(None);
        }
        let Some(id) = uri.id() else {
            return Ok(None);
        };

        let sql = match base_filter(collection) {
            Some(filter) => format!("SELECT _data FROM files WHERE _id = ?1 AND {}", filter),
            None => "SELECT _data FROM files WHERE _id = ?1".to_string(),
        };

        let conn = self.lock()?;
        match conn.query_row(&sql, params![id], |row| row.get::<_, String>(0)) {
            Ok(path) => Ok(Some(PathBuf::from(path))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl ContentStore for CatalogDb {
    fn query(&self, query: &ContentQuery) -> Option<Cursor> {
        match self.run_query(query) {
            Ok(cursor) => {
                log_debug(&format!(
                    "Catalog: {} -> {} row(s)",
                    query.collection.uri(),
                    cursor.remaining()
                ));
                Some(cursor)
            }
            Err(e) => {
                log_debug(&format!("Catalog: query on {} failed: {}", query.collection.uri(), e));
                None
            }
        }
    }

    fn resolve_path(&self, uri: &ContentUri) -> Option<PathBuf> {
        self.lookup_path(uri).unwrap_or_else(|e| {
            log_debug(&format!("Catalog: failed to resolve {}: {}", uri, e));
            None
        })
    }
}

fn table(collection: Collection) -> &'static str {
    match collection {
        Collection::ContactPhones => "contacts",
        _ => "files",
    }
}

fn base_filter(collection: Collection) -> Option<&'static str> {
    match collection {
        Collection::Images => Some("mime_type LIKE 'image/%'"),
        Collection::Video => Some("mime_type LIKE 'video/%'"),
        Collection::Audio => Some("mime_type LIKE 'audio/%'"),
        Collection::Files | Collection::ContactPhones => None,
    }
}

/// Translate a content query into SQL
///
/// Projection and sort columns are checked against the collection's column
/// list; ties in the sort column fall back to `_id` in the same direction so
/// repeated queries return a stable order.
pub(crate) fn build_sql(query: &ContentQuery) -> Result<String> {
    let allowed = query.collection.columns();

    if query.projection.is_empty() {
        bail!("empty projection");
    }
    for column in &query.projection {
        if !allowed.contains(column) {
            bail!("unknown column '{}' for {}", column, query.collection.uri());
        }
    }

    let mut sql = format!(
        "SELECT {} FROM {}",
        query.projection.join(", "),
        table(query.collection)
    );

    let mut filters = Vec::new();
    if let Some(filter) = base_filter(query.collection) {
        filters.push(filter.to_string());
    }
    if let Some(selection) = query.selection.as_deref().filter(|s| !s.trim().is_empty()) {
        filters.push(format!("({})", selection));
    }
    if !filters.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&filters.join(" AND "));
    }

    if let Some(order) = query.sort_order {
        if !allowed.contains(&order.column) {
            bail!("unknown sort column '{}' for {}", order.column, query.collection.uri());
        }
        let direction = order.direction.as_sql();
        let collation = if order.ignore_case { " COLLATE NOCASE" } else { "" };
        sql.push_str(&format!(" ORDER BY {}{} {}", order.column, collation, direction));
        if order.column != columns::ID {
            sql.push_str(&format!(", {} {}", columns::ID, direction));
        }
    }

    Ok(sql)
}
