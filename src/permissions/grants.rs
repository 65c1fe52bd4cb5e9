use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use super::{Permission, PermissionStatus};
use crate::utils::log_debug;

/// Recorded state of one permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantStatus {
    /// Never prompted (or reset from settings)
    NotDetermined,
    Granted,
    /// Denied at least once; prompting again shows a rationale first
    Denied,
    /// Denied with "don't ask again"; prompts are suppressed
    DeniedForever,
}

impl GrantStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GrantStatus::NotDetermined => "Not requested",
            GrantStatus::Granted => "Allowed",
            GrantStatus::Denied => "Denied",
            GrantStatus::DeniedForever => "Denied (don't ask again)",
        }
    }

    fn serialize(&self) -> &'static str {
        match self {
            GrantStatus::NotDetermined => "NotDetermined",
            GrantStatus::Granted => "Granted",
            GrantStatus::Denied => "Denied",
            GrantStatus::DeniedForever => "DeniedForever",
        }
    }

    fn parse(s: &str) -> GrantStatus {
        match s {
            "Granted" => GrantStatus::Granted,
            "Denied" => GrantStatus::Denied,
            "DeniedForever" => GrantStatus::DeniedForever,
            _ => GrantStatus::NotDetermined,
        }
    }
}

/// One row of the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantSummary {
    pub permission: Permission,
    pub status: GrantStatus,
    pub denials: u32,
}

/// Permission database for the terminal host
///
/// Plays the part of the OS permission store: prompt answers and settings
/// changes are persisted here, and status queries read from it.
pub struct GrantDb {
    conn: Connection,
}

impl GrantDb {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open grant database at {}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = GrantDb { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS permission_grants (
                permission TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                denial_count INTEGER NOT NULL DEFAULT 0
            ) WITHOUT ROWID;
            ",
        )?;

        Ok(())
    }

    pub fn status(&self, permission: Permission) -> Result<GrantStatus> {
        let mut stmt = self
            .conn
            .prepare("SELECT status FROM permission_grants WHERE permission = ?1")?;

        let result = stmt.query_row(params![permission.id()], |row| {
            let status: String = row.get(0)?;
            Ok(GrantStatus::parse(&status))
        });

        match result {
            Ok(status) => Ok(status),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(GrantStatus::NotDetermined),
            Err(e) => Err(e.into()),
        }
    }

    /// Total denials recorded for a permission across sessions
    pub fn denial_count(&self, permission: Permission) -> Result<u32> {
        let mut stmt = self
            .conn
            .prepare("SELECT denial_count FROM permission_grants WHERE permission = ?1")?;

        match stmt.query_row(params![permission.id()], |row| row.get::<_, i64>(0)) {
            Ok(count) => Ok(count.max(0) as u32),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the answer to a prompt
    pub fn record_prompt_result(
        &self,
        permission: Permission,
        granted: bool,
        dont_ask_again: bool,
    ) -> Result<()> {
        let status = match (granted, dont_ask_again) {
            (true, _) => GrantStatus::Granted,
            (false, true) => GrantStatus::DeniedForever,
            (false, false) => GrantStatus::Denied,
        };

        self.conn.execute(
            "INSERT INTO permission_grants (permission, status, denial_count)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(permission) DO UPDATE SET
                status = excluded.status,
                denial_count = denial_count + excluded.denial_count",
            params![permission.id(), status.serialize(), if granted { 0 } else { 1 }],
        )?;

        log_debug(&format!("Grants: {} -> {:?}", permission, status));
        Ok(())
    }

    /// Toggle a permission from the settings panel
    pub fn set_granted(&self, permission: Permission, granted: bool) -> Result<()> {
        let status = if granted {
            GrantStatus::Granted
        } else {
            GrantStatus::Denied
        };

        self.conn.execute(
            "INSERT INTO permission_grants (permission, status, denial_count)
             VALUES (?1, ?2, 0)
             ON CONFLICT(permission) DO UPDATE SET status = excluded.status",
            params![permission.id(), status.serialize()],
        )?;

        log_debug(&format!("Grants: settings set {} -> {:?}", permission, status));
        Ok(())
    }

    /// Forget everything about a permission (clears "don't ask again")
    pub fn reset(&self, permission: Permission) -> Result<()> {
        self.conn.execute(
            "DELETE FROM permission_grants WHERE permission = ?1",
            params![permission.id()],
        )?;
        log_debug(&format!("Grants: reset {}", permission));
        Ok(())
    }

    /// Every known permission with its status and denial count, in display order
    pub fn summaries(&self) -> Result<Vec<GrantSummary>> {
        Permission::ALL
            .into_iter()
            .map(|permission| {
                Ok(GrantSummary {
                    permission,
                    status: self.status(permission)?,
                    denials: self.denial_count(permission)?,
                })
            })
            .collect()
    }

    fn status_or_default(&self, permission: Permission) -> GrantStatus {
        self.status(permission).unwrap_or_else(|e| {
            log_debug(&format!("Grants: failed to read {}: {}", permission, e));
            GrantStatus::NotDetermined
        })
    }
}

impl PermissionStatus for GrantDb {
    fn is_granted(&self, permission: Permission) -> bool {
        self.status_or_default(permission) == GrantStatus::Granted
    }

    fn should_show_rationale(&self, permission: Permission) -> bool {
        self.status_or_default(permission) == GrantStatus::Denied
    }

    fn is_suppressed(&self, permission: Permission) -> bool {
        self.status_or_default(permission) == GrantStatus::DeniedForever
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_permission_is_not_determined() {
        let db = GrantDb::open_in_memory().unwrap();
        assert_eq!(
            db.status(Permission::ReadContacts).unwrap(),
            GrantStatus::NotDetermined
        );
        assert!(!db.is_granted(Permission::ReadContacts));
        assert!(!db.should_show_rationale(Permission::ReadContacts));
        assert!(!db.is_suppressed(Permission::ReadContacts));
    }

    #[test]
    fn test_prompt_results_map_to_status() {
        let db = GrantDb::open_in_memory().unwrap();

        db.record_prompt_result(Permission::ReadMediaImages, false, false).unwrap();
        assert!(db.should_show_rationale(Permission::ReadMediaImages));

        db.record_prompt_result(Permission::ReadMediaImages, false, true).unwrap();
        assert!(db.is_suppressed(Permission::ReadMediaImages));
        assert!(!db.should_show_rationale(Permission::ReadMediaImages));

        db.record_prompt_result(Permission::ReadMediaImages, true, false).unwrap();
        assert!(db.is_granted(Permission::ReadMediaImages));
    }

    #[test]
    fn test_denials_accumulate() {
        let db = GrantDb::open_in_memory().unwrap();
        db.record_prompt_result(Permission::ReadMediaAudio, false, false).unwrap();
        db.record_prompt_result(Permission::ReadMediaAudio, false, false).unwrap();
        db.record_prompt_result(Permission::ReadMediaAudio, true, false).unwrap();
        assert_eq!(db.denial_count(Permission::ReadMediaAudio).unwrap(), 2);
    }

    #[test]
    fn test_reset_clears_suppression() {
        let db = GrantDb::open_in_memory().unwrap();
        db.record_prompt_result(Permission::ReadContacts, false, true).unwrap();
        db.reset(Permission::ReadContacts).unwrap();
        assert_eq!(
            db.status(Permission::ReadContacts).unwrap(),
            GrantStatus::NotDetermined
        );
    }

    #[test]
    fn test_settings_toggle() {
        let db = GrantDb::open_in_memory().unwrap();
        db.set_granted(Permission::ReadExternalStorage, true).unwrap();
        assert!(db.is_granted(Permission::ReadExternalStorage));
        db.set_granted(Permission::ReadExternalStorage, false).unwrap();
        assert_eq!(
            db.status(Permission::ReadExternalStorage).unwrap(),
            GrantStatus::Denied
        );
    }

    #[test]
    fn test_summaries_list_every_permission() {
        let db = GrantDb::open_in_memory().unwrap();
        db.set_granted(Permission::ReadContacts, true).unwrap();
        db.record_prompt_result(Permission::ReadMediaVideo, false, false).unwrap();
        db.record_prompt_result(Permission::ReadMediaVideo, false, true).unwrap();

        let summaries = db.summaries().unwrap();
        assert_eq!(summaries.len(), Permission::ALL.len());
        assert!(summaries.contains(&GrantSummary {
            permission: Permission::ReadContacts,
            status: GrantStatus::Granted,
            denials: 0,
        }));
        assert!(summaries.contains(&GrantSummary {
            permission: Permission::ReadMediaVideo,
            status: GrantStatus::DeniedForever,
            denials: 2,
        }));
    }
}
