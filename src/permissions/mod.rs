//! Runtime permissions
//!
//! - mod: permission identifiers and the category -> permission-set mapping
//! - coordinator: per-screen request/retry state machine
//! - grants: SQLite-backed grant table answering permission status queries
//!
//! The category mapping depends on the platform API level: from API 33 on,
//! media access is split into granular per-media permissions; older levels
//! use one blanket storage permission. Contacts always use their own.

pub mod coordinator;
pub mod grants;

use std::collections::HashMap;
use std::fmt;

use crate::model::types::MediaCategory;

pub use coordinator::{PermissionAction, PermissionCoordinator, PermissionState};
pub use grants::{GrantDb, GrantStatus, GrantSummary};

/// First API level with granular media permissions
pub const GRANULAR_MEDIA_API_LEVEL: u32 = 33;

/// Maximum permission prompts per screen instance
pub const MAX_PERMISSION_REQUESTS: u32 = 3;

/// OS permission identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    ReadMediaImages,
    ReadMediaVideo,
    ReadMediaAudio,
    ReadExternalStorage,
    ReadContacts,
}

impl Permission {
    pub const ALL: [Permission; 5] = [
        Permission::ReadMediaImages,
        Permission::ReadMediaVideo,
        Permission::ReadMediaAudio,
        Permission::ReadExternalStorage,
        Permission::ReadContacts,
    ];

    /// Stable identifier string, also the grant table key
    pub fn id(&self) -> &'static str {
        match self {
            Permission::ReadMediaImages => "android.permission.READ_MEDIA_IMAGES",
            Permission::ReadMediaVideo => "android.permission.READ_MEDIA_VIDEO",
            Permission::ReadMediaAudio => "android.permission.READ_MEDIA_AUDIO",
            Permission::ReadExternalStorage => "android.permission.READ_EXTERNAL_STORAGE",
            Permission::ReadContacts => "android.permission.READ_CONTACTS",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Permission::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Short label for prompts and the settings panel
    pub fn label(&self) -> &'static str {
        match self {
            Permission::ReadMediaImages => "Photos",
            Permission::ReadMediaVideo => "Videos",
            Permission::ReadMediaAudio => "Music and audio",
            Permission::ReadExternalStorage => "Files and media",
            Permission::ReadContacts => "Contacts",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Permission set a category needs on a given API level
///
/// Any one permission of the returned set is enough to browse the category.
///
/// # Examples
/// ```
/// use mediamaster::permissions::{required_permissions, Permission};
/// use mediamaster::MediaCategory;
///
/// assert_eq!(
///     required_permissions(MediaCategory::Image, 34),
///     vec![Permission::ReadMediaImages, Permission::ReadMediaVideo]
/// );
/// assert_eq!(
///     required_permissions(MediaCategory::Image, 30),
///     vec![Permission::ReadExternalStorage]
/// );
/// assert_eq!(
///     required_permissions(MediaCategory::Contact, 21),
///     vec![Permission::ReadContacts]
/// );
/// ```
pub fn required_permissions(category: MediaCategory, api_level: u32) -> Vec<Permission> {
    if category == MediaCategory::Contact {
        return vec![Permission::ReadContacts];
    }

    if api_level < GRANULAR_MEDIA_API_LEVEL {
        return vec![Permission::ReadExternalStorage];
    }

    match category {
        MediaCategory::Image | MediaCategory::Video => {
            vec![Permission::ReadMediaImages, Permission::ReadMediaVideo]
        }
        MediaCategory::Audio => vec![Permission::ReadMediaAudio],
        MediaCategory::Document => vec![
            Permission::ReadMediaImages,
            Permission::ReadMediaVideo,
            Permission::ReadMediaAudio,
        ],
        MediaCategory::Contact => vec![Permission::ReadContacts],
    }
}

/// Host-side permission status queries
///
/// Implemented by the grant table for the terminal host and by fakes in tests.
pub trait PermissionStatus {
    /// Whether the permission is currently granted
    fn is_granted(&self, permission: Permission) -> bool;

    /// Whether the host wants the purpose explained before prompting again
    fn should_show_rationale(&self, permission: Permission) -> bool;

    /// Whether the user chose "don't ask again" (prompts would be auto-denied)
    fn is_suppressed(&self, permission: Permission) -> bool;
}

/// True iff any permission in the category's required set is granted
pub fn is_granted(status: &dyn PermissionStatus, category: MediaCategory, api_level: u32) -> bool {
    required_permissions(category, api_level)
        .into_iter()
        .any(|p| status.is_granted(p))
}

/// True iff every permission in the required set is suppressed, so no prompt
/// could succeed
pub fn is_suppressed(status: &dyn PermissionStatus, category: MediaCategory, api_level: u32) -> bool {
    let required = required_permissions(category, api_level);
    !required.is_empty() && required.into_iter().all(|p| status.is_suppressed(p))
}

/// True if any permission in the required set asks for a rationale
pub fn should_show_rationale(
    status: &dyn PermissionStatus,
    category: MediaCategory,
    api_level: u32,
) -> bool {
    required_permissions(category, api_level)
        .into_iter()
        .any(|p| status.should_show_rationale(p))
}

/// Correlation token tying a prompt response to the request that caused it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(pub u64);

/// A prompt to show for a set of permissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequest {
    pub token: RequestToken,
    pub permissions: Vec<Permission>,
}

/// The user's answer to a prompt: identifier -> granted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResponse {
    pub token: RequestToken,
    pub results: HashMap<Permission, bool>,
}

impl PermissionResponse {
    /// Build a response answering every requested permission the same way
    pub fn uniform(request: &PermissionRequest, granted: bool) -> Self {
        Self {
            token: request.token,
            results: request.permissions.iter().map(|p| (*p, granted)).collect(),
        }
    }
}

/// Whether a prompt result satisfies the category (any required one granted)
pub fn response_grants(
    category: MediaCategory,
    api_level: u32,
    results: &HashMap<Permission, bool>,
) -> bool {
    required_permissions(category, api_level)
        .into_iter()
        .any(|p| results.get(&p).copied().unwrap_or(false))
}

/// Application-settings deep link for a package
///
/// # Examples
/// ```
/// use mediamaster::permissions::settings_uri;
///
/// assert_eq!(settings_uri("mediamaster"), "package:mediamaster");
/// ```
pub fn settings_uri(package_name: &str) -> String {
    format!("package:{}", package_name)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashSet;

    /// In-memory permission host for tests
    #[derive(Debug, Default, Clone)]
    pub struct FakeHost {
        pub granted: HashSet<Permission>,
        pub rationale: HashSet<Permission>,
        pub suppressed: HashSet<Permission>,
    }

    impl PermissionStatus for FakeHost {
        fn is_granted(&self, permission: Permission) -> bool {
            self.granted.contains(&permission)
        }

        fn should_show_rationale(&self, permission: Permission) -> bool {
            self.rationale.contains(&permission)
        }

        fn is_suppressed(&self, permission: Permission) -> bool {
            self.suppressed.contains(&permission)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeHost;
    use super::*;

    #[test]
    fn test_modern_mapping() {
        assert_eq!(
            required_permissions(MediaCategory::Video, 33),
            vec![Permission::ReadMediaImages, Permission::ReadMediaVideo]
        );
        assert_eq!(
            required_permissions(MediaCategory::Audio, 34),
            vec![Permission::ReadMediaAudio]
        );
        assert_eq!(required_permissions(MediaCategory::Document, 34).len(), 3);
    }

    #[test]
    fn test_legacy_mapping_uses_blanket_storage() {
        for category in [
            MediaCategory::Image,
            MediaCategory::Video,
            MediaCategory::Audio,
            MediaCategory::Document,
        ] {
            assert_eq!(
                required_permissions(category, 32),
                vec![Permission::ReadExternalStorage]
            );
        }
    }

    #[test]
    fn test_contacts_mapping_ignores_api_level() {
        for level in [21, 32, 33, 35] {
            assert_eq!(
                required_permissions(MediaCategory::Contact, level),
                vec![Permission::ReadContacts]
            );
        }
    }

    #[test]
    fn test_is_granted_uses_or_semantics_modern() {
        let mut host = FakeHost::default();
        assert!(!is_granted(&host, MediaCategory::Image, 34));

        // Video permission alone is enough for the image screen
        host.granted.insert(Permission::ReadMediaVideo);
        assert!(is_granted(&host, MediaCategory::Image, 34));
        assert!(is_granted(&host, MediaCategory::Video, 34));
        assert!(is_granted(&host, MediaCategory::Document, 34));
        assert!(!is_granted(&host, MediaCategory::Audio, 34));
        assert!(!is_granted(&host, MediaCategory::Contact, 34));
    }

    #[test]
    fn test_is_granted_uses_or_semantics_legacy() {
        let mut host = FakeHost::default();
        // Granular grants mean nothing on a legacy level
        host.granted.insert(Permission::ReadMediaImages);
        assert!(!is_granted(&host, MediaCategory::Image, 30));

        host.granted.insert(Permission::ReadExternalStorage);
        assert!(is_granted(&host, MediaCategory::Image, 30));
        assert!(is_granted(&host, MediaCategory::Audio, 30));
        assert!(is_granted(&host, MediaCategory::Document, 30));
    }

    #[test]
    fn test_suppression_requires_whole_set() {
        let mut host = FakeHost::default();
        host.suppressed.insert(Permission::ReadMediaImages);
        assert!(!is_suppressed(&host, MediaCategory::Image, 34));

        host.suppressed.insert(Permission::ReadMediaVideo);
        assert!(is_suppressed(&host, MediaCategory::Image, 34));
    }

    #[test]
    fn test_response_grants_any_required() {
        let mut results = HashMap::new();
        results.insert(Permission::ReadMediaImages, false);
        results.insert(Permission::ReadMediaVideo, true);
        assert!(response_grants(MediaCategory::Image, 34, &results));
        assert!(!response_grants(MediaCategory::Audio, 34, &results));
        assert!(!response_grants(MediaCategory::Image, 30, &results));
    }

    #[test]
    fn test_permission_id_round_trip() {
        for permission in Permission::ALL {
            assert_eq!(Permission::from_id(permission.id()), Some(permission));
        }
        assert_eq!(Permission::from_id("android.permission.CAMERA"), None);
    }
}
