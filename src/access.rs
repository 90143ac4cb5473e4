//! Capability levels for catalog operations.
//!
//! The upstream API distinguishes three permission scopes. Rather than an
//! inheritance chain, each level carries an explicit table of the
//! operations it allows, and gateway methods check the table before
//! issuing a request.

use std::fmt;

/// Permission level a gateway operates under.
///
/// `Basic` covers the public read endpoints. `Manage` adds the
/// authenticated profile and library writes. `Delete` additionally allows
/// destructive library operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Basic,
    Manage,
    Delete,
}

/// A gated operation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Public catalog reads: artists, tracks, albums, playlists, search.
    ReadCatalog,
    /// Authenticated profile reads (`/user/me` and the listener's own
    /// playlists).
    ReadProfile,
    /// Creating playlists and adding tracks.
    ManageLibrary,
    /// Deleting playlists and removing tracks.
    DeleteLibrary,
}

impl Access {
    /// The operations this level permits.
    #[must_use]
    pub const fn allowed(self) -> &'static [Operation] {
        match self {
            Access::Basic => &[Operation::ReadCatalog],
            Access::Manage => &[
                Operation::ReadCatalog,
                Operation::ReadProfile,
                Operation::ManageLibrary,
            ],
            Access::Delete => &[
                Operation::ReadCatalog,
                Operation::ReadProfile,
                Operation::ManageLibrary,
                Operation::DeleteLibrary,
            ],
        }
    }

    /// Whether `operation` is listed in this level's table.
    #[must_use]
    pub fn allows(self, operation: Operation) -> bool {
        self.allowed().contains(&operation)
    }

    /// Levels above `Basic` need an access token to be usable at all.
    #[must_use]
    pub fn requires_token(self) -> bool {
        self != Access::Basic
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Access::Basic => "basic_access",
            Access::Manage => "manage_library",
            Access::Delete => "delete_library",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ReadCatalog => "read the public catalog",
            Operation::ReadProfile => "read your profile",
            Operation::ManageLibrary => "modify your library",
            Operation::DeleteLibrary => "delete from your library",
        };
        f.write_str(name)
    }
}
