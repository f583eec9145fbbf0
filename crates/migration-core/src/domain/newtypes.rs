//! Domain newtypes with validation
//!
//! Strongly-typed identifiers and closed enumerations for the migration
//! domain. Each newtype enforces its invariants at construction time rather
//! than leaving callers to compare raw strings or integers.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// Row identifiers
// ============================================================================

macro_rules! row_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>()
                    .map(Self)
                    .map_err(|e| DomainError::InvalidId(format!("invalid {}: {e}", stringify!($name))))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

row_id!(MigrationId);
row_id!(FamilyMemberId);
row_id!(AdoptionId);
row_id!(SnapshotId);

/// Identifier for a Media Transfer, issued by the Browser Collaborator
/// when the external copy is initiated. Opaque by design (see
/// `IBrowserCollaborator::initiate_transfer`) — the core never constructs
/// one itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(String);

impl TransferId {
    /// # Errors
    /// Returns an error if the identifier is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidId(
                "transfer id cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransferId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransferId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// Closed enumerations
// ============================================================================

/// A household member's relationship to the user (E2.role).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Spouse,
    Child,
    Other,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Spouse => "spouse",
            Self::Child => "child",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spouse" => Ok(Self::Spouse),
            "child" => Ok(Self::Child),
            "other" => Ok(Self::Other),
            other => Err(DomainError::InvalidEnumValue(format!(
                "unknown role: {other}"
            ))),
        }
    }
}

/// The closed set of cross-platform services tracked in E3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Messaging,
    Location,
    Payments,
}

impl Display for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Messaging => "messaging",
            Self::Location => "location",
            Self::Payments => "payments",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Service {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "messaging" => Ok(Self::Messaging),
            "location" => Ok(Self::Location),
            "payments" => Ok(Self::Payments),
            other => Err(DomainError::InvalidEnumValue(format!(
                "unknown service: {other}"
            ))),
        }
    }
}

impl Service {
    pub const ALL: [Service; 3] = [Self::Messaging, Self::Location, Self::Payments];
}

/// Adoption status of a family member for a given service (E3.status).
///
/// Ordered; the forward-only invariant is expressed through
/// [`AdoptionStatus::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionStatus {
    NotStarted,
    Invited,
    Installed,
    Configured,
}

impl AdoptionStatus {
    /// Position in the forward-only sequence `[not_started, invited, installed, configured]`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::Invited => 1,
            Self::Installed => 2,
            Self::Configured => 3,
        }
    }

    /// Whether moving from `self` to `next` is forward-only.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        next.rank() >= self.rank()
    }
}

impl Display for AdoptionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not_started",
            Self::Invited => "invited",
            Self::Installed => "installed",
            Self::Configured => "configured",
        };
        write!(f, "{s}")
    }
}

impl FromStr for AdoptionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "invited" => Ok(Self::Invited),
            "installed" => Ok(Self::Installed),
            "configured" => Ok(Self::Configured),
            other => Err(DomainError::InvalidEnumValue(format!(
                "unknown adoption status: {other}"
            ))),
        }
    }
}

/// Lifecycle phase of a migration (E1.phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Initialization,
    MediaTransfer,
    FamilySetup,
    Validation,
    Completed,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Initialization => "initialization",
            Self::MediaTransfer => "media_transfer",
            Self::FamilySetup => "family_setup",
            Self::Validation => "validation",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Phase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initialization" => Ok(Self::Initialization),
            "media_transfer" => Ok(Self::MediaTransfer),
            "family_setup" => Ok(Self::FamilySetup),
            "validation" => Ok(Self::Validation),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::InvalidEnumValue(format!(
                "unknown phase: {other}"
            ))),
        }
    }
}

/// Per-media-kind transfer state (E4.photo_status / E4.video_status).
///
/// ```text
/// pending --initiate--> initiated --first-growth--> in_progress --day7--> completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKindStatus {
    Pending,
    Initiated,
    InProgress,
    Completed,
}

impl Display for MediaKindStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Initiated => "initiated",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

impl FromStr for MediaKindStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "initiated" => Ok(Self::Initiated),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::InvalidEnumValue(format!(
                "unknown media status: {other}"
            ))),
        }
    }
}

/// Filter accepted by `get_family_members` / T6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyMemberFilter {
    All,
    NotInMessagingGroup,
    NotSharingLocation,
    Teen,
    NoContactHandle,
}

impl FromStr for FamilyMemberFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "not_in_messaging_group" => Ok(Self::NotInMessagingGroup),
            "not_sharing_location" => Ok(Self::NotSharingLocation),
            "teen" => Ok(Self::Teen),
            "no_contact_handle" => Ok(Self::NoContactHandle),
            other => Err(DomainError::InvalidEnumValue(format!(
                "unknown family member filter: {other}"
            ))),
        }
    }
}

/// Report rendering requested by T7. The member values of `format` are
/// documented in DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Summary,
    Detailed,
}

impl FromStr for ReportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(Self::Summary),
            "detailed" => Ok(Self::Detailed),
            other => Err(DomainError::InvalidEnumValue(format!(
                "unknown report format: {other}"
            ))),
        }
    }
}
