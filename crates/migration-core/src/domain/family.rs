//! Family Member and Family App Adoption entities (E2, E3)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{AdoptionId, AdoptionStatus, FamilyMemberId, MigrationId, Role, Service};

/// One row per person in the user's household (E2). Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    id: FamilyMemberId,
    migration_id: MigrationId,
    display_name: String,
    role: Role,
    age: Option<i32>,
    contact_handle: Option<String>,
    staying_on_source: bool,
}

impl FamilyMember {
    #[must_use]
    pub const fn new(
        id: FamilyMemberId,
        migration_id: MigrationId,
        display_name: String,
        role: Role,
        age: Option<i32>,
    ) -> Self {
        Self {
            id,
            migration_id,
            display_name,
            role,
            age,
            contact_handle: None,
            staying_on_source: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> FamilyMemberId {
        self.id
    }

    #[must_use]
    pub const fn migration_id(&self) -> MigrationId {
        self.migration_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn age(&self) -> Option<i32> {
        self.age
    }

    #[must_use]
    pub fn contact_handle(&self) -> Option<&str> {
        self.contact_handle.as_deref()
    }

    #[must_use]
    pub const fn staying_on_source(&self) -> bool {
        self.staying_on_source
    }

    /// A teen is `13 <= age <= 18`.
    #[must_use]
    pub fn is_teen(&self) -> bool {
        matches!(self.age, Some(age) if (13..=18).contains(&age))
    }
}

/// Service-specific granular state co-located on an E3 row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdoptionDetails {
    pub in_group: Option<bool>,
    pub location_share_sent: Option<bool>,
    pub location_share_received: Option<bool>,
    pub card_activated: Option<bool>,
    pub card_last_four: Option<String>,
}

/// One row per (family member, service) pair (E3). Unique on that pair;
/// a missing row is equivalent to `not_started`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyAppAdoption {
    id: AdoptionId,
    family_member_id: FamilyMemberId,
    service: Service,
    status: AdoptionStatus,
    invited_at: Option<DateTime<Utc>>,
    installed_at: Option<DateTime<Utc>>,
    configured_at: Option<DateTime<Utc>>,
    in_group: Option<bool>,
    location_share_sent: Option<bool>,
    location_share_received: Option<bool>,
    card_activated: Option<bool>,
    card_last_four: Option<String>,
}

impl FamilyAppAdoption {
    #[must_use]
    pub const fn new(id: AdoptionId, family_member_id: FamilyMemberId, service: Service) -> Self {
        Self {
            id,
            family_member_id,
            service,
            status: AdoptionStatus::NotStarted,
            invited_at: None,
            installed_at: None,
            configured_at: None,
            in_group: None,
            location_share_sent: None,
            location_share_received: None,
            card_activated: None,
            card_last_four: None,
        }
    }

    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn from_parts(
        id: AdoptionId,
        family_member_id: FamilyMemberId,
        service: Service,
        status: AdoptionStatus,
        invited_at: Option<DateTime<Utc>>,
        installed_at: Option<DateTime<Utc>>,
        configured_at: Option<DateTime<Utc>>,
        in_group: Option<bool>,
        location_share_sent: Option<bool>,
        location_share_received: Option<bool>,
        card_activated: Option<bool>,
        card_last_four: Option<String>,
    ) -> Self {
        Self {
            id,
            family_member_id,
            service,
            status,
            invited_at,
            installed_at,
            configured_at,
            in_group,
            location_share_sent,
            location_share_received,
            card_activated,
            card_last_four,
        }
    }

    #[must_use]
    pub const fn id(&self) -> AdoptionId {
        self.id
    }

    #[must_use]
    pub const fn family_member_id(&self) -> FamilyMemberId {
        self.family_member_id
    }

    #[must_use]
    pub const fn service(&self) -> Service {
        self.service
    }

    #[must_use]
    pub const fn status(&self) -> AdoptionStatus {
        self.status
    }

    #[must_use]
    pub const fn invited_at(&self) -> Option<DateTime<Utc>> {
        self.invited_at
    }

    #[must_use]
    pub const fn installed_at(&self) -> Option<DateTime<Utc>> {
        self.installed_at
    }

    #[must_use]
    pub const fn configured_at(&self) -> Option<DateTime<Utc>> {
        self.configured_at
    }

    #[must_use]
    pub const fn in_group(&self) -> Option<bool> {
        self.in_group
    }

    #[must_use]
    pub const fn location_share_sent(&self) -> Option<bool> {
        self.location_share_sent
    }

    #[must_use]
    pub const fn location_share_received(&self) -> Option<bool> {
        self.location_share_received
    }

    #[must_use]
    pub const fn card_activated(&self) -> Option<bool> {
        self.card_activated
    }

    #[must_use]
    pub fn card_last_four(&self) -> Option<&str> {
        self.card_last_four.as_deref()
    }

    /// Applies `details`, keeping only the fields that belong to
    /// `self.service`. Writes to another service's fields are silently
    /// ignored.
    pub fn apply_details(&mut self, details: &AdoptionDetails) {
        match self.service {
            Service::Messaging => {
                if let Some(v) = details.in_group {
                    self.in_group = Some(v);
                }
            }
            Service::Location => {
                if let Some(v) = details.location_share_sent {
                    self.location_share_sent = Some(v);
                }
                if let Some(v) = details.location_share_received {
                    self.location_share_received = Some(v);
                }
            }
            Service::Payments => {
                if let Some(v) = details.card_activated {
                    self.card_activated = Some(v);
                }
                if let Some(v) = &details.card_last_four {
                    self.card_last_four = Some(v.clone());
                }
            }
        }
    }

    /// Attempts a transition to `new_status` at time `now`, honoring the
    /// forward-only rule. Returns `false` (a silent no-op) on a backward or
    /// sideways move.
    pub fn transition_to(&mut self, new_status: AdoptionStatus, now: DateTime<Utc>) -> bool {
        if !self.status.can_advance_to(new_status) {
            return false;
        }
        self.status = new_status;
        match new_status {
            AdoptionStatus::Invited => self.invited_at.get_or_insert(now),
            AdoptionStatus::Installed => self.installed_at.get_or_insert(now),
            AdoptionStatus::Configured => self.configured_at.get_or_insert(now),
            AdoptionStatus::NotStarted => return true,
        };
        true
    }
}
