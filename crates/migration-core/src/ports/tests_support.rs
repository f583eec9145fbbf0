//! An in-memory [`IStateRepository`] fake, used only by `usecases` unit
//! tests in this crate. The real, persistent implementation is
//! `migration-store::SqliteStateRepository`; this fake exists so the
//! use-case layer can be exercised without a database.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::domain::{
    AdoptionDetails, AdoptionStatus, DailyProgress, FamilyAppAdoption, FamilyMember,
    FamilyMemberFilter, FamilyMemberId, MediaTransfer, Migration, MigrationId, MigrationUpdate,
    Role, Service, StoreError, StorageSnapshot, TransferId,
};

use super::state_repository::{
    DailySummary, FamilyMemberView, FamilyServiceCounts, FamilyServiceSummary, IStateRepository,
    MigrationOverview,
};

#[derive(Default)]
struct Data {
    migrations: Vec<Migration>,
    members: Vec<FamilyMember>,
    adoptions: Vec<FamilyAppAdoption>,
    transfers: Vec<MediaTransfer>,
    snapshots: Vec<StorageSnapshot>,
    daily: Vec<DailyProgress>,
    next_member_id: i64,
    next_adoption_id: i64,
    next_snapshot_id: i64,
}

pub struct InMemoryStateRepository {
    data: Mutex<Data>,
}

impl InMemoryStateRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Mutex::new(Data {
                next_member_id: 1,
                next_adoption_id: 1,
                next_snapshot_id: 1,
                ..Data::default()
            }),
        }
    }
}

impl Default for InMemoryStateRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IStateRepository for InMemoryStateRepository {
    async fn get_active_migration(&self) -> Result<Option<Migration>, StoreError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .migrations
            .iter()
            .rev()
            .find(|m| m.is_active())
            .cloned())
    }

    async fn create_migration(
        &self,
        user_name: &str,
        years_on_source: i32,
        started_at: DateTime<Utc>,
    ) -> Result<Migration, StoreError> {
        let mut data = self.data.lock().unwrap();
        if data.migrations.iter().any(Migration::is_active) {
            return Err(StoreError::AlreadyActive);
        }
        let id = MigrationId::new(data.migrations.len() as i64 + 1);
        let migration = Migration::new(id, user_name.to_string(), years_on_source, started_at);
        data.migrations.push(migration.clone());
        Ok(migration)
    }

    async fn get_migration(&self, id: MigrationId) -> Result<Migration, StoreError> {
        let data = self.data.lock().unwrap();
        data.migrations
            .iter()
            .find(|m| m.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("migration {id} not found")))
    }

    async fn update_migration(
        &self,
        id: MigrationId,
        update: &MigrationUpdate,
    ) -> Result<Migration, StoreError> {
        let mut data = self.data.lock().unwrap();
        let idx = data
            .migrations
            .iter()
            .position(|m| m.id() == id)
            .ok_or_else(|| StoreError::NotFound(format!("migration {id} not found")))?;

        let next = data.migrations[idx].apply_update(update)?;
        data.migrations[idx] = next.clone();
        Ok(next)
    }

    async fn add_family_member(
        &self,
        migration_id: MigrationId,
        display_name: &str,
        role: Role,
        age: Option<i32>,
    ) -> Result<FamilyMember, StoreError> {
        let mut data = self.data.lock().unwrap();
        let id = FamilyMemberId::new(data.next_member_id);
        data.next_member_id += 1;
        let member = FamilyMember::new(id, migration_id, display_name.to_string(), role, age);
        data.members.push(member.clone());
        Ok(member)
    }

    async fn get_family_member_by_name(
        &self,
        migration_id: MigrationId,
        display_name: &str,
    ) -> Result<FamilyMember, StoreError> {
        let data = self.data.lock().unwrap();
        data.members
            .iter()
            .find(|m| m.migration_id() == migration_id && m.display_name() == display_name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("family member {display_name} not found")))
    }

    async fn get_family_members(
        &self,
        migration_id: MigrationId,
        filter: FamilyMemberFilter,
    ) -> Result<Vec<FamilyMemberView>, StoreError> {
        let data = self.data.lock().unwrap();
        let views: Vec<FamilyMemberView> = data
            .members
            .iter()
            .filter(|m| m.migration_id() == migration_id)
            .map(|m| FamilyMemberView {
                member: m.clone(),
                adoptions: data
                    .adoptions
                    .iter()
                    .filter(|a| a.family_member_id() == m.id())
                    .cloned()
                    .collect(),
            })
            .filter(|view| match filter {
                FamilyMemberFilter::All => true,
                FamilyMemberFilter::NotInMessagingGroup => {
                    view.status_for(Service::Messaging) != AdoptionStatus::Configured
                        || !view
                            .adoption_for(Service::Messaging)
                            .and_then(FamilyAppAdoption::in_group)
                            .unwrap_or(false)
                }
                FamilyMemberFilter::NotSharingLocation => !view
                    .adoption_for(Service::Location)
                    .and_then(FamilyAppAdoption::location_share_received)
                    .unwrap_or(false),
                FamilyMemberFilter::Teen => view.member.is_teen(),
                FamilyMemberFilter::NoContactHandle => view.member.contact_handle().is_none(),
            })
            .collect();
        Ok(views)
    }

    async fn get_family_service_summary(
        &self,
        migration_id: MigrationId,
    ) -> Result<FamilyServiceSummary, StoreError> {
        let data = self.data.lock().unwrap();
        let member_ids: Vec<FamilyMemberId> = data
            .members
            .iter()
            .filter(|m| m.migration_id() == migration_id)
            .map(FamilyMember::id)
            .collect();

        let mut summary = FamilyServiceSummary::default();
        for service in Service::ALL {
            let counts = member_ids
                .iter()
                .map(|id| {
                    data.adoptions
                        .iter()
                        .find(|a| a.family_member_id() == *id && a.service() == service)
                        .map_or(AdoptionStatus::NotStarted, FamilyAppAdoption::status)
                })
                .fold(FamilyServiceCounts::default(), |mut acc, status| {
                    acc.total += 1;
                    match status {
                        AdoptionStatus::NotStarted => acc.pending += 1,
                        AdoptionStatus::Invited => acc.invited += 1,
                        AdoptionStatus::Installed => acc.installed += 1,
                        AdoptionStatus::Configured => acc.configured += 1,
                    }
                    acc
                });
            match service {
                Service::Messaging => summary.messaging = counts,
                Service::Location => summary.location = counts,
                Service::Payments => summary.payments = counts,
            }
        }
        Ok(summary)
    }

    async fn upsert_family_app_adoption(
        &self,
        _migration_id: MigrationId,
        member_id: FamilyMemberId,
        service: Service,
        status: AdoptionStatus,
        details: Option<AdoptionDetails>,
        now: DateTime<Utc>,
    ) -> Result<FamilyAppAdoption, StoreError> {
        let mut data = self.data.lock().unwrap();
        let idx = data
            .adoptions
            .iter()
            .position(|a| a.family_member_id() == member_id && a.service() == service);
        let idx = match idx {
            Some(i) => i,
            None => {
                let id = crate::domain::AdoptionId::new(data.next_adoption_id);
                data.next_adoption_id += 1;
                data.adoptions
                    .push(FamilyAppAdoption::new(id, member_id, service));
                data.adoptions.len() - 1
            }
        };
        let adoption = &mut data.adoptions[idx];
        adoption.transition_to(status, now);
        if let Some(details) = details {
            adoption.apply_details(&details);
        }
        Ok(adoption.clone())
    }

    async fn create_media_transfer(&self, transfer: &MediaTransfer) -> Result<(), StoreError> {
        let mut data = self.data.lock().unwrap();
        data.transfers.push(transfer.clone());
        Ok(())
    }

    async fn get_media_transfer(
        &self,
        migration_id: MigrationId,
    ) -> Result<Option<MediaTransfer>, StoreError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .transfers
            .iter()
            .find(|t| t.migration_id() == migration_id)
            .cloned())
    }

    async fn get_media_transfer_by_id(
        &self,
        transfer_id: &TransferId,
    ) -> Result<MediaTransfer, StoreError> {
        let data = self.data.lock().unwrap();
        data.transfers
            .iter()
            .find(|t| t.id() == transfer_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("transfer {transfer_id} not found")))
    }

    async fn update_media_transfer(&self, transfer: &MediaTransfer) -> Result<(), StoreError> {
        let mut data = self.data.lock().unwrap();
        if let Some(idx) = data.transfers.iter().position(|t| t.id() == transfer.id()) {
            data.transfers[idx] = transfer.clone();
        }
        Ok(())
    }

    async fn record_progress(
        &self,
        snapshot: StorageSnapshot,
        daily: DailyProgress,
    ) -> Result<StorageSnapshot, StoreError> {
        let mut data = self.data.lock().unwrap();
        let id = crate::domain::SnapshotId::new(data.next_snapshot_id);
        data.next_snapshot_id += 1;
        let snapshot = snapshot.with_id(id);
        data.snapshots.push(snapshot.clone());
        if let Some(idx) = data
            .daily
            .iter()
            .position(|d| d.migration_id == daily.migration_id && d.day_number == daily.day_number)
        {
            data.daily[idx] = daily;
        } else {
            data.daily.push(daily);
        }
        Ok(snapshot)
    }

    async fn get_latest_snapshot(
        &self,
        migration_id: MigrationId,
    ) -> Result<Option<StorageSnapshot>, StoreError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .snapshots
            .iter()
            .filter(|s| s.migration_id() == migration_id)
            .max_by_key(|s| s.id())
            .cloned())
    }

    async fn get_baseline_snapshot(
        &self,
        migration_id: MigrationId,
    ) -> Result<Option<StorageSnapshot>, StoreError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .snapshots
            .iter()
            .find(|s| s.migration_id() == migration_id && s.is_baseline())
            .cloned())
    }

    async fn list_storage_snapshots(
        &self,
        migration_id: MigrationId,
    ) -> Result<Vec<StorageSnapshot>, StoreError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .snapshots
            .iter()
            .filter(|s| s.migration_id() == migration_id)
            .cloned()
            .collect())
    }

    async fn get_daily_progress(
        &self,
        migration_id: MigrationId,
        day_number: i32,
    ) -> Result<Option<DailyProgress>, StoreError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .daily
            .iter()
            .find(|d| d.migration_id == migration_id && d.day_number == day_number)
            .cloned())
    }

    async fn list_daily_progress(
        &self,
        migration_id: MigrationId,
    ) -> Result<Vec<DailyProgress>, StoreError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .daily
            .iter()
            .filter(|d| d.migration_id == migration_id)
            .cloned()
            .collect())
    }

    async fn get_overview(
        &self,
        migration_id: MigrationId,
    ) -> Result<MigrationOverview, StoreError> {
        let migration = self.get_migration(migration_id).await?;
        let latest_snapshot = self.get_latest_snapshot(migration_id).await?;
        let latest_daily = {
            let mut all = self.list_daily_progress(migration_id).await?;
            all.sort_by_key(|d| d.day_number);
            all.pop()
        };
        Ok(MigrationOverview {
            migration,
            latest_snapshot,
            latest_daily,
        })
    }

    async fn get_daily_summary(
        &self,
        migration_id: MigrationId,
        day_number: i32,
    ) -> Result<DailySummary, StoreError> {
        let family_services = self.get_family_service_summary(migration_id).await?;
        let snapshot_for_day = {
            let data = self.data.lock().unwrap();
            data.snapshots
                .iter()
                .filter(|s| s.migration_id() == migration_id && s.day_number() == day_number)
                .max_by_key(|s| s.id())
                .cloned()
        };
        Ok(DailySummary {
            day_number,
            expected_milestone: crate::progress::milestone_for_day(day_number)
                .unwrap_or_default()
                .to_string(),
            family_services,
            snapshot_for_day,
        })
    }
}
