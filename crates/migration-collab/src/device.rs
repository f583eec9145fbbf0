//! `FixtureDeviceCollaborator` — the one `IDeviceCollaborator` adapter this
//! repository ships.
//!
//! The core sends opaque natural-language command sentences (T4's details)
//! and expects back which named entities were observed on the handset.
//! This adapter never parses a command's grammar; it simply
//! checks whether any of its configured `known_device_entities` appear as
//! a substring of each command, which is enough to drive the demo flow and
//! integration tests without a real device.

use migration_core::ports::device_collaborator::{DeviceObservation, IDeviceCollaborator};

use crate::fixture::CollabFixture;

pub struct FixtureDeviceCollaborator {
    known_entities: Vec<String>,
}

impl FixtureDeviceCollaborator {
    #[must_use]
    pub fn new(fixture: &CollabFixture) -> Self {
        Self {
            known_entities: fixture.known_device_entities.clone(),
        }
    }
}

impl Default for FixtureDeviceCollaborator {
    fn default() -> Self {
        Self::new(&CollabFixture::default())
    }
}

#[async_trait::async_trait]
impl IDeviceCollaborator for FixtureDeviceCollaborator {
    async fn run_commands(&self, commands: &[String]) -> anyhow::Result<DeviceObservation> {
        let mut observation = DeviceObservation::default();
        for command in commands {
            match self
                .known_entities
                .iter()
                .find(|entity| command.contains(entity.as_str()))
            {
                Some(entity) => observation.found.push(entity.clone()),
                None => observation.not_found.push(command.clone()),
            }
        }
        Ok(observation)
    }
}
