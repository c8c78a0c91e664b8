//! Tracker pairing.
//!
//! Pairing creates the device document, attaches it to the pet and moves the
//! owner to the tier the device belongs to.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use super::auth::{AuthFlow, AuthState};
use crate::models::{Device, DeviceInfo, DeviceSettings, PairDeviceRequest, Tier};
use crate::repositories::{DeviceRepository, PetRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum PairingError {
    #[error("Pet not found: {0}")]
    PetNotFound(String),

    #[error("Pet {0} belongs to another user")]
    NotOwner(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Outcome of a successful pairing.
#[derive(Debug, Clone)]
pub struct PairedDevice {
    pub device: Device,
    pub tier: Tier,
    /// State published by the tier update; an `Error` here means the device
    /// was paired but the profile still carries the old tier.
    pub auth_state: AuthState,
}

pub struct PairingService {
    pets: Arc<dyn PetRepository>,
    devices: Arc<dyn DeviceRepository>,
}

impl PairingService {
    pub fn new(pets: Arc<dyn PetRepository>, devices: Arc<dyn DeviceRepository>) -> Self {
        Self { pets, devices }
    }

    pub async fn pair_device(
        &self,
        auth: &AuthFlow,
        user_id: &str,
        request: PairDeviceRequest,
    ) -> Result<PairedDevice, PairingError> {
        let pet = self
            .pets
            .get_pet_by_id(&request.pet_id)
            .await?
            .ok_or_else(|| PairingError::PetNotFound(request.pet_id.clone()))?;

        if pet.user_id != user_id {
            return Err(PairingError::NotOwner(pet.pet_id));
        }

        let tier = Tier::from_device_type(&request.device_type);
        let now = Utc::now();

        let mut device = Device {
            user_id: user_id.to_string(),
            pet_id: pet.pet_id.clone(),
            physical_device_id: request.physical_device_id,
            device_type: tier,
            serial_number: request.serial_number,
            firmware_version: request.firmware_version,
            hardware_version: request.hardware_version,
            manufacturing_date: request.manufacturing_date,
            battery_level: request.battery_level,
            settings: DeviceSettings::for_tier(tier),
            auth_token: shared::crypto::generate_token(),
            last_token_refresh: Some(now),
            ..Device::default()
        };

        let device_id = self.devices.create_device(device.clone()).await?;
        device.device_id = device_id.clone();
        device.last_sync = Some(now);

        let attached = self
            .pets
            .update_pet_device(
                &pet.pet_id,
                DeviceInfo {
                    device_id: device_id.clone(),
                    device_type: tier,
                    paired_at: Some(now),
                    battery_level: device.battery_level,
                    last_seen: Some(now),
                },
            )
            .await;

        // A device that is not attached to its pet must not outlive the call.
        if let Err(err) = attached {
            if let Err(cleanup) = self.devices.delete_device(&device_id).await {
                tracing::warn!(
                    device_id = %device_id,
                    error = %cleanup,
                    "Failed to remove unattached device"
                );
            }
            return Err(err.into());
        }

        tracing::info!(
            user_id = %user_id,
            pet_id = %pet.pet_id,
            device_id = %device_id,
            tier = %tier,
            "Device paired"
        );

        let auth_state = auth
            .update_user_tier_after_pairing(user_id, tier.as_str())
            .await;

        Ok(PairedDevice {
            device,
            tier,
            auth_state,
        })
    }
}
