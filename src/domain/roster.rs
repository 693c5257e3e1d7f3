//! The ordered tenant collection and its validated mutations.
//!
//! Every mutation validates completely before touching any tenant, so a failed
//! call leaves the roster exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::tenant::room_key;
use super::{RosterError, Tenant, TenantDraft, TenantId, ValidationError};
use crate::billing::{checked_reading, validate_meter_update, validate_stored_readings};

/// Insertion-ordered tenants with unique ids and unique (case-folded) room labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tenant>", into = "Vec<Tenant>")]
pub struct Roster {
    tenants: Vec<Tenant>,
}

impl TryFrom<Vec<Tenant>> for Roster {
    type Error = RosterError;

    fn try_from(tenants: Vec<Tenant>) -> Result<Self, Self::Error> {
        Self::from_tenants(tenants)
    }
}

impl From<Roster> for Vec<Tenant> {
    fn from(roster: Roster) -> Self {
        roster.tenants
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Tenant;
    type IntoIter = std::slice::Iter<'a, Tenant>;

    fn into_iter(self) -> Self::IntoIter {
        self.tenants.iter()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a roster from stored records, rejecting duplicate ids or rooms
    /// and meter readings no update could have produced.
    pub fn from_tenants(tenants: Vec<Tenant>) -> Result<Self, RosterError> {
        for (i, tenant) in tenants.iter().enumerate() {
            validate_stored_readings(tenant.meter_previous, tenant.meter_current)?;
            let earlier = &tenants[..i];
            if earlier.iter().any(|t| t.id == tenant.id) {
                return Err(RosterError::DuplicateId(tenant.id));
            }
            let key = tenant.room_key();
            if earlier.iter().any(|t| t.room_key() == key) {
                return Err(ValidationError::DuplicateRoom(tenant.room_label.clone()).into());
            }
        }
        Ok(Self { tenants })
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tenant> {
        self.tenants.iter()
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    pub fn get(&self, id: TenantId) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == id)
    }

    /// Id the next added tenant will receive, `None` once `TenantId::MAX` is taken
    pub fn next_id(&self) -> Option<TenantId> {
        self.tenants
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    fn position(&self, id: TenantId) -> Result<usize, RosterError> {
        self.tenants
            .iter()
            .position(|t| t.id == id)
            .ok_or(RosterError::TenantNotFound(id))
    }

    fn ensure_room_free(&self, label: &str, except: Option<TenantId>) -> Result<(), ValidationError> {
        let key = room_key(label);
        let taken = self
            .tenants
            .iter()
            .filter(|t| Some(t.id) != except)
            .any(|t| t.room_key() == key);
        if taken {
            return Err(ValidationError::DuplicateRoom(label.to_string()));
        }
        Ok(())
    }

    /// Validate and append a new tenant. Both meter fields start at the
    /// draft's initial reading, so the new tenant has zero consumption.
    pub fn add_tenant(&mut self, draft: TenantDraft) -> Result<Tenant, RosterError> {
        let draft = draft.normalized().inspect_err(|e| debug!(error = %e, "add rejected"))?;
        self.ensure_room_free(&draft.room_label, None)
            .inspect_err(|e| debug!(error = %e, "add rejected"))?;
        let id = self.next_id().ok_or(RosterError::IdsExhausted)?;

        let tenant = Tenant {
            id,
            name: draft.name,
            first_name: draft.first_name,
            room_label: draft.room_label,
            rent: draft.rent,
            meter_previous: draft.initial_meter_reading,
            meter_current: draft.initial_meter_reading,
            phone: draft.phone,
            photo_ref: draft.photo_ref,
        };
        info!(tenant_id = tenant.id, room = %tenant.room_label, "tenant added");
        self.tenants.push(tenant.clone());
        Ok(tenant)
    }

    /// Update identity, rent, previous reading and phone in place.
    ///
    /// `meter_current` and `photo_ref` are left as they are. The new previous
    /// reading must not exceed the stored current reading.
    pub fn edit_tenant(&mut self, id: TenantId, draft: TenantDraft) -> Result<Tenant, RosterError> {
        let idx = self.position(id)?;
        let draft = draft.normalized()?;
        self.ensure_room_free(&draft.room_label, Some(id))?;
        validate_meter_update(
            checked_reading(draft.initial_meter_reading)?,
            checked_reading(self.tenants[idx].meter_current)?,
        )?;

        let tenant = &mut self.tenants[idx];
        tenant.name = draft.name;
        tenant.first_name = draft.first_name;
        tenant.room_label = draft.room_label;
        tenant.rent = draft.rent;
        tenant.meter_previous = draft.initial_meter_reading;
        tenant.phone = draft.phone;
        info!(tenant_id = id, room = %tenant.room_label, "tenant edited");
        Ok(tenant.clone())
    }

    /// Remove a tenant by id, keeping the order of the others.
    pub fn delete_tenant(&mut self, id: TenantId) -> Result<Tenant, RosterError> {
        let idx = self.position(id)?;
        let removed = self.tenants.remove(idx);
        info!(tenant_id = id, room = %removed.room_label, "tenant deleted");
        Ok(removed)
    }

    /// Record a pair of meter readings after validating them.
    pub fn apply_meter_update(
        &mut self,
        id: TenantId,
        new_previous: i64,
        new_current: i64,
    ) -> Result<Tenant, RosterError> {
        let idx = self.position(id)?;
        validate_meter_update(new_previous, new_current).inspect_err(|e| {
            debug!(tenant_id = id, error = %e, "meter update rejected");
        })?;

        let tenant = &mut self.tenants[idx];
        // both are non-negative after validation
        tenant.meter_previous = new_previous.unsigned_abs();
        tenant.meter_current = new_current.unsigned_abs();
        info!(
            tenant_id = id,
            meter_previous = tenant.meter_previous,
            meter_current = tenant.meter_current,
            "meter reading recorded"
        );
        Ok(tenant.clone())
    }

    /// Tenants whose name, first name, room, phone or rent contains `term`,
    /// ignoring case. An empty term matches everyone.
    pub fn search(&self, term: &str) -> Vec<&Tenant> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.tenants.iter().collect();
        }
        self.tenants
            .iter()
            .filter(|t| {
                [
                    t.name.as_str(),
                    t.first_name.as_str(),
                    t.room_label.as_str(),
                    t.phone.as_deref().unwrap_or_default(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
                    || t.rent.to_string().contains(&needle)
            })
            .collect()
    }
}
