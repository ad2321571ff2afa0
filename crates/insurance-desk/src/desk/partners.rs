use tracing::info;

use super::service::{DeskError, OperationsDesk};
use crate::partners::{PartnerId, PartnerNote};
use crate::records::{AuditCategory, AuditStatus};

impl OperationsDesk {
    /// Store the operator's statement for a partner, replacing any earlier one.
    pub fn save_partner_note(
        &mut self,
        partner_id: &PartnerId,
        note: impl Into<String>,
    ) -> Result<PartnerNote, DeskError> {
        let name = self
            .partners
            .get(partner_id)
            .map(|partner| partner.name.clone())
            .ok_or_else(|| DeskError::PartnerNotFound(partner_id.clone()))?;

        let note = note.into();
        self.partner_notes.insert(partner_id.clone(), note.clone());
        self.record_event(
            "Partner Statement Updated",
            AuditCategory::System,
            format!("Custom statement added for {name}"),
            AuditStatus::Success,
        );
        info!(partner = %partner_id, "partner statement saved");

        Ok(PartnerNote {
            partner_id: partner_id.clone(),
            note,
        })
    }
}
