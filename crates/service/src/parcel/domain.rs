use chrono::{DateTime, Utc};
use models::parcel::{self, NewParcel, ParcelKind, ParcelStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;
use crate::input::{blank_as_none, lenient_datetime, lenient_f64, non_blank, required, required_text};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelInput {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "blank_as_none")]
    pub kind: Option<ParcelKind>,
    #[serde(default)]
    pub insurance: Option<bool>,
    #[serde(default)]
    pub priority: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ParcelInput {
    pub fn into_new_parcel(self, customer_id: Uuid) -> Result<NewParcel, ServiceError> {
        Ok(NewParcel {
            customer_id,
            weight: required(self.weight, "Please add parcel weight")?,
            source: required_text(self.source, "Please add source location")?,
            destination: required_text(self.destination, "Please add destination location")?,
            kind: self.kind,
            insurance: self.insurance,
            priority: self.priority,
            description: non_blank(self.description),
        })
    }
}

/// Tracking update posted by staff. Blank values keep what is stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelPatch {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<ParcelStatus>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub eta: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_message: Option<String>,
}

impl ParcelPatch {
    pub fn apply(self, parcel: &mut parcel::Model) {
        if let Some(s) = self.status { parcel.status = s; }
        if let Some(l) = non_blank(self.location) { parcel.location = l; }
        if let Some(eta) = self.eta { parcel.eta = Some(eta.into()); }
        if let Some(msg) = non_blank(self.update_message) {
            parcel.record_update(msg);
        }
        parcel.touch();
    }
}

/// A parcel, with its owner attached on the views that populate it.
#[derive(Debug, Clone, Serialize)]
pub struct ParcelRecord {
    #[serde(flatten)]
    pub parcel: parcel::Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<AuthUser>,
}

impl ParcelRecord {
    pub fn bare(parcel: parcel::Model) -> Self { Self { parcel, customer: None } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::parcel::ORDER_PLACED;

    fn created() -> parcel::Model {
        let input: ParcelInput = serde_json::from_value(serde_json::json!({
            "weight": "5", "source": "Mumbai", "destination": "Delhi", "type": "express"
        }))
        .unwrap();
        parcel::new_model(input.into_new_parcel(Uuid::new_v4()).unwrap()).unwrap()
    }

    #[test]
    fn string_weight_and_type_accepted() {
        let p = created();
        assert_eq!(p.weight, 5.0);
        assert_eq!(p.kind, ParcelKind::Express);
        assert_eq!(p.location, "Mumbai");
    }

    #[test]
    fn missing_destination_reported() {
        let input: ParcelInput = serde_json::from_value(serde_json::json!({"weight": 1, "source": "Pune"})).unwrap();
        match input.into_new_parcel(Uuid::new_v4()) {
            Err(ServiceError::Validation(msg)) => assert_eq!(msg, "Please add destination location"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn patch_without_message_adds_no_update() {
        let mut p = created();
        let patch: ParcelPatch = serde_json::from_value(serde_json::json!({"status": "Delivered", "location": ""})).unwrap();
        patch.apply(&mut p);
        assert_eq!(p.status, ParcelStatus::Delivered);
        assert_eq!(p.location, "Mumbai");
        assert_eq!(p.updates.0.len(), 1);
    }

    #[test]
    fn patch_message_appended_after_order_placed() {
        let mut p = created();
        let patch: ParcelPatch =
            serde_json::from_value(serde_json::json!({"status": "In Transit", "updateMessage": "Picked up"})).unwrap();
        patch.apply(&mut p);
        let msgs: Vec<_> = p.updates.0.iter().map(|u| u.message.as_str()).collect();
        assert_eq!(msgs, vec![ORDER_PLACED, "Picked up"]);
        assert_eq!(p.status, ParcelStatus::InTransit);
    }

    #[test]
    fn record_omits_customer_when_not_populated() {
        let json = serde_json::to_value(ParcelRecord::bare(created())).unwrap();
        assert!(json.get("customer").is_none());
        assert_eq!(json["source"], "Mumbai");
    }
}
