use chrono::{DateTime, Utc};
use models::{toll, truck};
use serde::{Deserialize, Serialize};

use crate::input::{lenient_datetime, lenient_f64};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TollInput {
    /// Also accepted as `truck`, the field name older clients post.
    #[serde(default, alias = "truck")]
    pub truck_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
}

/// A toll with the truck it was charged to; `truck` is null once that truck
/// has been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct TollRecord {
    #[serde(flatten)]
    pub toll: toll::Model,
    pub truck: Option<truck::Model>,
}
