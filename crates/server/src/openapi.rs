use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// admin, driver or customer (default)
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct UserDoc { pub id: String, pub email: String, pub role: String }

#[derive(ToSchema)]
pub struct SessionDoc { pub id: String, pub email: String, pub role: String, pub token: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TruckInputDoc {
    pub driver: String,
    pub route: String,
    /// 0 to 100; numeric strings accepted
    pub fuel_level: f64,
    pub location: String,
    pub next_stop: String,
    /// Ready, In Transit, Loading or Maintenance
    pub status: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TruckPatchDoc {
    pub driver: Option<String>,
    pub route: Option<String>,
    pub location: Option<String>,
    pub next_stop: Option<String>,
    pub status: Option<String>,
    pub estimated_arrival: Option<String>,
    pub fuel_level: Option<f64>,
    pub tolls_paid: Option<f64>,
    /// `null` clears the reading
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub fuel_efficiency: Option<f64>,
    pub total_distance: Option<f64>,
    pub fuel_consumed: Option<f64>,
    pub parcel_ids: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct TollEntryDoc { pub date: String, pub location: String, pub amount: f64 }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TruckDoc {
    pub id: String,
    pub driver: String,
    pub route: String,
    pub status: String,
    pub parcel_ids: Vec<String>,
    pub location: String,
    pub fuel_level: f64,
    pub next_stop: String,
    pub estimated_arrival: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub tolls_paid: f64,
    pub fuel_efficiency: Option<f64>,
    pub total_distance: Option<f64>,
    pub fuel_consumed: Option<f64>,
    pub toll_history: Vec<TollEntryDoc>,
    /// Present on reads: the parcels `parcelIds` resolve to
    pub parcels: Option<Vec<ParcelDoc>>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct FleetSummaryDoc {
    pub total_trucks: u64,
    pub ready: u64,
    pub in_transit: u64,
    pub loading: u64,
    pub maintenance: u64,
    pub total_tolls_paid: f64,
    pub total_distance: f64,
    pub total_fuel_consumed: f64,
    pub fleet_fuel_efficiency: Option<f64>,
    pub average_fuel_efficiency: Option<f64>,
    pub low_fuel: Vec<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ParcelInputDoc {
    pub weight: f64,
    pub source: String,
    pub destination: String,
    /// regular (default) or express
    #[schema(rename = "type")]
    pub kind: Option<String>,
    pub insurance: Option<bool>,
    pub priority: Option<bool>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ParcelPatchDoc {
    /// Processing, In Transit or Delivered
    pub status: Option<String>,
    pub location: Option<String>,
    pub eta: Option<String>,
    /// Appended to the tracking log when set
    pub update_message: Option<String>,
}

#[derive(ToSchema)]
pub struct TrackingUpdateDoc { pub time: String, pub message: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ParcelDoc {
    pub id: String,
    pub customer_id: String,
    pub weight: f64,
    pub source: String,
    pub destination: String,
    #[schema(rename = "type")]
    pub kind: String,
    pub insurance: bool,
    pub priority: bool,
    pub description: Option<String>,
    pub status: String,
    pub location: String,
    pub eta: Option<String>,
    pub updates: Vec<TrackingUpdateDoc>,
    /// Populated on admin list and single reads
    pub customer: Option<UserDoc>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TollInputDoc { pub truck_id: String, pub date: String, pub location: String, pub amount: f64 }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TollDoc {
    pub id: String,
    pub truck_id: String,
    pub date: String,
    pub location: String,
    pub amount: f64,
    /// Populated on the full list; null once the truck is deleted
    pub truck: Option<TruckDoc>,
    pub created_at: String,
    pub updated_at: String,
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::trucks::list,
        crate::routes::trucks::create,
        crate::routes::trucks::get,
        crate::routes::trucks::update,
        crate::routes::trucks::delete,
        crate::routes::trucks::fleet_summary,
        crate::routes::parcels::list,
        crate::routes::parcels::create,
        crate::routes::parcels::get,
        crate::routes::parcels::update,
        crate::routes::parcels::delete,
        crate::routes::tolls::list,
        crate::routes::tolls::create,
        crate::routes::tolls::by_truck,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            UserDoc,
            SessionDoc,
            TruckInputDoc,
            TruckPatchDoc,
            TollEntryDoc,
            TruckDoc,
            FleetSummaryDoc,
            ParcelInputDoc,
            ParcelPatchDoc,
            TrackingUpdateDoc,
            ParcelDoc,
            TollInputDoc,
            TollDoc,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "trucks"),
        (name = "parcels"),
        (name = "tolls")
    )
)]
pub struct ApiDoc;
