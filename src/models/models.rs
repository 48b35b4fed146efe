use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    Trial,
    Active,
    PastDue,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Host {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub about: Option<String>,
    pub billing: BillingStatus,
    pub created_at: String,
}

/// A listing. Created by a host submission in `Pending` state; only
/// `Approved` properties are visible in the directory. `property_type` and
/// `platforms` hold display labels, `amenities`/`features` hold ids, and
/// `experiences` holds experience-registry keys.
#[derive(Serialize, Deserialize, Clone)]
pub struct Property {
    pub id: String,
    pub host_id: String,
    pub title: String,
    pub city: String,
    pub property_type: String,
    pub sleeps: u32,
    pub nightly_price: u32,
    pub platforms: Vec<String>,
    pub amenities: Vec<String>,
    pub features: Vec<String>,
    pub experiences: Vec<String>,
    pub images: Vec<String>,
    pub description: String,
    pub status: SubmissionStatus,
    pub review_note: Option<String>,
    pub created_at: String,
    pub reviewed_at: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct TokenData {
    pub host_id: String,
    pub created_at: String,
}
