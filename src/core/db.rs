//! In-process JSON key-value store. Entities live under typed key prefixes
//! (`host:{id}`, `property:{id}`, `token:{t}`) with index lists beside
//! them, and every value is a JSON document. One `Store` is shared through
//! actix app data for the life of the process.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::core::helpers::{hash_password, now_iso};
use crate::models::models::{BillingStatus, Host, Property, SubmissionStatus};

pub const HOSTS_LIST_KEY: &str = "hosts_list";
pub const LISTINGS_KEY: &str = "listings";
pub const REVIEW_QUEUE_KEY: &str = "review_queue";
pub const TOKENS_LIST_KEY: &str = "tokens_list";

pub fn host_key(id: &str) -> String {
    format!("host:{}", id)
}

pub fn property_key(id: &str) -> String {
    format!("property:{}", id)
}

pub fn token_key(token: &str) -> String {
    format!("token:{}", token)
}

pub fn host_properties_key(host_id: &str) -> String {
    format!("host_properties:{}", host_id)
}

#[derive(Default)]
pub struct Store {
    entries: RwLock<HashMap<String, String>>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("store lock poisoned"))?;
        match entries.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("store lock poisoned"))?;
        entries.insert(key.to_string(), raw);
        Ok(())
    }

    pub fn delete(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Load a demo host and a few approved listings in 2026 host cities so a
/// fresh local run has something to browse. Idempotent.
pub fn seed_demo_data(store: &Store) -> anyhow::Result<()> {
    let hosts: Vec<String> = store.get_json(HOSTS_LIST_KEY)?.unwrap_or_default();
    for id in &hosts {
        if let Some(h) = store.get_json::<Host>(&host_key(id))? {
            if h.email == "demo@stayfinder.example" {
                return Ok(()); // already seeded
            }
        }
    }

    let host_id = Uuid::new_v4().to_string();
    let host = Host {
        id: host_id.clone(),
        email: "demo@stayfinder.example".to_string(),
        name: "Demo Host Collective".to_string(),
        password: hash_password("demo-password")?,
        about: Some("Seeded demo listings for local development.".to_string()),
        billing: BillingStatus::Active,
        created_at: now_iso(),
    };
    store.set_json(&host_key(&host_id), &host)?;

    let mut hosts = hosts;
    hosts.push(host_id.clone());
    store.set_json(HOSTS_LIST_KEY, &hosts)?;

    let demos = [
        (
            "Skyline Loft by the Fan Zone",
            "Dallas",
            "Loft",
            4,
            210,
            vec!["Direct Booking Site", "Airbnb"],
            vec!["wifi", "air-conditioning", "workspace"],
            vec!["near-stadium", "big-screen"],
            vec!["matchDayBases", "cityBreaks"],
        ),
        (
            "Cedar Cabin above the Valley",
            "Vancouver",
            "Cabin",
            6,
            180,
            vec!["Direct Booking Site", "Vrbo"],
            vec!["wifi", "hot-tub", "free-parking"],
            vec!["fireplace", "mountain-view", "trail-access"],
            vec!["mountainRetreats"],
        ),
        (
            "Casa Azul Garden Villa",
            "Mexico City",
            "Villa",
            8,
            340,
            vec!["Direct Booking Site", "Booking.com"],
            vec!["wifi", "kitchen", "pool", "pet-friendly"],
            vec!["near-stadium", "transit-access"],
            vec!["matchDayBases", "familyGatherings"],
        ),
        (
            "Beachside Bungalow Key",
            "Miami",
            "Entire Home",
            5,
            290,
            vec!["Airbnb", "Expedia"],
            vec!["wifi", "air-conditioning", "bbq-grill"],
            vec!["ocean-view", "beach-access"],
            vec!["beachfrontEscapes"],
        ),
    ];

    let mut listings: Vec<String> = store.get_json(LISTINGS_KEY)?.unwrap_or_default();
    for (title, city, ptype, sleeps, price, platforms, amenities, features, experiences) in demos {
        let property_id = Uuid::new_v4().to_string();
        let property = Property {
            id: property_id.clone(),
            host_id: host_id.clone(),
            title: title.to_string(),
            city: city.to_string(),
            property_type: ptype.to_string(),
            sleeps,
            nightly_price: price,
            platforms: platforms.into_iter().map(String::from).collect(),
            amenities: amenities.into_iter().map(String::from).collect(),
            features: features.into_iter().map(String::from).collect(),
            experiences: experiences.into_iter().map(String::from).collect(),
            images: Vec::new(),
            description: format!("A seeded demo stay in {}.", city),
            status: SubmissionStatus::Approved,
            review_note: None,
            created_at: now_iso(),
            reviewed_at: Some(now_iso()),
        };
        store.set_json(&property_key(&property_id), &property)?;
        listings.insert(0, property_id);
    }
    store.set_json(LISTINGS_KEY, &listings)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_and_delete() {
        let store = Store::new();
        store.set_json("k", &vec!["a".to_string()]).unwrap();
        let got: Option<Vec<String>> = store.get_json("k").unwrap();
        assert_eq!(got, Some(vec!["a".to_string()]));
        store.delete("k").unwrap();
        let gone: Option<Vec<String>> = store.get_json("k").unwrap();
        assert!(gone.is_none());
    }

    #[test]
    fn seed_is_idempotent() {
        let store = Store::new();
        seed_demo_data(&store).unwrap();
        let first: Vec<String> = store.get_json(LISTINGS_KEY).unwrap().unwrap();
        seed_demo_data(&store).unwrap();
        let second: Vec<String> = store.get_json(LISTINGS_KEY).unwrap().unwrap();
        assert_eq!(first, second);
    }
}
