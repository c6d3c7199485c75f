use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// A party package: hall rental plus the base service, priced by weekday
/// (Mon-Thu) and weekend (Fri-Sun).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Package {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    pub price_weekday: f32,
    pub price_weekend: f32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FoodOption {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub extra_price: f32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Theme {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// A themed decorative backdrop panel, sold per number of pieces. Belongs to
/// exactly one theme and is only offered while that theme is selected.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Mampara {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub theme_id: ObjectId,
    pub pieces: u32,
    pub price: f32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Extra {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// A read-only snapshot of the five catalogs, fetched once per request and
/// passed by reference into the pricing and hydration code. The engines
/// never see the database.
#[derive(Debug, Default, Clone)]
pub struct CatalogSnapshot {
    pub packages: Vec<Package>,
    pub food_options: Vec<FoodOption>,
    pub themes: Vec<Theme>,
    pub mamparas: Vec<Mampara>,
    pub extras: Vec<Extra>,
}

impl CatalogSnapshot {
    pub fn package(&self, id: &ObjectId) -> Option<&Package> {
        self.packages.iter().find(|p| p.id.as_ref() == Some(id))
    }

    pub fn food_option(&self, id: &ObjectId) -> Option<&FoodOption> {
        self.food_options.iter().find(|f| f.id.as_ref() == Some(id))
    }

    pub fn theme(&self, id: &ObjectId) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id.as_ref() == Some(id))
    }

    pub fn mampara(&self, id: &ObjectId) -> Option<&Mampara> {
        self.mamparas.iter().find(|m| m.id.as_ref() == Some(id))
    }

    pub fn extra(&self, id: &ObjectId) -> Option<&Extra> {
        self.extras.iter().find(|e| e.id.as_ref() == Some(id))
    }
}
