use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection};

use crate::db::mongo::CATALOG_DB;
use crate::models::catalog::{CatalogSnapshot, Extra, FoodOption, Mampara, Package, Theme};

pub const PACKAGES: &str = "Packages";
pub const FOOD_OPTIONS: &str = "FoodOptions";
pub const THEMES: &str = "Themes";
pub const MAMPARAS: &str = "Mamparas";
pub const EXTRAS: &str = "Extras";

pub struct CatalogService;

impl CatalogService {
    pub fn packages(client: &Client) -> Collection<Package> {
        client.database(CATALOG_DB).collection(PACKAGES)
    }

    pub fn food_options(client: &Client) -> Collection<FoodOption> {
        client.database(CATALOG_DB).collection(FOOD_OPTIONS)
    }

    pub fn themes(client: &Client) -> Collection<Theme> {
        client.database(CATALOG_DB).collection(THEMES)
    }

    pub fn mamparas(client: &Client) -> Collection<Mampara> {
        client.database(CATALOG_DB).collection(MAMPARAS)
    }

    pub fn extras(client: &Client) -> Collection<Extra> {
        client.database(CATALOG_DB).collection(EXTRAS)
    }

    /// Fetch the five catalogs as one read-only snapshot. The pricing and
    /// hydration code only ever sees this value, never the database, which
    /// keeps those paths pure and the snapshot consistent for the duration
    /// of one request.
    pub async fn load_snapshot(client: &Client) -> Result<CatalogSnapshot, mongodb::error::Error> {
        let packages = Self::packages(client).find(doc! {}).await?.try_collect().await?;
        let food_options = Self::food_options(client)
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        let themes = Self::themes(client).find(doc! {}).await?.try_collect().await?;
        let mamparas = Self::mamparas(client).find(doc! {}).await?.try_collect().await?;
        let extras = Self::extras(client).find(doc! {}).await?.try_collect().await?;

        Ok(CatalogSnapshot {
            packages,
            food_options,
            themes,
            mamparas,
            extras,
        })
    }
}
