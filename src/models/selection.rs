use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A catalog reference the way the booking form sends it: either a bare id
/// or the full option object the select widget was populated with. The rich
/// shape may carry the price that was current when the option was offered;
/// that embedded price wins over a catalog lookup so a quote stays stable
/// across catalog edits made mid-booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Id(String),
    Rich {
        #[serde(alias = "value")]
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        price: Option<f32>,
    },
}

impl Selection {
    pub fn from_id(id: ObjectId) -> Self {
        Selection::Id(id.to_hex())
    }

    pub fn rich(id: ObjectId, label: impl Into<String>, price: f32) -> Self {
        Selection::Rich {
            id: id.to_hex(),
            label: Some(label.into()),
            price: Some(price),
        }
    }

    pub fn raw_id(&self) -> &str {
        match self {
            Selection::Id(id) => id,
            Selection::Rich { id, .. } => id,
        }
    }

    /// The referenced catalog id, if the raw id is well-formed.
    pub fn object_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(self.raw_id()).ok()
    }

    pub fn embedded_price(&self) -> Option<f32> {
        match self {
            Selection::Id(_) => None,
            Selection::Rich { price, .. } => *price,
        }
    }

    /// The single normalization read path: the embedded price when the rich
    /// shape carries one, otherwise `lookup` against the current catalog.
    /// Returns `None` when neither side can resolve the reference.
    pub fn resolve_price<F>(&self, lookup: F) -> Option<f32>
    where
        F: FnOnce(&ObjectId) -> Option<f32>,
    {
        if let Some(price) = self.embedded_price() {
            return Some(price);
        }
        self.object_id().as_ref().and_then(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_bare_id() {
        let oid = ObjectId::new();
        let sel: Selection = serde_json::from_value(serde_json::json!(oid.to_hex())).unwrap();
        assert_eq!(sel.object_id(), Some(oid));
        assert_eq!(sel.embedded_price(), None);
    }

    #[test]
    fn test_deserializes_rich_object() {
        let oid = ObjectId::new();
        let sel: Selection = serde_json::from_value(serde_json::json!({
            "value": oid.to_hex(),
            "label": "Castillo",
            "price": 350.0
        }))
        .unwrap();
        assert_eq!(sel.object_id(), Some(oid));
        assert_eq!(sel.embedded_price(), Some(350.0));
    }

    #[test]
    fn test_embedded_price_wins_over_lookup() {
        let oid = ObjectId::new();
        let sel = Selection::rich(oid, "Safari", 200.0);
        let resolved = sel.resolve_price(|_| Some(999.0));
        assert_eq!(resolved, Some(200.0));
    }

    #[test]
    fn test_lookup_is_the_fallback() {
        let oid = ObjectId::new();
        let sel = Selection::from_id(oid);
        assert_eq!(sel.resolve_price(|id| (id == &oid).then_some(150.0)), Some(150.0));
        assert_eq!(sel.resolve_price(|_| None), None);
    }

    #[test]
    fn test_malformed_id_resolves_to_nothing() {
        let sel = Selection::Id("not-a-hex-id".to_string());
        assert_eq!(sel.object_id(), None);
        assert_eq!(sel.resolve_price(|_| Some(100.0)), None);
    }
}
