use crate::types::{Prize, PrizeKind};
use sha2::{Digest, Sha256};

// Prize catalog definition and helpers. Kept separate so prize changes stay isolated from
// the engine. The catalog size must match the number of rendered cards.

pub fn build_catalog() -> Vec<Prize> {
    vec![
        prize("main1", "Bean Bag Chair", PrizeKind::Main, "images/bean-bag.jpg"),
        prize("side1", "Mystery Box", PrizeKind::Side, "images/deco-box.png"),
        prize("side2", "Hoodie", PrizeKind::Side, "images/hoodie.jpg"),
        prize("side3", "Customised Tumbler", PrizeKind::Side, "images/tumbler.jpg"),
        prize("side4", "Perfume", PrizeKind::Side, "images/perfume.jpg"),
    ]
}

fn prize(id: &str, name: &str, kind: PrizeKind, image: &str) -> Prize {
    Prize {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        image: image.to_string(),
    }
}

/// Hex SHA-256 over the serialized catalog. Stored alongside saved games so a blob written
/// against a different prize list is recognised on restore.
pub fn catalog_fingerprint(catalog: &[Prize]) -> String {
    let mut hasher = Sha256::new();
    let data = serde_json::to_vec(catalog).unwrap_or_default();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
