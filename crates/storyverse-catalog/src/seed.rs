//! The hand-curated seed catalog. Always available, never cached separately
//! and never expired.

use storyverse_core::catalog::{CatalogEntity, Medium};

/// Returns the eight seed entities in their canonical order.
#[must_use]
pub fn seed_catalog() -> Vec<CatalogEntity> {
    vec![
        CatalogEntity::new(
            "sherlock-holmes",
            "Sherlock Holmes",
            Medium::Novel,
            "Victorian-era detective canon centered on forensic deduction, logic, and criminal networks.",
            &["sherlock", "holmes", "arthur conan doyle", "셜록 홈즈"],
        ),
        CatalogEntity::new(
            "star-wars",
            "Star Wars",
            Medium::Movie,
            "Space-opera saga of empire, rebellion, mystic force traditions, and dynastic conflict.",
            &["sw", "jedi", "skywalker", "starwars", "스타워즈", "스타 워즈"],
        ),
        CatalogEntity::new(
            "cleopatra",
            "Cleopatra",
            Medium::History,
            "Hellenistic ruler navigating Roman power struggles, propaganda warfare, and imperial succession.",
            &["queen cleopatra", "ptolemaic egypt", "egyptian queen", "클레오파트라"],
        ),
        CatalogEntity::new(
            "blade-runner",
            "Blade Runner",
            Medium::Movie,
            "Neo-noir future where synthetic humans challenge identity, memory, and moral jurisdiction.",
            &["replicant", "deckard", "blade runner 2049", "블레이드 러너", "블레이드러너"],
        ),
        CatalogEntity::new(
            "dune",
            "Dune",
            Medium::Novel,
            "Feudal interstellar politics shaped by ecology, prophecy, insurgency, and resource monopolies.",
            &["arrakis", "atreides", "fremen", "듄"],
        ),
        CatalogEntity::new(
            "roman-empire",
            "Roman Empire",
            Medium::History,
            "Transcontinental imperial system driven by military expansion, law, civic administration, and succession crises.",
            &["rome", "caesar", "senate", "imperial rome", "로마 제국"],
        ),
        CatalogEntity::new(
            "napoleon",
            "Napoleon Bonaparte",
            Medium::History,
            "Post-revolutionary military leader whose campaigns reshaped statecraft, warfare, and legal codification.",
            &["napoleon bonaparte", "french empire", "나폴레옹", "나폴레옹 보나파르트"],
        ),
        CatalogEntity::new(
            "lord-of-the-rings",
            "The Lord of the Rings",
            Medium::Novel,
            "Epic mythic war narrative exploring power corruption, fellowship bonds, and civilizational memory.",
            &["lotr", "middle earth", "gandalf", "sauron", "반지의 제왕"],
        ),
    ]
}
