//! Fixed catalog data served by the mock source

use super::model::{Collection, Gallery, Inscription, MarketplaceStats, PriceSnapshot, PriceUnit, SocialLinks};
use chrono::{DateTime, TimeZone, Utc};

struct Row {
    id: &'static str,
    inscription_id: &'static str,
    number: u64,
    address: &'static str,
    sat: u64,
    timestamp: (u32, u32, u32, u32),
    media_type: &'static str,
    media_size: u64,
    media_content: Option<&'static str>,
    title: &'static str,
    description: &'static str,
    price: f64,
    unit: PriceUnit,
    listed: bool,
    collection: &'static str,
}

const ROWS: [Row; 8] = [
    Row {
        id: "1",
        inscription_id: "a1b2c3d4e5f6g7h8i9j0k1l2m3n4o5p6q7r8s9t0u1v2w3x4y5z6",
        number: 52341,
        address: "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh",
        sat: 1234567890123,
        timestamp: (3, 15, 10, 30),
        media_type: "image/webp",
        media_size: 8432,
        media_content: Some("https://ordinals.com/content/52341"),
        title: "Bitcoin Genesis Abstract",
        description: "Abstract interpretation of Bitcoin's first block in golden gradients",
        price: 0.0045,
        unit: PriceUnit::Btc,
        listed: true,
        collection: "Crypto Genesis Art",
    },
    Row {
        id: "2",
        inscription_id: "b2c3d4e5f6g7h8i9j0k1l2m3n4o5p6q7r8s9t0u1v2w3x4y5z6a1",
        number: 67892,
        address: "bc1qab2cd3ef4gh5ij6kl7mn8op9qr0st1uv2wx3yz4",
        sat: 1234567890124,
        timestamp: (3, 14, 15, 22),
        media_type: "image/png",
        media_size: 12567,
        media_content: None,
        title: "Ethereum Dreams #07",
        description: "Surreal digital painting featuring Ethereum symbols in cosmic space",
        price: 150000.0,
        unit: PriceUnit::Sats,
        listed: true,
        collection: "Ethereum Cosmos",
    },
    Row {
        id: "3",
        inscription_id: "c3d4e5f6g7h8i9j0k1l2m3n4o5p6q7r8s9t0u1v2w3x4y5z6a1b2",
        number: 98765,
        address: "bc1q9x8y7z6a5b4c3d2e1f0g9h8i7j6k5l4m3n2o1p0",
        sat: 1234567890125,
        timestamp: (3, 13, 8, 45),
        media_type: "image/svg+xml",
        media_size: 342,
        media_content: None,
        title: "Digital Bitcoin Mandala",
        description: "Intricate geometric Bitcoin pattern with sacred geometry elements",
        price: 0.0089,
        unit: PriceUnit::Btc,
        listed: true,
        collection: "Crypto Mandalas",
    },
    Row {
        id: "4",
        inscription_id: "d4e5f6g7h8i9j0k1l2m3n4o5p6q7r8s9t0u1v2w3x4y5z6a1b2c3",
        number: 45678,
        address: "bc1q1a2s3d4f5g6h7j8k9l0z1x2c3v4b5n6m7q8w9e0",
        sat: 1234567890126,
        timestamp: (3, 12, 20, 15),
        media_type: "image/webp",
        media_size: 5634,
        media_content: None,
        title: "Ethereum Forest #12",
        description: "Mystical forest scene with glowing Ethereum trees and digital wildlife",
        price: 75000.0,
        unit: PriceUnit::Sats,
        listed: true,
        collection: "Ethereum Nature",
    },
    Row {
        id: "5",
        inscription_id: "e5f6g7h8i9j0k1l2m3n4o5p6q7r8s9t0u1v2w3x4y5z6a1b2c3d4",
        number: 123456,
        address: "bc1qzyx9wvu8tsr7qpo6nml5kji4hgf3edc2ba1z0y9",
        sat: 1234567890127,
        timestamp: (3, 11, 12, 0),
        media_type: "image/webp",
        media_size: 15432,
        media_content: None,
        title: "Bitcoin Phoenix Rising",
        description: "Majestic phoenix emerging from Bitcoin flames in digital art style",
        price: 0.0023,
        unit: PriceUnit::Btc,
        listed: true,
        collection: "Crypto Mythology",
    },
    Row {
        id: "6",
        inscription_id: "f6g7h8i9j0k1l2m3n4o5p6q7r8s9t0u1v2w3x4y5z6a1b2c3d4e5",
        number: 87654,
        address: "bc1q0p9o8i7u6y5t4r3e2w1q0a9s8d7f6g5h4j3k2l1",
        sat: 1234567890128,
        timestamp: (3, 10, 16, 30),
        media_type: "image/gif",
        media_size: 9876,
        media_content: None,
        title: "Ethereum Galaxy Spiral",
        description: "Animated spiral galaxy with Ethereum constellation patterns",
        price: 0.00156,
        unit: PriceUnit::Btc,
        listed: false,
        collection: "Ethereum Cosmos",
    },
    Row {
        id: "7",
        inscription_id: "g7h8i9j0k1l2m3n4o5p6q7r8s9t0u1v2w3x4y5z6a1b2c3d4e5f6",
        number: 234567,
        address: "bc1q2w3e4r5t6y7u8i9o0p1a2s3d4f5g6h7j8k9l0m1",
        sat: 1234567890129,
        timestamp: (3, 9, 9, 15),
        media_type: "image/png",
        media_size: 18956,
        media_content: None,
        title: "Ethereum Crystal Cave",
        description: "Underground crystal cave illuminated by Ethereum energy",
        price: 0.0078,
        unit: PriceUnit::Btc,
        listed: true,
        collection: "Ethereum Nature",
    },
    Row {
        id: "8",
        inscription_id: "h8i9j0k1l2m3n4o5p6q7r8s9t0u1v2w3x4y5z6a1b2c3d4e5f6g7",
        number: 345678,
        address: "bc1q3e4r5t6y7u8i9o0p1a2s3d4f5g6h7j8k9l0m1n2",
        sat: 1234567890130,
        timestamp: (3, 8, 14, 45),
        media_type: "image/webp",
        media_size: 22341,
        media_content: None,
        title: "Bitcoin Samurai Warrior",
        description: "Legendary samurai with Bitcoin armor in traditional Japanese art style",
        price: 250000.0,
        unit: PriceUnit::Sats,
        listed: true,
        collection: "Crypto Warriors",
    },
];

fn at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

impl Row {
    fn inscription(&self) -> Inscription {
        let (month, day, hour, minute) = self.timestamp;
        Inscription {
            id: self.id.into(),
            inscription_id: self.inscription_id.into(),
            inscription_number: self.number,
            address: self.address.into(),
            output_value: 546,
            sat: self.sat,
            satpoint: format!("{}:0:546", self.inscription_id),
            timestamp: at(month, day, hour, minute),
            media_type: self.media_type.into(),
            media_size: self.media_size,
            media_content: self.media_content.map(str::to_string),
            title: Some(self.title.into()),
            description: Some(self.description.into()),
            price: Some(self.price),
            price_unit: Some(self.unit),
            listed: self.listed,
            owner: self.address.into(),
            collection: Some(self.collection.into()),
        }
    }
}

pub fn inscriptions() -> Vec<Inscription> {
    ROWS.iter().map(Row::inscription).collect()
}

#[allow(clippy::too_many_arguments)]
fn collection(
    id: &str,
    name: &str,
    description: &str,
    creator: &str,
    total_items: u64,
    floor_price: f64,
    volume_24h: f64,
    verified: bool,
    members: &[usize],
) -> Collection {
    let all = inscriptions();
    Collection {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        creator: creator.into(),
        total_items,
        floor_price,
        volume_24h,
        cover_image: format!("/images/collections/{}.webp", id),
        verified,
        inscriptions: members.iter().filter_map(|&i| all.get(i).cloned()).collect(),
    }
}

pub fn collections() -> Vec<Collection> {
    vec![
        collection(
            "crypto-genesis-art",
            "Crypto Genesis Art",
            "Abstract digital paintings inspired by Bitcoin's genesis block. Each piece represents the birth of decentralized currency through artistic interpretation.",
            "GenesisArtist.btc",
            2024,
            0.0034,
            2.45,
            true,
            &[0],
        ),
        collection(
            "ethereum-cosmos",
            "Ethereum Cosmos",
            "Surreal cosmic artworks featuring Ethereum themes. Galaxies, nebulae, and celestial bodies infused with cryptocurrency symbolism.",
            "CosmicEth.ord",
            3333,
            0.0089,
            4.12,
            true,
            &[1, 5],
        ),
        collection(
            "crypto-mandalas",
            "Crypto Mandalas",
            "Sacred geometry meets cryptocurrency. Intricate mandala designs incorporating Bitcoin and blockchain patterns for meditation and contemplation.",
            "MandalaWisdom",
            1080,
            0.0067,
            1.23,
            true,
            &[2],
        ),
        collection(
            "ethereum-nature",
            "Ethereum Nature",
            "Digital nature scenes where Ethereum energy flows through forests, caves, and mystical landscapes. Environmental art for the blockchain age.",
            "NatureETH.artist",
            1555,
            0.0078,
            2.34,
            false,
            &[3, 6],
        ),
        collection(
            "crypto-mythology",
            "Crypto Mythology",
            "Legendary creatures and mythological beings reimagined for the digital age. Dragons, phoenixes, and gods of the cryptocurrency realm.",
            "MythMaker.btc",
            888,
            0.0023,
            1.67,
            true,
            &[4],
        ),
        collection(
            "crypto-warriors",
            "Crypto Warriors",
            "Elite digital warriors protecting the blockchain realm. Samurais, knights, and guardians armed with cryptocurrency power.",
            "WarriorMaster",
            777,
            0.0125,
            3.45,
            true,
            &[7],
        ),
    ]
}

pub fn galleries() -> Vec<Gallery> {
    let collections = collections();
    let pick = |indices: &[usize]| -> Vec<Collection> {
        indices.iter().filter_map(|&i| collections.get(i).cloned()).collect()
    };
    vec![
        Gallery {
            id: "miami-crypto-gallery".into(),
            name: "Miami Crypto Gallery".into(),
            description: "Premier destination for Bitcoin art in Miami. Curating the finest Ordinals collections.".into(),
            curator: "miami.gallery".into(),
            collections: pick(&[0, 2]),
            featured: true,
            cover_image: "/images/galleries/miami-crypto.webp".into(),
            social_links: Some(SocialLinks {
                twitter: Some("https://twitter.com/miamicryptogallery".into()),
                discord: Some("https://discord.gg/miamicrypto".into()),
                website: Some("https://miamicrypto.gallery".into()),
            }),
        },
        Gallery {
            id: "ordinals-collective".into(),
            name: "Ordinals Collective".into(),
            description: "Community-driven gallery showcasing emerging Bitcoin artists and innovative inscriptions.".into(),
            curator: "collective.ord".into(),
            collections: pick(&[1, 3]),
            featured: true,
            cover_image: "/images/galleries/ordinals-collective.webp".into(),
            social_links: Some(SocialLinks {
                twitter: Some("https://twitter.com/ordinalscollective".into()),
                discord: Some("https://discord.gg/ordinalscollective".into()),
                website: None,
            }),
        },
    ]
}

pub fn stats() -> MarketplaceStats {
    MarketplaceStats {
        total_volume: 156.789,
        total_items: 47323,
        total_collections: 1247,
        active_listings: 8934,
        floor_price: 0.00089,
        average_price: 0.0045,
    }
}

pub fn price_snapshot() -> PriceSnapshot {
    PriceSnapshot { btc_price: 67845.32, ck_btc_price: 67823.45, last_updated: Utc::now() }
}
