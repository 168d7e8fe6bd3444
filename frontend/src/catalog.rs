use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PackageKey {
    Basic,
    Double,
    Family,
}

impl PackageKey {
    pub const ALL: [PackageKey; 3] = [PackageKey::Basic, PackageKey::Double, PackageKey::Family];

    pub fn as_str(self) -> &'static str {
        match self {
            PackageKey::Basic => "basic",
            PackageKey::Double => "double",
            PackageKey::Family => "family",
        }
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(PackageKey::Basic),
            "double" => Ok(PackageKey::Double),
            "family" => Ok(PackageKey::Family),
            other => Err(format!("unknown package `{}`", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub text: &'static str,
    pub important: bool,
    pub free: bool,
    pub new: bool,
}

const fn feature(text: &'static str) -> Feature {
    Feature { text, important: false, free: false, new: false }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Package {
    pub key: PackageKey,
    pub name: &'static str,
    pub description: &'static str,
    pub unit_price: f64,
    pub discount_percent: u8,
    pub total_price: f64,
    pub quantity: u32,
    pub features: &'static [Feature],
    pub product_id: &'static str,
    pub discount_code: Option<&'static str>,
    pub featured: bool,
}

impl Package {
    pub fn savings(&self) -> f64 {
        round_cents(self.unit_price * self.quantity as f64 - self.total_price)
    }
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Formats an amount the way the shop displays it: `28,64 €`.
pub fn format_eur(amount: f64) -> String {
    format!("{:.2} €", amount).replace('.', ",")
}

static BASIC_FEATURES: [Feature; 4] = [
    feature("1 pair of Toeflex separators"),
    feature("Medical-grade silicone, one size fits most"),
    Feature { text: "Free shipping within the EU", important: false, free: true, new: false },
    feature("30-day money-back guarantee"),
];

static DOUBLE_FEATURES: [Feature; 5] = [
    Feature { text: "2 pairs: one for home, one for the gym bag", important: true, free: false, new: false },
    feature("Medical-grade silicone, one size fits most"),
    Feature { text: "Free shipping within the EU", important: false, free: true, new: false },
    Feature { text: "Printed stretching guide", important: false, free: true, new: true },
    feature("30-day money-back guarantee"),
];

static FAMILY_FEATURES: [Feature; 6] = [
    Feature { text: "4 pairs for the whole household", important: true, free: false, new: false },
    feature("Medical-grade silicone, one size fits most"),
    Feature { text: "Free express shipping within the EU", important: false, free: true, new: false },
    Feature { text: "Printed stretching guide", important: false, free: true, new: true },
    Feature { text: "Washable travel pouch", important: false, free: true, new: true },
    feature("30-day money-back guarantee"),
];

pub static PACKAGES: [Package; 3] = [
    Package {
        key: PackageKey::Basic,
        name: "Basic",
        description: "Try Toeflex for yourself.",
        unit_price: 17.90,
        discount_percent: 0,
        total_price: 17.90,
        quantity: 1,
        features: &BASIC_FEATURES,
        product_id: "8712045740311",
        discount_code: None,
        featured: false,
    },
    Package {
        key: PackageKey::Double,
        name: "Double Pack",
        description: "Our most popular choice. Keep a pair wherever you are.",
        unit_price: 17.90,
        discount_percent: 20,
        total_price: 28.64,
        quantity: 2,
        features: &DOUBLE_FEATURES,
        product_id: "8712045773079",
        discount_code: Some("DUO20"),
        featured: true,
    },
    Package {
        key: PackageKey::Family,
        name: "Family Pack",
        description: "Happy feet for everyone at home.",
        unit_price: 17.90,
        discount_percent: 30,
        total_price: 50.12,
        quantity: 4,
        features: &FAMILY_FEATURES,
        product_id: "8712045805847",
        discount_code: Some("FAMILY30"),
        featured: false,
    },
];

pub fn package(key: PackageKey) -> &'static Package {
    match key {
        PackageKey::Basic => &PACKAGES[0],
        PackageKey::Double => &PACKAGES[1],
        PackageKey::Family => &PACKAGES[2],
    }
}

pub fn featured_package() -> &'static Package {
    PACKAGES.iter().find(|p| p.featured).unwrap_or(&PACKAGES[0])
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorVariant {
    pub name: &'static str,
    pub variant_id: &'static str,
}

pub static COLOR_VARIANTS: [ColorVariant; 3] = [
    ColorVariant { name: "Sand", variant_id: "44120938692887" },
    ColorVariant { name: "Sage", variant_id: "44120938725655" },
    ColorVariant { name: "Midnight", variant_id: "44120938758423" },
];

/// Star rating, always within 1..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(value)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    pub author: String,
    pub rating: Rating,
    pub comment: String,
    pub date: String,
}

pub fn seed_reviews() -> Vec<Review> {
    [
        ("Maria K.", 5, "After two weeks my bunion pain is noticeably better. I wear them every evening on the sofa.", "12.03.2024"),
        ("Jonas B.", 5, "Great after long runs. My toes finally feel like they have room again.", "28.02.2024"),
        ("Elif S.", 4, "Took a few days to get used to, now I don't want to be without them.", "17.02.2024"),
        ("Peter W.", 5, "Bought the family pack, even my teenage son uses them after football.", "03.02.2024"),
        ("Anna L.", 4, "Soft and easy to clean. Would love more colors.", "21.01.2024"),
    ]
    .into_iter()
    .map(|(author, rating, comment, date)| Review {
        author: author.to_string(),
        rating: Rating(rating),
        comment: comment.to_string(),
        date: date.to_string(),
    })
    .collect()
}

pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| r.rating.get() as u32).sum();
    Some(sum as f64 / reviews.len() as f64)
}

#[derive(Clone, Debug, PartialEq)]
pub struct FaqEntry {
    pub id: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

pub static FAQ_ENTRIES: [FaqEntry; 6] = [
    FaqEntry {
        id: "how-long",
        question: "How long should I wear Toeflex each day?",
        answer: "Start with 15 to 20 minutes a day and work up to an hour or more. Many customers wear them while reading or watching TV in the evening.",
    },
    FaqEntry {
        id: "sizes",
        question: "Will they fit my feet?",
        answer: "The silicone stretches to fit EU shoe sizes 35 to 46. If your toes are very close together, begin with shorter sessions.",
    },
    FaqEntry {
        id: "shoes",
        question: "Can I wear them in shoes?",
        answer: "Yes, in wide shoes and trainers with a roomy toe box. For narrow shoes we recommend wearing them barefoot at home.",
    },
    FaqEntry {
        id: "cleaning",
        question: "How do I clean them?",
        answer: "Rinse with lukewarm water and mild soap, then let them air dry. They are not dishwasher safe.",
    },
    FaqEntry {
        id: "shipping",
        question: "How fast is shipping?",
        answer: "Orders placed before 2 pm ship the same working day. Delivery within Germany takes 1 to 3 days, EU 3 to 6 days.",
    },
    FaqEntry {
        id: "returns",
        question: "What if they don't work for me?",
        answer: "Send them back within 30 days and we refund the full purchase price, no questions asked.",
    },
];

#[derive(Clone, Debug, PartialEq)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub quote: &'static str,
}

pub static TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "Dr. Sabine Hartmann",
        role: "Podiatrist, Munich",
        quote: "Toe spacers are one of the simplest tools for gently realigning toes. I recommend them to patients with early hallux valgus.",
    },
    Testimonial {
        name: "Lukas Meier",
        role: "Marathon runner",
        quote: "I use them after every long run. My forefoot feels less cramped and recovery is quicker.",
    },
    Testimonial {
        name: "Claudia Roth",
        role: "Nurse, 12-hour shifts",
        quote: "After a day on my feet, twenty minutes with Toeflex is the best part of my evening.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_match_unit_price_quantity_and_discount() {
        for p in PACKAGES.iter() {
            let expected = round_cents(
                p.unit_price * p.quantity as f64 * (1.0 - p.discount_percent as f64 / 100.0),
            );
            assert!((p.total_price - expected).abs() < 0.001, "{} total is off", p.key);
        }
    }

    #[test]
    fn double_pack_values() {
        let double = package(PackageKey::Double);
        assert_eq!(double.total_price, 28.64);
        assert_eq!(double.quantity, 2);
        assert_eq!(double.savings(), 7.16);
    }

    #[test]
    fn lookup_returns_matching_key() {
        for key in PackageKey::ALL {
            assert_eq!(package(key).key, key);
        }
        assert_eq!(featured_package().key, PackageKey::Double);
    }

    #[test]
    fn package_key_parses_only_known_names() {
        assert_eq!("family".parse::<PackageKey>(), Ok(PackageKey::Family));
        assert!("premium".parse::<PackageKey>().is_err());
    }

    #[test]
    fn rating_rejects_values_outside_one_to_five() {
        assert!(Rating::try_from(0).is_err());
        assert!(Rating::try_from(6).is_err());
        assert_eq!(Rating::try_from(5).map(Rating::get), Ok(5));
    }

    #[test]
    fn average_rating_of_seed_list() {
        let avg = average_rating(&seed_reviews()).unwrap();
        assert!((avg - 4.6).abs() < 1e-9);
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn eur_format_uses_comma() {
        assert_eq!(format_eur(28.64), "28,64 €");
        assert_eq!(format_eur(17.9), "17,90 €");
    }
}
