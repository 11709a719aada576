//! Built-in sample rows for a fresh catalog.

/// A seed product. The category is named, not referenced by id.
pub struct SeedProduct {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub image_url: &'static str,
}

pub struct SeedBlog {
    pub title: &'static str,
    pub content: &'static str,
    pub image_url: &'static str,
    pub author: &'static str,
    pub category: &'static str,
}

pub struct SeedTestimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub content: &'static str,
    pub image_url: &'static str,
}

pub const CATEGORIES: &[&str] = &["Regular", "Seasonal"];

pub const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Premium Saffron Threads",
        description: "Hand-harvested, Grade A saffron threads perfect for culinary excellence. Sourced directly from our partner farms.",
        category: "Seasonal",
        image_url: "/images/product-spice.png",
    },
    SeedProduct {
        name: "Golden Wheat Grains",
        description: "High-protein golden wheat grains, cleaned and processed for international export standards.",
        category: "Regular",
        image_url: "/images/product-grain.png",
    },
    SeedProduct {
        name: "Organic Cardamom Pods",
        description: "Large, green, aromatic cardamom pods selected for their intense fragrance and flavor profile.",
        category: "Regular",
        image_url: "/images/product-spice.png",
    },
    SeedProduct {
        name: "Royal Basmati Rice",
        description: "Extra long grain aged basmati rice, renowned for its delicate aroma and non-sticky texture.",
        category: "Regular",
        image_url: "/images/product-grain.png",
    },
    SeedProduct {
        name: "Seasonal Alphonso Mangoes",
        description: "The king of mangoes, available only during peak season. Sweet, rich, and exported via air freight.",
        category: "Seasonal",
        image_url: "/images/hero-bg.png",
    },
    SeedProduct {
        name: "Export Quality Cashews",
        description: "Whole W180 grade cashew nuts, processed to maintain crunch and natural sweetness.",
        category: "Regular",
        image_url: "/images/product-grain.png",
    },
];

pub const BLOGS: &[SeedBlog] = &[
    SeedBlog {
        title: "The Future of Sustainable Spice Export",
        content: "Sustainability is at the core of our operations. We are implementing new biodegradable packaging solutions that reduce environmental impact while maintaining the freshness and quality of our premium spices. Our fair-trade partnerships ensure that farmers receive equitable compensation, fostering long-term stability in the global supply chain.",
        image_url: "/images/product-spice.png",
        author: "GOODWILL GLOBAL EXPORTS",
        category: "Industry Trends",
    },
    SeedBlog {
        title: "Global Grain Market Trends 2025",
        content: "The global demand for ancient grains like quinoa, millet, and amaranth is soaring. Consumers in North America and Europe are increasingly seeking nutrient-dense, gluten-free alternatives to traditional wheat. GOODWILL GLOBAL EXPORTS is expanding its network of organic certified farms to meet this growing international demand.",
        image_url: "/images/product-grain.png",
        author: "Market Analyst",
        category: "Market Analysis",
    },
];

pub const TESTIMONIALS: &[SeedTestimonial] = &[
    SeedTestimonial {
        name: "Elena Rossi",
        role: "Procurement Manager, Italia Foods",
        content: "The quality of saffron we receive is consistently exceptional. Their attention to packaging ensures the aroma is perfectly preserved during transit. A truly reliable partner for premium ingredients.",
        image_url: "/images/product-spice.png",
    },
    SeedTestimonial {
        name: "David Chen",
        role: "Director, Asian Rice Importers",
        content: "We have been sourcing Basmati rice for three years now. The grain length and purity are unmatched in the market. Their logistical efficiency makes international trade seamless.",
        image_url: "/images/product-grain.png",
    },
    SeedTestimonial {
        name: "Sarah Williams",
        role: "Head Chef, The Organic Kitchen",
        content: "As a chef, I demand the best. The seasonal mangoes from Goodwill Exports were the highlight of our summer menu. Fresh, sweet, and delivered right on time.",
        image_url: "/images/hero-bg.png",
    },
];
