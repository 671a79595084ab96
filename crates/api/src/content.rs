//! Static marketing content for the home and about pages.
//!
//! The frontend renders these sections verbatim; nothing here is user data.

use serde::Serialize;

/// Headline counters shown on the home page.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub customers: u32,
    pub clothes: u32,
    pub years: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhyChoose {
    pub title: &'static str,
    pub desc: &'static str,
    /// Tailwind border class used by the card.
    pub border: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HowItWorks {
    pub step: &'static str,
    pub desc: &'static str,
    pub anim_key: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalCta {
    pub title: &'static str,
    pub desc: &'static str,
    pub cta_text: &'static str,
}

/// About-us page sections.
#[derive(Debug, Clone, Serialize)]
pub struct AboutUs {
    pub stats: Vec<AboutStat>,
    pub values: Vec<AboutValue>,
    pub timeline: Vec<Milestone>,
    pub team: Vec<TeamMember>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutStat {
    /// Icon component name in the frontend.
    pub icon: &'static str,
    pub value: u32,
    pub suffix: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutValue {
    pub icon: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub year: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub name: &'static str,
    pub text: &'static str,
    pub rating: u8,
}

/// All site content, built once at startup.
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub stats: Stats,
    pub why_choose: Vec<WhyChoose>,
    pub how_it_works: Vec<HowItWorks>,
    pub final_cta: FinalCta,
    pub about_us: AboutUs,
}

impl SiteContent {
    /// The content currently published on the site.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            stats: Stats {
                customers: 5000,
                clothes: 50000,
                years: 10,
            },
            why_choose: vec![
                WhyChoose {
                    title: "Quick Service",
                    desc: "Same-day pickup and delivery",
                    border: "border-blue-500",
                },
                WhyChoose {
                    title: "Expert Care",
                    desc: "Professional handling of all fabrics",
                    border: "border-green-500",
                },
                WhyChoose {
                    title: "Affordable Rates",
                    desc: "Best prices in the neighborhood",
                    border: "border-yellow-500",
                },
            ],
            how_it_works: vec![
                HowItWorks {
                    step: "Book Online",
                    desc: "Schedule pickup via app or website",
                    anim_key: "booking",
                },
                HowItWorks {
                    step: "We Pickup",
                    desc: "Free pickup from your doorstep",
                    anim_key: "pickup",
                },
                HowItWorks {
                    step: "We Clean",
                    desc: "Professional washing & care",
                    anim_key: "washing",
                },
                HowItWorks {
                    step: "We Deliver",
                    desc: "Fresh clothes delivered back",
                    anim_key: "delivery",
                },
            ],
            final_cta: FinalCta {
                title: "Ready for Fresh & Clean Clothes?",
                desc: "Book your first order now and get 20% off!",
                cta_text: "Book Now - 20% Off!",
            },
            about_us: about_us(),
        }
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self::builtin()
    }
}

fn about_us() -> AboutUs {
    AboutUs {
        stats: vec![
            AboutStat {
                icon: "Users",
                value: 5000,
                suffix: "+",
                label: "Happy Customers",
            },
            AboutStat {
                icon: "Shirt",
                value: 50000,
                suffix: "+",
                label: "Clothes Cleaned",
            },
            AboutStat {
                icon: "Clock",
                value: 10,
                suffix: "+",
                label: "Years Experience",
            },
        ],
        values: vec![
            AboutValue {
                icon: "ShieldCheck",
                title: "Quality First",
                desc: "We ensure top-notch quality in every wash",
            },
            AboutValue {
                icon: "Truck",
                title: "Fast Delivery",
                desc: "Quick pickup and delivery at your doorstep",
            },
            AboutValue {
                icon: "Recycle",
                title: "Eco-Friendly",
                desc: "Using environmentally safe cleaning products",
            },
            AboutValue {
                icon: "HeartHandshake",
                title: "Customer Care",
                desc: "24/7 support for all your laundry needs",
            },
        ],
        timeline: vec![
            Milestone {
                year: "2014",
                title: "Founded",
                text: "Started as a small neighborhood laundry service",
            },
            Milestone {
                year: "2018",
                title: "Expansion",
                text: "Expanded to serve multiple areas with advanced technology",
            },
            Milestone {
                year: "2022",
                title: "Digital",
                text: "Launched mobile app and online booking system",
            },
            Milestone {
                year: "2024",
                title: "Premium",
                text: "Introduced premium services and eco-friendly solutions",
            },
        ],
        team: vec![
            TeamMember {
                name: "Raj Patel",
                role: "Founder & CEO",
                emoji: "👨‍💼",
            },
            TeamMember {
                name: "Priya Sharma",
                role: "Operations Head",
                emoji: "👩‍💻",
            },
            TeamMember {
                name: "Amit Kumar",
                role: "Quality Manager",
                emoji: "👨‍🔬",
            },
            TeamMember {
                name: "Sneha Singh",
                role: "Customer Support",
                emoji: "👩‍💬",
            },
        ],
        testimonials: vec![
            Testimonial {
                name: "Rakesh Gupta",
                text: "Best laundry service in the city! Always on time.",
                rating: 5,
            },
            Testimonial {
                name: "Anjali Mehta",
                text: "My expensive sarees are handled with great care.",
                rating: 5,
            },
            Testimonial {
                name: "Suresh Yadav",
                text: "Very professional and reliable service.",
                rating: 4,
            },
        ],
    }
}
