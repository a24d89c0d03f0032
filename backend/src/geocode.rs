use shared::RoutePoint;

/// Static name-to-coordinate table: major Bangladeshi cities plus Dhaka
/// districts and landmarks. Keys are lowercase.
struct GazetteerEntry {
    name: &'static str,
    lat: f64,
    lon: f64,
}

const GAZETTEER: &[GazetteerEntry] = &[
    // Major cities
    GazetteerEntry { name: "dhaka", lat: 23.8103, lon: 90.4125 },
    GazetteerEntry { name: "chattogram", lat: 22.3569, lon: 91.7832 },
    GazetteerEntry { name: "chittagong", lat: 22.3569, lon: 91.7832 },
    GazetteerEntry { name: "khulna", lat: 22.8456, lon: 89.5403 },
    GazetteerEntry { name: "rajshahi", lat: 24.3745, lon: 88.6042 },
    GazetteerEntry { name: "sylhet", lat: 24.8949, lon: 91.8687 },
    GazetteerEntry { name: "barishal", lat: 22.7010, lon: 90.3535 },
    GazetteerEntry { name: "barisal", lat: 22.7010, lon: 90.3535 },
    GazetteerEntry { name: "rangpur", lat: 25.7439, lon: 89.2752 },
    GazetteerEntry { name: "mymensingh", lat: 24.7471, lon: 90.4203 },
    GazetteerEntry { name: "cumilla", lat: 23.4607, lon: 91.1809 },
    GazetteerEntry { name: "comilla", lat: 23.4607, lon: 91.1809 },
    GazetteerEntry { name: "narayanganj", lat: 23.6238, lon: 90.5000 },
    GazetteerEntry { name: "gazipur", lat: 23.9999, lon: 90.4203 },
    GazetteerEntry { name: "cox's bazar", lat: 21.4272, lon: 92.0058 },
    GazetteerEntry { name: "jashore", lat: 23.1664, lon: 89.2081 },
    GazetteerEntry { name: "jessore", lat: 23.1664, lon: 89.2081 },
    GazetteerEntry { name: "bogura", lat: 24.8466, lon: 89.3773 },
    GazetteerEntry { name: "dinajpur", lat: 25.6279, lon: 88.6332 },
    GazetteerEntry { name: "tangail", lat: 24.2513, lon: 89.9167 },
    GazetteerEntry { name: "faridpur", lat: 23.6070, lon: 89.8429 },
    GazetteerEntry { name: "savar", lat: 23.8583, lon: 90.2667 },
    // Dhaka districts and landmarks
    GazetteerEntry { name: "gulshan", lat: 23.7925, lon: 90.4078 },
    GazetteerEntry { name: "banani", lat: 23.7937, lon: 90.4066 },
    GazetteerEntry { name: "dhanmondi", lat: 23.7461, lon: 90.3742 },
    GazetteerEntry { name: "mirpur", lat: 23.8223, lon: 90.3654 },
    GazetteerEntry { name: "uttara", lat: 23.8759, lon: 90.3795 },
    GazetteerEntry { name: "motijheel", lat: 23.7330, lon: 90.4172 },
    GazetteerEntry { name: "mohakhali", lat: 23.7778, lon: 90.4057 },
    GazetteerEntry { name: "old dhaka", lat: 23.7104, lon: 90.4074 },
    GazetteerEntry { name: "badda", lat: 23.7806, lon: 90.4267 },
    GazetteerEntry { name: "khilgaon", lat: 23.7461, lon: 90.4203 },
    GazetteerEntry { name: "shahbag", lat: 23.7389, lon: 90.3958 },
    GazetteerEntry { name: "farmgate", lat: 23.7580, lon: 90.3888 },
    GazetteerEntry { name: "bashundhara", lat: 23.8223, lon: 90.4265 },
    GazetteerEntry { name: "tejgaon", lat: 23.7640, lon: 90.3928 },
    GazetteerEntry { name: "sadarghat", lat: 23.7057, lon: 90.4107 },
    GazetteerEntry { name: "kamalapur", lat: 23.7321, lon: 90.4264 },
];

// Fallback pseudo-coordinates stay inside Bangladesh's bounding box.
const FALLBACK_BASE_LAT: f64 = 21.5;
const FALLBACK_LAT_MODULUS: u32 = 200;
const FALLBACK_LAT_STEP: f64 = 0.008;
const FALLBACK_BASE_LON: f64 = 88.0;
const FALLBACK_LON_MODULUS: u32 = 300;
const FALLBACK_LON_STEP: f64 = 0.009;

/// Placeholder geocoder over a static gazetteer. Resolution never fails:
/// unknown names get a deterministic synthetic point, so the same input
/// string always maps to the same coordinates.
#[derive(Debug, Default, Clone)]
pub struct GeocodeResolver;

impl GeocodeResolver {
    pub fn new() -> Self {
        Self
    }

    pub async fn resolve(&self, query: &str) -> RoutePoint {
        let needle = query.trim().to_lowercase();

        if !needle.is_empty() {
            if let Some(entry) = GAZETTEER.iter().find(|e| e.name == needle) {
                return RoutePoint::named(entry.lat, entry.lon, entry.name);
            }
            // Substring tier, both directions, first hit in table order.
            // The empty-needle guard above matters: "".contains is always true.
            if let Some(entry) = GAZETTEER
                .iter()
                .find(|e| e.name.contains(&needle) || needle.contains(e.name))
            {
                return RoutePoint::named(entry.lat, entry.lon, entry.name);
            }
        }

        // Deterministic synthetic point from the original (un-normalized)
        // input. Weak by construction; collisions across unrelated names
        // are acceptable for a placeholder geocoder.
        let hash = query
            .chars()
            .fold(0u32, |acc, c| acc.wrapping_add(c as u32));
        let lat = FALLBACK_BASE_LAT + f64::from(hash % FALLBACK_LAT_MODULUS) * FALLBACK_LAT_STEP;
        let lon = FALLBACK_BASE_LON + f64::from(hash % FALLBACK_LON_MODULUS) * FALLBACK_LON_STEP;
        tracing::debug!("no gazetteer entry for {query:?}, synthesized ({lat}, {lon})");
        RoutePoint::named(lat, lon, query)
    }
}
