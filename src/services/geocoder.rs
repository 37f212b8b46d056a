use sha2::{Digest, Sha256};

/// Address to coordinates lookup
pub trait Geocoder: Send + Sync {
    /// Deterministic (latitude, longitude) for an address, within
    /// [-90, 90] x [-180, 180]
    fn geocode(&self, address: &str) -> (f64, f64);
}

/// Simulated geocoder that derives coordinates from a SHA-256 digest
///
/// Not a real-world lookup: the same address always lands on the same whole
/// degree pair, and unrelated addresses scatter across the globe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Geocoder;

impl Geocoder for Sha256Geocoder {
    fn geocode(&self, address: &str) -> (f64, f64) {
        let digest = Sha256::digest(address.as_bytes());
        let lat_bits = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        let lon_bits = u32::from_be_bytes([digest[4], digest[5], digest[6], digest[7]]);

        let latitude = (lat_bits % 180) as f64 - 90.0;
        let longitude = (lon_bits % 360) as f64 - 180.0;
        (latitude, longitude)
    }
}

/// Coordinates for a registration address; blank addresses are not geocoded
pub fn locate(geocoder: &dyn Geocoder, address: &str) -> (f64, f64) {
    if address.trim().is_empty() {
        (0.0, 0.0)
    } else {
        geocoder.geocode(address)
    }
}
