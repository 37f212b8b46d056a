// Service exports
pub mod classifier;
pub mod geocoder;
pub mod matching;
pub mod registry;

pub use classifier::HuggingFaceClassifier;
pub use geocoder::{Geocoder, Sha256Geocoder, locate};
pub use matching::{MatchService, ServiceError};
pub use registry::{Registry, RegistryError};
