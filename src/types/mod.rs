pub mod form;
pub mod itinerary;
pub mod preferences;
pub mod trip;

pub use form::TripForm;
pub use itinerary::ItineraryDocument;
pub use preferences::{PreferencesRecord, UNSURE_DESTINATION};
pub use trip::{SaveTripRequest, TripRecord};
