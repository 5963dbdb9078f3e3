pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{ProfessionalError, ProfessionalRecord};
pub use services::{AvailabilityService, ProfessionalService};
