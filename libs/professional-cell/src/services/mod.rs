pub mod availability;
pub mod professional;

pub use availability::AvailabilityService;
pub use professional::ProfessionalService;
