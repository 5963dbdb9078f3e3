pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    AppointmentError, BookAppointmentRequest, ConflictCheckRequest, ConflictCheckResponse,
    RescheduleRequest, UpdateStatusRequest,
};
pub use services::{BookingService, ConflictCheckService};
