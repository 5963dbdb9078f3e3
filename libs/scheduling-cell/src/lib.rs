//! Pure availability and conflict engine for the front desk.
//!
//! Everything here is a synchronous function of its inputs: professional
//! records and appointment lists arrive already fetched, the clinic
//! timezone arrives as a parameter, and results are advisory (the data
//! store's own overlap constraint remains the authoritative guard at write
//! time). Malformed or missing schedule data degrades to "closed" or
//! "feature disabled", never to an error.

pub mod conflict;
pub mod models;
pub mod slots;
pub mod time;
pub mod vacation;
pub mod work_window;

pub use models::{
    Appointment, AppointmentStatus, BreakWindow, Professional, ShiftHours, VacationSpan,
    VacationWindow, WorkInterval, WorkSchedule,
};
pub use time::LocalWallClock;
