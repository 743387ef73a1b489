#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod seed;
pub mod todo_service;
pub mod workout_service;

pub use workout_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, SeedError, TodoServiceError, WorkoutServiceError};
pub use seed::{SeedOutcome, default_program, seed_default_program, seed_program};
pub use todo_service::TodoService;
pub use workout_service::{
    CompleteSetRequest, DayOverview, SessionOverview, UpdateSessionRequest, WorkoutService,
};
