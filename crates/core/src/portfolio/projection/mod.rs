//! Monthly net worth projection from recurring templates.

mod projection_calculator;
mod projection_model;
mod projection_service;

pub use projection_calculator::{
    build_recurring_breakdown, generate_projection, project_future, project_year_to_date,
};
pub use projection_model::*;
pub use projection_service::{ProjectionService, ProjectionServiceTrait};
