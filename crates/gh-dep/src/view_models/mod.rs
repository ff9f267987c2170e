//! View models: display data computed from state, one per screen

pub mod pr_list_view_model;
pub mod results_view_model;

pub use pr_list_view_model::PrListViewModel;
pub use results_view_model::ResultsViewModel;
