pub mod app_reducer;
pub mod execution_reducer;
pub mod search_reducer;
pub mod selection_reducer;
