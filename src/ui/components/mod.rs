pub mod chart;
pub mod history_table;
pub mod previous_line;
pub mod queue_preview;
pub mod typing_area;
