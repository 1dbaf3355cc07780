pub mod commands;
pub mod leads;
