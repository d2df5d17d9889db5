//! Reading and writing presence-history files

pub mod history_file;

pub use history_file::{backup_history, default_backup_path, default_output_path, load_history, save_history};
