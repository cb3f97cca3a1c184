mod loader;

pub use loader::{clean_indicator_name, load_dataset, Dataset, LoadError};
