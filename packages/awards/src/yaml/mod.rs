//! YAML input and output for event, catalogue and event ID files.

mod reader;
mod writer;

pub use reader::{
    load_catalogue, load_event_file, load_event_ids, parse_catalogue_yaml, parse_event_ids_yaml,
    parse_event_yaml,
};
pub use writer::{
    generate_catalogue_yaml, generate_event_ids_yaml, generate_event_yaml, save_catalogue,
    save_event_file, save_event_ids, write_atomic,
};
