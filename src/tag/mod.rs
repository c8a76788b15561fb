//! Tag management for labelling receipts.

mod db;
mod domain;

pub use db::{
    add_tag, count_tag_usage, delete_tag, get_all_tags, get_tag, get_tag_usage, rename_tag,
};
pub use domain::{Tag, TagUsage};
