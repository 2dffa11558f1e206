pub mod admin;
pub mod meta;
pub mod record;

pub use admin::{BasicModelAdmin, ModelAdmin};
pub use meta::{FieldDescriptor, ModelMeta};
pub use record::Record;
