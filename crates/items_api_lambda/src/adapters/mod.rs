pub mod attribute_values;
#[cfg(test)]
pub mod memory;
pub mod record_store;
