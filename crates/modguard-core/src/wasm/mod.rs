pub mod imports;
pub mod read;
