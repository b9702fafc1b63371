pub mod keyvec;
pub mod peek;
