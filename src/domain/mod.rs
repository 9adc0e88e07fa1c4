pub mod assembler;
pub mod catalog;
pub mod errors;
pub mod invoice;
pub mod order;
pub mod ports;
