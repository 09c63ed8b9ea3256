pub mod cascade;
pub mod ensemble;
pub mod materials;
pub mod random;
pub mod stats;
