pub mod backoff;
pub mod company;
pub mod drift;
pub mod finance;
pub mod fund;
pub mod macros;
pub mod market;
pub mod reference;
