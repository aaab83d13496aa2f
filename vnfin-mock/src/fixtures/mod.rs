pub mod company;
pub mod finance;
pub mod fund;
pub mod market;
pub mod reference;
