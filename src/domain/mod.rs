mod bill;
mod date;
mod due;
mod money;
mod validation;

pub use bill::*;
pub use date::*;
pub use due::*;
pub use money::*;
pub use validation::*;
