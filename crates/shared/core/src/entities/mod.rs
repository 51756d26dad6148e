mod execution;
mod price_point;
mod side;

pub use execution::{Execution, ExecutionId};
pub use price_point::PricePoint;
pub use side::Side;
