mod account;
mod baseline;
mod inflation;
mod installment;
mod money;
mod projection;
mod scenario;
mod transaction;

pub use account::*;
pub use baseline::*;
pub use inflation::*;
pub use installment::*;
pub use money::*;
pub use projection::*;
pub use scenario::*;
pub use transaction::*;
