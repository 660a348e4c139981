mod card;

pub use card::{CardRecord, PaymentStatus};
